//! 命令能力集（RelayCommand）
//!
//! UI 绑定层面向的统一接口：查询是否可执行、执行、订阅/广播可执行状态变更。
//! `Command` 以 `P = ()` 实现，`ParameterizedCommand<T>` 以 `P = T` 实现。
//!
use crate::notifier::{CanExecuteChanged, CanExecuteListener, SubscriptionId};
use std::rc::Rc;

pub trait RelayCommand<P> {
    /// 当前是否允许执行
    fn can_execute(&self, parameter: &P) -> bool;

    /// 执行命令。不会检查 `can_execute`，由调用方决定是否先行查询
    fn execute(&self, parameter: P);

    /// 可执行状态变更事件
    fn can_execute_changed(&self) -> &CanExecuteChanged;

    #[must_use = "keep the id to unsubscribe the listener later"]
    fn subscribe<L>(&self, listener: L) -> SubscriptionId
    where
        L: CanExecuteListener + 'static,
        Self: Sized,
    {
        self.can_execute_changed().subscribe(listener)
    }

    /// 弱引用登记，命令不延长 `listener` 的生命周期
    #[must_use = "keep the id to unsubscribe the listener later"]
    fn subscribe_weak<L>(&self, listener: &Rc<L>) -> SubscriptionId
    where
        L: CanExecuteListener + 'static,
        Self: Sized,
    {
        self.can_execute_changed().subscribe_weak(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.can_execute_changed().unsubscribe(id)
    }

    /// 通知监听者重新查询 `can_execute`
    fn raise_can_execute_changed(&self) {
        self.can_execute_changed().notify()
    }

    /// 先查询再执行，返回是否真正执行了
    fn execute_if_enabled(&self, parameter: P) -> bool {
        if self.can_execute(&parameter) {
            self.execute(parameter);
            true
        } else {
            false
        }
    }
}
