//! 带参命令（ParameterizedCommand）
//!
//! 执行动作与判定都接收调用方在调用时提供的 `T` 类型参数。
//! 与无参命令不同，处理槽在构造后仍可换绑（`set_execute` / `set_can_execute`）；
//! 换绑不会自动广播变更，需要时由调用方调用 `raise_can_execute_changed`。
//!
//! 参数转换由调用方负责：`execute`/`can_execute` 只接收 `T`；
//! `try_execute`/`try_can_execute` 通过 `TryFrom` 在边界处转换，失败时返回
//! [`CommandError::InvalidArgument`]，不会调用处理槽。
//!
//! ```
//! use relay_command::ParameterizedCommand;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let opened = Rc::new(RefCell::new(Vec::new()));
//! let sink = opened.clone();
//! let open = ParameterizedCommand::with_can_execute(
//!     move |page: u32| sink.borrow_mut().push(page),
//!     |page: &u32| *page > 0,
//! );
//!
//! assert!(open.can_execute(&3));
//! assert!(!open.can_execute(&0));
//! open.execute(3);
//! assert_eq!(*opened.borrow(), vec![3]);
//! ```
//!
use crate::error::{CommandError, CommandResult};
use crate::handlers::CommandHandlers;
use crate::notifier::CanExecuteChanged;
use crate::relay::RelayCommand;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// 带参命令
pub struct ParameterizedCommand<T> {
    handlers: RefCell<CommandHandlers<T>>,
    changed: CanExecuteChanged,
}

impl<T> ParameterizedCommand<T> {
    /// 只有执行动作：任意参数都可执行
    pub fn new<E>(execute: E) -> Self
    where
        E: Fn(T) + 'static,
    {
        Self::from_handlers(CommandHandlers::builder().execute(Rc::new(execute)).build())
    }

    /// 执行动作与判定
    pub fn with_can_execute<E, C>(execute: E, can_execute: C) -> Self
    where
        E: Fn(T) + 'static,
        C: Fn(&T) -> bool + 'static,
    {
        Self::from_handlers(
            CommandHandlers::builder()
                .execute(Rc::new(execute))
                .can_execute(Rc::new(can_execute))
                .build(),
        )
    }

    /// 只有判定
    pub fn when<C>(can_execute: C) -> Self
    where
        C: Fn(&T) -> bool + 'static,
    {
        Self::from_handlers(
            CommandHandlers::builder()
                .can_execute(Rc::new(can_execute))
                .build(),
        )
    }

    pub fn from_handlers(handlers: CommandHandlers<T>) -> Self {
        Self {
            handlers: RefCell::new(handlers),
            changed: CanExecuteChanged::new(),
        }
    }

    pub fn can_execute(&self, value: &T) -> bool {
        // 先取出处理槽再调用，允许判定内部换绑本命令
        let handlers = self.handlers();
        handlers.can_execute(value)
    }

    pub fn execute(&self, value: T) {
        let action = self.handlers.borrow().execute_fn();
        tracing::trace!(has_execute = action.is_some(), "execute parameterized command");
        if let Some(action) = action {
            action(value);
        }
    }

    /// 在边界处把 `P` 转换为 `T` 后查询
    pub fn try_can_execute<P>(&self, parameter: P) -> CommandResult<bool>
    where
        T: TryFrom<P>,
        <T as TryFrom<P>>::Error: fmt::Display,
    {
        let value = convert::<T, P>(parameter)?;
        Ok(self.can_execute(&value))
    }

    /// 在边界处把 `P` 转换为 `T` 后执行；转换失败时不调用执行动作
    pub fn try_execute<P>(&self, parameter: P) -> CommandResult<()>
    where
        T: TryFrom<P>,
        <T as TryFrom<P>>::Error: fmt::Display,
    {
        let value = convert::<T, P>(parameter)?;
        self.execute(value);
        Ok(())
    }

    /// 换绑执行动作
    pub fn set_execute<E>(&self, execute: E)
    where
        E: Fn(T) + 'static,
    {
        tracing::debug!("rebind execute action");
        self.handlers
            .borrow_mut()
            .set_execute(Some(Rc::new(execute)));
    }

    /// 换绑判定
    pub fn set_can_execute<C>(&self, can_execute: C)
    where
        C: Fn(&T) -> bool + 'static,
    {
        tracing::debug!("rebind can-execute predicate");
        self.handlers
            .borrow_mut()
            .set_can_execute(Some(Rc::new(can_execute)));
    }

    pub fn clear_execute(&self) {
        tracing::debug!("clear execute action");
        self.handlers.borrow_mut().set_execute(None);
    }

    pub fn clear_can_execute(&self) {
        tracing::debug!("clear can-execute predicate");
        self.handlers.borrow_mut().set_can_execute(None);
    }

    /// 当前处理槽的快照
    pub fn handlers(&self) -> CommandHandlers<T> {
        self.handlers.borrow().clone()
    }
}

fn convert<T, P>(parameter: P) -> CommandResult<T>
where
    T: TryFrom<P>,
    <T as TryFrom<P>>::Error: fmt::Display,
{
    T::try_from(parameter).map_err(CommandError::invalid_argument::<T>)
}

impl<T> Default for ParameterizedCommand<T> {
    fn default() -> Self {
        Self::from_handlers(CommandHandlers::default())
    }
}

impl<T> RelayCommand<T> for ParameterizedCommand<T> {
    fn can_execute(&self, parameter: &T) -> bool {
        ParameterizedCommand::can_execute(self, parameter)
    }

    fn execute(&self, parameter: T) {
        ParameterizedCommand::execute(self, parameter)
    }

    fn can_execute_changed(&self) -> &CanExecuteChanged {
        &self.changed
    }
}

impl<T> fmt::Debug for ParameterizedCommand<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterizedCommand")
            .field("parameter", &std::any::type_name::<T>())
            .field("handlers", &*self.handlers.borrow())
            .field("changed", &self.changed)
            .finish()
    }
}
