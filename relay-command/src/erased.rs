//! 类型擦除的命令边界（AnyCommand）
//!
//! UI 绑定层通常只持有 `dyn AnyCommand`，以 `Option<&dyn Any>` 传递参数。
//! 这里只做类型检查：参数必须正好是命令声明的 `T`，否则返回
//! [`CommandError::TypeMismatch`]；其它转换由 UI 层在传入前完成。
//! 无参命令忽略参数。
//!
use crate::command::Command;
use crate::error::{CommandError, CommandResult};
use crate::notifier::SubscriptionId;
use crate::parameterized::ParameterizedCommand;
use crate::relay::RelayCommand;
use std::any::{Any, type_name};
use std::rc::Rc;

pub trait AnyCommand {
    /// 命令参数类型名（用于日志与错误信息）
    fn parameter_type(&self) -> &'static str;

    fn can_execute_any(&self, parameter: Option<&dyn Any>) -> CommandResult<bool>;

    fn execute_any(&self, parameter: Option<&dyn Any>) -> CommandResult<()>;

    #[must_use = "keep the id to unsubscribe the listener later"]
    fn subscribe_any(&self, listener: Rc<dyn Fn()>) -> SubscriptionId;

    fn unsubscribe_any(&self, id: SubscriptionId) -> bool;

    fn raise_can_execute_changed_any(&self);
}

impl AnyCommand for Command {
    fn parameter_type(&self) -> &'static str {
        type_name::<()>()
    }

    fn can_execute_any(&self, _parameter: Option<&dyn Any>) -> CommandResult<bool> {
        Ok(self.can_execute())
    }

    fn execute_any(&self, _parameter: Option<&dyn Any>) -> CommandResult<()> {
        self.execute();
        Ok(())
    }

    fn subscribe_any(&self, listener: Rc<dyn Fn()>) -> SubscriptionId {
        self.subscribe(move || listener())
    }

    fn unsubscribe_any(&self, id: SubscriptionId) -> bool {
        self.unsubscribe(id)
    }

    fn raise_can_execute_changed_any(&self) {
        self.raise_can_execute_changed()
    }
}

impl<T> AnyCommand for ParameterizedCommand<T>
where
    T: Clone + 'static,
{
    fn parameter_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn can_execute_any(&self, parameter: Option<&dyn Any>) -> CommandResult<bool> {
        let value = downcast::<T>(parameter)?;
        Ok(self.can_execute(value))
    }

    fn execute_any(&self, parameter: Option<&dyn Any>) -> CommandResult<()> {
        let value = downcast::<T>(parameter)?.clone();
        self.execute(value);
        Ok(())
    }

    fn subscribe_any(&self, listener: Rc<dyn Fn()>) -> SubscriptionId {
        self.subscribe(move || listener())
    }

    fn unsubscribe_any(&self, id: SubscriptionId) -> bool {
        self.unsubscribe(id)
    }

    fn raise_can_execute_changed_any(&self) {
        self.raise_can_execute_changed()
    }
}

fn downcast<T: 'static>(parameter: Option<&dyn Any>) -> CommandResult<&T> {
    let Some(parameter) = parameter else {
        return Err(CommandError::MissingParameter {
            expected: type_name::<T>(),
        });
    };

    parameter.downcast_ref::<T>().ok_or(CommandError::TypeMismatch {
        expected: type_name::<T>(),
        found: describe(parameter),
    })
}

// `dyn Any` 拿不到具体类型名，只对常见的 UI 参数类型给出可读名称
fn describe(parameter: &dyn Any) -> &'static str {
    macro_rules! name_if {
        ($($ty:ty),* $(,)?) => {
            $(if parameter.is::<$ty>() {
                return type_name::<$ty>();
            })*
        };
    }

    name_if!(
        (),
        bool,
        char,
        i8,
        i16,
        i32,
        i64,
        i128,
        isize,
        u8,
        u16,
        u32,
        u64,
        u128,
        usize,
        f32,
        f64,
        String,
        &'static str,
    );
    "unknown"
}
