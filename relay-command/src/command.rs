//! 无参命令（Command）
//!
//! 包装一个无参执行动作与一个可选的无参判定。构造后处理槽不可再改变，
//! 需要运行期换绑行为时使用 [`ParameterizedCommand`](crate::ParameterizedCommand)。
//!
//! ```
//! use relay_command::Command;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let clicks = Rc::new(Cell::new(0));
//! let counter = clicks.clone();
//! let save = Command::new(move || counter.set(counter.get() + 1));
//!
//! assert!(save.can_execute());
//! save.execute();
//! assert_eq!(clicks.get(), 1);
//! ```
//!
use crate::handlers::CommandHandlers;
use crate::notifier::CanExecuteChanged;
use crate::relay::RelayCommand;
use std::fmt;
use std::rc::Rc;

/// 无参命令
#[derive(Default)]
pub struct Command {
    handlers: CommandHandlers<()>,
    changed: CanExecuteChanged,
}

impl Command {
    /// 只有执行动作：恒可执行
    pub fn new<E>(execute: E) -> Self
    where
        E: Fn() + 'static,
    {
        Self::from_handlers(
            CommandHandlers::builder()
                .execute(Rc::new(move |()| execute()))
                .build(),
        )
    }

    /// 执行动作与判定
    pub fn with_can_execute<E, C>(execute: E, can_execute: C) -> Self
    where
        E: Fn() + 'static,
        C: Fn() -> bool + 'static,
    {
        Self::from_handlers(
            CommandHandlers::builder()
                .execute(Rc::new(move |()| execute()))
                .can_execute(Rc::new(move |_: &()| can_execute()))
                .build(),
        )
    }

    /// 只有判定：执行为空操作，启用状态完全取决于判定
    pub fn when<C>(can_execute: C) -> Self
    where
        C: Fn() -> bool + 'static,
    {
        Self::from_handlers(
            CommandHandlers::builder()
                .can_execute(Rc::new(move |_: &()| can_execute()))
                .build(),
        )
    }

    pub fn from_handlers(handlers: CommandHandlers<()>) -> Self {
        Self {
            handlers,
            changed: CanExecuteChanged::new(),
        }
    }

    pub fn can_execute(&self) -> bool {
        self.handlers.can_execute(&())
    }

    pub fn execute(&self) {
        tracing::trace!(has_execute = self.handlers.has_execute(), "execute command");
        self.handlers.execute(())
    }

    pub fn handlers(&self) -> &CommandHandlers<()> {
        &self.handlers
    }
}

impl RelayCommand<()> for Command {
    fn can_execute(&self, _parameter: &()) -> bool {
        Command::can_execute(self)
    }

    fn execute(&self, _parameter: ()) {
        Command::execute(self)
    }

    fn can_execute_changed(&self) -> &CanExecuteChanged {
        &self.changed
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("handlers", &self.handlers)
            .field("changed", &self.changed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting() -> (Rc<Cell<usize>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, move || c.set(c.get() + 1))
    }

    // 只有执行动作：可执行，执行一次调用一次
    #[test]
    fn test_execute_only() {
        let (count, action) = counting();
        let cmd = Command::new(action);

        assert!(cmd.can_execute());
        cmd.execute();
        assert_eq!(count.get(), 1);
        cmd.execute();
        assert_eq!(count.get(), 2);
    }

    // 空命令：不可执行，执行为空操作
    #[test]
    fn test_default_command_is_disabled() {
        let cmd = Command::default();
        assert!(!cmd.can_execute());
        cmd.execute();
        assert!(!cmd.handlers().has_execute());
    }

    // 判定为 false 时 execute 仍然调用动作
    #[test]
    fn test_execute_ignores_predicate() {
        let (count, action) = counting();
        let cmd = Command::with_can_execute(action, || false);

        assert!(!cmd.can_execute());
        cmd.execute();
        assert_eq!(count.get(), 1);
    }

    // 只有判定：启用状态跟随判定
    #[test]
    fn test_predicate_only() {
        let enabled = Rc::new(Cell::new(true));
        let enabled_now = enabled.clone();
        let cmd = Command::when(move || enabled_now.get());

        assert!(cmd.can_execute());
        enabled.set(false);
        assert!(!cmd.can_execute());
        cmd.execute();
    }

    // execute_if_enabled 只在可执行时执行
    #[test]
    fn test_execute_if_enabled() {
        let enabled = Rc::new(Cell::new(false));
        let enabled_now = enabled.clone();
        let (count, action) = counting();
        let cmd = Command::with_can_execute(action, move || enabled_now.get());

        assert!(!cmd.execute_if_enabled(()));
        assert_eq!(count.get(), 0);

        enabled.set(true);
        assert!(cmd.execute_if_enabled(()));
        assert_eq!(count.get(), 1);
    }

    // 通过 trait 订阅与广播
    #[test]
    fn test_notify_through_trait() {
        let (count, listener) = counting();
        let cmd = Command::new(|| {});
        let id = RelayCommand::subscribe(&cmd, listener);

        RelayCommand::raise_can_execute_changed(&cmd);
        assert_eq!(count.get(), 1);

        assert!(RelayCommand::unsubscribe(&cmd, id));
        cmd.raise_can_execute_changed();
        assert_eq!(count.get(), 1);
    }

    // 监听者在回调中重新查询命令
    #[test]
    fn test_listener_can_query_command() {
        let enabled = Rc::new(Cell::new(false));
        let enabled_now = enabled.clone();
        let cmd = Rc::new(Command::when(move || enabled_now.get()));

        let observed = Rc::new(Cell::new(None));
        let sink = observed.clone();
        let weak_cmd = Rc::downgrade(&cmd);
        let _id = cmd.subscribe(move || {
            if let Some(cmd) = weak_cmd.upgrade() {
                sink.set(Some(cmd.can_execute()));
            }
        });

        enabled.set(true);
        cmd.raise_can_execute_changed();
        assert_eq!(observed.get(), Some(true));
    }

    // 动作中的 panic 原样传播给调用方
    #[test]
    #[should_panic(expected = "save failed")]
    fn test_action_panic_propagates() {
        let cmd = Command::new(|| panic!("save failed"));
        cmd.execute();
    }
}
