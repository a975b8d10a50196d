//! 命令处理槽（CommandHandlers）
//!
//! 两种命令共享的分派核心：一个执行动作槽、一个可执行判定槽，以及
//! “有判定用判定，否则看是否存在执行动作”的启用规则。
//! 无参命令即 `CommandHandlers<()>`。
//!
use bon::Builder;
use std::fmt;
use std::rc::Rc;

/// 执行动作
pub type ExecuteFn<T> = Rc<dyn Fn(T)>;

/// 可执行判定
pub type CanExecuteFn<T> = Rc<dyn Fn(&T) -> bool>;

/// 命令的两个处理槽，任一槽都可以缺省
///
/// ```
/// use relay_command::CommandHandlers;
/// use std::rc::Rc;
///
/// let handlers = CommandHandlers::<i32>::builder()
///     .can_execute(Rc::new(|x: &i32| *x > 0))
///     .build();
///
/// assert!(handlers.can_execute(&1));
/// assert!(!handlers.can_execute(&-1));
/// assert!(!handlers.has_execute());
/// ```
#[derive(Builder)]
pub struct CommandHandlers<T> {
    execute: Option<ExecuteFn<T>>,
    can_execute: Option<CanExecuteFn<T>>,
}

impl<T> CommandHandlers<T> {
    /// 启用规则：判定存在时完全以判定结果为准；否则存在执行动作即可执行
    pub fn can_execute(&self, value: &T) -> bool {
        match &self.can_execute {
            Some(predicate) => predicate(value),
            None => self.execute.is_some(),
        }
    }

    /// 调用执行动作；缺少执行动作时什么也不做
    pub fn execute(&self, value: T) {
        if let Some(action) = &self.execute {
            action(value);
        }
    }

    pub fn has_execute(&self) -> bool {
        self.execute.is_some()
    }

    pub fn has_can_execute(&self) -> bool {
        self.can_execute.is_some()
    }

    pub(crate) fn execute_fn(&self) -> Option<ExecuteFn<T>> {
        self.execute.clone()
    }

    pub(crate) fn set_execute(&mut self, action: Option<ExecuteFn<T>>) {
        self.execute = action;
    }

    pub(crate) fn set_can_execute(&mut self, predicate: Option<CanExecuteFn<T>>) {
        self.can_execute = predicate;
    }
}

// 不要求 T: Clone / T: Default，手动实现
impl<T> Clone for CommandHandlers<T> {
    fn clone(&self) -> Self {
        Self {
            execute: self.execute.clone(),
            can_execute: self.can_execute.clone(),
        }
    }
}

impl<T> Default for CommandHandlers<T> {
    fn default() -> Self {
        Self {
            execute: None,
            can_execute: None,
        }
    }
}

impl<T> fmt::Debug for CommandHandlers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandHandlers")
            .field("execute", &self.has_execute())
            .field("can_execute", &self.has_can_execute())
            .finish()
    }
}
