//! 命令基础库（relay-command）
//!
//! 把 UI 触发源（按钮、菜单项、快捷键）与被触发的逻辑解耦：
//! - `Command`：无参执行动作 + 可选的无参可执行判定；
//! - `ParameterizedCommand<T>`：单参执行动作 + 可选的单参判定，处理槽可换绑；
//! - `RelayCommand<P>`：两者共享的能力集（查询、执行、订阅、广播）；
//! - `CanExecuteChanged`：可执行状态变更通知，显式订阅句柄或弱引用登记；
//! - `AnyCommand`：面向 UI 绑定层的类型擦除边界。
//!
//! 本 crate 单线程、同步执行，内部不加锁；跨线程使用需由调用方同步。
//! 何时广播状态变更由宿主决定，命令本身不检测启用条件的变化。
//!
//! 典型用法：
//! 1. 视图模型以 `Rc` 持有命令；
//! 2. UI 绑定层订阅 `CanExecuteChanged`，收到通知后重新查询 `can_execute`；
//! 3. 用户触发时调用 `execute`；
//! 4. 视图模型状态变化后调用 `raise_can_execute_changed`。
//!
pub mod command;
pub mod erased;
pub mod error;
pub mod handlers;
pub mod notifier;
pub mod parameterized;
pub mod relay;

pub use command::Command;
pub use erased::AnyCommand;
pub use error::{CommandError, CommandResult};
pub use handlers::{CanExecuteFn, CommandHandlers, ExecuteFn};
pub use notifier::{CanExecuteChanged, CanExecuteListener, SubscriptionId};
pub use parameterized::ParameterizedCommand;
pub use relay::RelayCommand;
