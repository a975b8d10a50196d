//! 命令层统一错误定义
//!
//! 仅覆盖调用方传入参数与命令参数类型不一致的情形。
//! 缺少执行动作/判定函数不是错误（按默认规则处理）；
//! 执行动作或判定函数内部的 panic 原样向调用方传播，这里不做包装。
//!
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// 类型擦除的参数无法还原为命令声明的参数类型
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// 带参命令收到了空参数
    #[error("missing parameter: expected={expected}")]
    MissingParameter { expected: &'static str },

    /// 参数可识别但无法转换为命令声明的参数类型
    #[error("invalid argument: expected={expected}, reason={reason}")]
    InvalidArgument {
        expected: &'static str,
        reason: String,
    },
}

/// 统一 Result 类型别名
pub type CommandResult<T> = Result<T, CommandError>;

impl CommandError {
    pub(crate) fn invalid_argument<T>(reason: impl ToString) -> Self {
        CommandError::InvalidArgument {
            expected: std::any::type_name::<T>(),
            reason: reason.to_string(),
        }
    }
}
