//! 总线统一错误定义
//!
//! 聚焦上下文路由与处理器失败聚合的最小必要集合，
//! 便于调用方以单一 `BusError` 类型处理所有派发结果。
//!
use std::fmt;
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BusError {
    // --- 路由 ---
    #[error("unknown context: {context}")]
    UnknownContext { context: String },

    // --- 派发 ---
    #[error("event dispatch failed: {} handler(s) reported errors", .failures.len())]
    HandlersFailed { failures: Vec<HandlerFailure> },
}

/// 统一 Result 类型别名
pub type BusResult<T> = Result<T, BusError>;

/// 单个处理器的失败记录
///
/// 记录处理器名称与失败原因，按执行顺序聚合进 `BusError::HandlersFailed`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    handler: String,
    reason: String,
}

impl HandlerFailure {
    pub fn new(handler: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            handler: handler.into(),
            reason: reason.into(),
        }
    }

    /// 处理器名称
    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// 失败原因
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler={}, reason={}", self.handler, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_context_formats_name() {
        let err = BusError::UnknownContext {
            context: "Billing".to_string(),
        };
        assert_eq!(err.to_string(), "unknown context: Billing");
    }

    #[test]
    fn handlers_failed_counts_failures() {
        let err = BusError::HandlersFailed {
            failures: vec![
                HandlerFailure::new("audit_log", "db_down"),
                HandlerFailure::new("mailer", "smtp timeout"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "event dispatch failed: 2 handler(s) reported errors"
        );
    }

    #[test]
    fn failure_display_carries_handler_and_reason() {
        let failure = HandlerFailure::new("audit_log", "db_down");
        assert_eq!(failure.to_string(), "handler=audit_log, reason=db_down");
        assert_eq!(failure.handler(), "audit_log");
        assert_eq!(failure.reason(), "db_down");
    }
}
