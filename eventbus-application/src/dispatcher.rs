//! 派发执行器
//!
//! 在调用方任务内按快照顺序依次执行处理器：
//! - 处理器返回 `Err` 记为失败，继续执行后续处理器；
//! - 处理器 panic 被捕获并转换为失败记录，派发流程不中断；
//! - 失败按执行顺序聚合，交由总线决定是否上抛。
//!
use crate::subscription::HandlerEntry;
use eventbus_domain::domain_event::DomainEvent;
use eventbus_domain::error::HandlerFailure;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;

/// 依次执行处理器快照，返回按执行顺序聚合的失败记录
///
/// 快照应已按优先级排序；`HandlerMode::Async` 当前与 `Sync`
/// 走同一内联路径。
pub async fn execute(entries: &[HandlerEntry], event: &DomainEvent) -> Vec<HandlerFailure> {
    let mut failures = Vec::new();

    for entry in entries {
        let outcome = AssertUnwindSafe(entry.handler().handle(event))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(
                    "event handler failed: event_type={}, handler={}, reason={}",
                    event.event_type(),
                    entry.handler_name(),
                    err
                );
                failures.push(HandlerFailure::new(entry.handler_name(), err.to_string()));
            }
            Err(panic) => {
                let reason = panic_reason(panic);
                tracing::error!(
                    "event handler panicked: event_type={}, handler={}, reason={}",
                    event.event_type(),
                    entry.handler_name(),
                    reason
                );
                failures.push(HandlerFailure::new(entry.handler_name(), reason));
            }
        }
    }

    failures
}

// 从 panic 载荷提取可读原因
fn panic_reason(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("handler panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("handler panicked: {s}")
    } else {
        "handler panicked".to_string()
    }
}
