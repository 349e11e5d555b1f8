//! 事件处理器（EventHandler）
//!
//! 定义消费领域事件的处理协议与注册模式：
//! - `EventHandler`：处理器名称 + 异步处理入口；
//! - `HandlerMode`：同步/异步注册模式，异步目前与同步走同一执行路径；
//! - `FnHandler`：将具名闭包适配为处理器，供测试与动态注册使用。
//!
//! 失败策略由处理器自行决定：返回 `Err` 表示向调用方传播失败；
//! 内部捕获并返回 `Ok` 表示吞掉尽力而为型副作用的失败。
//!
use crate::domain_event::DomainEvent;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// 处理器注册模式
///
/// `Async` 为前向兼容而保留：注册与存储均被接受，当前执行与 `Sync`
/// 完全一致；未来的后台执行扩展不需要改动注册 API。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerMode {
    /// 在调用方执行流中同步执行（默认）
    #[default]
    Sync,
    /// 预留：后台异步执行，目前按 `Sync` 处理
    Async,
}

/// 事件处理器：处理某一类型的事件
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// 处理器名称（用于失败标记、同名替换与审计）
    fn handler_name(&self) -> &str;

    /// 处理事件
    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()>;
}

type BoxedHandlerFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

type BoxedHandlerFn = Box<dyn Fn(DomainEvent) -> BoxedHandlerFuture + Send + Sync>;

/// 闭包适配器：以具名闭包实现 `EventHandler`
///
/// 事件以克隆方式传入闭包，闭包可安全地移入异步块。
pub struct FnHandler {
    name: String,
    f: BoxedHandlerFn,
}

impl FnHandler {
    pub fn new<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(DomainEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            f: Box::new(move |event| Box::pin(f(event))),
        }
    }
}

#[async_trait]
impl EventHandler for FnHandler {
    fn handler_name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()> {
        (self.f)(event.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(flavor = "multi_thread")]
    async fn fn_handler_invokes_closure() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let handler = FnHandler::new("seen_counter", move |event: DomainEvent| {
            let counter = counter.clone();
            async move {
                assert_eq!(event.event_type(), "message_sent");
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        let event = DomainEvent::new("message_sent", "msg-1", Value::Null);
        handler.handle(&event).await.unwrap();

        assert_eq!(handler.handler_name(), "seen_counter");
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fn_handler_propagates_error() {
        let handler = FnHandler::new("always_fails", |_event: DomainEvent| async move {
            anyhow::bail!("db_down")
        });

        let event = DomainEvent::new("user_anonymized", "user-7", Value::Null);
        let err = handler.handle(&event).await.unwrap_err();
        assert_eq!(err.to_string(), "db_down");
    }

    #[test]
    fn mode_serializes_snake_case() {
        assert_eq!(serde_json::to_value(HandlerMode::Sync).unwrap(), Value::from("sync"));
        assert_eq!(serde_json::to_value(HandlerMode::Async).unwrap(), Value::from("async"));
    }
}
