//! 订阅登记项
//!
//! - `SubscribeOptions`：注册处理器时的优先级与执行模式；
//! - `HandlerEntry`：登记表内保存的处理器条目，连同注册时的选项。
//!
use bon::Builder;
use eventbus_domain::handler::{EventHandler, HandlerMode};
use std::sync::Arc;

/// 默认优先级（未显式指定时使用）
pub const DEFAULT_PRIORITY: i32 = 100;

/// 注册处理器时的可选项
///
/// 优先级数值越小越先执行；相同优先级按注册顺序执行。
#[derive(Builder, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscribeOptions {
    #[builder(default = DEFAULT_PRIORITY)]
    priority: i32,
    #[builder(default)]
    mode: HandlerMode,
}

impl SubscribeOptions {
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn mode(&self) -> HandlerMode {
        self.mode
    }
}

impl Default for SubscribeOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// 登记表条目：处理器及其注册选项的快照
#[derive(Clone)]
pub struct HandlerEntry {
    handler: Arc<dyn EventHandler>,
    priority: i32,
    mode: HandlerMode,
}

impl HandlerEntry {
    pub fn new(handler: Arc<dyn EventHandler>, options: SubscribeOptions) -> Self {
        Self {
            handler,
            priority: options.priority(),
            mode: options.mode(),
        }
    }

    pub fn handler(&self) -> &Arc<dyn EventHandler> {
        &self.handler
    }

    /// 处理器名称（用于同名替换与失败标记）
    pub fn handler_name(&self) -> &str {
        self.handler.handler_name()
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn mode(&self) -> HandlerMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventbus_domain::domain_event::DomainEvent;
    use eventbus_domain::handler::FnHandler;

    #[test]
    fn options_default_to_sync_at_base_priority() {
        let options = SubscribeOptions::default();
        assert_eq!(options.priority(), DEFAULT_PRIORITY);
        assert_eq!(options.mode(), HandlerMode::Sync);
    }

    #[test]
    fn options_builder_overrides_fields() {
        let options = SubscribeOptions::builder()
            .priority(10)
            .mode(HandlerMode::Async)
            .build();
        assert_eq!(options.priority(), 10);
        assert_eq!(options.mode(), HandlerMode::Async);
    }

    #[test]
    fn entry_forwards_handler_name_and_options() {
        let handler = Arc::new(FnHandler::new("audit_log", |_event: DomainEvent| async move {
            Ok(())
        }));
        let entry = HandlerEntry::new(handler, SubscribeOptions::builder().priority(5).build());
        assert_eq!(entry.handler_name(), "audit_log");
        assert_eq!(entry.priority(), 5);
        assert_eq!(entry.mode(), HandlerMode::Sync);
    }
}
