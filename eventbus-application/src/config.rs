//! 启动期声明式装配
//!
//! 以声明方式描述各限界上下文及其订阅关系，交由
//! `DomainEventBus::builder().contexts(...)` 一次性装配。
//! 同名上下文声明按出现顺序合并，订阅按声明顺序注册。
//!
use crate::subscription::SubscribeOptions;
use eventbus_domain::handler::EventHandler;
use std::sync::Arc;

/// 一条订阅声明：事件类型 + 处理器 + 注册选项
pub struct Subscription {
    event_type: String,
    handler: Arc<dyn EventHandler>,
    options: SubscribeOptions,
}

impl Subscription {
    pub fn new(
        event_type: impl Into<String>,
        handler: Arc<dyn EventHandler>,
        options: SubscribeOptions,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            handler,
            options,
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn handler(&self) -> &Arc<dyn EventHandler> {
        &self.handler
    }

    pub fn options(&self) -> SubscribeOptions {
        self.options
    }

    pub(crate) fn into_parts(self) -> (String, Arc<dyn EventHandler>, SubscribeOptions) {
        (self.event_type, self.handler, self.options)
    }
}

/// 单个限界上下文的装配声明
pub struct ContextConfig {
    name: String,
    subscriptions: Vec<Subscription>,
}

impl ContextConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subscriptions: Vec::new(),
        }
    }

    /// 追加一条订阅声明（链式）
    pub fn subscribe(
        mut self,
        event_type: impl Into<String>,
        handler: Arc<dyn EventHandler>,
        options: SubscribeOptions,
    ) -> Self {
        self.subscriptions
            .push(Subscription::new(event_type, handler, options));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Subscription>) {
        (self.name, self.subscriptions)
    }
}
