//! 领域事件总线（DomainEventBus）
//!
//! 以限界上下文为单位路由领域事件的进程内门面：
//! - 启动期以声明式配置装配各上下文登记表，上下文集合装配后固定；
//! - `dispatch` 在调用方任务内按优先级顺序执行处理器并聚合失败；
//! - `subscribe` 在运行期向已装配的上下文补充注册处理器；
//! - `ContextBus` 提供绑定单一上下文的便捷视图。
//!
use crate::config::ContextConfig;
use crate::dispatcher;
use crate::registry::ContextRegistry;
use crate::subscription::SubscribeOptions;
use bon::Builder;
use eventbus_domain::domain_event::DomainEvent;
use eventbus_domain::error::{BusError, BusResult};
use eventbus_domain::handler::EventHandler;
use std::collections::HashMap;
use std::sync::Arc;

// 导入由 bon::Builder 生成的 typestate 模块与状态转换别名
use self::domain_event_bus_builder::{IsUnset, SetRegistries, State as BuilderState};

/// DomainEventBus：
/// - 每个上下文持有独立登记表，事件不跨上下文扩散
/// - 派发与注册可在并发环境下交错进行
#[derive(Builder)]
pub struct DomainEventBus {
    #[builder(setters(vis = "pub(crate)"))]
    registries: HashMap<String, ContextRegistry>,
}

impl<S: BuilderState> DomainEventBusBuilder<S> {
    /// 以声明式配置装配各上下文登记表
    ///
    /// 同名上下文声明按出现顺序合并；订阅按声明顺序注册，
    /// 同名处理器沿用替换语义。
    pub fn contexts(self, contexts: Vec<ContextConfig>) -> DomainEventBusBuilder<SetRegistries<S>>
    where
        <S as BuilderState>::Registries: IsUnset,
    {
        let mut registries: HashMap<String, ContextRegistry> = HashMap::new();

        for config in contexts {
            let (name, subscriptions) = config.into_parts();
            let registry = registries
                .entry(name.clone())
                .or_insert_with(|| ContextRegistry::new(name));

            for subscription in subscriptions {
                let (event_type, handler, options) = subscription.into_parts();
                registry.register(event_type, handler, options);
            }
        }

        self.registries(registries)
    }
}

// 自定义 Builder 方法：接收声明式配置，合并为各上下文登记表后设置到 registries 字段。
// 受 typestate 限制，仅当 `registries` 尚未设置时可调用；重复设置会在编译期报错。

impl DomainEventBus {
    /// 将事件派发给指定上下文中注册的处理器
    ///
    /// 在调用方任务内按优先级顺序依次执行；无处理器登记时视为成功。
    /// 单个处理器失败或 panic 不阻断其余处理器，全部失败聚合为
    /// `BusError::HandlersFailed` 上抛。
    pub async fn dispatch(&self, context: &str, event: &DomainEvent) -> BusResult<()> {
        let registry = self.registry(context)?;
        let entries = registry.handlers_for(event.event_type());

        if entries.is_empty() {
            tracing::debug!(
                "no handler registered: context={}, event_type={}",
                context,
                event.event_type()
            );
            return Ok(());
        }

        tracing::debug!(
            "dispatching event: context={}, event_type={}, handlers={}",
            context,
            event.event_type(),
            entries.len()
        );

        let failures = dispatcher::execute(&entries, event).await;
        if failures.is_empty() {
            Ok(())
        } else {
            Err(BusError::HandlersFailed { failures })
        }
    }

    /// 运行期向指定上下文补充注册处理器；未知上下文返回错误
    pub fn subscribe(
        &self,
        context: &str,
        event_type: impl Into<String>,
        handler: Arc<dyn EventHandler>,
        options: SubscribeOptions,
    ) -> BusResult<()> {
        self.registry(context)?
            .register(event_type, handler, options);
        Ok(())
    }

    /// 取出某上下文的登记表
    pub fn registry(&self, context: &str) -> BusResult<&ContextRegistry> {
        let Some(registry) = self.registries.get(context) else {
            return Err(BusError::UnknownContext {
                context: context.to_string(),
            });
        };
        Ok(registry)
    }

    /// 已装配的上下文名称（顺序未定义）
    pub fn context_names(&self) -> Vec<&str> {
        self.registries.keys().map(String::as_str).collect()
    }
}

/// 绑定单一上下文的总线视图
///
/// 供某个限界上下文内的组件持有，免去每次传入上下文名称。
#[derive(Clone)]
pub struct ContextBus {
    bus: Arc<DomainEventBus>,
    context: String,
}

impl ContextBus {
    /// 绑定到已装配的上下文；未知上下文返回错误
    pub fn bind(bus: Arc<DomainEventBus>, context: impl Into<String>) -> BusResult<Self> {
        let context = context.into();
        bus.registry(&context)?;
        Ok(Self { bus, context })
    }

    /// 绑定的上下文名称
    pub fn context(&self) -> &str {
        &self.context
    }

    pub async fn dispatch(&self, event: &DomainEvent) -> BusResult<()> {
        self.bus.dispatch(&self.context, event).await
    }

    pub fn subscribe(
        &self,
        event_type: impl Into<String>,
        handler: Arc<dyn EventHandler>,
        options: SubscribeOptions,
    ) -> BusResult<()> {
        self.bus
            .subscribe(&self.context, event_type, handler, options)
    }
}
