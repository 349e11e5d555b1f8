//! 声明式装配示例
//! 展示启动期以 ContextConfig 装配多个限界上下文、按优先级的派发顺序，
//! 以及运行期补充注册与上下文隔离
use anyhow::Result as AnyResult;
use eventbus_application::config::ContextConfig;
use eventbus_application::subscription::SubscribeOptions;
use eventbus_application::{ContextBus, DomainEventBus};
use eventbus_domain::domain_event::DomainEvent;
use eventbus_domain::handler::EventHandler;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// ============================================================================
// 示例处理器
// ============================================================================

#[derive(Clone)]
struct PrintHandler {
    name: &'static str,
}

#[async_trait::async_trait]
impl EventHandler for PrintHandler {
    fn handler_name(&self) -> &str {
        self.name
    }

    async fn handle(&self, event: &DomainEvent) -> AnyResult<()> {
        println!(
            "handler={} type={} aggregate={} payload={}",
            self.name,
            event.event_type(),
            event.aggregate_id(),
            event.payload()
        );
        Ok(())
    }
}

// ============================================================================
// 工具函数
// ============================================================================

fn print_handler(name: &'static str) -> Arc<dyn EventHandler> {
    Arc::new(PrintHandler { name })
}

fn with_priority(priority: i32) -> SubscribeOptions {
    SubscribeOptions::builder().priority(priority).build()
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> AnyResult<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,eventbus_application=debug")),
        )
        .init();

    println!("=== 声明式装配示例 ===\n");

    // 启动期装配：上下文集合在 build 后固定
    let bus = Arc::new(
        DomainEventBus::builder()
            .contexts(vec![
                ContextConfig::new("Identity")
                    .subscribe(
                        "user_registered",
                        print_handler("audit_log"),
                        with_priority(10),
                    )
                    .subscribe("user_registered", print_handler("mailer"), with_priority(20))
                    .subscribe(
                        "user_registered",
                        print_handler("metrics"),
                        SubscribeOptions::default(),
                    ),
                ContextConfig::new("Messaging").subscribe(
                    "message_sent",
                    print_handler("delivery_tracker"),
                    SubscribeOptions::default(),
                ),
            ])
            .build(),
    );
    println!("✅ 总线装配完成: contexts={:?}\n", bus.context_names());

    // 按优先级顺序执行：audit_log -> mailer -> metrics
    let registered = DomainEvent::new(
        "user_registered",
        "user-1",
        serde_json::json!({"email": "user-1@example.com"}),
    );
    bus.dispatch("Identity", &registered).await?;
    println!("✅ Identity 派发完成\n");

    // 上下文隔离：Messaging 的处理器不会收到 Identity 的事件
    let sent = DomainEvent::new("message_sent", "msg-9", serde_json::json!({"channel": "email"}));
    let messaging = ContextBus::bind(bus.clone(), "Messaging")?;
    messaging.dispatch(&sent).await?;
    println!("✅ Messaging 派发完成\n");

    // 运行期补充注册：下一次派发即可参与
    bus.subscribe(
        "Messaging",
        "message_sent",
        print_handler("spam_filter"),
        with_priority(1),
    )?;
    messaging.dispatch(&sent).await?;
    println!("✅ 运行期注册的处理器已参与派发\n");

    // 未装配的上下文直接拒绝
    if let Err(err) = bus.dispatch("Billing", &registered).await {
        println!("✅ 未知上下文被拒绝: {err}");
    }

    Ok(())
}
