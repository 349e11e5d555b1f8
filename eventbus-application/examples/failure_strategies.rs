//! 失败策略示例
//! 展示处理器失败的两种策略（向调用方传播 / 内部吞掉），
//! 以及 panic 处理器被转换为失败记录而不中断派发
use anyhow::Result as AnyResult;
use eventbus_application::DomainEventBus;
use eventbus_application::config::ContextConfig;
use eventbus_application::subscription::SubscribeOptions;
use eventbus_domain::domain_event::DomainEvent;
use eventbus_domain::error::BusError;
use eventbus_domain::handler::FnHandler;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn with_priority(priority: i32) -> SubscribeOptions {
    SubscribeOptions::builder().priority(priority).build()
}

fn write_metric() -> AnyResult<()> {
    anyhow::bail!("metrics sink offline")
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> AnyResult<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== 失败策略示例 ===\n");

    // 四个处理器：成功 / 传播失败 / 吞掉失败 / panic
    let purge = Arc::new(FnHandler::new("purge_records", |event: DomainEvent| async move {
        println!(
            "handler=purge_records aggregate={} records purged",
            event.aggregate_id()
        );
        Ok(())
    }));
    let audit = Arc::new(FnHandler::new("audit_log", |_event: DomainEvent| async move {
        anyhow::bail!("db_down")
    }));
    let metrics = Arc::new(FnHandler::new("metrics", |_event: DomainEvent| async move {
        // 尽力而为型副作用：失败只记录，不向调用方传播
        if let Err(err) = write_metric() {
            println!("handler=metrics dropped: {err}");
        }
        Ok(())
    }));
    let index_rebuild = Arc::new(FnHandler::new("index_rebuild", |_event: DomainEvent| async move {
        panic!("index corrupted")
    }));

    let bus = DomainEventBus::builder()
        .contexts(vec![
            ContextConfig::new("Identity")
                .subscribe("user_anonymized", purge, with_priority(10))
                .subscribe("user_anonymized", audit, with_priority(20))
                .subscribe("user_anonymized", metrics, with_priority(30))
                .subscribe("user_anonymized", index_rebuild, with_priority(40)),
        ])
        .build();

    let event = DomainEvent::new(
        "user_anonymized",
        "user-7",
        serde_json::json!({"requested_by": "gdpr"}),
    );

    match bus.dispatch("Identity", &event).await {
        Ok(()) => println!("所有处理器均成功"),
        Err(BusError::HandlersFailed { failures }) => {
            println!("\n✅ 派发完成，{} 个处理器报告失败:", failures.len());
            for failure in &failures {
                println!("   - {failure}");
            }
        }
        Err(other) => println!("其他错误: {other}"),
    }

    Ok(())
}
