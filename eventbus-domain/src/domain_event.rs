//! 领域事件（DomainEvent）
//!
//! 总线分发的不可变事件值对象：事件类型、聚合 ID、负载与发生时间。
//! 负载以 `serde_json::Value` 承载，总线与处理器均不解释、不修改其内容。
//!
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// 领域事件：一经构造即不可变
#[derive(Debug, Clone, Builder, Serialize, Deserialize, PartialEq)]
pub struct DomainEvent {
    /// 事件唯一标识符，默认在构造时生成
    #[builder(default = Uuid::new_v4().to_string())]
    event_id: String,
    /// 事件类型（形如 `message_sent`），注册表按此查找处理器
    event_type: String,
    /// 事件所涉实体的标识
    aggregate_id: String,
    /// 事件负载，存储事件的具体数据
    payload: Value,
    /// 事件发生时间，默认在构造时写入
    #[builder(default = Utc::now())]
    occurred_at: DateTime<Utc>,
}

impl DomainEvent {
    /// 以当前时间与新生成的事件 ID 构造事件
    pub fn new(
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self::builder()
            .event_type(event_type.into())
            .aggregate_id(aggregate_id.into())
            .payload(payload)
            .build()
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn aggregate_id(&self) -> &str {
        &self.aggregate_id
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
