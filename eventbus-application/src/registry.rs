//! 上下文内处理器登记表
//!
//! 每个限界上下文持有一张独立的登记表：事件类型 -> 有序处理器列表。
//! 同名处理器重复注册视为替换并保留原位置；查表返回按优先级
//! 稳定排序的快照，快照取出后的注册不影响已取出的快照。
//!
use crate::subscription::{HandlerEntry, SubscribeOptions};
use dashmap::DashMap;
use eventbus_domain::handler::EventHandler;
use std::sync::Arc;

/// 单一限界上下文的登记表
/// - 以事件类型为键，保存注册顺序的处理器列表
/// - 注册与查表可在并发环境下交错进行
pub struct ContextRegistry {
    context: String,
    entries: DashMap<String, Vec<HandlerEntry>>,
}

impl ContextRegistry {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            entries: DashMap::new(),
        }
    }

    /// 上下文名称
    pub fn context(&self) -> &str {
        &self.context
    }

    /// 注册处理器；同名处理器视为替换并保留列表位置
    pub fn register(
        &self,
        event_type: impl Into<String>,
        handler: Arc<dyn EventHandler>,
        options: SubscribeOptions,
    ) {
        let entry = HandlerEntry::new(handler, options);
        let mut slot = self.entries.entry(event_type.into()).or_default();
        match slot.iter().position(|e| e.handler_name() == entry.handler_name()) {
            Some(index) => slot[index] = entry,
            None => slot.push(entry),
        }
    }

    /// 取出某事件类型的处理器快照，按优先级稳定排序
    ///
    /// 未注册的事件类型返回空列表。快照与登记表解耦，
    /// 派发执行期间的注册只会影响后续的派发。
    pub fn handlers_for(&self, event_type: &str) -> Vec<HandlerEntry> {
        let Some(slot) = self.entries.get(event_type) else {
            return Vec::new();
        };
        let mut snapshot = slot.value().clone();
        drop(slot);

        // 稳定排序：相同优先级保持注册顺序
        snapshot.sort_by_key(|entry| entry.priority());
        snapshot
    }

    /// 已登记的事件类型（顺序未定义）
    pub fn registered_event_types(&self) -> Vec<String> {
        self.entries.iter().map(|item| item.key().clone()).collect()
    }

    /// 某事件类型当前登记的处理器数量
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.entries.get(event_type).map_or(0, |slot| slot.len())
    }
}
