//! 领域事件总线词汇层（eventbus-domain）
//!
//! 定义进程内领域事件分发所需的基础类型与协议：
//! - 领域事件值对象（`domain_event`）：不可变的事件载体
//! - 事件处理器（`handler`）：处理协议、注册模式与闭包适配器
//! - 统一错误（`error`）：未知上下文、失败聚合与单处理器失败记录
//!
//! 本 crate 不包含注册表与执行机制，运行时由 `eventbus-application`
//! 提供；两层分离使生产方、处理器实现与调度机制互不感知。
//!
pub mod domain_event;
pub mod error;
pub mod handler;
