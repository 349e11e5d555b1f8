pub mod bus;
pub mod config;
pub mod dispatcher;
pub mod registry;
pub mod subscription;

pub use bus::{ContextBus, DomainEventBus};
