//! 服务模块
//!
//! - [`OrderPollWorker`] - 定时轮询订单服务并刷新缓存
//! - [`StatusRelay`] - 状态变更写路径
//! - [`ReadyEventPublisher`] - READY 事件发布

pub mod poller;
pub mod publisher;
pub mod relay;

pub use poller::OrderPollWorker;
pub use publisher::{EventSink, HttpEventGateway, PublishError, PublisherWorker, ReadyEventPublisher};
pub use relay::StatusRelay;
