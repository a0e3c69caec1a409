//! KDS Relay Server - 厨房显示系统中继服务
//!
//! # 架构概述
//!
//! 本服务位于厨房显示客户端与订单服务之间，订单服务是唯一的数据源：
//!
//! - **轮询** (`services::poller`): 定时拉取活跃订单并整体替换缓存
//! - **分层缓存** (`cache`): 共享缓存层 + 进程内兜底层
//! - **状态中继** (`services::relay`): 状态变更写透到订单服务
//! - **事件发布** (`services::publisher`): READY 确认后发布下游事件
//! - **HTTP API** (`api`): 厨房显示端点
//!
//! # 模块结构
//!
//! ```text
//! kds-server/src/
//! ├── core/          # 配置、状态、错误、后台任务
//! ├── upstream/      # 订单服务客户端
//! ├── cache/         # 分层快照缓存
//! ├── services/      # 轮询、中继、发布
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志工具
//! ```

pub mod api;
pub mod cache;
pub mod core;
pub mod services;
pub mod upstream;
pub mod utils;

// Re-export 公共类型
pub use cache::TieredCache;
pub use core::{Config, Server, ServerState};
pub use services::{OrderPollWorker, ReadyEventPublisher, StatusRelay};
pub use upstream::{OrderBackend, OrderServiceClient, UpstreamError};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __ __ ____  _____
   / //_// __ \/ ___/
  / ,<  / / / /\__ \
 / /| |/ /_/ /___/ /
/_/ |_/_____//____/  relay
    "#
    );
}
