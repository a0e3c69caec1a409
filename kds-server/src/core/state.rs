use parking_lot::Mutex;
use std::sync::Arc;

use crate::cache::{HttpSharedTier, TieredCache};
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::core::{Config, Result, ServerError};
use crate::services::poller::OrderPollWorker;
use crate::services::publisher::{HttpEventGateway, PublisherWorker, ReadyEventPublisher};
use crate::services::relay::StatusRelay;
use crate::upstream::{OrderBackend, OrderServiceClient};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是中继节点的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | cache | Arc<TieredCache> | 分层快照缓存 |
/// | backend | Arc<dyn OrderBackend> | 订单服务客户端 |
/// | relay | Arc<StatusRelay> | 状态中继 |
/// | publisher | ReadyEventPublisher | 事件发布句柄 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 分层快照缓存
    pub cache: Arc<TieredCache>,
    /// 订单服务客户端 (唯一数据源)
    pub backend: Arc<dyn OrderBackend>,
    /// 状态变更写路径
    pub relay: Arc<StatusRelay>,
    /// 事件发布句柄
    pub publisher: ReadyEventPublisher,
    /// 发布工作者 (启动后台任务时取出)
    publisher_worker: Arc<Mutex<Option<PublisherWorker>>>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 订单服务客户端
    /// 2. 分层缓存 (共享层可选)
    /// 3. 事件发布器
    /// 4. 状态中继
    pub fn initialize(config: &Config) -> Result<Self> {
        // 1. Order service client
        let backend: Arc<dyn OrderBackend> = Arc::new(OrderServiceClient::new(
            config.order_service_url.clone(),
            config.request_timeout(),
        )?);

        // 2. Tiered cache
        let cache = if config.shared_cache_enabled {
            let tier = HttpSharedTier::new(config.shared_cache_url.clone(), config.request_timeout())
                .map_err(|e| ServerError::Internal(anyhow::anyhow!(e)))?;
            tracing::info!(url = %config.shared_cache_url, "Shared cache tier enabled");
            Arc::new(TieredCache::with_shared_tier(
                Arc::new(tier),
                config.shared_cache_ttl(),
            ))
        } else {
            tracing::info!("Shared cache tier disabled, using local fallback only");
            Arc::new(TieredCache::local_only())
        };

        // 3. Event publisher
        let gateway = HttpEventGateway::new(
            config.event_gateway_url.clone(),
            config.event_channel.clone(),
            config.request_timeout(),
        )
        .map_err(|e| ServerError::Internal(anyhow::anyhow!(e)))?;
        let (publisher, publisher_worker) = ReadyEventPublisher::new(Arc::new(gateway));

        // 4. Status relay
        let relay = Arc::new(StatusRelay::new(backend.clone(), publisher.clone()));

        Ok(Self {
            config: config.clone(),
            cache,
            backend,
            relay,
            publisher,
            publisher_worker: Arc::new(Mutex::new(Some(publisher_worker))),
        })
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 之前调用
    ///
    /// 启动的任务：
    /// - 订单轮询 (order_poller)
    /// - 事件发布 (event_publisher)
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let poll_worker = OrderPollWorker::new(
            self.backend.clone(),
            self.cache.clone(),
            self.config.poll_interval(),
            tasks.shutdown_token(),
        );
        tasks.spawn("order_poller", TaskKind::Periodic, poll_worker.run());

        if let Some(worker) = self.publisher_worker.lock().take() {
            let shutdown = tasks.shutdown_token();
            tasks.spawn("event_publisher", TaskKind::Worker, worker.run(shutdown));
        }

        tasks.log_summary();
    }
}
