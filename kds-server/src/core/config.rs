use std::time::Duration;

/// 服务器配置 - 中继节点的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 8083 | HTTP 服务端口 |
/// | ORDER_SERVICE_URL | http://localhost:8080/api/orders | 订单服务地址 |
/// | POLL_INTERVAL_MS | 3000 | 轮询间隔(毫秒) |
/// | SHARED_CACHE_ENABLED | false | 是否启用共享缓存层 |
/// | SHARED_CACHE_URL | http://localhost:7379 | 共享缓存服务地址 |
/// | SHARED_CACHE_TTL_SECS | 10 | 共享缓存过期时间(秒) |
/// | EVENT_GATEWAY_URL | http://localhost:8090 | 消息网关地址 |
/// | EVENT_CHANNEL | order-ready | 下游事件通道 |
/// | REQUEST_TIMEOUT_MS | 5000 | 出站请求超时(毫秒) |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// ORDER_SERVICE_URL=http://gateway:8080/api/orders HTTP_PORT=8083 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 订单服务基础 URL (唯一数据源)
    pub order_service_url: String,
    /// 轮询间隔 (毫秒)
    pub poll_interval_ms: u64,
    /// 是否启用共享缓存层
    pub shared_cache_enabled: bool,
    /// 共享缓存服务 URL
    pub shared_cache_url: String,
    /// 共享缓存过期时间 (秒)
    pub shared_cache_ttl_secs: u64,
    /// 消息网关 URL (下游事件)
    pub event_gateway_url: String,
    /// 下游事件通道名称
    pub event_channel: String,
    /// 出站请求超时 (毫秒)
    pub request_timeout_ms: u64,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8083),
            order_service_url: std::env::var("ORDER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/orders".into()),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            shared_cache_enabled: std::env::var("SHARED_CACHE_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            shared_cache_url: std::env::var("SHARED_CACHE_URL")
                .unwrap_or_else(|_| "http://localhost:7379".into()),
            shared_cache_ttl_secs: std::env::var("SHARED_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            event_gateway_url: std::env::var("EVENT_GATEWAY_URL")
                .unwrap_or_else(|_| "http://localhost:8090".into()),
            event_channel: std::env::var("EVENT_CHANNEL")
                .unwrap_or_else(|_| "order-ready".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 轮询间隔
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// 出站请求超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// 共享缓存过期时间
    pub fn shared_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.shared_cache_ttl_secs)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Guard against env leakage from the shell running the tests
        let config = Config {
            http_port: 8083,
            order_service_url: "http://localhost:8080/api/orders".into(),
            poll_interval_ms: 3000,
            shared_cache_enabled: false,
            shared_cache_url: "http://localhost:7379".into(),
            shared_cache_ttl_secs: 10,
            event_gateway_url: "http://localhost:8090".into(),
            event_channel: "order-ready".into(),
            request_timeout_ms: 5000,
            environment: "development".into(),
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(3000));
        assert_eq!(config.shared_cache_ttl(), Duration::from_secs(10));
        assert!(!config.is_production());
    }
}
