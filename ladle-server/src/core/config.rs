use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置 - 订餐后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/ladle | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | BOOKING_POLL_INTERVAL_MS | 2000 | 商家响应轮询间隔(毫秒) |
/// | VENDOR_RESPONSE_TIMEOUT_MS | 120000 | 商家响应等待上限(毫秒) |
/// | STREAM_KEEP_ALIVE_SECS | 30 | 状态流保活间隔(秒) |
/// | STREAM_CHANNEL_CAPACITY | 32 | 单条状态流的缓冲帧数 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/ladle HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,

    // === 订单生命周期配置 ===
    /// 创建订单后轮询商家响应的间隔 (毫秒)
    pub booking_poll_interval_ms: u64,
    /// 商家响应等待上限，超时转入 timeout 终态 (毫秒)
    pub vendor_response_timeout_ms: u64,

    // === 状态流配置 ===
    /// SSE 保活注释帧间隔 (秒)
    pub stream_keep_alive_secs: u64,
    /// 单个订阅通道的缓冲容量
    pub stream_channel_capacity: usize,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/ladle".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            booking_poll_interval_ms: std::env::var("BOOKING_POLL_INTERVAL_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(2_000),
            vendor_response_timeout_ms: std::env::var("VENDOR_RESPONSE_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(120_000),

            stream_keep_alive_secs: std::env::var("STREAM_KEEP_ALIVE_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            stream_channel_capacity: std::env::var("STREAM_CHANNEL_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(32),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景（缩短轮询间隔与等待上限）
    pub fn with_overrides(
        work_dir: impl Into<String>,
        poll_interval_ms: u64,
        response_timeout_ms: u64,
    ) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.booking_poll_interval_ms = poll_interval_ms;
        config.vendor_response_timeout_ms = response_timeout_ms;
        config
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
