//! Ladle Server - 多租户订餐平台后端
//!
//! # 架构概述
//!
//! 本模块是订餐后端的主入口，提供以下核心功能：
//!
//! - **订单引擎** (`booking`): 购物车冻结、优惠券复核、同步等待商家
//!   响应、按服务组推进状态
//! - **状态流** (`stream`): 按订单号注册的实时状态推送
//! - **数据库** (`db`): 嵌入式 SurrealDB 文档存储
//! - **认证** (`auth`): JWT 验证与请求主体提取
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! ladle-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 验证、提取器
//! ├── api/           # HTTP 路由和处理器
//! ├── booking/       # 订单生命周期引擎
//! ├── stream/        # 状态广播注册表
//! ├── db/            # 数据库层
//! └── utils/         # 错误、日志、校验工具
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod core;
pub mod db;
pub mod stream;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, CurrentVendor, JwtService};
pub use core::{Config, Server, ServerState};
pub use stream::StatusBroadcaster;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv, 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 缺失不算错误
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __          ____
   / /   ____ _/ / /__
  / /   / __ `/ / / _ \
 / /___/ /_/ / / /  __/
/_____/\__,_/_/_/\___/
    "#
    );
}
