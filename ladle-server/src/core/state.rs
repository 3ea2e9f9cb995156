use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::stream::StatusBroadcaster;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是订餐后端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式文档数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | broadcaster | Arc<StatusBroadcaster> | 订单状态流注册表 |
///
/// broadcaster 在服务启动时构造一次，注入订阅端与状态推进端，
/// 关停时统一关闭所有流 —— 不存在模块级全局注册表。
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式文档数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 订单状态流注册表
    pub broadcaster: Arc<StatusBroadcaster>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize()`] 方法代替
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        broadcaster: Arc<StatusBroadcaster>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            broadcaster,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/ladle.db)
    /// 3. JWT 服务、状态流注册表
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("ladle.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let broadcaster = Arc::new(StatusBroadcaster::new(config.stream_channel_capacity));

        Self::new(config.clone(), db_service.db, jwt_service, broadcaster)
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取状态流注册表
    pub fn broadcaster(&self) -> &Arc<StatusBroadcaster> {
        &self.broadcaster
    }

    /// 优雅关停：关闭所有打开的状态流
    pub fn shutdown(&self) {
        self.broadcaster.shutdown();
    }
}
