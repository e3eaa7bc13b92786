use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrderManager;
use crate::services::{DelhiveryClient, LogisticsProvider, PaymentGateway, RazorpayClient};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是店面后端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | payments | Arc<dyn PaymentGateway> | 支付网关客户端 |
/// | logistics | Arc<dyn LogisticsProvider> | 物流客户端 |
/// | orders | OrderManager | 订单生命周期管理 |
///
/// # 使用示例
///
/// ```ignore
/// // 获取数据库连接
/// let db = state.db.clone();
///
/// // 下单 (库存预留 + 持久化 + 失败回滚)
/// let order = state.orders.place_order(payload).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 支付网关客户端 (依赖注入，测试可替换)
    pub payments: Arc<dyn PaymentGateway>,
    /// 物流客户端 (依赖注入，测试可替换)
    pub logistics: Arc<dyn LogisticsProvider>,
    /// 订单生命周期管理器
    pub orders: OrderManager,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 测试场景用它注入内存数据库和 stub 客户端；
    /// 生产场景使用 [`ServerState::initialize`]。
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        payments: Arc<dyn PaymentGateway>,
        logistics: Arc<dyn LogisticsProvider>,
    ) -> Self {
        let orders = OrderManager::new(db.clone(), payments.clone(), config.return_window_days);
        Self {
            config,
            db,
            payments,
            logistics,
            orders,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/store.db) + 表结构
    /// 3. 支付网关与物流客户端
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        // 0. Ensure work_dir exists
        std::fs::create_dir_all(&config.work_dir).expect("Failed to create work directory");

        // 1. Initialize DB
        let db_service = DbService::new(&config.db_path())
            .await
            .expect("Failed to initialize database");

        // 2. Outbound clients
        let payments: Arc<dyn PaymentGateway> = Arc::new(RazorpayClient::new(
            &config.razorpay_base_url,
            &config.razorpay_key_id,
            &config.razorpay_key_secret,
        ));
        let logistics: Arc<dyn LogisticsProvider> = Arc::new(DelhiveryClient::new(
            &config.delhivery_base_url,
            &config.delhivery_api_token,
            &config.pickup_location,
            &config.origin_pincode,
        ));

        Self::new(config.clone(), db_service.db, payments, logistics)
    }
}
