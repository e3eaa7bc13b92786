//! ENTION Store Server - 笔记本电商店面后端
//!
//! # 架构概述
//!
//! 本模块是店面后端的主入口，提供以下核心功能：
//!
//! - **商品目录** (`api/products`): 型号建档、补货、低库存告警
//! - **订单生命周期** (`orders`): 下单扣库存、状态机流转、退货退款
//! - **支付** (`services/razorpay`): 网关下单、验签、退款
//! - **物流** (`services/delhivery`): 配送范围、运单、轨迹
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//!
//! # 模块结构
//!
//! ```text
//! store-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── api/           # HTTP 路由和处理器
//! ├── orders/        # 订单生命周期状态机
//! ├── services/      # 支付网关、物流客户端
//! ├── db/            # 数据库层
//! └── utils/         # 日志、输入校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use orders::OrderManager;

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 初始化运行环境 (dotenv, 工作目录, 日志)
///
/// 返回加载好的配置，main 直接往下传。
pub fn setup_environment() -> std::io::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(config.log_dir())?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), Some(&config.log_dir()));

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ______    _   __  ______    ____    ____     _   __
   / ____/   / | / / /_  __/   /  _/   / __ \   / | / /
  / __/     /  |/ /   / /      / /    / / / /  /  |/ /
 / /___    / /|  /   / /     _/ /    / /_/ /  / /|  /
/_____/   /_/ |_/   /_/     /___/    \____/  /_/ |_/
    "#
    );
}
