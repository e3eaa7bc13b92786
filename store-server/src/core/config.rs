/// 服务器配置 - 店面后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库 + 日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | RETURN_WINDOW_DAYS | 3 | 退货窗口 (天) |
/// | RAZORPAY_KEY_ID | rzp_test_key | 支付网关 key id |
/// | RAZORPAY_KEY_SECRET | rzp_test_secret | 支付网关 key secret |
/// | RAZORPAY_BASE_URL | https://api.razorpay.com | 支付网关地址 |
/// | DELHIVERY_API_TOKEN | (空) | 物流 API token |
/// | DELHIVERY_BASE_URL | https://track.delhivery.com | 物流 API 地址 |
/// | PICKUP_LOCATION | ENTION-WH1 | 注册的取件仓库名 |
/// | ORIGIN_PINCODE | 110042 | 发货仓库 pincode |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/ention HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 退货窗口：交付后多少天内可申请退货
    pub return_window_days: i64,

    // === 支付网关 (Razorpay) ===
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    pub razorpay_base_url: String,

    // === 物流 (Delhivery) ===
    pub delhivery_api_token: String,
    pub delhivery_base_url: String,
    /// 注册在物流商的取件仓库名称
    pub pickup_location: String,
    /// 发货仓库 pincode (TAT 查询的 origin)
    pub origin_pincode: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            return_window_days: std::env::var("RETURN_WINDOW_DAYS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3),

            razorpay_key_id: std::env::var("RAZORPAY_KEY_ID")
                .unwrap_or_else(|_| "rzp_test_key".into()),
            razorpay_key_secret: std::env::var("RAZORPAY_KEY_SECRET")
                .unwrap_or_else(|_| "rzp_test_secret".into()),
            razorpay_base_url: std::env::var("RAZORPAY_BASE_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com".into()),

            delhivery_api_token: std::env::var("DELHIVERY_API_TOKEN").unwrap_or_default(),
            delhivery_base_url: std::env::var("DELHIVERY_BASE_URL")
                .unwrap_or_else(|_| "https://track.delhivery.com".into()),
            pickup_location: std::env::var("PICKUP_LOCATION")
                .unwrap_or_else(|_| "ENTION-WH1".into()),
            origin_pincode: std::env::var("ORIGIN_PINCODE").unwrap_or_else(|_| "110042".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库文件路径
    pub fn db_path(&self) -> String {
        format!("{}/store.db", self.work_dir)
    }

    /// 日志目录
    pub fn log_dir(&self) -> String {
        format!("{}/logs", self.work_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
