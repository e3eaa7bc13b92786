use thiserror::Error;

/// 服务器启动和运行期间的错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库初始化失败: {0}")]
    Database(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 启动阶段的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
