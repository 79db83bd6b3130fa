use thiserror::Error;

/// 服务器级错误 (启动、运行期)
///
/// 请求级错误使用 [`crate::utils::AppError`]。
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("内部错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 服务器级 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
