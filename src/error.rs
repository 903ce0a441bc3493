//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    VertexNotFound(String),

    #[error("图状态无效: {0}")]
    InvalidState(String),

    #[error("不存在欧拉路径: {0}")]
    NoEulerianPath(String),

    #[error("格式错误 (第 {line} 行): {message}")]
    FormatError { line: usize, message: String },

    #[error("无效参数: {0}")]
    InvalidArgument(String),

    #[error("超出搜索上限: {0}")]
    LimitExceeded(String),

    #[error("搜索已取消")]
    Cancelled,

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// 构造带行号的格式错误
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Error::FormatError {
            line,
            message: message.into(),
        }
    }

    /// 权重累加超出 `Weight` 的表示范围
    pub(crate) fn weight_overflow(operation: &str) -> Self {
        Error::InvalidArgument(format!("{} 的权重累加溢出", operation))
    }

    /// 空图上需要起始顶点的操作
    pub(crate) fn empty_graph(operation: &str) -> Self {
        Error::InvalidState(format!("{} 需要至少一个顶点，但图为空", operation))
    }
}
