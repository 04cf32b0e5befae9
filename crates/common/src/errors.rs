use std::time::Duration;

use thiserror::Error;

/// 统一错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("磁盘用量测量失败: {0}")]
    Measure(String),

    #[error("无法解析 du 输出: {0}")]
    Parse(String),

    #[error("测量超时 (已等待 {0:?})")]
    Timeout(Duration),

    #[error("抓取请求已取消")]
    Cancelled,

    #[error("配置错误: {0}")]
    Config(String),

    #[error("指标注册错误: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 统一结果类型
pub type Result<T> = std::result::Result<T, Error>;
