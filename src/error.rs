use std::path::PathBuf;

use embedded_hal::digital::{self, ErrorKind};

/// 配置文件读取、解析、校验错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("读取配置文件 {path} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析配置文件失败: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("配置项 {field} 无效: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// USB继电器串口链路错误
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("串口错误: {0}")]
    Uart(#[from] rppal::uart::Error),
    #[error("指令帧未完整写出: {written}/{expected} 字节")]
    ShortWrite { written: usize, expected: usize },
}

impl digital::Error for RelayError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// 姿态数据流错误（即取帧失败）
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("打开姿态数据流 {path} 失败: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("读取姿态数据流失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("姿态数据流已结束")]
    EndOfStream,
}
