// 错误处理系统
// 统一的错误类型：数据集构造、查找失败、等级越界、配置与文件错误

use std::io;
use thiserror::Error;

use crate::pokemon::SpeciesId;

#[derive(Debug, Error)]
pub enum PogoError {
    // 数据集构造错误
    #[error("Mismatched dataset lengths: {0}")]
    InputShape(String),
    #[error("Species #{index} devolves from unknown index {devolution}")]
    InvalidDevolution { index: SpeciesId, devolution: i64 },
    #[error("Duplicate species name: {0}")]
    DuplicateSpecies(String),

    // 查找失败
    #[error("Species not found: {0}")]
    SpeciesNotFound(String),
    #[error("Species index {index} out of range (catalog holds {len})")]
    IndexOutOfRange { index: SpeciesId, len: usize },
    #[error("Level {0} has no level scalar")]
    LevelOutOfRange(f64),

    // 输入校验
    #[error("Level {to} cannot be reached from {from} in half-level steps")]
    UnreachableLevel { from: f64, to: f64 },
    #[error("Invalid IV combination: {0}")]
    InvalidIv(String),

    // 配置与数据文件
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Data error: {0}")]
    Data(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

// Result类型别名
pub type Result<T> = std::result::Result<T, PogoError>;

impl From<serde_json::Error> for PogoError {
    fn from(error: serde_json::Error) -> Self {
        PogoError::Data(error.to_string())
    }
}

impl From<toml::de::Error> for PogoError {
    fn from(error: toml::de::Error) -> Self {
        PogoError::Config(error.to_string())
    }
}

impl From<toml::ser::Error> for PogoError {
    fn from(error: toml::ser::Error) -> Self {
        PogoError::Config(error.to_string())
    }
}

// 错误创建辅助宏
#[macro_export]
macro_rules! pogo_error {
    ($variant:ident, $msg:expr) => {
        $crate::PogoError::$variant($msg.to_string())
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::PogoError::$variant(format!($fmt, $($arg)*))
    };
}

impl PogoError {
    // 查找失败不影响引擎本身，调用方可据此分支
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            PogoError::SpeciesNotFound(_)
                | PogoError::IndexOutOfRange { .. }
                | PogoError::LevelOutOfRange(_)
        )
    }

    // 构造期错误：数据集本身不可用
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PogoError::InputShape(_)
                | PogoError::InvalidDevolution { .. }
                | PogoError::DuplicateSpecies(_)
        )
    }
}
