// 核心模块 - 错误类型与配置管理

pub mod config;
pub mod error;

// 重新导出核心类型
pub use config::CalculatorConfig;
pub use error::{PogoError, Result};
