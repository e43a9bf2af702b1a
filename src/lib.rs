// 宝可梦个体值计算库入口
// 种族目录 + 等级系数表为只读共享数据，其余组件都是对它们的纯计算

pub mod calculator;
pub mod core;
pub mod data;
pub mod pokemon;

// 重新导出核心类型
pub use crate::calculator::{CpRange, IvScanResult, PokeInfoCalculator};
pub use crate::core::{CalculatorConfig, PogoError, Result};
pub use crate::pokemon::{IvTriple, LevelScalarTable, Species, SpeciesCatalog, SpeciesId, UpgradeCost};

// 版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "pogoiv";

pub mod constants {
    pub const MIN_IV: u8 = 0;
    pub const MAX_IV: u8 = 15;

    // HP 下限；HP 与 CP 同时等于它时观测无法区分
    pub const MIN_HP: u32 = 10;

    pub const MIN_LEVEL: f64 = 1.0;
    pub const MAX_LEVEL: f64 = 40.0;
    pub const LEVEL_STEP: f64 = 0.5;

    // 输入数据中"没有退化形态"的标记
    pub const DEVOLUTION_SENTINEL: i64 = -1;
}

// 初始化日志系统，RUST_LOG 优先
pub fn init() {
    init_with_level("info");
}

pub fn init_with_level(level: &str) {
    let filter = format!("{}={}", NAME, level);
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).try_init();

    match result {
        Ok(()) => log::info!("宝可梦个体值计算器初始化完成 v{}", VERSION),
        Err(_) => log::debug!("日志系统已初始化，跳过"),
    }
}

// 性能分析工具
pub struct PerformanceProfiler {
    start_time: std::time::Instant,
    name: &'static str,
}

impl PerformanceProfiler {
    pub fn new(name: &'static str) -> Self {
        Self { start_time: std::time::Instant::now(), name }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

impl Drop for PerformanceProfiler {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        if elapsed.as_millis() > 1 {
            log::debug!("性能: {} 耗时 {:.2}ms", self.name, elapsed.as_secs_f64() * 1000.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init();
        init_with_level("debug");
    }

    #[test]
    fn test_constants() {
        assert!(constants::MIN_IV < constants::MAX_IV);
        assert!(constants::MIN_LEVEL < constants::MAX_LEVEL);
        assert_eq!(constants::DEVOLUTION_SENTINEL, -1);
    }

    #[test]
    fn test_performance_profiler() {
        let profiler = PerformanceProfiler::new("test");
        std::thread::sleep(std::time::Duration::from_millis(1));
        assert!(profiler.elapsed().as_millis() >= 1);
    }

    #[test]
    fn test_version_info() {
        assert_eq!(VERSION, "0.1.0");
        assert_eq!(NAME, "pogoiv");
    }
}
