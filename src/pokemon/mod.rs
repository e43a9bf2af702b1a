// 宝可梦数据模块
// 种族、能力值公式、等级系数、进化关系与升级消耗

pub mod evolution;
pub mod level;
pub mod species;
pub mod stats;
pub mod upgrade;

// 重新导出主要类型
pub use evolution::EvolutionNavigator;
pub use level::LevelScalarTable;
pub use species::{Species, SpeciesCatalog, SpeciesId};
pub use stats::{BaseStats, IvTriple};
pub use upgrade::{project_cost, try_project_cost, UpgradeCost};
