// 宝可梦信息计算器
// 持有共享的种族目录与等级系数表，对外提供全部查询

pub mod range;
pub mod scan;

pub use range::{CpRange, CpRangeCalculator};
pub use scan::{IvScanResult, IvSearchEngine};

use log::info;
use std::sync::Arc;

use crate::core::config::CalculatorConfig;
use crate::core::error::Result;
use crate::data::{self, builtin, Dataset};
use crate::pokemon::{
    upgrade, EvolutionNavigator, IvTriple, LevelScalarTable, Species, SpeciesCatalog, SpeciesId, UpgradeCost,
};

#[derive(Debug, Clone)]
pub struct PokeInfoCalculator {
    catalog: Arc<SpeciesCatalog>,
    level_scalars: Arc<LevelScalarTable>,
}

impl PokeInfoCalculator {
    pub fn new(catalog: Arc<SpeciesCatalog>, level_scalars: Arc<LevelScalarTable>) -> Self {
        Self { catalog, level_scalars }
    }

    // 内置数据集
    pub fn builtin() -> Self {
        Self::new(builtin::catalog(), builtin::level_scalars())
    }

    // 按配置加载数据；未配置的部分使用内置数据
    pub fn from_config(config: &CalculatorConfig) -> Result<Self> {
        let catalog = match &config.data.species_path {
            Some(path) => Arc::new(Dataset::load(path)?.build_catalog()?),
            None => builtin::catalog(),
        };
        let level_scalars = match &config.data.level_scalar_path {
            Some(path) => Arc::new(data::load_level_scalars(path)?),
            None => builtin::level_scalars(),
        };
        info!(
            "计算器就绪: {}个种族, 等级 {}-{}",
            catalog.len(),
            level_scalars.min_level(),
            level_scalars.max_level()
        );
        Ok(Self::new(catalog, level_scalars))
    }

    pub fn catalog(&self) -> &SpeciesCatalog {
        &self.catalog
    }

    pub fn level_scalars(&self) -> &LevelScalarTable {
        &self.level_scalars
    }

    pub fn get(&self, index: SpeciesId) -> Result<&Species> {
        self.catalog.lookup_by_index(index)
    }

    pub fn get_by_name(&self, name: &str) -> Result<&Species> {
        self.catalog.lookup_by_name(name)
    }

    pub fn search_engine(&self) -> IvSearchEngine<'_> {
        IvSearchEngine::new(&self.level_scalars)
    }

    pub fn range_calculator(&self) -> CpRangeCalculator<'_> {
        CpRangeCalculator::new(&self.level_scalars)
    }

    pub fn navigator(&self) -> EvolutionNavigator<'_> {
        EvolutionNavigator::new(&self.catalog)
    }

    pub fn iv_possibilities(
        &self,
        species: &Species,
        estimated_level: f64,
        observed_hp: u32,
        observed_cp: u32,
    ) -> Result<IvScanResult> {
        self.search_engine().search(species, estimated_level, observed_hp, observed_cp)
    }

    pub fn iv_possibilities_by_index(
        &self,
        index: SpeciesId,
        estimated_level: f64,
        observed_hp: u32,
        observed_cp: u32,
    ) -> Result<IvScanResult> {
        let species = self.get(index)?;
        self.iv_possibilities(species, estimated_level, observed_hp, observed_cp)
    }

    pub fn cp_range_at_level(&self, species: &Species, low: IvTriple, high: IvTriple, level: f64) -> Result<CpRange> {
        self.range_calculator().range_at_level(species, low, high, level)
    }

    pub fn lowest_evolution<'a>(&'a self, species: &'a Species) -> &'a Species {
        self.navigator().lowest_evolution(species)
    }

    pub fn evolution_line<'a>(&'a self, species: &'a Species) -> Vec<&'a Species> {
        self.navigator().evolution_line(species)
    }

    /// 两个等级需以半级对齐且可达，见 [`upgrade::project_cost`]。
    pub fn upgrade_cost(&self, goal_level: f64, estimated_level: f64) -> UpgradeCost {
        upgrade::project_cost(goal_level, estimated_level)
    }

    pub fn try_upgrade_cost(&self, goal_level: f64, estimated_level: f64) -> Result<UpgradeCost> {
        upgrade::try_project_cost(goal_level, estimated_level)
    }

    // 升到训练师等级允许的上限
    pub fn upgrade_cost_to_trainer_cap(&self, trainer_level: u32, estimated_level: f64) -> Result<UpgradeCost> {
        upgrade::try_project_cost(upgrade::max_level_for_trainer(trainer_level), estimated_level)
    }
}
