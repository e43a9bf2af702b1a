// CP区间计算
// 对两个个体值端点各算一次CP，再按大小排列

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::pokemon::{IvTriple, LevelScalarTable, Species};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCpRange")]
pub struct CpRange {
    pub min: u32,
    pub max: u32,
    pub level: f64,
}

// 反序列化后经 CpRange::new 重新排序
#[derive(Deserialize)]
struct RawCpRange {
    min: u32,
    max: u32,
    level: f64,
}

impl From<RawCpRange> for CpRange {
    fn from(raw: RawCpRange) -> Self {
        CpRange::new(raw.min, raw.max, raw.level)
    }
}

impl CpRange {
    // 两个值任意顺序传入，构造后始终 min <= max
    pub fn new(a: u32, b: u32, level: f64) -> Self {
        Self { min: a.min(b), max: a.max(b), level }
    }

    pub fn contains(&self, cp: u32) -> bool {
        (self.min..=self.max).contains(&cp)
    }

    pub fn spread(&self) -> u32 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CpRangeCalculator<'a> {
    level_scalars: &'a LevelScalarTable,
}

impl<'a> CpRangeCalculator<'a> {
    pub fn new(level_scalars: &'a LevelScalarTable) -> Self {
        Self { level_scalars }
    }

    /// 不校验 `low` 是否逐项不大于 `high`，只对两个CP结果排序。
    pub fn range_at_level(&self, species: &Species, low: IvTriple, high: IvTriple, level: f64) -> Result<CpRange> {
        let scalar = self.level_scalars.scalar(level)?;
        let low_cp = species.base_stats.cp(low, scalar);
        let high_cp = species.base_stats.cp(high, scalar);
        Ok(CpRange::new(low_cp, high_cp, level))
    }

    // 该种族在此等级下的理论CP区间
    pub fn full_range_at_level(&self, species: &Species, level: f64) -> Result<CpRange> {
        self.range_at_level(species, IvTriple::MIN, IvTriple::MAX, level)
    }
}
