// 个体值搜索引擎
// 在 16x16x16 空间内枚举与观测到的 CP/HP 一致的全部个体值组合

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::range::{CpRange, CpRangeCalculator};
use crate::constants::{MAX_IV, MIN_HP, MIN_IV};
use crate::core::error::Result;
use crate::pokemon::{IvTriple, LevelScalarTable, Species};
use crate::PerformanceProfiler;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IvScanResult {
    pub species: Species,
    pub estimated_level: f64,
    // HP 和 CP 同为下限值时无法区分，不做搜索
    pub too_many_combinations: bool,
    // 发现顺序：耐力 > 防御 > 攻击
    pub combinations: Vec<IvTriple>,
}

impl IvScanResult {
    pub fn new(species: &Species, estimated_level: f64) -> Self {
        Self {
            species: species.clone(),
            estimated_level,
            too_many_combinations: false,
            combinations: Vec::new(),
        }
    }

    pub fn ambiguous(species: &Species, estimated_level: f64) -> Self {
        Self { too_many_combinations: true, ..Self::new(species, estimated_level) }
    }

    pub fn add_iv_combination(&mut self, attack: u8, defense: u8, stamina: u8) {
        self.combinations.push(IvTriple { attack, defense, stamina });
    }

    pub fn combination_count(&self) -> usize {
        self.combinations.len()
    }

    // 没有任何组合：观测值与该等级不符
    pub fn is_inconclusive(&self) -> bool {
        !self.too_many_combinations && self.combinations.is_empty()
    }

    // 总和最低的组合，并列时取最先发现的
    pub fn lowest_combination(&self) -> Option<IvTriple> {
        self.combinations
            .iter()
            .copied()
            .reduce(|best, iv| if iv.sum() < best.sum() { iv } else { best })
    }

    pub fn highest_combination(&self) -> Option<IvTriple> {
        self.combinations
            .iter()
            .copied()
            .reduce(|best, iv| if iv.sum() > best.sum() { iv } else { best })
    }

    pub fn average_percent(&self) -> Option<u32> {
        if self.combinations.is_empty() {
            return None;
        }
        let total: u32 = self.combinations.iter().map(IvTriple::sum).sum();
        let average = f64::from(total) / self.combinations.len() as f64;
        Some((average * 100.0 / f64::from(3 * u32::from(MAX_IV))).round() as u32)
    }

    /// 最低与最高组合在另一等级下的CP区间；没有组合时为 `None`。
    pub fn cp_range_at_level(&self, ranges: &CpRangeCalculator<'_>, level: f64) -> Result<Option<CpRange>> {
        match (self.lowest_combination(), self.highest_combination()) {
            (Some(low), Some(high)) => ranges.range_at_level(&self.species, low, high, level).map(Some),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IvSearchEngine<'a> {
    level_scalars: &'a LevelScalarTable,
}

impl<'a> IvSearchEngine<'a> {
    pub fn new(level_scalars: &'a LevelScalarTable) -> Self {
        Self { level_scalars }
    }

    pub fn search(
        &self,
        species: &Species,
        estimated_level: f64,
        observed_hp: u32,
        observed_cp: u32,
    ) -> Result<IvScanResult> {
        let level_scalar = self.level_scalars.scalar(estimated_level)?;

        if observed_hp == MIN_HP && observed_cp == MIN_HP {
            debug!("{} HP/CP 均为下限值，组合过多", species.name);
            return Ok(IvScanResult::ambiguous(species, estimated_level));
        }

        let _profiler = PerformanceProfiler::new("iv_search");
        let base = species.base_stats;
        let mut result = IvScanResult::new(species, estimated_level);
        let mut stamina_checked = 0;

        for stamina in MIN_IV..=MAX_IV {
            stamina_checked += 1;
            let hp = base.hp(stamina, level_scalar);
            if hp == observed_hp {
                for defense in MIN_IV..=MAX_IV {
                    for attack in MIN_IV..=MAX_IV {
                        let iv = IvTriple { attack, defense, stamina };
                        if base.cp(iv, level_scalar) == observed_cp {
                            result.add_iv_combination(attack, defense, stamina);
                        }
                    }
                }
            } else if hp > observed_hp {
                // 同一等级下 HP 随耐力单调不减
                break;
            }
        }

        debug!(
            "{} Lv.{} HP {} CP {}: 检查{}个耐力值，找到{}个组合",
            species.name,
            estimated_level,
            observed_hp,
            observed_cp,
            stamina_checked,
            result.combination_count()
        );
        if result.is_inconclusive() {
            warn!("{} Lv.{} 没有与 HP {} / CP {} 一致的个体值", species.name, estimated_level, observed_hp, observed_cp);
        }

        Ok(result)
    }
}
