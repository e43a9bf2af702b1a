// 升级消耗模拟
// 从当前等级每次前进半级，按等级段累计糖果与星尘

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

use crate::constants::{LEVEL_STEP, MAX_LEVEL, MIN_LEVEL};
use crate::core::error::{PogoError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCost {
    pub stardust: u32,
    pub candy: u32,
}

// 等级段：(等级上限, 糖果, 星尘基数, 星尘倍率)
const COST_BRACKETS: [(f64, u32, u32, u32); 3] = [
    (10.5, 1, 0, 200),
    (20.5, 2, 1000, 300),
    (30.5, 3, 2500, 500),
];
const TOP_BRACKET: (u32, u32, u32) = (4, 5000, 1000);

impl UpgradeCost {
    pub const fn new(stardust: u32, candy: u32) -> Self {
        Self { stardust, candy }
    }
}

impl Add for UpgradeCost {
    type Output = UpgradeCost;

    fn add(self, rhs: UpgradeCost) -> UpgradeCost {
        UpgradeCost::new(self.stardust.saturating_add(rhs.stardust), self.candy.saturating_add(rhs.candy))
    }
}

impl AddAssign for UpgradeCost {
    fn add_assign(&mut self, rhs: UpgradeCost) {
        *self = *self + rhs;
    }
}

/// 由等级个位部分决定的倍率档位 1-5。
pub fn rank_for_level(level: f64) -> u32 {
    let ones = level % 10.0;
    if ones <= 1.0 {
        5
    } else if ones <= 2.5 {
        1
    } else if ones <= 4.5 {
        2
    } else if ones <= 6.5 {
        3
    } else if ones <= 8.5 {
        4
    } else {
        5
    }
}

/// 在 `level` 处前进半级的消耗。
pub fn step_cost(level: f64) -> UpgradeCost {
    let rank = rank_for_level(level);
    let (candy, base, multiplier) = COST_BRACKETS
        .iter()
        .find(|(ceiling, ..)| level <= *ceiling)
        .map(|&(_, candy, base, multiplier)| (candy, base, multiplier))
        .unwrap_or(TOP_BRACKET);
    UpgradeCost::new(base + rank * multiplier, candy)
}

/// 从 `estimated_level` 升到 `goal_level` 的总消耗。
///
/// 两个等级必须能以半级步长从前者走到后者，否则循环不会终止；
/// 需要校验时使用 [`try_project_cost`]。
pub fn project_cost(goal_level: f64, estimated_level: f64) -> UpgradeCost {
    let mut level = estimated_level;
    let mut total = UpgradeCost::default();
    while level != goal_level {
        total += step_cost(level);
        level += LEVEL_STEP;
    }
    total
}

pub fn try_project_cost(goal_level: f64, estimated_level: f64) -> Result<UpgradeCost> {
    let in_domain = (MIN_LEVEL..=MAX_LEVEL).contains(&estimated_level) && (MIN_LEVEL..=MAX_LEVEL).contains(&goal_level);
    if !in_domain || !is_half_step(goal_level) || !is_half_step(estimated_level) || goal_level < estimated_level {
        return Err(PogoError::UnreachableLevel { from: estimated_level, to: goal_level });
    }
    Ok(project_cost(goal_level, estimated_level))
}

pub fn is_half_step(level: f64) -> bool {
    level.is_finite() && (level * 2.0).fract() == 0.0
}

// 宝可梦等级上限 = 训练师等级 + 1.5，且不超过40
pub fn max_level_for_trainer(trainer_level: u32) -> f64 {
    (f64::from(trainer_level) + 1.5).min(MAX_LEVEL)
}
