// 等级系数表 (CpM)
// 每半级一个系数，从1级开始；索引 = trunc(level * 2) - 2

use serde::{Deserialize, Serialize};

use crate::constants::MIN_LEVEL;
use crate::core::error::{PogoError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelScalarTable {
    scalars: Vec<f64>,
}

impl LevelScalarTable {
    pub fn new(scalars: Vec<f64>) -> Result<Self> {
        if scalars.is_empty() {
            return Err(PogoError::Data("level scalar table is empty".to_string()));
        }
        if let Some(bad) = scalars.iter().find(|s| !s.is_finite() || **s <= 0.0) {
            return Err(PogoError::Data(format!("invalid level scalar: {}", bad)));
        }
        Ok(Self { scalars })
    }

    // 乘2后向零截断，避免半级边界的差一错误
    pub fn index_for(level: f64) -> Option<usize> {
        if !level.is_finite() {
            return None;
        }
        let code = (level * 2.0).trunc() as i64 - 2;
        usize::try_from(code).ok()
    }

    pub fn get(&self, level: f64) -> Option<f64> {
        Self::index_for(level).and_then(|index| self.scalars.get(index).copied())
    }

    pub fn scalar(&self, level: f64) -> Result<f64> {
        self.get(level).ok_or(PogoError::LevelOutOfRange(level))
    }

    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    pub fn min_level(&self) -> f64 {
        MIN_LEVEL
    }

    pub fn max_level(&self) -> f64 {
        MIN_LEVEL + self.scalars.len().saturating_sub(1) as f64 * 0.5
    }

    pub fn contains(&self, level: f64) -> bool {
        self.get(level).is_some()
    }

    pub fn levels(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.scalars.len()).map(|i| MIN_LEVEL + i as f64 * 0.5)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.scalars
    }
}
