// 能力值计算
// 种族值 + 个体值 + 等级系数 => CP / HP，所有查询共用同一套公式

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_IV, MIN_HP, MIN_IV};
use crate::core::error::{PogoError, Result};
use crate::pogo_error;

// 种族值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseStats {
    pub attack: u32,
    pub defense: u32,
    pub stamina: u32,
}

// 个体值 (IV)，每项 0-15
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IvTriple {
    pub attack: u8,
    pub defense: u8,
    pub stamina: u8,
}

impl BaseStats {
    pub const fn new(attack: u32, defense: u32, stamina: u32) -> Self {
        Self { attack, defense, stamina }
    }

    pub fn hp(&self, stamina_iv: u8, level_scalar: f64) -> u32 {
        let hp = ((f64::from(self.stamina) + f64::from(stamina_iv)) * level_scalar).floor() as u32;
        hp.max(MIN_HP)
    }

    pub fn cp(&self, iv: IvTriple, level_scalar: f64) -> u32 {
        // 先转为浮点再相加，种族值接近 u32 上限时也不会溢出
        let attack = f64::from(self.attack) + f64::from(iv.attack);
        let defense = (f64::from(self.defense) + f64::from(iv.defense)).sqrt();
        let stamina = (f64::from(self.stamina) + f64::from(iv.stamina)).sqrt();
        (attack * defense * stamina * (level_scalar * level_scalar) * 0.1).floor() as u32
    }
}

impl IvTriple {
    pub const MIN: IvTriple = IvTriple { attack: 0, defense: 0, stamina: 0 };
    pub const MAX: IvTriple = IvTriple { attack: MAX_IV, defense: MAX_IV, stamina: MAX_IV };

    pub fn new(attack: u8, defense: u8, stamina: u8) -> Result<Self> {
        for (label, value) in [("attack", attack), ("defense", defense), ("stamina", stamina)] {
            if value > MAX_IV {
                return Err(pogo_error!(InvalidIv, "{} IV {} exceeds {}", label, value, MAX_IV));
            }
        }
        Ok(Self { attack, defense, stamina })
    }

    pub fn sum(&self) -> u32 {
        u32::from(self.attack) + u32::from(self.defense) + u32::from(self.stamina)
    }

    // 完美度百分比 (sum / 45)
    pub fn percent(&self) -> u32 {
        (f64::from(self.sum()) * 100.0 / f64::from(3 * u32::from(MAX_IV))).round() as u32
    }

    // 搜索空间，耐力为最外层
    pub fn all() -> impl Iterator<Item = IvTriple> {
        (MIN_IV..=MAX_IV).flat_map(|stamina| {
            (MIN_IV..=MAX_IV).flat_map(move |defense| {
                (MIN_IV..=MAX_IV).map(move |attack| IvTriple { attack, defense, stamina })
            })
        })
    }
}

impl fmt::Display for IvTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.attack, self.defense, self.stamina)
    }
}

// 解析 "攻击/防御/耐力" 形式，例如 "15/10/12"
impl FromStr for IvTriple {
    type Err = PogoError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('/').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(pogo_error!(InvalidIv, "expected attack/defense/stamina, got {:?}", s));
        }

        let mut values = [0u8; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| pogo_error!(InvalidIv, "{:?} is not an IV value", part))?;
        }
        IvTriple::new(values[0], values[1], values[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEWTWO: BaseStats = BaseStats::new(284, 202, 212);
    const LEVEL_40: f64 = 0.79030001;

    #[test]
    fn test_known_max_values() {
        assert_eq!(MEWTWO.cp(IvTriple::MAX, LEVEL_40), 4144);
        assert_eq!(MEWTWO.hp(15, LEVEL_40), 179);
        assert_eq!(MEWTWO.cp(IvTriple::MIN, LEVEL_40), 3670);
    }

    #[test]
    fn test_hp_floor() {
        let magikarp = BaseStats::new(42, 84, 40);
        // 1级系数下 (40 + 15) * 0.094 = 5.17，被抬到下限
        assert_eq!(magikarp.hp(15, 0.094), MIN_HP);
        assert_eq!(magikarp.cp(IvTriple::MAX, 0.094), 3);
    }

    #[test]
    fn test_extreme_base_stats() {
        let huge = BaseStats::new(u32::MAX, u32::MAX, u32::MAX);
        assert!(huge.hp(15, LEVEL_40) > 3_000_000_000);
        // CP 超出 u32 时取上限
        assert_eq!(huge.cp(IvTriple::MAX, LEVEL_40), u32::MAX);
    }

    #[test]
    fn test_iv_validation() {
        assert!(IvTriple::new(15, 15, 15).is_ok());
        assert!(matches!(IvTriple::new(16, 0, 0), Err(PogoError::InvalidIv(_))));
        assert!(IvTriple::new(0, 0, 200).is_err());
    }

    #[test]
    fn test_percent() {
        assert_eq!(IvTriple::MAX.percent(), 100);
        assert_eq!(IvTriple::MIN.percent(), 0);
        // 30 / 45 = 66.67%
        assert_eq!(IvTriple::new(10, 10, 10).unwrap().percent(), 67);
        assert_eq!(IvTriple::new(10, 12, 7).unwrap().sum(), 29);
    }

    #[test]
    fn test_parse() {
        let iv: IvTriple = "15/ 10 /3".parse().unwrap();
        assert_eq!(iv, IvTriple { attack: 15, defense: 10, stamina: 3 });
        assert_eq!(iv.to_string(), "15/10/3");

        assert!("15/10".parse::<IvTriple>().is_err());
        assert!("a/b/c".parse::<IvTriple>().is_err());
        assert!("16/0/0".parse::<IvTriple>().is_err());
    }

    #[test]
    fn test_search_space_order() {
        let all: Vec<IvTriple> = IvTriple::all().collect();
        assert_eq!(all.len(), 4096);
        assert_eq!(all[0], IvTriple::MIN);
        assert_eq!(all[1], IvTriple { attack: 1, defense: 0, stamina: 0 });
        assert_eq!(all[16], IvTriple { attack: 0, defense: 1, stamina: 0 });
        assert_eq!(all[256], IvTriple { attack: 0, defense: 0, stamina: 1 });
        assert_eq!(all[4095], IvTriple::MAX);
    }
}
