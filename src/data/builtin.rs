// 内置数据：第一世代部分种族 + 1-40级等级系数表
// 进程内只构建一次，之后以 Arc 共享只读

use lazy_static::lazy_static;
use log::debug;
use std::sync::Arc;

use crate::pokemon::{LevelScalarTable, SpeciesCatalog};

// 1.0 - 40.0 每半级一个系数
pub const CP_MULTIPLIERS: [f64; 79] = [
    0.094, 0.135137432, 0.16639787, 0.192650919, 0.21573247, 0.236572661, 0.25572005, 0.273530381,
    0.29024988, 0.306057377, 0.3210876, 0.335445036, 0.34921268, 0.362457751, 0.37523559, 0.387592406,
    0.39956728, 0.411193551, 0.42250001, 0.432926419, 0.44310755, 0.453059958, 0.46279839, 0.472336083,
    0.48168495, 0.4908558, 0.49985844, 0.508701765, 0.51739395, 0.525942511, 0.53435433, 0.542635767,
    0.55079269, 0.558830576, 0.56675452, 0.574569153, 0.58227891, 0.589887917, 0.59740001, 0.604818814,
    0.61215729, 0.619399365, 0.62656713, 0.633644533, 0.64065295, 0.647576426, 0.65443563, 0.661214806,
    0.667934, 0.674577537, 0.68116492, 0.687680648, 0.69414365, 0.700538673, 0.70688421, 0.713164996,
    0.71939909, 0.725571552, 0.7317, 0.734741009, 0.73776948, 0.740785574, 0.74378943, 0.746781211,
    0.74976104, 0.752729087, 0.75568551, 0.758630378, 0.76156384, 0.764486065, 0.76739717, 0.770297266,
    0.7731865, 0.776064962, 0.77893275, 0.781790055, 0.78463697, 0.787473578, 0.79030001,
];

// (名称, 攻击, 防御, 耐力, 退化下标)
pub const SPECIES: [(&str, u32, u32, u32, i64); 36] = [
    ("Bulbasaur", 126, 126, 90, -1),
    ("Ivysaur", 156, 158, 120, 0),
    ("Venusaur", 198, 200, 160, 1),
    ("Charmander", 128, 108, 78, -1),
    ("Charmeleon", 160, 140, 116, 3),
    ("Charizard", 212, 182, 156, 4),
    ("Squirtle", 112, 142, 88, -1),
    ("Wartortle", 144, 176, 118, 6),
    ("Blastoise", 186, 222, 158, 7),
    ("Caterpie", 62, 66, 90, -1),
    ("Metapod", 56, 86, 100, 9),
    ("Butterfree", 144, 144, 120, 10),
    ("Weedle", 68, 64, 80, -1),
    ("Kakuna", 62, 82, 90, 12),
    ("Beedrill", 144, 130, 130, 13),
    ("Pidgey", 94, 90, 80, -1),
    ("Pidgeotto", 126, 122, 126, 15),
    ("Pidgeot", 170, 166, 166, 16),
    ("Rattata", 92, 86, 60, -1),
    ("Raticate", 146, 150, 110, 18),
    ("Pikachu", 124, 108, 70, -1),
    ("Raichu", 200, 154, 120, 20),
    ("Oddish", 134, 130, 90, -1),
    ("Gloom", 162, 158, 120, 22),
    ("Vileplume", 202, 190, 150, 23),
    ("Magikarp", 42, 84, 40, -1),
    ("Gyarados", 192, 196, 190, 25),
    ("Eevee", 114, 128, 110, -1),
    ("Vaporeon", 186, 168, 260, 27),
    ("Jolteon", 192, 174, 130, 27),
    ("Flareon", 238, 178, 130, 27),
    ("Snorlax", 180, 180, 320, -1),
    ("Dratini", 128, 110, 82, -1),
    ("Dragonair", 170, 152, 122, 32),
    ("Dragonite", 250, 212, 182, 33),
    ("Mewtwo", 284, 202, 212, -1),
];

pub fn dataset() -> super::Dataset {
    super::Dataset {
        names: SPECIES.iter().map(|s| s.0.to_string()).collect(),
        attack: SPECIES.iter().map(|s| s.1).collect(),
        defense: SPECIES.iter().map(|s| s.2).collect(),
        stamina: SPECIES.iter().map(|s| s.3).collect(),
        devolution: SPECIES.iter().map(|s| s.4).collect(),
    }
}

lazy_static! {
    static ref BUILTIN_CATALOG: Arc<SpeciesCatalog> = {
        let catalog = dataset().build_catalog().expect("built-in species table is well-formed");
        debug!("内置种族目录初始化完成，共{}个种族", catalog.len());
        Arc::new(catalog)
    };
    static ref BUILTIN_LEVEL_SCALARS: Arc<LevelScalarTable> = Arc::new(
        LevelScalarTable::new(CP_MULTIPLIERS.to_vec()).expect("built-in level scalar table is well-formed")
    );
}

pub fn catalog() -> Arc<SpeciesCatalog> {
    Arc::clone(&BUILTIN_CATALOG)
}

pub fn level_scalars() -> Arc<LevelScalarTable> {
    Arc::clone(&BUILTIN_LEVEL_SCALARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = catalog();
        assert_eq!(catalog.len(), SPECIES.len());
        let pikachu = catalog.lookup_by_name("Pikachu").unwrap();
        assert_eq!(pikachu.index, 20);
        assert_eq!(pikachu.base_attack(), 124);
        assert_eq!(catalog.evolutions_of(pikachu).next().unwrap().name, "Raichu");
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(Arc::ptr_eq(&catalog(), &catalog()));
        assert!(Arc::ptr_eq(&level_scalars(), &level_scalars()));
    }

    #[test]
    fn test_builtin_level_scalars() {
        let table = level_scalars();
        assert_eq!(table.len(), 79);
        assert_eq!(table.max_level(), 40.0);
        assert_eq!(table.scalar(1.0).unwrap(), 0.094);
        assert_eq!(table.scalar(30.0).unwrap(), 0.7317);
        // 系数随等级严格递增
        assert!(table.as_slice().windows(2).all(|pair| pair[0] < pair[1]));
    }
}
