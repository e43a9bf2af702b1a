// 宝可梦种族数据模块
// 种族以连续下标存放在图鉴数组中；进化关系用下标邻接表表示，构造后不可变

use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::BaseStats;
use crate::constants::DEVOLUTION_SENTINEL;
use crate::core::error::{PogoError, Result};

// 图鉴下标 (0起，与输入数据顺序一致)
pub type SpeciesId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub index: SpeciesId,
    pub base_stats: BaseStats,
    // None 表示最初形态
    pub devolves_from: Option<SpeciesId>,
}

impl Species {
    pub fn base_attack(&self) -> u32 {
        self.base_stats.attack
    }

    pub fn base_defense(&self) -> u32 {
        self.base_stats.defense
    }

    pub fn base_stamina(&self) -> u32 {
        self.base_stats.stamina
    }

    pub fn is_base_form(&self) -> bool {
        self.devolves_from.is_none()
    }
}

type EvolutionList = SmallVec<[SpeciesId; 4]>;

// 种族目录：只读共享数据
#[derive(Debug, Clone)]
pub struct SpeciesCatalog {
    // 保持输入顺序，不做字母排序
    pokedex: Vec<Species>,
    by_name: IndexMap<String, SpeciesId>,
    // evolutions[i]: 由 i 进化而来的种族，按名称排序
    evolutions: Vec<EvolutionList>,
}

impl SpeciesCatalog {
    pub fn build<S: AsRef<str>>(
        names: &[S],
        attack: &[u32],
        defense: &[u32],
        stamina: &[u32],
        devolution: &[i64],
    ) -> Result<Self> {
        let len = names.len();
        if attack.len() != len || defense.len() != len || stamina.len() != len || devolution.len() != len {
            return Err(PogoError::InputShape(format!(
                "names={}, attack={}, defense={}, stamina={}, devolution={}",
                len,
                attack.len(),
                defense.len(),
                stamina.len(),
                devolution.len()
            )));
        }

        let mut pokedex = Vec::with_capacity(len);
        let mut by_name = IndexMap::with_capacity(len);

        for index in 0..len {
            let name = names[index].as_ref();
            let devolves_from = match devolution[index] {
                DEVOLUTION_SENTINEL => None,
                raw => match usize::try_from(raw) {
                    Ok(parent) if parent < len => Some(parent),
                    _ => return Err(PogoError::InvalidDevolution { index, devolution: raw }),
                },
            };

            if by_name.insert(name.to_string(), index).is_some() {
                return Err(PogoError::DuplicateSpecies(name.to_string()));
            }

            pokedex.push(Species {
                name: name.to_string(),
                index,
                base_stats: BaseStats::new(attack[index], defense[index], stamina[index]),
                devolves_from,
            });
        }

        let mut evolutions: Vec<EvolutionList> = vec![SmallVec::new(); len];
        for species in &pokedex {
            if let Some(parent) = species.devolves_from {
                evolutions[parent].push(species.index);
            }
        }
        for list in &mut evolutions {
            list.sort_by(|a, b| pokedex[*a].name.cmp(&pokedex[*b].name));
        }

        let linked = pokedex.iter().filter(|s| s.devolves_from.is_some()).count();
        info!("种族目录构建完成，共{}个种族，{}条进化关系", len, linked);

        Ok(Self { pokedex, by_name, evolutions })
    }

    pub fn get(&self, index: SpeciesId) -> Option<&Species> {
        self.pokedex.get(index)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Species> {
        self.by_name.get(name).map(|&index| &self.pokedex[index])
    }

    pub fn lookup_by_index(&self, index: SpeciesId) -> Result<&Species> {
        self.get(index).ok_or(PogoError::IndexOutOfRange { index, len: self.pokedex.len() })
    }

    pub fn lookup_by_name(&self, name: &str) -> Result<&Species> {
        self.get_by_name(name).ok_or_else(|| PogoError::SpeciesNotFound(name.to_string()))
    }

    // 命令行输入使用：先精确匹配，再忽略大小写
    pub fn find(&self, name: &str) -> Result<&Species> {
        if let Some(species) = self.get_by_name(name) {
            return Ok(species);
        }
        let found = self.pokedex.iter().find(|s| s.name.eq_ignore_ascii_case(name.trim()));
        if found.is_none() {
            debug!("未找到种族: {}", name);
        }
        found.ok_or_else(|| PogoError::SpeciesNotFound(name.to_string()))
    }

    pub fn pokedex(&self) -> &[Species] {
        &self.pokedex
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Species> {
        self.pokedex.iter()
    }

    pub fn len(&self) -> usize {
        self.pokedex.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokedex.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn evolution_ids(&self, index: SpeciesId) -> &[SpeciesId] {
        self.evolutions.get(index).map(|list| list.as_slice()).unwrap_or(&[])
    }

    pub fn evolutions_of<'a>(&'a self, species: &Species) -> impl Iterator<Item = &'a Species> + 'a {
        self.evolution_ids(species.index).iter().map(move |&id| &self.pokedex[id])
    }

    pub fn devolution_of(&self, species: &Species) -> Option<&Species> {
        species.devolves_from.and_then(|parent| self.get(parent))
    }
}

impl<'a> IntoIterator for &'a SpeciesCatalog {
    type Item = &'a Species;
    type IntoIter = std::slice::Iter<'a, Species>;

    fn into_iter(self) -> Self::IntoIter {
        self.pokedex.iter()
    }
}
