// 宝可梦进化链查询
// 向上沿退化下标找到最初形态；向下只展开两代（现实中的进化链最多三段）

use log::trace;

use super::species::{Species, SpeciesCatalog};

#[derive(Debug, Clone, Copy)]
pub struct EvolutionNavigator<'a> {
    catalog: &'a SpeciesCatalog,
}

impl<'a> EvolutionNavigator<'a> {
    pub fn new(catalog: &'a SpeciesCatalog) -> Self {
        Self { catalog }
    }

    /// 进化链中的最初形态，例如喷火龙 -> 小火龙。
    ///
    /// 退化关系必须无环，否则不会终止。
    pub fn lowest_evolution(&self, species: &'a Species) -> &'a Species {
        let mut current = species;
        while let Some(parent) = self.catalog.devolution_of(current) {
            current = parent;
        }
        current
    }

    /// 最初形态 + 第二形态 + 第三形态。
    ///
    /// 只展开两代，第四段及以后不会出现在结果里。
    pub fn evolution_line(&self, species: &'a Species) -> Vec<&'a Species> {
        let base = self.lowest_evolution(species);

        let mut line = vec![base];
        line.extend(self.catalog.evolutions_of(base));
        for evolution in self.catalog.evolutions_of(base) {
            line.extend(self.catalog.evolutions_of(evolution));
        }

        trace!("{} 的进化链共{}个种族", species.name, line.len());
        line
    }

    // 是否属于同一进化链
    pub fn same_family(&self, a: &'a Species, b: &'a Species) -> bool {
        self.lowest_evolution(a).index == self.lowest_evolution(b).index
    }
}
