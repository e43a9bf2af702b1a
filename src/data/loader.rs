/*
* 数据集加载
* - 种族数据集：名称、攻击、防御、耐力、退化下标五个等长数组
* - 等级系数表：按半级排列的浮点数组
* - 根据扩展名选择 JSON 或 TOML
*/

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::core::error::{PogoError, Result};
use crate::pokemon::{LevelScalarTable, SpeciesCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Toml,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(DataFormat::Json),
            Some("toml") => Ok(DataFormat::Toml),
            _ => Err(PogoError::Data(format!("unsupported data file: {}", path.display()))),
        }
    }

    fn parse<T: for<'de> Deserialize<'de>>(self, content: &str) -> Result<T> {
        match self {
            DataFormat::Json => Ok(serde_json::from_str(content)?),
            DataFormat::Toml => toml::from_str(content).map_err(|e| PogoError::Data(e.to_string())),
        }
    }

    fn render<T: Serialize>(self, value: &T) -> Result<String> {
        match self {
            DataFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            DataFormat::Toml => toml::to_string_pretty(value).map_err(|e| PogoError::Data(e.to_string())),
        }
    }
}

// 种族数据集的原始形态（并行数组）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub names: Vec<String>,
    pub attack: Vec<u32>,
    pub defense: Vec<u32>,
    pub stamina: Vec<u32>,
    // -1 表示没有退化形态
    pub devolution: Vec<i64>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn build_catalog(&self) -> Result<SpeciesCatalog> {
        SpeciesCatalog::build(self.names.as_slice(), &self.attack, &self.defense, &self.stamina, &self.devolution)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let format = DataFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        let dataset: Dataset = format.parse(&content)?;
        info!("加载种族数据集: {:?} ({}个种族)", path, dataset.len());
        Ok(dataset)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = DataFormat::from_path(path)?.render(self)?;
        fs::write(path, content)?;
        debug!("种族数据集已保存到: {:?}", path);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelScalarFile {
    scalars: Vec<f64>,
}

pub fn load_level_scalars(path: &Path) -> Result<LevelScalarTable> {
    let format = DataFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let file: LevelScalarFile = format.parse(&content)?;
    info!("加载等级系数表: {:?} ({}项)", path, file.scalars.len());
    LevelScalarTable::new(file.scalars)
}

pub fn save_level_scalars(table: &LevelScalarTable, path: &Path) -> Result<()> {
    let file = LevelScalarFile { scalars: table.as_slice().to_vec() };
    let content = DataFormat::from_path(path)?.render(&file)?;
    fs::write(path, content)?;
    Ok(())
}
