/*
* 计算器配置
* - 数据来源：自定义种族数据集与等级系数表路径，缺省时使用内置数据
* - 训练师等级：决定升级消耗的默认目标等级
* - 日志级别：传给env_logger的过滤器
*/

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::core::error::{PogoError, Result};
use crate::pokemon::upgrade::max_level_for_trainer;

pub const TRAINER_LEVEL_ENV: &str = "POGOIV_TRAINER_LEVEL";
pub const MAX_TRAINER_LEVEL: u32 = 40;

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub general: GeneralConfig,
    pub data: DataConfig,
    pub trainer: TrainerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_scalar_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub level: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: if cfg!(debug_assertions) { "debug".to_string() } else { "info".to_string() },
        }
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self { level: 20 }
    }
}

impl CalculatorConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("配置文件不存在，创建默认配置: {:?}", path);
            let default_config = CalculatorConfig::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path)?;
        let config: CalculatorConfig = toml::from_str(&content)
            .map_err(|e| PogoError::Config(format!("failed to parse {}: {}", path.display(), e)))?;

        config.validate()?;
        info!("成功加载配置文件: {:?}", path);
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, content)?;
        debug!("配置已保存到: {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.trainer.level == 0 || self.trainer.level > MAX_TRAINER_LEVEL {
            return Err(PogoError::Config(format!(
                "trainer level must be within 1-{}, got {}",
                MAX_TRAINER_LEVEL, self.trainer.level
            )));
        }

        let level = self.general.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(PogoError::Config(format!("unknown log level: {}", self.general.log_level)));
        }

        Ok(())
    }

    // 环境变量覆盖
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        let trainer_level = env::var(TRAINER_LEVEL_ENV).ok();
        self.apply_overrides(trainer_level.as_deref())
    }

    pub fn apply_overrides(&mut self, trainer_level: Option<&str>) -> Result<()> {
        if let Some(raw) = trainer_level {
            self.trainer.level = raw.trim().parse().map_err(|_| {
                PogoError::Config(format!("{} is not a valid trainer level: {:?}", TRAINER_LEVEL_ENV, raw))
            })?;
            debug!("训练师等级被覆盖为 {}", self.trainer.level);
        }
        self.validate()
    }

    // 升级消耗的默认目标等级
    pub fn trainer_level_cap(&self) -> f64 {
        max_level_for_trainer(self.trainer.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CalculatorConfig::default();
        assert_eq!(config.trainer.level, 20);
        assert!(config.data.species_path.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.trainer_level_cap(), 21.5);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = CalculatorConfig::default();
        config.data.species_path = Some(PathBuf::from("data/species.json"));
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: CalculatorConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CalculatorConfig = toml::from_str("[trainer]\nlevel = 31\n").unwrap();
        assert_eq!(config.trainer.level, 31);
        assert!(config.data.level_scalar_path.is_none());
        assert_eq!(config.general, GeneralConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CalculatorConfig::default();
        config.trainer.level = 0;
        assert!(config.validate().is_err());

        config.trainer.level = 41;
        assert!(config.validate().is_err());

        config.trainer.level = 40;
        config.general.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        config.general.log_level = "WARN".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = CalculatorConfig::default();
        config.apply_overrides(Some(" 35 ")).unwrap();
        assert_eq!(config.trainer.level, 35);
        assert_eq!(config.trainer_level_cap(), 36.5);

        assert!(config.apply_overrides(Some("thirty")).is_err());
        assert!(config.apply_overrides(Some("99")).is_err());

        let mut untouched = CalculatorConfig::default();
        untouched.apply_overrides(None).unwrap();
        assert_eq!(untouched, CalculatorConfig::default());
    }

    #[test]
    fn test_config_file_operations() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("pogoiv.toml");

        // 缺失时写出默认配置
        let created = CalculatorConfig::load_from_file(&config_path).unwrap();
        assert!(config_path.exists());
        assert_eq!(created, CalculatorConfig::default());

        let mut config = CalculatorConfig::default();
        config.trainer.level = 28;
        config.save_to_file(&config_path).unwrap();

        let loaded = CalculatorConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.trainer.level, 28);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "[trainer]\nlevel = 0\n").unwrap();
        assert!(matches!(
            CalculatorConfig::load_from_file(&config_path),
            Err(PogoError::Config(_))
        ));
    }
}
