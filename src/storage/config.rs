//! 应用配置持久化

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskdeckError};

use super::taskdeck_dir;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// 检查取值范围
    pub fn validate(&self) -> Result<()> {
        if self.ui.toast_ms == 0 {
            return Err(TaskdeckError::config("ui.toast_ms must be greater than 0"));
        }
        Ok(())
    }
}

/// 主题配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Auto".to_string(),
        }
    }
}

/// 界面配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// Toast 显示时长（毫秒）
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
    /// 启动时打开的项目
    #[serde(default)]
    pub default_project: Option<String>,
}

fn default_toast_ms() -> u64 {
    3000
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_ms: default_toast_ms(),
            default_project: None,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// tracing 过滤表达式（如 "info"、"taskdeck=debug"）
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// 获取配置文件路径
pub fn config_path() -> PathBuf {
    taskdeck_dir().join("config.toml")
}

/// 加载配置（不存在或解析失败则返回默认值）
pub fn load_config() -> Config {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match fs::read_to_string(path)
        .map_err(TaskdeckError::from)
        .and_then(|s| toml::from_str::<Config>(&s).map_err(Into::into))
        .and_then(|config| config.validate().map(|_| config))
    {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
            Config::default()
        }
    }
}

/// 保存配置
pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(&config_path(), config)
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml"));
        assert_eq!(config, Config::default());
        assert_eq!(config.ui.toast_ms, 3000);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.theme.name, "Auto");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\ndefault_project = \"demo\"\n").unwrap();

        let config = load_config_from(&path);
        assert_eq!(config.ui.default_project.as_deref(), Some("demo"));
        assert_eq!(config.ui.toast_ms, 3000);
        assert_eq!(config.theme.name, "Auto");
    }

    #[test]
    fn test_broken_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui\n").unwrap();

        assert_eq!(load_config_from(&path), Config::default());
    }

    #[test]
    fn test_zero_toast_duration_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\ntoast_ms = 0\n").unwrap();

        assert_eq!(load_config_from(&path), Config::default());
        assert!(matches!(
            toml::from_str::<Config>("[ui]\ntoast_ms = 0\n").unwrap().validate(),
            Err(TaskdeckError::Config(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.theme.name = "Nord".to_string();
        config.ui.default_project = Some("demo".to_string());

        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path), config);
    }
}
