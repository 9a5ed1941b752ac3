pub mod config;
pub mod tasks;

use std::io;
use std::path::{Path, PathBuf};

/// 覆盖数据目录的环境变量
pub const HOME_ENV: &str = "TASKDECK_HOME";

/// 获取 ~/.taskdeck/ 目录路径（可由 TASKDECK_HOME 覆盖）
pub fn taskdeck_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".taskdeck")
}

/// 日志目录: ~/.taskdeck/logs/
pub fn logs_dir() -> PathBuf {
    taskdeck_dir().join("logs")
}

/// 从 TOML 文件加载反序列化数据
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<T> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// 将数据序列化后保存到 TOML 文件（自动创建父目录）
pub fn save_toml<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content =
        toml::to_string_pretty(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, content)
}
