//! 设置模块
//!
//! 提供设置数据结构和 JSON 持久化

use std::path::{Path, PathBuf};

use protocol::{Board, BoardError, Layout, DEFAULT_LAYOUT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::Theme;

/// 设置读写错误
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Config directory is unavailable")]
    NoConfigDir,

    #[error("Settings file {0:?} does not exist")]
    Missing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// 对应的过滤指令
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// 棋盘设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 拖拽时显示合法落点
    pub show_move_hints: bool,
    /// 日志级别
    pub log_level: LogLevel,
    /// 初始布局
    pub layout: String,
    /// 配色
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_move_hints: true,
            log_level: LogLevel::default(),
            layout: DEFAULT_LAYOUT.to_string(),
            theme: Theme::default(),
        }
    }
}

impl Settings {
    /// 设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("chessboard");
            path.push("settings.json");
            path
        })
    }

    /// 从默认位置加载设置
    ///
    /// 任何失败都回退到默认设置，同时返回失败原因，调用方在日志初始化后记录。
    pub fn load() -> (Self, Option<SettingsError>) {
        let Some(path) = Self::settings_path() else {
            return (Self::default(), Some(SettingsError::NoConfigDir));
        };
        Self::load_or_default(&path)
    }

    /// 从指定文件加载设置，失败时回退到默认设置
    pub fn load_or_default(path: &Path) -> (Self, Option<SettingsError>) {
        if !path.exists() {
            return (Self::default(), Some(SettingsError::Missing(path.to_path_buf())));
        }

        match Self::load_from(path) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// 从指定文件加载设置
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 保存到默认位置
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// 保存到指定文件，必要时创建目录
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("设置已保存: {:?}", path);
        Ok(())
    }

    /// 按配置的布局生成初始棋盘
    pub fn initial_board(&self) -> Result<Board, BoardError> {
        Layout::parse(&self.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.show_move_hints);
        assert_eq!(settings.log_level, LogLevel::Info);
        assert_eq!(settings.initial_board().unwrap(), Board::default_layout());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            show_move_hints: false,
            log_level: LogLevel::Debug,
            layout: "K7/8/8/8/8/8/8/8".to_string(),
            theme: Theme::high_contrast(),
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"show_move_hints": false}"#).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert!(!loaded.show_move_hints);
        assert_eq!(loaded.layout, DEFAULT_LAYOUT);
        assert_eq!(loaded.theme, Theme::classic());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(Settings::load_from(&missing), Err(SettingsError::Io(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(Settings::load_from(&broken), Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_load_or_default_reports_reason() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        let (settings, reason) = Settings::load_or_default(&missing);
        assert_eq!(settings, Settings::default());
        assert!(matches!(reason, Some(SettingsError::Missing(path)) if path == missing));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let (settings, reason) = Settings::load_or_default(&broken);
        assert_eq!(settings, Settings::default());
        assert!(matches!(reason, Some(SettingsError::Json(_))));

        let good = dir.path().join("good.json");
        std::fs::write(&good, r#"{"show_move_hints": false}"#).unwrap();
        let (settings, reason) = Settings::load_or_default(&good);
        assert!(!settings.show_move_hints);
        assert!(reason.is_none());
    }

    #[test]
    fn test_invalid_layout() {
        let settings = Settings {
            layout: "8/8".to_string(),
            ..Settings::default()
        };
        assert!(settings.initial_board().is_err());
    }

    #[test]
    fn test_log_level_directive() {
        assert_eq!(LogLevel::Warn.directive(), "warn");
        assert_eq!(LogLevel::Trace.directive(), "trace");
    }
}
