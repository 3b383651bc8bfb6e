use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub rig: RigConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RigConfig {
    /// 最後のフレームからこの時間（ミリ秒）を超えたら退場
    #[serde(default = "default_expiry_ms")]
    pub expiry_ms: u64,
    /// 同時に追跡するプレイヤー数
    #[serde(default = "default_max_players")]
    pub max_players: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// ログファイルの出力先
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReplayConfig {
    /// 骨格記録ファイル (JSON)
    pub path: Option<String>,
    #[serde(default)]
    pub loop_playback: bool,
}

fn default_expiry_ms() -> u64 { 500 }
fn default_max_players() -> usize { 2 }
fn default_target_fps() -> u32 { 30 }
fn default_log_dir() -> String { "logs".to_string() }

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            expiry_ms: default_expiry_ms(),
            max_players: default_max_players(),
        }
    }
}

impl RigConfig {
    pub fn expiry(&self) -> Duration {
        Duration::from_millis(self.expiry_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_fps: default_target_fps(),
        }
    }
}

impl AppConfig {
    /// 1フレームの長さ。0fps は 1fps 扱い
    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.target_fps.max(1)))
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        Ok(config)
    }

    /// 読めなければデフォルト設定
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config {} not loaded ({:#}), using defaults", path.as_ref().display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rig.expiry_ms, 500);
        assert_eq!(config.rig.expiry(), Duration::from_millis(500));
        assert_eq!(config.rig.max_players, 2);
        assert_eq!(config.app.target_fps, 30);
        assert_eq!(config.log.dir, "logs");
        assert!(config.replay.path.is_none());
        assert!(!config.replay.loop_playback);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.rig.expiry_ms, 500);
        assert_eq!(config.app.target_fps, 30);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse(
            r#"
            [rig]
            expiry_ms = 800

            [replay]
            path = "capture.json"
            loop_playback = true
            "#,
        )
        .unwrap();
        assert_eq!(config.rig.expiry_ms, 800);
        assert_eq!(config.rig.max_players, 2);
        assert_eq!(config.replay.path.as_deref(), Some("capture.json"));
        assert!(config.replay.loop_playback);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(Config::parse("[rig]\nexpiry_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/config.toml");
        assert_eq!(config.rig.max_players, 2);
    }

    #[test]
    fn test_frame_interval() {
        let app = AppConfig { target_fps: 50 };
        assert_eq!(app.frame_interval(), Duration::from_millis(20));
        let zero = AppConfig { target_fps: 0 };
        assert_eq!(zero.frame_interval(), Duration::from_secs(1));
    }
}
