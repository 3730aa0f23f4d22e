use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// 反馈提交地址
    pub endpoint_url: String,
    /// 提交成功后展示成功提示的时长（毫秒）
    pub success_delay_ms: u64,
    /// 宿主是否偏好深色主题
    pub prefers_dark: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: "http://localhost:5678/webhook/feedback".to_string(),
            success_delay_ms: 2000,
            prefers_dark: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 只从环境变量读取，解析失败时回退到默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 默认值 → TOML 文件（可选）→ 环境变量
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件读取配置，未出现的键使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content).map_err(|source| {
            AppError::Config(ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            endpoint_url: std::env::var("FEEDBACK_ENDPOINT_URL").unwrap_or(self.endpoint_url),
            success_delay_ms: std::env::var("FEEDBACK_SUCCESS_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.success_delay_ms),
            prefers_dark: std::env::var("FEEDBACK_PREFERS_DARK").ok().and_then(|v| v.parse().ok()).unwrap_or(self.prefers_dark),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 成功提示的展示时长
    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delay_is_two_seconds() {
        assert_eq!(Config::default().success_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_toml_partial_overrides_defaults() {
        let config = Config::from_toml_str(
            r#"
            endpoint_url = "https://example.com/feedback"
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint_url, "https://example.com/feedback");
        assert_eq!(config.success_delay_ms, 2000);
        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_toml_rejects_wrong_types() {
        assert!(Config::from_toml_str("success_delay_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let err = Config::from_toml_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, AppError::File(_)));
    }
}
