use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 出题服务地址（不含 /api 前缀）
    pub api_base_url: String,
    /// 本地存储文件（保存登录 token）
    pub storage_file: PathBuf,
    /// 生成成功后跳转到 dashboard 的延迟（毫秒）
    pub redirect_delay_ms: u64,
    /// 默认题目数量
    pub default_num_questions: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            storage_file: PathBuf::from(".quiz_storage.json"),
            redirect_delay_ms: 2000,
            default_num_questions: 10,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件结构，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    api_base_url: Option<String>,
    storage_file: Option<PathBuf>,
    redirect_delay_ms: Option<u64>,
    default_num_questions: Option<u32>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 仅从环境变量加载
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// 从 TOML 文件加载，再用环境变量覆盖
    ///
    /// # 参数
    /// - `path`: 配置文件路径，文件不存在时直接使用默认值
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!("配置文件 {} 不存在，使用默认配置", path.display());
            return Ok(Self::from_env());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(Self::from_toml_str(&content)
            .map_err(|e| match e {
                ConfigError::TomlParseFailed { source, .. } => ConfigError::TomlParseFailed {
                    path: path.display().to_string(),
                    source,
                },
                other => other,
            })?
            .with_env())
    }

    /// 解析 TOML 文本（不读取环境变量）
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParseFailed {
            path: String::new(),
            source: e,
        })?;

        let default = Self::default();
        let config = Self {
            api_base_url: file.api_base_url.unwrap_or(default.api_base_url),
            storage_file: file.storage_file.unwrap_or(default.storage_file),
            redirect_delay_ms: file.redirect_delay_ms.unwrap_or(default.redirect_delay_ms),
            default_num_questions: file
                .default_num_questions
                .unwrap_or(default.default_num_questions),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
        };
        config.validate()?;
        Ok(config)
    }

    fn with_env(self) -> Self {
        Self {
            api_base_url: std::env::var("QUIZ_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(self.api_base_url),
            storage_file: std::env::var("QUIZ_STORAGE_FILE")
                .map(PathBuf::from)
                .unwrap_or(self.storage_file),
            redirect_delay_ms: std::env::var("QUIZ_REDIRECT_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.redirect_delay_ms),
            default_num_questions: self.default_num_questions,
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url".to_string(),
                value: self.api_base_url.clone(),
            });
        }
        if self.default_num_questions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_num_questions".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// 跳转延迟
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.redirect_delay(), Duration::from_secs(2));
        assert_eq!(config.default_num_questions, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config =
            Config::from_toml_str(r#"api_base_url = "https://quiz.example.com/""#).unwrap();
        assert_eq!(config.api_base_url, "https://quiz.example.com/");
        assert_eq!(config.redirect_delay_ms, 2000);
        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = Config::from_toml_str("redirect_delay_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseFailed { .. }));
    }

    #[test]
    fn test_zero_question_default_rejected() {
        let err = Config::from_toml_str("default_num_questions = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
