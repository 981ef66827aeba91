use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 模拟检索的延迟（毫秒），0 表示不等待
    pub lookup_delay_ms: u64,
    /// 单次生成请求的超时（毫秒），0 表示不限制
    pub request_timeout_ms: u64,
    /// 同时处理的任务数量
    pub max_concurrent_jobs: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 待导入的表格文件
    pub spreadsheet_paths: Vec<String>,
    /// 待生成题目的主题
    pub topics: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup_delay_ms: 1000,
            request_timeout_ms: 30_000,
            max_concurrent_jobs: 4,
            verbose_logging: false,
            output_log_file: "quiz_run.log".to_string(),
            spreadsheet_paths: Vec::new(),
            topics: Vec::new(),
        }
    }
}

impl Config {
    /// 加载配置：先读 `QUIZ_CONFIG_FILE` 指定的 TOML 文件（如果有），再用环境变量覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("QUIZ_CONFIG_FILE") {
            Ok(path) if !path.trim().is_empty() => Self::from_toml_file(Path::new(&path))?,
            _ => Self::default(),
        };
        base.with_env_overrides()
    }

    /// 从环境变量读取，未设置的字段使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件读取，缺失的字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Result<Self, ConfigError> {
        Ok(Self {
            lookup_delay_ms: env_parse("LOOKUP_DELAY_MS", "u64")?.unwrap_or(self.lookup_delay_ms),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", "u64")?
                .unwrap_or(self.request_timeout_ms),
            max_concurrent_jobs: env_parse("MAX_CONCURRENT_JOBS", "usize")?
                .unwrap_or(self.max_concurrent_jobs),
            verbose_logging: env_parse("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            spreadsheet_paths: env_list("QUIZ_SPREADSHEETS").unwrap_or(self.spreadsheet_paths),
            topics: env_list("QUIZ_TOPICS").unwrap_or(self.topics),
        })
    }
}

fn env_parse<T: FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

/// 逗号分隔的列表，忽略空项
fn env_list(var_name: &str) -> Option<Vec<String>> {
    std::env::var(var_name).ok().map(|value| split_list(&value))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
