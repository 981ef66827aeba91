use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 表格导入错误
    #[error("导入错误: {0}")]
    Import(#[from] ImportError),
    /// 题目生成错误
    #[error("生成错误: {0}")]
    Generation(#[from] GenerationError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 表格导入错误
///
/// 两种错误都是终止性的：导入要么返回完整批次，要么什么都不返回。
#[derive(Debug, Error)]
pub enum ImportError {
    /// 字节流无法解码为工作簿
    #[error("无法解析表格文件: {reason}")]
    ParseFailure { reason: String },
    /// 工作簿可读，但过滤后没有有效题目
    #[error("表格中没有有效题目 (共 {rows_seen} 行数据)")]
    EmptyResult { rows_seen: usize },
}

/// 题目生成错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// 主题为空或只包含空白
    #[error("主题不能为空")]
    InvalidInput,
    /// 模板实例化过程中出现内部错误
    #[error("题目生成失败: {reason}")]
    GenerationFailure { reason: String },
    /// 请求在完成前超时
    #[error("题目生成已取消 (超时 {timeout_ms}ms)")]
    Cancelled { timeout_ms: u64 },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl ImportError {
    /// 创建解码失败错误
    pub fn parse_failure(reason: impl Into<String>) -> Self {
        ImportError::ParseFailure {
            reason: reason.into(),
        }
    }
}

impl GenerationError {
    /// 创建内部生成失败错误
    pub fn failure(reason: impl Into<String>) -> Self {
        GenerationError::GenerationFailure {
            reason: reason.into(),
        }
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::parse_failure(err.to_string())
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
