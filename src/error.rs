use thiserror::Error;

/// 提交失败时展示给用户的统一提示
///
/// 网络错误与服务端拒绝使用同一段文字，具体原因只写入日志
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to send feedback. Please try again.";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 提交错误
    #[error("提交失败: {0}")]
    Submission(#[from] SubmissionError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 附件校验错误
///
/// `Display` 输出即为展示在上传控件旁边的文字
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 不支持的 MIME 类型
    #[error("Please upload a JPG or PNG image file only.")]
    UnsupportedType { mime_type: String },
    /// 文件超过大小上限
    #[error("File size must be less than 5MB.")]
    TooLarge { size_bytes: u64 },
}

/// 提交错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// 网络 / 连接 / 序列化失败
    #[error("请求发送失败: {message}")]
    Transport { message: String },
    /// 服务端返回非 2xx 状态码
    #[error("服务端拒绝请求: HTTP {status}")]
    ServerRejected { status: u16 },
}

impl SubmissionError {
    /// 面向用户的提示，不区分失败原因
    pub fn user_message(&self) -> &'static str {
        SUBMIT_FAILED_MESSAGE
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 无法从路径得到文件名
    #[error("无效的文件路径: {path}")]
    InvalidPath { path: String },
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
    /// TOML 配置文件解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建环境变量解析错误
    pub fn env_parse_failed(
        var_name: impl Into<String>,
        value: impl Into<String>,
        expected_type: impl Into<String>,
    ) -> Self {
        AppError::Config(ConfigError::EnvVarParseFailed {
            var_name: var_name.into(),
            value: value.into(),
            expected_type: expected_type.into(),
        })
    }
}

impl SubmissionError {
    /// 把任意底层错误包装成传输失败
    pub fn transport(err: impl std::fmt::Display) -> Self {
        SubmissionError::Transport {
            message: err.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
