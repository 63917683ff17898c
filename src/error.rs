use thiserror::Error;

/// 接口失败且服务端没有给出 `msg` 时展示的提示
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate quiz";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 表单校验错误（不会发起网络请求）
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 读取待上传文件失败
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// 表单上展示给用户的错误文本
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::Api(e) => e.user_message(),
            AppError::File(_) | AppError::Config(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// 表单校验错误
///
/// 文案与页面上直接展示的提示一致
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 文件类型不在白名单内
    #[error("Please upload a PDF, DOC, DOCX, TXT, or MD file")]
    UnsupportedFileType { mime_type: String },
    /// 文件超过 10MB
    #[error("File size must be less than 10MB")]
    FileTooLarge { size: u64 },
    /// 当前标签页没有内容
    #[error("Please provide content to generate quiz from")]
    MissingContent,
    /// 本地没有登录 token
    #[error("Please login to generate quizzes")]
    NotAuthenticated,
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（连接、超时等）
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回非 2xx 状态
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
}

impl ApiError {
    /// 优先使用服务端返回的 `msg`，否则使用通用提示
    pub fn user_message(&self) -> String {
        match self {
            ApiError::BadResponse {
                message: Some(msg), ..
            } if !msg.is_empty() => msg.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    #[error("读取文件信息失败 ({path}): {source}")]
    MetadataFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 本地存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("读取存储文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("写入存储文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("存储文件格式错误 ({path}): {source}")]
    Corrupted {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("配置项 {field} 的值 '{value}' 无效")]
    InvalidValue { field: String, value: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
