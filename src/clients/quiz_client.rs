/// 出题 API 客户端
///
/// 封装两个出题接口的调用：上传文件（multipart）和粘贴文本（JSON）
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::quiz::{display_value, is_truthy};
use crate::models::{GeneratedQuiz, SelectedFile, TextQuizRequest};
use crate::utils::logging::truncate_text;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

/// 文件出题接口
pub const FILE_ENDPOINT: &str = "/api/quiz/generate/file";
/// 文本出题接口
pub const TEXT_ENDPOINT: &str = "/api/quiz/generate/text";

/// 出题 API 客户端
#[derive(Clone)]
pub struct QuizClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuizClient {
    /// 创建新的出题客户端
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_base_url)
    }

    /// 使用指定服务地址创建，末尾的一个 `/` 会被去掉
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.strip_suffix('/').unwrap_or(base_url).to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 上传文件出题
    ///
    /// # 参数
    /// - `token`: 登录 token
    /// - `file`: 已通过校验的文件
    /// - `num_questions`: 题目数量
    ///
    /// # 返回
    /// 服务端返回空内容时为 None
    pub async fn generate_from_file(
        &self,
        token: &str,
        file: &SelectedFile,
        num_questions: i64,
    ) -> AppResult<Option<GeneratedQuiz>> {
        // 磁盘上的文件到提交时才读取
        let bytes = file.read_bytes().await?;
        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| AppError::api_request_failed(FILE_ENDPOINT, e))?;

        let form = Form::new()
            .part("file", part)
            .text("numQuestions", num_questions.to_string());

        debug!(
            "上传文件出题: {} ({} 字节), 题目数 {}",
            file.name, file.size, num_questions
        );

        let request = self.post(FILE_ENDPOINT, token).multipart(form);
        self.send(FILE_ENDPOINT, request).await
    }

    /// 粘贴文本出题
    pub async fn generate_from_text(
        &self,
        token: &str,
        text: &str,
        num_questions: i64,
    ) -> AppResult<Option<GeneratedQuiz>> {
        let body = TextQuizRequest {
            text,
            num_questions,
        };

        debug!("文本出题: {} 字符, 题目数 {}", text.chars().count(), num_questions);

        let request = self.post(TEXT_ENDPOINT, token).json(&body);
        self.send(TEXT_ENDPOINT, request).await
    }

    fn post(&self, endpoint: &str, token: &str) -> RequestBuilder {
        self.http
            .post(format!("{}{}", self.base_url, endpoint))
            .bearer_auth(token)
    }

    async fn send(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> AppResult<Option<GeneratedQuiz>> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::extract_error_message(response).await;
            return Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;
        let text = String::from_utf8_lossy(&body);

        debug!("出题接口返回: {}", truncate_text(&text, 200));

        Ok(GeneratedQuiz::from_body_text(&text))
    }

    /// 读取错误响应中的 `msg` 字段
    async fn extract_error_message(response: Response) -> Option<String> {
        let body: Value = response.json().await.ok()?;
        Self::error_message(&body)
    }

    /// 从错误响应 JSON 中提取 `msg`
    ///
    /// 非字符串的值转成文本；null、false、0、空串视为没有
    pub fn error_message(body: &Value) -> Option<String> {
        body.get("msg").filter(|v| is_truthy(v)).map(display_value)
    }
}
