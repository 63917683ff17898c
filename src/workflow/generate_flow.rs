//! 出题提交流程
//!
//! 流程顺序：
//! 1. 检查本地 token，没有则跳转登录页
//! 2. 按当前标签页取内容，没有则提示
//! 3. 调用一次出题接口
//! 4. 成功后展示结果并延迟跳转 dashboard；失败则展示错误
//!
//! 不重试，不取消正在进行的请求

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::clients::QuizClient;
use crate::config::Config;
use crate::error::{AppResult, ValidationError};
use crate::form::{FormState, Submission};
use crate::models::GeneratedQuiz;
use crate::navigation::{navigate_after, Navigator, Route};
use crate::storage::TokenStore;
use crate::utils::logging::truncate_text;

/// 文本少于这个长度时出题效果较差
pub const RECOMMENDED_MIN_TEXT_CHARS: usize = 100;

/// 一次提交的结果
#[derive(Debug)]
pub enum SubmitOutcome {
    /// 生成成功，`redirect` 为延迟跳转任务
    Generated {
        quiz: GeneratedQuiz,
        redirect: JoinHandle<()>,
    },
    /// 服务端返回空结果
    NoResult,
    /// 未登录，已跳转登录页
    LoginRequired,
    /// 当前标签页没有内容
    MissingContent,
    /// 请求失败，附带展示给用户的提示
    Failed(String),
}

/// 出题提交处理器
pub struct QuizGenerator {
    client: QuizClient,
    token_store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    redirect_delay: Duration,
}

impl QuizGenerator {
    pub fn new(
        config: &Config,
        token_store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client: QuizClient::new(config),
            token_store,
            navigator,
            redirect_delay: config.redirect_delay(),
        }
    }

    /// 提交表单
    ///
    /// 无论哪条路径，返回前都会清除 loading
    pub async fn submit(&self, form: &mut FormState) -> SubmitOutcome {
        form.begin_submit();
        let outcome = self.run(form).await;
        form.finish_submit();
        outcome
    }

    async fn run(&self, form: &mut FormState) -> SubmitOutcome {
        let token = match self.token_store.token() {
            Ok(Some(token)) => token,
            Ok(None) => return self.require_login(form),
            Err(e) => {
                warn!("⚠️ 读取本地存储失败，按未登录处理: {}", e);
                return self.require_login(form);
            }
        };

        let Some(submission) = form.submission() else {
            form.set_error(ValidationError::MissingContent.to_string());
            return SubmitOutcome::MissingContent;
        };

        match self.request(&token, &submission).await {
            Ok(Some(quiz)) => {
                info!(
                    "✅ 出题成功，共 {} 道题，{} 毫秒后跳转 {}",
                    quiz.num_questions_label(),
                    self.redirect_delay.as_millis(),
                    Route::Dashboard
                );
                form.set_generated_quiz(quiz.clone());
                let redirect =
                    navigate_after(self.navigator.clone(), Route::Dashboard, self.redirect_delay);
                SubmitOutcome::Generated { quiz, redirect }
            }
            Ok(None) => {
                warn!("⚠️ 出题接口返回空结果");
                SubmitOutcome::NoResult
            }
            Err(e) => {
                error!("❌ Generate quiz error: {}", e);
                let message = e.user_message();
                form.set_error(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn require_login(&self, form: &mut FormState) -> SubmitOutcome {
        info!("🔒 未登录，跳转登录页");
        form.set_error(ValidationError::NotAuthenticated.to_string());
        self.navigator.navigate(Route::Login);
        SubmitOutcome::LoginRequired
    }

    async fn request(
        &self,
        token: &str,
        submission: &Submission,
    ) -> AppResult<Option<GeneratedQuiz>> {
        match submission {
            Submission::File {
                file,
                num_questions,
            } => {
                info!("📤 上传文件出题: {} ({})", file.name, file.size_label());
                self.client
                    .generate_from_file(token, file, *num_questions)
                    .await
            }
            Submission::Text {
                text,
                num_questions,
            } => {
                let chars = text.chars().count();
                if chars < RECOMMENDED_MIN_TEXT_CHARS {
                    warn!(
                        "⚠️ 文本只有 {} 个字符，建议至少 {} 个",
                        chars, RECOMMENDED_MIN_TEXT_CHARS
                    );
                }
                info!("📤 文本出题: {}", truncate_text(text, 40));
                self.client
                    .generate_from_text(token, text, *num_questions)
                    .await
            }
        }
    }
}

impl SubmitOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, SubmitOutcome::Generated { .. })
    }
}
