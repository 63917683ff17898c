use crate::cli::Command;
use crate::config::Config;
use crate::form::{ActiveTab, FormState};
use crate::models::SelectedFile;
use crate::navigation::ConsoleNavigator;
use crate::storage::FileTokenStore;
use crate::utils::logging::log_startup;
use crate::view;
use crate::workflow::{QuizGenerator, SubmitOutcome};
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    store: Arc<FileTokenStore>,
    generator: QuizGenerator,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        log_startup(&config.api_base_url);

        let store = Arc::new(FileTokenStore::new(config.storage_file.clone()));
        let generator = QuizGenerator::new(&config, store.clone(), Arc::new(ConsoleNavigator));

        Self {
            config,
            store,
            generator,
        }
    }

    /// 执行命令
    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::File {
                path,
                num_questions,
            } => self.generate_from_file(&path, num_questions.as_deref()).await,
            Command::Text {
                text,
                input,
                num_questions,
            } => {
                let text = read_text(text, input.as_deref()).await?;
                self.generate_from_text(text, num_questions.as_deref()).await
            }
            Command::Login { token } => {
                self.store
                    .save_token(token.trim())
                    .context("保存 token 失败")?;
                info!("🔑 token 已保存到 {}", self.store.path().display());
                Ok(())
            }
            Command::Logout => {
                self.store.clear_token().context("清除 token 失败")?;
                info!("🔓 已退出登录");
                Ok(())
            }
        }
    }

    async fn generate_from_file(&self, path: &Path, num_questions: Option<&str>) -> Result<()> {
        let mut form = self.new_form(num_questions);
        form.set_tab(ActiveTab::Upload);

        let file = SelectedFile::from_path(path).await?;
        if form.select_file(file).is_err() {
            print!("{}", view::render(&form));
            bail!("{}", form.error().unwrap_or_default());
        }

        self.submit(form).await
    }

    async fn generate_from_text(&self, text: String, num_questions: Option<&str>) -> Result<()> {
        let mut form = self.new_form(num_questions);
        form.set_tab(ActiveTab::Text);
        form.set_text(text);
        self.submit(form).await
    }

    fn new_form(&self, num_questions: Option<&str>) -> FormState {
        let mut form = FormState::with_num_questions(i64::from(self.config.default_num_questions));
        if let Some(raw) = num_questions {
            form.set_num_questions_input(raw);
        }
        form
    }

    async fn submit(&self, mut form: FormState) -> Result<()> {
        if !form.can_submit() {
            print!("{}", view::render(&form));
            bail!("Please provide content to generate quiz from");
        }

        let outcome = self.generator.submit(&mut form).await;
        print!("{}", view::render(&form));

        match outcome {
            SubmitOutcome::Generated { redirect, .. } => {
                redirect.await.context("跳转任务失败")?;
                Ok(())
            }
            SubmitOutcome::NoResult => Ok(()),
            SubmitOutcome::LoginRequired | SubmitOutcome::MissingContent => {
                bail!("{}", form.error().unwrap_or_default())
            }
            SubmitOutcome::Failed(message) => bail!(message),
        }
    }
}

/// 读取要出题的文本：文件 > 参数 > 标准输入
async fn read_text(text: Option<String>, input: Option<&Path>) -> Result<String> {
    if let Some(path) = input {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("无法读取文本文件: {}", path.display()));
    }

    match text {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("无法读取标准输入")?;
            Ok(buf)
        }
    }
}
