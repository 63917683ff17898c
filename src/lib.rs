//! # Quiz Generate
//!
//! 从文档或粘贴的文本生成测验题目的客户端
//!
//! ## 模块结构
//!
//! - `form/` - 出题表单状态与校验（标签页、拖拽、文件、文本、题目数）
//! - `models/` - 上传文档与接口数据
//! - `clients/` - 出题 API 客户端（multipart / JSON）
//! - `storage/` - 本地存储，保存登录 token
//! - `navigation` - 登录页 / dashboard 跳转
//! - `workflow/` - 提交流程：检查 token → 取内容 → 请求 → 更新状态
//! - `view` - 表单的文本渲染

pub mod app;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod navigation;
pub mod storage;
pub mod utils;
pub mod view;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::QuizClient;
pub use config::Config;
pub use error::{AppError, AppResult, ValidationError};
pub use form::{ActiveTab, DragKind, FormState};
pub use models::{GeneratedQuiz, SelectedFile};
pub use navigation::{Navigator, Route};
pub use workflow::{QuizGenerator, SubmitOutcome};
