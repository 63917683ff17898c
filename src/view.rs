//! 表单的文本渲染
//!
//! 三种画面：表单、错误提示、生成成功

use crate::form::{ActiveTab, FormState, MAX_FILE_SIZE};
use std::fmt;

const SUPPORTED_FORMATS: &str = "PDF, DOC, DOCX, TXT, MD";

/// 生成按钮文字
pub fn button_label(form: &FormState) -> &'static str {
    if form.is_loading() {
        "Generating..."
    } else {
        "Generate Quiz"
    }
}

/// 整个画面，`Display` 输出即终端上显示的文本
pub struct Screen<'a>(pub &'a FormState);

/// 渲染整个画面
pub fn render(form: &FormState) -> String {
    Screen(form).to_string()
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.0;
        writeln!(f, "Generate Quiz")?;
        writeln!(
            f,
            "Upload a document or paste text to generate AI-powered quiz questions"
        )?;
        writeln!(f)?;

        if let Some(quiz) = form.generated_quiz() {
            writeln!(f, "✔ Quiz Generated!")?;
            writeln!(f, "Successfully created {} questions", quiz.num_questions_label())?;
            return writeln!(f, "Redirecting to dashboard...");
        }

        write_tabs(f, form.active_tab())?;

        match form.active_tab() {
            ActiveTab::Upload => write_upload_panel(f, form)?,
            ActiveTab::Text => write_text_panel(f, form)?,
        }

        writeln!(f)?;
        writeln!(f, "Number of Questions: {}", form.num_questions())?;
        writeln!(
            f,
            "[{}]{}",
            button_label(form),
            if form.can_submit() { "" } else { " (disabled)" }
        )?;

        if let Some(error) = form.error() {
            writeln!(f)?;
            writeln!(f, "! {}", error)?;
        }

        Ok(())
    }
}

fn write_tabs(f: &mut fmt::Formatter<'_>, active: ActiveTab) -> fmt::Result {
    let mark = |tab: ActiveTab| if tab == active { "*" } else { " " };
    writeln!(
        f,
        "[{}] Upload File   [{}] Paste Text",
        mark(ActiveTab::Upload),
        mark(ActiveTab::Text)
    )?;
    writeln!(f, "{}", "─".repeat(40))
}

fn write_upload_panel(f: &mut fmt::Formatter<'_>, form: &FormState) -> fmt::Result {
    if form.is_drag_active() {
        writeln!(f, "(drop to upload)")?;
    }

    match form.uploaded_file() {
        Some(file) => {
            writeln!(f, "{}", file.name)?;
            writeln!(f, "{}", file.size_label())?;
            writeln!(f, "[Remove File]")
        }
        None => {
            writeln!(f, "Drop your file here or click to browse")?;
            writeln!(
                f,
                "Supported formats: {} (Max {}MB)",
                SUPPORTED_FORMATS,
                MAX_FILE_SIZE / (1024 * 1024)
            )?;
            writeln!(f, "[Select File]")
        }
    }
}

fn write_text_panel(f: &mut fmt::Formatter<'_>, form: &FormState) -> fmt::Result {
    if form.text_content().is_empty() {
        writeln!(
            f,
            "Paste your text here... (lecture notes, article, study material, etc.)"
        )?;
    } else {
        writeln!(f, "{}", form.text_content())?;
    }
    writeln!(
        f,
        "Minimum 100 characters recommended for better quiz generation"
    )
}
