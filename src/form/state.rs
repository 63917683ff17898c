//! 出题表单状态
//!
//! 对应页面上的全部临时状态：标签页、拖拽、已选文件、文本、题目数、
//! 加载中、错误提示以及生成结果。所有状态只在本次会话内有效。

use crate::error::ValidationError;
use crate::form::validation::{has_text_content, validate_file};
use crate::models::{GeneratedQuiz, SelectedFile};
use tracing::{debug, info};

/// 默认题目数
pub const DEFAULT_NUM_QUESTIONS: i64 = 10;
/// 输入框建议的最少题目数
pub const MIN_SUGGESTED_QUESTIONS: i64 = 5;
/// 输入框建议的最多题目数
pub const MAX_SUGGESTED_QUESTIONS: i64 = 20;

/// 当前标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Upload,
    Text,
}

/// 拖拽事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Enter,
    Over,
    Leave,
}

/// 本次要提交的内容
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    File {
        file: SelectedFile,
        num_questions: i64,
    },
    Text {
        text: String,
        num_questions: i64,
    },
}

/// 出题表单
#[derive(Debug, Clone)]
pub struct FormState {
    active_tab: ActiveTab,
    drag_active: bool,
    uploaded_file: Option<SelectedFile>,
    text_content: String,
    num_questions: i64,
    loading: bool,
    error: Option<String>,
    generated_quiz: Option<GeneratedQuiz>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::with_num_questions(DEFAULT_NUM_QUESTIONS)
    }

    pub fn with_num_questions(num_questions: i64) -> Self {
        Self {
            active_tab: ActiveTab::default(),
            drag_active: false,
            uploaded_file: None,
            text_content: String::new(),
            num_questions,
            loading: false,
            error: None,
            generated_quiz: None,
        }
    }

    // ========== 用户操作 ==========

    /// 切换标签页，不清空另一个标签页的内容
    pub fn set_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
    }

    pub fn handle_drag(&mut self, kind: DragKind) {
        self.drag_active = matches!(kind, DragKind::Enter | DragKind::Over);
    }

    /// 放下文件：只取第一个
    pub fn handle_drop(&mut self, files: Vec<SelectedFile>) -> Result<(), ValidationError> {
        self.drag_active = false;
        match files.into_iter().next() {
            Some(file) => self.select_file(file),
            None => Ok(()),
        }
    }

    /// 选择文件
    ///
    /// 校验失败时写入错误提示并保留之前选中的文件
    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), ValidationError> {
        match validate_file(&file) {
            Ok(kind) => {
                info!("📄 已选择文件: {} ({}, {})", file.name, kind, file.size_label());
                self.uploaded_file = Some(file);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                debug!("文件校验失败: {:?} -> {}", file, e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn remove_file(&mut self) {
        self.uploaded_file = None;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text_content = text.into();
    }

    /// 题目数不做范围限制，输入框只给出 5-20 的建议
    pub fn set_num_questions(&mut self, num_questions: i64) {
        self.num_questions = num_questions;
    }

    /// 处理输入框原始文本
    ///
    /// 取开头的整数部分（`12abc` -> 12，`7.5` -> 7，`-3` -> -3），
    /// 没有数字或结果为 0 时回到默认值
    pub fn set_num_questions_input(&mut self, raw: &str) {
        self.num_questions = parse_leading_int(raw)
            .filter(|n| *n != 0)
            .unwrap_or(DEFAULT_NUM_QUESTIONS);
    }

    // ========== 提交流程使用 ==========

    pub(crate) fn begin_submit(&mut self) {
        self.loading = true;
        self.error = None;
        self.generated_quiz = None;
    }

    pub(crate) fn finish_submit(&mut self) {
        self.loading = false;
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub(crate) fn set_generated_quiz(&mut self, quiz: GeneratedQuiz) {
        self.generated_quiz = Some(quiz);
    }

    /// 按当前标签页构造提交内容，没有内容时返回 None
    pub fn submission(&self) -> Option<Submission> {
        match self.active_tab {
            ActiveTab::Upload => self.uploaded_file.as_ref().map(|file| Submission::File {
                file: file.clone(),
                num_questions: self.num_questions,
            }),
            ActiveTab::Text if has_text_content(&self.text_content) => Some(Submission::Text {
                text: self.text_content.clone(),
                num_questions: self.num_questions,
            }),
            ActiveTab::Text => None,
        }
    }

    /// 生成按钮是否可用
    pub fn can_submit(&self) -> bool {
        if self.loading {
            return false;
        }
        match self.active_tab {
            ActiveTab::Upload => self.uploaded_file.is_some(),
            ActiveTab::Text => has_text_content(&self.text_content),
        }
    }

    // ========== 只读访问 ==========

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn uploaded_file(&self) -> Option<&SelectedFile> {
        self.uploaded_file.as_ref()
    }

    pub fn text_content(&self) -> &str {
        &self.text_content
    }

    pub fn num_questions(&self) -> i64 {
        self.num_questions
    }

    pub fn num_questions_in_suggested_range(&self) -> bool {
        (MIN_SUGGESTED_QUESTIONS..=MAX_SUGGESTED_QUESTIONS).contains(&self.num_questions)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generated_quiz(&self) -> Option<&GeneratedQuiz> {
        self.generated_quiz.as_ref()
    }
}

/// 解析字符串开头的整数：跳过前导空白，可带正负号，遇到非数字停止
///
/// 超出 i64 范围时取边界值
fn parse_leading_int(raw: &str) -> Option<i64> {
    let rest = raw.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value = rest[..digits_len]
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::validation::MAX_FILE_SIZE;

    fn pdf(name: &str) -> SelectedFile {
        SelectedFile::new(name, "application/pdf", b"%PDF-1.7".to_vec())
    }

    #[test]
    fn test_defaults() {
        let form = FormState::new();
        assert_eq!(form.active_tab(), ActiveTab::Upload);
        assert_eq!(form.num_questions(), 10);
        assert!(!form.is_loading());
        assert!(form.error().is_none());
        assert!(!form.can_submit());
    }

    #[test]
    fn test_drag_flag() {
        let mut form = FormState::new();
        form.handle_drag(DragKind::Enter);
        assert!(form.is_drag_active());
        form.handle_drag(DragKind::Over);
        assert!(form.is_drag_active());
        form.handle_drag(DragKind::Leave);
        assert!(!form.is_drag_active());
    }

    #[test]
    fn test_drop_takes_first_file_and_clears_drag() {
        let mut form = FormState::new();
        form.handle_drag(DragKind::Over);
        form.handle_drop(vec![pdf("first.pdf"), pdf("second.pdf")]).unwrap();
        assert!(!form.is_drag_active());
        assert_eq!(form.uploaded_file().unwrap().name, "first.pdf");
    }

    #[test]
    fn test_empty_drop_only_clears_drag() {
        let mut form = FormState::new();
        form.handle_drag(DragKind::Enter);
        form.handle_drop(Vec::new()).unwrap();
        assert!(!form.is_drag_active());
        assert!(form.uploaded_file().is_none());
    }

    #[test]
    fn test_invalid_file_sets_error_and_keeps_previous() {
        let mut form = FormState::new();
        form.select_file(pdf("notes.pdf")).unwrap();

        let png = SelectedFile::new("cat.png", "image/png", vec![1, 2, 3]);
        assert!(form.select_file(png).is_err());
        assert_eq!(
            form.error(),
            Some("Please upload a PDF, DOC, DOCX, TXT, or MD file")
        );
        assert_eq!(form.uploaded_file().unwrap().name, "notes.pdf");
    }

    #[test]
    fn test_oversized_file_rejected() {
        let mut form = FormState::new();
        let big = SelectedFile::on_disk("huge.txt", "text/plain", MAX_FILE_SIZE + 1, "huge.txt");
        assert!(form.select_file(big).is_err());
        assert_eq!(form.error(), Some("File size must be less than 10MB"));
        assert!(form.uploaded_file().is_none());
    }

    #[test]
    fn test_valid_file_clears_error() {
        let mut form = FormState::new();
        let _ = form.select_file(SelectedFile::new("x.exe", "application/x-msdownload", vec![]));
        assert!(form.error().is_some());
        form.select_file(pdf("ok.pdf")).unwrap();
        assert!(form.error().is_none());
        assert!(form.can_submit());
    }

    #[test]
    fn test_remove_file_disables_submit() {
        let mut form = FormState::new();
        form.select_file(pdf("ok.pdf")).unwrap();
        form.remove_file();
        assert!(form.uploaded_file().is_none());
        assert!(!form.can_submit());
    }

    #[test]
    fn test_text_mode_requires_non_blank_text() {
        let mut form = FormState::new();
        form.set_tab(ActiveTab::Text);
        assert!(!form.can_submit());
        form.set_text("   \n ");
        assert!(!form.can_submit());
        assert!(form.submission().is_none());
        form.set_text("The French Revolution began in 1789.");
        assert!(form.can_submit());
    }

    #[test]
    fn test_submission_follows_active_tab() {
        let mut form = FormState::new();
        form.select_file(pdf("ok.pdf")).unwrap();
        form.set_text("some text");
        form.set_num_questions(15);

        assert!(matches!(
            form.submission(),
            Some(Submission::File { num_questions: 15, .. })
        ));

        form.set_tab(ActiveTab::Text);
        assert_eq!(
            form.submission(),
            Some(Submission::Text {
                text: "some text".to_string(),
                num_questions: 15
            })
        );
        // 切换标签页不会清掉文件
        assert!(form.uploaded_file().is_some());
    }

    #[test]
    fn test_loading_disables_submit() {
        let mut form = FormState::new();
        form.select_file(pdf("ok.pdf")).unwrap();
        form.begin_submit();
        assert!(!form.can_submit());
        form.finish_submit();
        assert!(form.can_submit());
    }

    #[test]
    fn test_num_questions_input_parsing() {
        let mut form = FormState::new();
        form.set_num_questions_input("15");
        assert_eq!(form.num_questions(), 15);
        form.set_num_questions_input("abc");
        assert_eq!(form.num_questions(), 10);
        form.set_num_questions_input("0");
        assert_eq!(form.num_questions(), 10);
        form.set_num_questions_input("50");
        assert_eq!(form.num_questions(), 50);
        assert!(!form.num_questions_in_suggested_range());
    }

    #[test]
    fn test_num_questions_input_takes_leading_integer() {
        let mut form = FormState::new();
        for (raw, expected) in [
            ("12abc", 12),
            ("7.5", 7),
            ("-3", -3),
            ("  +8 ", 8),
            (".5", 10),
            ("-", 10),
            ("", 10),
            ("-0", 10),
        ] {
            form.set_num_questions_input(raw);
            assert_eq!(form.num_questions(), expected, "input {:?}", raw);
        }
    }

    #[test]
    fn test_num_questions_input_saturates() {
        let mut form = FormState::new();
        form.set_num_questions_input("99999999999999999999999");
        assert_eq!(form.num_questions(), i64::MAX);
    }
}
