pub mod document;
pub mod quiz;

pub use document::{mime_for_file_name, DocumentKind, SelectedFile};
pub use quiz::{GeneratedQuiz, TextQuizRequest};
