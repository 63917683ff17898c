//! 表单校验
//!
//! 只做客户端能判断的事：类型白名单、大小上限、内容是否为空

use crate::error::ValidationError;
use crate::models::{DocumentKind, SelectedFile};

/// 上传文件大小上限（含）
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// 校验上传文件，先查类型再查大小
pub fn validate_file(file: &SelectedFile) -> Result<DocumentKind, ValidationError> {
    let kind = DocumentKind::from_mime(&file.mime_type).ok_or_else(|| {
        ValidationError::UnsupportedFileType {
            mime_type: file.mime_type.clone(),
        }
    })?;

    if file.size > MAX_FILE_SIZE {
        return Err(ValidationError::FileTooLarge { size: file.size });
    }

    Ok(kind)
}

/// 文本是否有实际内容（全空白视为空）
pub fn has_text_content(text: &str) -> bool {
    !text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(mime: &str, size: u64) -> SelectedFile {
        SelectedFile::on_disk("doc", mime, size, "doc")
    }

    #[test]
    fn test_rejects_unlisted_mime() {
        for mime in ["image/jpeg", "application/zip", "text/html", ""] {
            assert_eq!(
                validate_file(&file_with(mime, 10)),
                Err(ValidationError::UnsupportedFileType {
                    mime_type: mime.to_string()
                })
            );
        }
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let file = file_with("application/pdf", MAX_FILE_SIZE);
        let kind = tokio_test::assert_ok!(validate_file(&file));
        assert_eq!(kind, DocumentKind::Pdf);
        assert_eq!(
            validate_file(&file_with("application/pdf", MAX_FILE_SIZE + 1)),
            Err(ValidationError::FileTooLarge {
                size: MAX_FILE_SIZE + 1
            })
        );
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = validate_file(&file_with("video/mp4", MAX_FILE_SIZE * 3)).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedFileType { .. }));
    }

    #[test]
    fn test_whitespace_text_is_empty() {
        assert!(!has_text_content(""));
        assert!(!has_text_content(" \n\t "));
        assert!(has_text_content("  mitochondria "));
    }
}
