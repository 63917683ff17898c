//! 上传文档模型
//!
//! 浏览器里文件的 MIME 类型由系统提供；命令行下只能按扩展名推断

use crate::error::FileError;
use phf::phf_map;
use std::fmt;
use std::path::{Path, PathBuf};

/// 支持的文档类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
    Txt,
    Md,
}

/// MIME 白名单
static MIME_KINDS: phf::Map<&'static str, DocumentKind> = phf_map! {
    "application/pdf" => DocumentKind::Pdf,
    "application/msword" => DocumentKind::Doc,
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => DocumentKind::Docx,
    "text/plain" => DocumentKind::Txt,
    "text/markdown" => DocumentKind::Md,
};

/// 扩展名 -> MIME（文件选择框的 accept 列表）
static EXTENSION_MIMES: phf::Map<&'static str, &'static str> = phf_map! {
    "pdf" => "application/pdf",
    "doc" => "application/msword",
    "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "txt" => "text/plain",
    "md" => "text/markdown",
};

/// 无法识别扩展名时的 MIME
pub const UNKNOWN_MIME: &str = "application/octet-stream";

impl DocumentKind {
    /// 按 MIME 类型查找，不在白名单内返回 None
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        MIME_KINDS.get(mime_type).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Doc => "DOC",
            DocumentKind::Docx => "DOCX",
            DocumentKind::Txt => "TXT",
            DocumentKind::Md => "MD",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 按扩展名推断 MIME 类型（不区分大小写）
pub fn mime_for_file_name(name: &str) -> &'static str {
    name.rsplit_once('.')
        .and_then(|(_, ext)| EXTENSION_MIMES.get(ext.to_ascii_lowercase().as_str()).copied())
        .unwrap_or(UNKNOWN_MIME)
}

/// 文件内容所在位置
#[derive(Clone, PartialEq, Eq)]
enum FileContent {
    /// 已在内存中（拖入或测试构造）
    Loaded(Vec<u8>),
    /// 仍在磁盘上，提交时再读取
    OnDisk(PathBuf),
}

/// 用户选择的文件
///
/// 对表单来说是不透明的数据块，只关心名称、大小和类型。
/// 大小来自文件信息，选择文件时不读取内容。
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    content: FileContent,
}

impl SelectedFile {
    /// 用内存中的内容构造
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            mime_type: mime_type.into(),
            content: FileContent::Loaded(bytes),
        }
    }

    /// 用磁盘文件的信息构造，内容留在磁盘上
    pub fn on_disk(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            content: FileContent::OnDisk(path.into()),
        }
    }

    /// 从磁盘选择文件：只读取文件信息，MIME 按扩展名推断
    pub async fn from_path(path: &Path) -> Result<Self, FileError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| FileError::MetadataFailed {
                path: path.display().to_string(),
                source: e,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_for_file_name(&name);

        Ok(Self::on_disk(name, mime_type, metadata.len(), path))
    }

    /// 内容是否已在内存中
    pub fn is_loaded(&self) -> bool {
        matches!(self.content, FileContent::Loaded(_))
    }

    /// 读取文件内容（磁盘文件在这里才真正读取）
    pub async fn read_bytes(&self) -> Result<Vec<u8>, FileError> {
        match &self.content {
            FileContent::Loaded(bytes) => Ok(bytes.clone()),
            FileContent::OnDisk(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|e| FileError::ReadFailed {
                        path: path.display().to_string(),
                        source: e,
                    })
            }
        }
    }

    /// 文件卡片上显示的大小，例如 `12.50 KB`
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("mime_type", &self.mime_type)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
