//! 命令行参数定义

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 出题客户端命令行
#[derive(Parser, Debug)]
#[command(name = "quiz_generate")]
#[command(author, version, about = "Generate quizzes from a document or pasted text")]
pub struct Cli {
    /// 配置文件路径
    #[arg(long, value_name = "PATH", default_value = "quiz.toml")]
    pub config: PathBuf,

    /// 显示详细日志
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 上传文档出题（PDF/DOC/DOCX/TXT/MD，最大 10MB）
    File {
        /// 文档路径
        path: PathBuf,
        /// 题目数量（建议 5-20）
        #[arg(short = 'n', long, value_name = "N")]
        num_questions: Option<String>,
    },
    /// 粘贴文本出题
    Text {
        /// 文本内容；省略或为 `-` 时从标准输入读取
        text: Option<String>,
        /// 从文件读取文本
        #[arg(long, value_name = "PATH", conflicts_with = "text")]
        input: Option<PathBuf>,
        /// 题目数量（建议 5-20）
        #[arg(short = 'n', long, value_name = "N")]
        num_questions: Option<String>,
    },
    /// 保存登录 token 到本地存储
    Login {
        #[arg(long)]
        token: String,
    },
    /// 清除本地存储中的 token
    Logout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_command() {
        let cli = Cli::parse_from(["quiz_generate", "file", "notes.pdf", "-n", "12"]);
        match cli.command {
            Command::File {
                path,
                num_questions,
            } => {
                assert_eq!(path, PathBuf::from("notes.pdf"));
                assert_eq!(num_questions.as_deref(), Some("12"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.config, PathBuf::from("quiz.toml"));
    }

    #[test]
    fn test_text_and_input_conflict() {
        let result = Cli::try_parse_from(["quiz_generate", "text", "abc", "--input", "a.txt"]);
        assert!(result.is_err());
    }
}
