//! # 统一错误处理模块
//!
//! 定义 vaspgap 的所有错误类型，使用 `thiserror` 派生。
//!
//! 单个分子目录或单个文件的错误只在本地报告，不会中止整批处理；
//! 只有参数错误和结果文件无法写入才会让命令失败。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// vaspgap 统一错误类型
#[derive(Error, Debug)]
pub enum VaspGapError {
    // ─────────────────────────────────────────────────────────────
    // 目录 / 文件定位
    // ─────────────────────────────────────────────────────────────
    #[error("Directory '{path}' not found")]
    DirectoryNotFound { path: String },

    /// `sp` 与 `restart/sp` 都不存在
    #[error("No 'sp' directory found in '{molecule}' or '{molecule}/restart'")]
    NoSpDirectory { molecule: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Could not parse line {line_no}: {line} ({reason})")]
    LineUnparsable {
        line_no: usize,
        line: String,
        reason: String,
    },

    #[error("Could not extract {what} from '{path}'")]
    NoDataExtracted { what: String, path: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl VaspGapError {
    /// 构造行解析警告
    pub fn unparsable(line_no: usize, line: &str, reason: impl Into<String>) -> Self {
        VaspGapError::LineUnparsable {
            line_no,
            line: line.trim().to_string(),
            reason: reason.into(),
        }
    }

    /// 是否为"目标未找到"类错误（目录或文件缺失）
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            VaspGapError::DirectoryNotFound { .. }
                | VaspGapError::NoSpDirectory { .. }
                | VaspGapError::FileNotFound { .. }
        )
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, VaspGapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsable_trims_line() {
        let err = VaspGapError::unparsable(7, "  E-fermi : abc  \n", "invalid float");
        assert_eq!(
            err.to_string(),
            "Could not parse line 7: E-fermi : abc (invalid float)"
        );
    }

    #[test]
    fn test_not_found_classification() {
        let missing = VaspGapError::NoSpDirectory {
            molecule: "H2O".to_string(),
        };
        assert!(missing.is_not_found());
        assert_eq!(
            missing.to_string(),
            "No 'sp' directory found in 'H2O' or 'H2O/restart'"
        );

        let io = VaspGapError::FileUnreadable {
            path: "x".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        };
        assert!(!io.is_not_found());
    }
}
