//! # sp 目录定位器
//!
//! 在分子目录中按固定的两级回退规则查找单点计算目录：
//! 先 `<root>/sp`，再 `<root>/restart/sp`。不做更深的递归。
//!
//! ## 依赖关系
//! - 被 `commands/gap.rs`, `commands/fermi.rs` 使用
//! - 无外部模块依赖

use crate::error::{Result, VaspGapError};

use serde::Serialize;
use std::path::{Path, PathBuf};

/// 单点计算目录名
pub const SP_DIR: &str = "sp";

/// 续算目录名
pub const RESTART_DIR: &str = "restart";

/// sp 目录的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpSource {
    /// `<root>/sp`
    Direct,
    /// `<root>/restart/sp`
    Restart,
}

impl std::fmt::Display for SpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpSource::Direct => write!(f, "sp"),
            SpSource::Restart => write!(f, "restart/sp"),
        }
    }
}

/// 找到的 sp 目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpLocation {
    pub dir: PathBuf,
    pub source: SpSource,
}

/// 找到的目标文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub sp: SpLocation,
    pub file: PathBuf,
}

/// 候选 sp 目录（按优先级），不检查是否存在
fn candidates(root: &Path) -> [SpLocation; 2] {
    [
        SpLocation {
            dir: root.join(SP_DIR),
            source: SpSource::Direct,
        },
        SpLocation {
            dir: root.join(RESTART_DIR).join(SP_DIR),
            source: SpSource::Restart,
        },
    ]
}

/// 只检查目录：返回第一个存在的 sp 目录
pub fn locate_sp_dir(root: &Path) -> Option<SpLocation> {
    candidates(root).into_iter().find(|c| c.dir.is_dir())
}

/// 查找包含 `filename` 的 sp 目录。
///
/// `sp` 存在但缺少目标文件时继续尝试 `restart/sp`。
pub fn resolve_target(root: &Path, filename: &str) -> Result<Located> {
    let Some(first) = locate_sp_dir(root) else {
        return Err(VaspGapError::NoSpDirectory {
            molecule: root.display().to_string(),
        });
    };

    for sp in candidates(root).into_iter().filter(|c| c.dir.is_dir()) {
        let file = sp.dir.join(filename);
        if file.is_file() {
            return Ok(Located { sp, file });
        }
    }

    Err(VaspGapError::FileNotFound {
        path: first.dir.join(filename).display().to_string(),
    })
}
