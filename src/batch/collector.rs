//! # 分子目录收集器
//!
//! 列出根目录下的直接子目录，每个子目录视为一个分子的计算目录。
//!
//! ## 功能
//! - 只扫描一层
//! - 按文件名排序，输出顺序稳定
//! - 可选 glob 名称过滤
//!
//! ## 依赖关系
//! - 被 `commands/gap.rs` 调用
//! - 使用 `walkdir` 遍历目录, `glob` 匹配名称

use crate::error::{Result, VaspGapError};

use std::path::PathBuf;
use walkdir::WalkDir;

/// 一个分子目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculeDir {
    /// 目录名
    pub name: String,
    /// 完整路径
    pub path: PathBuf,
}

/// 分子目录收集器
pub struct MoleculeCollector {
    /// 根目录
    root: PathBuf,
    /// 名称过滤
    pattern: Option<glob::Pattern>,
}

impl MoleculeCollector {
    /// 创建新的收集器
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            pattern: None,
        }
    }

    /// 设置目录名匹配模式，`*` 等价于不过滤
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() || pattern == "*" {
            self.pattern = None;
            return Ok(self);
        }

        let compiled = glob::Pattern::new(pattern).map_err(|e| {
            VaspGapError::InvalidArgument(format!("invalid glob pattern '{}': {}", pattern, e))
        })?;
        self.pattern = Some(compiled);
        Ok(self)
    }

    /// 收集所有分子目录
    pub fn collect(&self) -> Result<Vec<MoleculeDir>> {
        if !self.root.is_dir() {
            return Err(VaspGapError::DirectoryNotFound {
                path: self.root.display().to_string(),
            });
        }

        let molecules = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            // 跟随符号链接判断是否为目录
            .filter(|e| e.path().is_dir())
            .map(|e| MoleculeDir {
                name: e.file_name().to_string_lossy().to_string(),
                path: e.path().to_path_buf(),
            })
            .filter(|m| self.matches(&m.name))
            .collect();

        Ok(molecules)
    }

    fn matches(&self, name: &str) -> bool {
        match &self.pattern {
            Some(p) => p.matches(name),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let tmp = TempDir::new().unwrap();
        for name in ["CH4", "H2O", "benzene"] {
            fs::create_dir_all(tmp.path().join(name).join("sp")).unwrap();
        }
        fs::write(tmp.path().join("notes.txt"), "not a molecule").unwrap();
        tmp
    }

    #[test]
    fn test_collects_sorted_subdirectories_only() {
        let tmp = setup();
        let molecules = MoleculeCollector::new(tmp.path().to_path_buf())
            .collect()
            .unwrap();

        let names: Vec<_> = molecules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["CH4", "H2O", "benzene"]);
        assert_eq!(molecules[1].path, tmp.path().join("H2O"));
    }

    #[test]
    fn test_pattern_filter() {
        let tmp = setup();
        let molecules = MoleculeCollector::new(tmp.path().to_path_buf())
            .with_pattern("H*")
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(molecules.len(), 1);
        assert_eq!(molecules[0].name, "H2O");
    }

    #[test]
    fn test_invalid_pattern() {
        let result = MoleculeCollector::new(PathBuf::from(".")).with_pattern("[abc");
        assert!(matches!(result, Err(VaspGapError::InvalidArgument(_))));
    }

    #[test]
    fn test_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = MoleculeCollector::new(tmp.path().join("missing"))
            .collect()
            .unwrap_err();
        assert!(matches!(err, VaspGapError::DirectoryNotFound { .. }));
    }
}
