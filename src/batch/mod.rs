//! # 批量处理模块
//!
//! 提供分子目录的收集、sp 目录定位和顺序批处理能力。
//!
//! ## 功能
//! - 列出根目录下的分子目录
//! - 按 `sp` → `restart/sp` 回退规则定位 OUTCAR
//! - 顺序处理、进度反馈与统计
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod locator;
pub mod runner;

pub use collector::{MoleculeCollector, MoleculeDir};
pub use locator::{resolve_target, SpSource};
pub use runner::{BatchResult, BatchRunner, ProcessResult};
