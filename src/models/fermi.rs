//! # 费米能数据模型
//!
//! ## 依赖关系
//! - 被 `parsers/fermi.rs` 填充
//! - 被 `commands/fermi.rs` 使用

use crate::error::VaspGapError;

/// 一次 E-fermi 扫描的结果
#[derive(Debug, Default)]
pub struct FermiScan {
    /// 第一个可解析的 E-fermi 值 (eV)
    pub value: Option<f64>,

    /// 含 E-fermi 但无法解析的行
    pub warnings: Vec<VaspGapError>,
}
