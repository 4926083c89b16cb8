//! # 数据模型模块
//!
//! 定义能带边、带隙和费米能的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`report/` 和 `commands/` 使用
//! - 子模块: band, fermi

pub mod band;
pub mod fermi;

pub use band::{BandGap, BandStructure, KPointRecord};
pub use fermi::FermiScan;
