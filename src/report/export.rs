//! # 批量汇总导出
//!
//! 每个分子一行的最小带隙汇总，可输出为终端表格或 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/gap.rs` 调用
//! - 使用 `tabled` 渲染表格, `csv` + `serde` 写入 CSV

use crate::batch::SpSource;
use crate::error::{Result, VaspGapError};
use crate::models::{BandGap, BandStructure};

use serde::Serialize;
use std::path::Path;
use tabled::{Table, Tabled};

/// 分子处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStatus {
    /// 找到最小带隙
    Ok,
    /// 有 k 点数据，但没有完整的 VBM/CBM
    Incomplete,
    /// 文件中没有 k 点数据
    NoData,
    /// 未找到目标文件
    NotFound,
    /// 读取失败
    Error,
}

impl std::fmt::Display for SummaryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryStatus::Ok => write!(f, "ok"),
            SummaryStatus::Incomplete => write!(f, "incomplete"),
            SummaryStatus::NoData => write!(f, "no data"),
            SummaryStatus::NotFound => write!(f, "not found"),
            SummaryStatus::Error => write!(f, "error"),
        }
    }
}

/// 单个分子的汇总
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeSummary {
    pub molecule: String,
    pub source: Option<SpSource>,
    pub status: SummaryStatus,
    pub min_gap: Option<BandGap>,
}

impl MoleculeSummary {
    /// 由解析结果构造
    pub fn from_bands(molecule: &str, source: SpSource, bands: &BandStructure) -> Self {
        let min_gap = bands.minimum_gap();
        let status = if bands.is_empty() {
            SummaryStatus::NoData
        } else if min_gap.is_none() {
            SummaryStatus::Incomplete
        } else {
            SummaryStatus::Ok
        };

        MoleculeSummary {
            molecule: molecule.to_string(),
            source: Some(source),
            status,
            min_gap,
        }
    }

    /// 未能解析的分子
    pub fn failed(molecule: &str, status: SummaryStatus) -> Self {
        MoleculeSummary {
            molecule: molecule.to_string(),
            source: None,
            status,
            min_gap: None,
        }
    }
}

/// 表格 / CSV 行
#[derive(Debug, Clone, Tabled, Serialize)]
struct SummaryRow {
    #[tabled(rename = "Molecule")]
    molecule: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "K-Point")]
    kpoint: String,
    #[tabled(rename = "VBM (eV)")]
    #[serde(rename = "vbm_eV")]
    vbm: String,
    #[tabled(rename = "CBM (eV)")]
    #[serde(rename = "cbm_eV")]
    cbm: String,
    #[tabled(rename = "Gap (eV)")]
    #[serde(rename = "gap_eV")]
    gap: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&MoleculeSummary> for SummaryRow {
    fn from(s: &MoleculeSummary) -> Self {
        let fmt = |v: Option<f64>| v.map(|x| format!("{:.4}", x)).unwrap_or_default();
        SummaryRow {
            molecule: s.molecule.clone(),
            source: s.source.map(|src| src.to_string()).unwrap_or_default(),
            kpoint: s.min_gap.map(|g| g.kpoint.to_string()).unwrap_or_default(),
            vbm: fmt(s.min_gap.map(|g| g.vbm)),
            cbm: fmt(s.min_gap.map(|g| g.cbm)),
            gap: fmt(s.min_gap.map(|g| g.gap)),
            status: s.status.to_string(),
        }
    }
}

/// 渲染终端表格
pub fn summary_table(summaries: &[MoleculeSummary]) -> String {
    let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from).collect();
    Table::new(&rows).to_string()
}

/// 导出汇总为 CSV
pub fn write_summary_csv(summaries: &[MoleculeSummary], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for summary in summaries {
        wtr.serialize(SummaryRow::from(summary))?;
    }

    wtr.flush().map_err(|e| VaspGapError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
