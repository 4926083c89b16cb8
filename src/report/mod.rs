//! # 报告格式化模块
//!
//! 将解析结果渲染为文本：每个 k 点的明细 + 最小带隙汇总，
//! 或单个费米能查询的回答行。
//!
//! ## 依赖关系
//! - 被 `commands/gap.rs`, `commands/fermi.rs` 使用
//! - 使用 `models/`
//! - 子模块: export

pub mod export;

use crate::error::{Result, VaspGapError};
use crate::models::{BandGap, BandStructure};

use std::fmt::Write;

/// k 点条目之间的分隔线宽度
const SEPARATOR_WIDTH: usize = 40;

/// 分子标题分隔线宽度
const BANNER_WIDTH: usize = 50;

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// 分子目录段落标题
pub fn molecule_header(name: &str) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    format!(
        "\n{}\nResults for Molecule Directory: {}\n{}\n",
        banner, name, banner
    )
}

/// 找不到目标文件时的提示行
pub fn not_found_line(name: &str, filename: &str) -> String {
    format!(
        "--> No 'sp' directory with an {} file found in '{}'.\n",
        filename, name
    )
}

/// 处理失败时的提示行
pub fn error_line(err: &VaspGapError) -> String {
    format!("Error: {}\n", err)
}

fn write_edges(out: &mut String, gap: &BandGap) {
    // 写入 String 不会失败
    let _ = writeln!(out, "  VBM: {:.4} eV", gap.vbm);
    let _ = writeln!(out, "  CBM: {:.4} eV", gap.cbm);
    let _ = writeln!(out, "  Band Gap: {:.4} eV", gap.gap);
}

/// 渲染能带报告
pub fn format_band_report(bands: &BandStructure) -> String {
    if bands.is_empty() {
        return "No k-point data was extracted. Check the OUTCAR file format.\n".to_string();
    }

    let sep = separator();
    let mut out = String::new();
    out.push_str("\nResults (All K-Points):\n");
    let _ = writeln!(out, "{}", sep);

    for (id, record) in &bands.kpoints {
        match record.band_gap() {
            Some(gap) => {
                let _ = writeln!(out, "K-Point: {}", id);
                write_edges(&mut out, &gap);
            }
            None => {
                let _ = writeln!(
                    out,
                    "K-Point: {} - Incomplete data (VBM or CBM not found).",
                    id
                );
            }
        }
        let _ = writeln!(out, "{}", sep);
    }

    out.push_str("\n--- Summary ---\n");
    match bands.minimum_gap() {
        Some(min) => {
            let _ = writeln!(out, "Minimum Band Gap found at K-Point: {}", min.kpoint);
            write_edges(&mut out, &min);
        }
        None => out.push_str("No valid band gap could be calculated from the data.\n"),
    }
    let _ = writeln!(out, "{}", sep);

    out
}

/// 费米能数值，保留小数点（`5.0` 而不是 `5`）
pub fn format_energy(value: f64) -> String {
    format!("{:?}", value)
}

/// 渲染单次费米能查询的回答行（不含换行）
pub fn format_fermi_answer(name: &str, result: &Result<f64>) -> String {
    match result {
        Ok(value) => format!("{}: {}", name, format_energy(*value)),
        Err(e) => format!("Error: {}", e),
    }
}
