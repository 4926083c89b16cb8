//! # E-fermi 提取器
//!
//! 查找 OUTCAR 中第一行可解析的费米能，例如：
//! ```text
//!  E-fermi :  -1.2406     XC(G=0):  -9.6716     alpha+bet :-12.7010
//! ```
//! 按空白切分后，取第一个独立 `:` 之后的数值。
//!
//! ## 依赖关系
//! - 被 `commands/fermi.rs` 使用
//! - 使用 `models/fermi.rs`

use super::{for_each_line, open_reader};
use crate::error::{Result, VaspGapError};
use crate::models::FermiScan;

use std::io::BufRead;
use std::ops::ControlFlow;
use std::path::Path;

/// 费米能标记
pub const FERMI_MARKER: &str = "E-fermi";

/// 从文件中提取费米能
pub fn extract_fermi(path: &Path) -> Result<FermiScan> {
    let reader = open_reader(path)?;
    extract_fermi_from_reader(reader, &path.display().to_string())
}

/// 从读取器中提取费米能，找到第一个有效值即停止
pub fn extract_fermi_from_reader<R: BufRead>(reader: R, source: &str) -> Result<FermiScan> {
    let mut scan = FermiScan::default();

    for_each_line(reader, source, |line_no, line| {
        if !line.contains(FERMI_MARKER) {
            return ControlFlow::Continue(());
        }

        match parse_fermi_line(line) {
            Ok(value) => {
                scan.value = Some(value);
                ControlFlow::Break(())
            }
            Err(reason) => {
                scan.warnings
                    .push(VaspGapError::unparsable(line_no, line, reason));
                ControlFlow::Continue(())
            }
        }
    })?;

    Ok(scan)
}

/// 解析单行 E-fermi，失败时返回原因
pub fn parse_fermi_line(line: &str) -> std::result::Result<f64, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let colon = parts
        .iter()
        .position(|p| *p == ":")
        .ok_or_else(|| "no standalone ':' token".to_string())?;

    let value = parts
        .get(colon + 1)
        .ok_or_else(|| "no value after ':'".to_string())?;

    value
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a valid number", value))
}
