//! # VASP OUTCAR 能带解析器
//!
//! 单遍扫描 OUTCAR，按 k 点记录价带顶 (VBM) 与导带底 (CBM)。
//!
//! 识别两类行：
//! ```text
//!  k-point     1 :       0.0000    0.0000    0.0000
//!     248      -1.3644      2.00000
//! ```
//! 第二类为 `能带序号 能量 占据数`，只在遇到 k 点标题后才会被处理。
//!
//! ## 依赖关系
//! - 被 `commands/gap.rs` 使用
//! - 使用 `models/band.rs`

use super::{for_each_line, open_reader};
use crate::error::{Result, VaspGapError};
use crate::models::{BandStructure, KPointRecord};

use regex::Regex;
use std::io::BufRead;
use std::ops::ControlFlow;
use std::path::Path;
use std::sync::OnceLock;

fn kpoint_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*k-point\s+([0-9]+)\s*:").expect("valid k-point pattern"))
}

fn band_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*[0-9]+\s+(-?[0-9]+\.[0-9]+)\s+(-?[0-9]+\.[0-9]+)\s*$")
            .expect("valid band line pattern")
    })
}

/// OUTCAR 能带解析器
///
/// 占据数 `> tol` 视为占据（更新 VBM，后出现者覆盖前者），
/// `|occ| <= tol` 视为空带（VBM 已有且 CBM 未设置时记为 CBM）。
/// 默认 `tol = 0`，即严格按 `occ > 0` / `occ == 0` 判断。
#[derive(Debug, Clone, Copy)]
pub struct OutcarBandParser {
    zero_tolerance: f64,
}

impl Default for OutcarBandParser {
    fn default() -> Self {
        Self {
            zero_tolerance: 0.0,
        }
    }
}

/// 扫描过程中的可变状态
struct ScanState {
    current: Option<u64>,
    bands: BandStructure,
}

impl OutcarBandParser {
    /// 创建默认（精确零占据）解析器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置空带判定的容差 (必须非负)
    pub fn with_zero_tolerance(mut self, tolerance: f64) -> Self {
        self.zero_tolerance = tolerance;
        self
    }

    /// 解析 OUTCAR 文件
    pub fn parse_file(&self, path: &Path) -> Result<BandStructure> {
        let reader = open_reader(path)?;
        self.parse_reader(reader, &path.display().to_string())
    }

    /// 解析 OUTCAR 文本内容
    pub fn parse_content(&self, content: &str) -> Result<BandStructure> {
        self.parse_reader(content.as_bytes(), "<memory>")
    }

    /// 从任意读取器解析
    pub fn parse_reader<R: BufRead>(&self, reader: R, source: &str) -> Result<BandStructure> {
        let mut state = ScanState {
            current: None,
            bands: BandStructure::new(),
        };

        for_each_line(reader, source, |line_no, line| {
            self.feed_line(&mut state, line_no, line);
            ControlFlow::Continue(())
        })?;

        Ok(state.bands)
    }

    fn feed_line(&self, state: &mut ScanState, line_no: usize, line: &str) {
        if let Some(caps) = kpoint_regex().captures(line) {
            match caps[1].parse::<u64>() {
                Ok(id) => {
                    // 重复编号：后出现者覆盖
                    state.bands.kpoints.insert(id, KPointRecord::new(id));
                    state.current = Some(id);
                }
                Err(e) => {
                    state
                        .bands
                        .warnings
                        .push(VaspGapError::unparsable(line_no, line, e.to_string()));
                    state.current = None;
                }
            }
            return;
        }

        let Some(id) = state.current else {
            return;
        };
        let Some(caps) = band_regex().captures(line) else {
            return;
        };

        // 正则已保证两个字段是合法的十进制数
        let (Ok(energy), Ok(occupation)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) else {
            state
                .bands
                .warnings
                .push(VaspGapError::unparsable(line_no, line, "invalid band energy"));
            return;
        };

        let Some(record) = state.bands.kpoints.get_mut(&id) else {
            return;
        };

        if occupation > self.zero_tolerance {
            record.vbm = Some(energy);
        } else if occupation.abs() <= self.zero_tolerance
            && record.vbm.is_some()
            && record.cbm.is_none()
        {
            record.cbm = Some(energy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> BandStructure {
        OutcarBandParser::new().parse_content(content).unwrap()
    }

    const TWO_KPOINTS: &str = r#"
 E-fermi :  -1.2406     XC(G=0):  -9.6716     alpha+bet :-12.7010

 spin component 1

 k-point     1 :       0.0000    0.0000    0.0000
  band No.  band energies     occupation
      1     -20.1234      2.00000
      2      -5.1234      2.00000
      3       0.8765      0.00000
      4       1.5000      0.00000

 k-point     2 :       0.5000    0.0000    0.0000
  band No.  band energies     occupation
      1     -19.0000      2.00000
      2      -4.5000      2.00000
      3       0.2500      0.00000
      4       2.0000      0.00000
"#;

    #[test]
    fn test_single_kpoint_example() {
        let content = " k-point    1 :   0.0 0.0 0.0\n  1   -5.1234   1.00000\n  2    0.8765   0.00000\n";
        let bands = parse(content);
        let k1 = bands.kpoints[&1];
        assert_eq!(k1.vbm, Some(-5.1234));
        assert_eq!(k1.cbm, Some(0.8765));

        let gap = k1.band_gap().unwrap();
        assert_eq!(format!("{:.4}", gap.gap), "5.9999");
    }

    #[test]
    fn test_multiple_kpoints_and_minimum() {
        let bands = parse(TWO_KPOINTS);
        assert_eq!(bands.kpoints.len(), 2);

        let k1 = bands.kpoints[&1];
        assert_eq!(k1.vbm, Some(-5.1234));
        assert_eq!(k1.cbm, Some(0.8765));

        let k2 = bands.kpoints[&2];
        assert_eq!(k2.vbm, Some(-4.5));
        assert_eq!(k2.cbm, Some(0.25));

        let min = bands.minimum_gap().unwrap();
        assert_eq!(min.kpoint, 2);
        assert!((min.gap - 4.75).abs() < 1e-9);
        assert!(bands.warnings.is_empty());
    }

    #[test]
    fn test_last_occupied_line_wins_and_first_cbm_kept() {
        let content = "k-point 1 : x\n 1 -3.0 2.0\n 2 -2.0 1.0\n 3 -1.0 0.5\n 4 1.0 0.0\n 5 2.0 0.0\n";
        let k = parse(content).kpoints[&1];
        assert_eq!(k.vbm, Some(-1.0));
        assert_eq!(k.cbm, Some(1.0));
    }

    #[test]
    fn test_all_occupied_is_incomplete() {
        let content = "k-point 1 :\n 1 -3.0 2.0\n 2 -2.0 2.0\n";
        let bands = parse(content);
        assert_eq!(bands.kpoints[&1].cbm, None);
        assert!(!bands.kpoints[&1].is_complete());
        assert!(bands.minimum_gap().is_none());
    }

    #[test]
    fn test_zero_before_vbm_does_not_set_cbm() {
        let content = "k-point 1 :\n 1 -3.0 0.0\n 2 -2.0 2.0\n 3 1.0 0.0\n";
        let k = parse(content).kpoints[&1];
        assert_eq!(k.vbm, Some(-2.0));
        assert_eq!(k.cbm, Some(1.0));

        let only_empty = parse("k-point 1 :\n 1 -3.0 0.0\n 2 -2.0 0.0\n");
        assert_eq!(only_empty.kpoints[&1].vbm, None);
        assert_eq!(only_empty.kpoints[&1].cbm, None);
    }

    #[test]
    fn test_band_lines_before_header_ignored() {
        let content = " 1 -3.0 2.0\n 2 1.0 0.0\n";
        assert!(parse(content).is_empty());
    }

    #[test]
    fn test_no_kpoint_headers() {
        let bands = parse("free  energy    TOTEN  =       -12.345 eV\n");
        assert!(bands.is_empty());
        assert!(bands.minimum_gap().is_none());
    }

    #[test]
    fn test_lines_with_extra_tokens_are_not_band_lines() {
        let content = "k-point 1 :\n 1 -3.0 2.0 0.5\n 2 -2.0 2.0\n 3 1.0 0.0 extra\n 4 1.5 0.0\n";
        let k = parse(content).kpoints[&1];
        assert_eq!(k.vbm, Some(-2.0));
        assert_eq!(k.cbm, Some(1.5));
    }

    #[test]
    fn test_integer_fields_are_not_band_lines() {
        // 能量/占据数必须带小数点
        let content = "k-point 1 :\n 1 -3 2\n 2 -2.0 2.0\n 3 1 0\n 4 1.5 0.0\n";
        let k = parse(content).kpoints[&1];
        assert_eq!(k.vbm, Some(-2.0));
        assert_eq!(k.cbm, Some(1.5));
    }

    #[test]
    fn test_repeated_header_resets_record() {
        let content = "k-point 1 :\n 1 -3.0 2.0\n 2 1.0 0.0\nk-point 1 :\n 1 -2.5 2.0\n";
        let bands = parse(content);
        assert_eq!(bands.kpoints.len(), 1);
        assert_eq!(bands.kpoints[&1].vbm, Some(-2.5));
        assert_eq!(bands.kpoints[&1].cbm, None);
    }

    #[test]
    fn test_header_overflow_is_warning() {
        let content =
            "k-point 1 :\n 1 -3.0 2.0\nk-point 99999999999999999999999 :\n 2 1.0 0.0\n";
        let bands = parse(content);
        assert_eq!(bands.warnings.len(), 1);
        assert!(matches!(
            bands.warnings[0],
            VaspGapError::LineUnparsable { line_no: 3, .. }
        ));
        // 溢出标题之后的能带行不归入上一个 k 点
        assert_eq!(bands.kpoints[&1].cbm, None);
    }

    #[test]
    fn test_negative_occupation_ignored_by_default() {
        let content = "k-point 1 :\n 1 -3.0 2.0\n 2 0.5 -0.0001\n 3 1.0 0.0\n";
        let k = parse(content).kpoints[&1];
        assert_eq!(k.cbm, Some(1.0));
    }

    #[test]
    fn test_zero_tolerance_accepts_small_occupation() {
        let content = "k-point 1 :\n 1 -3.0 2.0\n 2 0.5 0.0001\n 3 1.0 0.0\n";

        let exact = parse(content).kpoints[&1];
        assert_eq!(exact.vbm, Some(0.5));
        assert_eq!(exact.cbm, Some(1.0));

        let tolerant = OutcarBandParser::new()
            .with_zero_tolerance(1e-3)
            .parse_content(content)
            .unwrap()
            .kpoints[&1];
        assert_eq!(tolerant.vbm, Some(-3.0));
        assert_eq!(tolerant.cbm, Some(0.5));
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "k-point 1 :\r\n 1 -3.0 2.0\r\n 2 1.0 0.0\r\n";
        let k = parse(content).kpoints[&1];
        assert_eq!(k.vbm, Some(-3.0));
        assert_eq!(k.cbm, Some(1.0));
    }

    #[test]
    fn test_parse_file_missing() {
        let err = OutcarBandParser::new()
            .parse_file(Path::new("/no/such/dir/OUTCAR"))
            .unwrap_err();
        assert!(matches!(err, VaspGapError::FileUnreadable { .. }));
    }
}
