//! # gap 子命令 CLI 定义
//!
//! 遍历分子目录，提取每个 k 点的 VBM/CBM 与最小带隙
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/gap.rs`

use clap::Args;
use std::path::PathBuf;

/// gap 子命令参数
#[derive(Args, Debug)]
pub struct GapArgs {
    /// Directory whose subdirectories are molecule calculation folders
    #[arg(long, env = "VASPGAP_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Results text file
    #[arg(short, long, default_value = "vbm_cbm_results.txt")]
    pub output: PathBuf,

    /// Name of the VASP output file inside sp/ or restart/sp/
    #[arg(long, env = "VASPGAP_OUTCAR", default_value = "OUTCAR")]
    pub filename: String,

    /// Glob pattern for molecule directory names
    #[arg(short, long, default_value = "*")]
    pub pattern: String,

    /// Occupations with |occ| <= tolerance count as empty (default: exact zero)
    #[arg(long, default_value_t = 0.0)]
    pub zero_tolerance: f64,

    /// Also write a per-molecule minimum gap summary as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Do not print the summary table
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}
