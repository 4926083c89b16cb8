//! # fermi 子命令 CLI 定义
//!
//! 查询分子目录中 OUTCAR 的 E-fermi
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/fermi.rs`

use clap::Args;
use std::path::PathBuf;

/// fermi 子命令参数
#[derive(Args, Debug)]
pub struct FermiArgs {
    /// Molecule directories to query; starts an interactive prompt when omitted
    pub dirs: Vec<String>,

    /// Base directory that queried names are resolved against
    #[arg(long, env = "VASPGAP_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Name of the VASP output file inside sp/ or restart/sp/
    #[arg(long, env = "VASPGAP_OUTCAR", default_value = "OUTCAR")]
    pub filename: String,
}
