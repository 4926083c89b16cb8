//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `gap`: 批量提取各分子目录的 VBM/CBM/带隙
//! - `fermi`: 交互式查询费米能
//!
//! 所有参数都有默认值，不带参数运行子命令即处理当前目录。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: gap, fermi

pub mod fermi;
pub mod gap;

use clap::{Parser, Subcommand};

/// vaspgap - VASP OUTCAR 带隙与费米能提取工具
#[derive(Parser)]
#[command(name = "vaspgap")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Extract band gaps and Fermi energies from VASP OUTCAR files", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Extract VBM, CBM and band gap per k-point for every molecule directory
    Gap(gap::GapArgs),

    /// Look up the Fermi energy of molecule directories interactively
    Fermi(fermi::FermiArgs),
}
