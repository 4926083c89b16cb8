//! # vaspgap - VASP OUTCAR 带隙与费米能提取工具
//!
//! 面向按分子组织的计算目录树，每个分子目录下的单点计算位于
//! `sp/` 或 `restart/sp/`。
//!
//! ## 子命令
//! - `gap`   - 批量提取每个 k 点的 VBM/CBM 与最小带隙，写入结果文件
//! - `fermi` - 交互式查询 E-fermi
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (分子目录收集、sp 定位、顺序批处理)
//!   │     ├── parsers/   (OUTCAR 能带 / E-fermi 解析)
//!   │     ├── report/    (文本报告、表格与 CSV)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod report;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
