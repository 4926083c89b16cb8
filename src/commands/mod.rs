//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `parsers/`, `report/`, `utils/`
//! - 子模块: gap, fermi

pub mod fermi;
pub mod gap;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Gap(args) => gap::execute(args),
        Commands::Fermi(args) => fermi::execute(args),
    }
}
