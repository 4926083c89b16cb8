//! # fermi 命令实现
//!
//! 交互式查询费米能：每次读入一个目录名，定位其 OUTCAR 并输出 E-fermi，
//! 输入 `quit`（不区分大小写）退出。每次查询互相独立，失败后回到提示符。
//!
//! ## 依赖关系
//! - 使用 `cli/fermi.rs` 定义的参数
//! - 使用 `batch/locator.rs`, `parsers/fermi.rs`, `report/`
//! - 使用 `utils/output.rs`

use crate::batch::resolve_target;
use crate::cli::fermi::FermiArgs;
use crate::error::{Result, VaspGapError};
use crate::parsers::fermi::{extract_fermi, FERMI_MARKER};
use crate::report;
use crate::utils::output;

use std::io::{self, BufRead, Write};
use std::path::Path;

/// 退出命令
const QUIT_COMMAND: &str = "quit";

/// 执行 fermi 命令
pub fn execute(args: FermiArgs) -> Result<()> {
    if !args.root.is_dir() {
        return Err(VaspGapError::DirectoryNotFound {
            path: args.root.display().to_string(),
        });
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.dirs.is_empty() {
        for name in &args.dirs {
            let result = query_fermi(&args.root, name, &args.filename);
            writeln!(out, "{}", report::format_fermi_answer(name, &result))
                .map_err(stdout_error)?;
        }
        return Ok(());
    }

    output::print_header("Fermi Energy Extractor");
    output::print_info(&format!("Running from: {}", args.root.display()));
    output::print_info(&format!("Enter directory name or '{}' to exit.", QUIT_COMMAND));

    let stdin = io::stdin();
    let answered = run_session(&args.root, &args.filename, stdin.lock(), &mut out)?;
    output::print_done(&format!("Answered {} queries", answered));

    Ok(())
}

/// 交互循环，返回处理过的查询数。
///
/// 读到 `quit` 或输入结束时退出。
pub fn run_session<R, W>(base: &Path, filename: &str, mut input: R, out: &mut W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut answered = 0;

    loop {
        write!(out, "\n> ").map_err(stdout_error)?;
        out.flush().map_err(stdout_error)?;

        let mut line = String::new();
        let n = input
            .read_line(&mut line)
            .map_err(|e| VaspGapError::FileUnreadable {
                path: "<stdin>".to_string(),
                source: e,
            })?;

        if n == 0 {
            writeln!(out).map_err(stdout_error)?;
            break;
        }

        let name = line.trim_end_matches(&['\r', '\n'][..]);
        if name.eq_ignore_ascii_case(QUIT_COMMAND) {
            writeln!(out, "Goodbye!").map_err(stdout_error)?;
            break;
        }

        let result = query_fermi(base, name, filename);
        writeln!(out, "{}", report::format_fermi_answer(name, &result))
            .map_err(stdout_error)?;
        answered += 1;
    }

    Ok(answered)
}

/// 查询单个分子目录的费米能
pub fn query_fermi(base: &Path, name: &str, filename: &str) -> Result<f64> {
    let target = base.join(name);
    if !target.is_dir() {
        return Err(VaspGapError::DirectoryNotFound {
            path: name.to_string(),
        });
    }

    let located = resolve_target(&target, filename).map_err(|e| match e {
        // 提示中使用用户输入的名字而不是完整路径
        VaspGapError::NoSpDirectory { .. } => VaspGapError::NoSpDirectory {
            molecule: name.to_string(),
        },
        other => other,
    })?;

    let scan = extract_fermi(&located.file)?;
    for warning in &scan.warnings {
        output::print_warning(&warning.to_string());
    }

    scan.value.ok_or_else(|| VaspGapError::NoDataExtracted {
        what: FERMI_MARKER.to_string(),
        path: name.to_string(),
    })
}

fn stdout_error(e: io::Error) -> VaspGapError {
    VaspGapError::FileWriteError {
        path: "<stdout>".to_string(),
        source: e,
    }
}
