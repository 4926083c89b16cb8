//! # gap 命令实现
//!
//! 批量提取带隙：对根目录下每个分子目录定位 OUTCAR，解析每个 k 点的
//! VBM/CBM，写入结果文件。
//!
//! ## 功能
//! - 按 `sp` → `restart/sp` 回退查找 OUTCAR
//! - 每个分子一个结果段落，缺失/失败的分子写入提示行后继续
//! - 终端汇总表格，可选 CSV 导出
//!
//! ## 依赖关系
//! - 使用 `cli/gap.rs` 定义的参数
//! - 使用 `batch/`, `parsers/outcar.rs`, `report/`
//! - 使用 `utils/output.rs`

use crate::batch::{
    resolve_target, BatchResult, BatchRunner, MoleculeCollector, MoleculeDir, ProcessResult,
};
use crate::cli::gap::GapArgs;
use crate::error::{Result, VaspGapError};
use crate::parsers::outcar::OutcarBandParser;
use crate::report::{self, export, export::MoleculeSummary, export::SummaryStatus};
use crate::utils::output;

use std::fs;
use std::path::Path;

/// 一次批处理的全部产出
pub struct GapRun {
    /// 结果文件内容
    pub text: String,
    /// 每个分子的汇总
    pub summaries: Vec<MoleculeSummary>,
    /// 统计
    pub batch: BatchResult,
}

/// 执行 gap 命令
pub fn execute(args: GapArgs) -> Result<()> {
    output::print_header("Extracting Band Gaps");

    if !args.zero_tolerance.is_finite() || args.zero_tolerance < 0.0 {
        return Err(VaspGapError::InvalidArgument(format!(
            "zero tolerance must be a non-negative number, got {}",
            args.zero_tolerance
        )));
    }

    let molecules = MoleculeCollector::new(args.root.clone())
        .with_pattern(&args.pattern)?
        .collect()?;

    output::print_info(&format!("Starting search in: {}", args.root.display()));
    output::print_info(&format!(
        "Results will be saved to: {}",
        args.output.display()
    ));
    output::print_info(&format!("Scanning {} directories...", molecules.len()));

    let parser = OutcarBandParser::new().with_zero_tolerance(args.zero_tolerance);
    let runner = BatchRunner::new("Parsing");
    let run = process_molecules(&molecules, &parser, &args.filename, &runner);

    // 即使没有任何有效数据也写出结果文件
    write_results(&args.output, &run.text)?;

    if let Some(ref csv_path) = args.csv {
        export::write_summary_csv(&run.summaries, csv_path)?;
        output::print_success(&format!("Summary saved to '{}'", csv_path.display()));
    }

    if !args.quiet && !run.summaries.is_empty() {
        output::print_header("Minimum Band Gap per Molecule");
        println!("{}", export::summary_table(&run.summaries));
    }

    if run.batch.failed > 0 {
        output::print_warning(&format!(
            "{} of {} molecule directories could not be parsed:",
            run.batch.failed,
            run.batch.total()
        ));
        for (name, err) in &run.batch.failures {
            output::print_error(&format!("{}: {}", name, err));
        }
    }

    if run.batch.found_any() {
        output::print_done(&format!(
            "Execution finished. All results have been saved to '{}'.",
            args.output.display()
        ));
    } else {
        output::print_warning(&format!(
            "Execution finished. No {} files were found in any of the subdirectories.",
            args.filename
        ));
    }

    Ok(())
}

/// 依次处理分子目录，生成结果文本与汇总
pub fn process_molecules(
    molecules: &[MoleculeDir],
    parser: &OutcarBandParser,
    filename: &str,
    runner: &BatchRunner,
) -> GapRun {
    let mut text = String::new();
    let mut summaries = Vec::with_capacity(molecules.len());

    let batch = runner.run(molecules, |mol, pb| {
        text.push_str(&report::molecule_header(&mol.name));

        let located = match resolve_target(&mol.path, filename) {
            Ok(located) => located,
            Err(e) if e.is_not_found() => {
                pb.suspend(|| output::print_skip(&format!("{}: {}", mol.name, e)));
                text.push_str(&report::not_found_line(&mol.name, filename));
                summaries.push(MoleculeSummary::failed(&mol.name, SummaryStatus::NotFound));
                return ProcessResult::Skipped(mol.name.clone());
            }
            Err(e) => {
                pb.suspend(|| output::print_error(&format!("{}: {}", mol.name, e)));
                text.push_str(&report::error_line(&e));
                summaries.push(MoleculeSummary::failed(&mol.name, SummaryStatus::Error));
                return ProcessResult::Failed(mol.name.clone(), e.to_string());
            }
        };

        pb.suspend(|| {
            output::print_info(&format!(
                "Found {} at: {}",
                filename,
                located.file.display()
            ))
        });

        match parser.parse_file(&located.file) {
            Ok(bands) => {
                for warning in &bands.warnings {
                    pb.suspend(|| output::print_warning(&format!("{}: {}", mol.name, warning)));
                }
                let incomplete = bands.incomplete_count();
                if incomplete > 0 {
                    pb.suspend(|| {
                        output::print_warning(&format!(
                            "{}: {} k-point(s) with incomplete data",
                            mol.name, incomplete
                        ))
                    });
                }
                text.push_str(&report::format_band_report(&bands));
                summaries.push(MoleculeSummary::from_bands(
                    &mol.name,
                    located.sp.source,
                    &bands,
                ));
                ProcessResult::Success(mol.name.clone())
            }
            Err(e) => {
                pb.suspend(|| output::print_error(&format!("{}: {}", mol.name, e)));
                text.push_str(&report::error_line(&e));
                summaries.push(MoleculeSummary::failed(&mol.name, SummaryStatus::Error));
                ProcessResult::Failed(mol.name.clone(), e.to_string())
            }
        }
    });

    GapRun {
        text,
        summaries,
        batch,
    }
}

/// 写入结果文件
fn write_results(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| VaspGapError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
