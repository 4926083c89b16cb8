//! # 批量执行器
//!
//! 顺序执行批量处理任务：一次只处理一个目录，文件在处理下一个目录前关闭。
//!
//! ## 功能
//! - 进度条显示
//! - 结果分类统计与失败汇总
//!
//! ## 依赖关系
//! - 被 `commands/gap.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条

use crate::utils::progress;

use indicatif::ProgressBar;

/// 单个条目处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（目标文件不存在）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (条目名, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(name, err) => {
                self.failed += 1;
                self.failures.push((name, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }

    /// 是否至少找到过一个目标文件（无论解析是否成功）
    pub fn found_any(&self) -> bool {
        self.success + self.failed > 0
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 进度条提示
    message: String,
    /// 是否显示进度条
    show_progress: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            show_progress: true,
        }
    }

    /// 设置是否显示进度条
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// 依次处理条目；处理函数可通过进度条的 `suspend` 打印消息
    pub fn run<T, F>(&self, items: &[T], mut processor: F) -> BatchResult
    where
        F: FnMut(&T, &ProgressBar) -> ProcessResult,
    {
        let pb = if self.show_progress {
            progress::create_progress_bar(items.len() as u64, &self.message)
        } else {
            ProgressBar::hidden()
        };

        let mut batch_result = BatchResult::default();
        for item in items {
            let result = processor(item, &pb);
            batch_result.merge(result);
            pb.inc(1);
        }

        pb.finish_and_clear();
        batch_result
    }
}
