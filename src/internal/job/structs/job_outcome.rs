//! 任务终态与收尾记账产出的结果。

use serde::{Deserialize, Serialize};

/// 任务级状态。
///
/// 只有 `Completed` 一种终态：单个分段的失败通过 `on_segment_error`
/// 钩子与分段状态暴露，从不折叠成任务级失败；所有工作者退出后收尾
/// 记账总会发生一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// 所有工作者（无论成败）均已退出
    Completed,
}

impl JobStatus {
    /// 历史记录中使用的状态文案。
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Completed => "已完成",
        }
    }
}

/// 任务结果：收尾记账时生成，一个任务恰好产生一份。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOutcome {
    /// 目标文件名（目标路径的末段）
    pub filename: String,
    /// 人类可读的文件大小（如 `3.5 MB`）
    pub size: String,
    /// 任务状态
    pub status: JobStatus,
}
