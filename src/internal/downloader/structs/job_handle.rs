//! 任务句柄：任务被接受后暴露给调用方的视图。

use tokio::sync::oneshot;

use crate::internal::job::structs::job_outcome::JobOutcome;
use crate::internal::job::structs::job_progress::JobProgress;
use crate::internal::states::watched_value::WatchedValue;

use super::download_error::DownloadError;

/// 运行中任务的句柄。
///
/// 任务在后台运行，不随句柄销毁而停止；[`JobHandle::wait`] 消费句柄，
/// 在收尾记账完成后返回任务结果。
#[derive(Debug)]
pub struct JobHandle {
    total_size: u64,
    segment_count: usize,
    progress: WatchedValue<JobProgress>,
    outcome_rx: oneshot::Receiver<JobOutcome>,
}

impl JobHandle {
    pub(crate) fn new(
        total_size: u64,
        segment_count: usize,
        progress: WatchedValue<JobProgress>,
        outcome_rx: oneshot::Receiver<JobOutcome>,
    ) -> Self {
        Self {
            total_size,
            segment_count,
            progress,
            outcome_rx,
        }
    }

    /// 探测得到的对象总大小（字节）。
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// 实际分段（工作者）数。
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// 聚合进度状态句柄。
    pub fn progress(&self) -> WatchedValue<JobProgress> {
        self.progress.clone()
    }

    /// 等待收尾记账，返回任务结果。
    ///
    /// 无论各分段成败，所有工作者退出后都会返回 `Ok`；仅在协调器
    /// 事件循环异常销毁时返回 [`DownloadError::EventChannelClosed`]。
    pub async fn wait(self) -> Result<JobOutcome, DownloadError> {
        self.outcome_rx
            .await
            .map_err(|_| DownloadError::EventChannelClosed)
    }
}
