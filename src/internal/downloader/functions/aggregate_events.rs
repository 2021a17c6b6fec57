//! 协调器事件循环：聚合工作者消息，驱动进度与收尾记账。

use std::path::PathBuf;

use tokio::sync::oneshot;
use tracing::{error, info};

use crate::internal::format::human_size::human_readable_size;
use crate::internal::job::structs::job_hooks_container::JobHooksContainer;
use crate::internal::job::structs::job_outcome::{JobOutcome, JobStatus};
use crate::internal::job::structs::job_progress::JobProgress;
use crate::internal::job::structs::segment::{Segment, SegmentState};
use crate::internal::job::structs::worker_message::WorkerMessage;
use crate::internal::states::message_queue::MessageQueueConsumer;
use crate::internal::states::watched_value::WatchedValue;

/// 事件循环参数（形参超过 3 个，用 struct 承载）。
pub(crate) struct AggregateEventsParams {
    pub consumer: MessageQueueConsumer<WorkerMessage>,
    pub segments: Vec<Segment>,
    pub hooks: JobHooksContainer,
    pub progress: WatchedValue<JobProgress>,
    pub target_path: PathBuf,
    pub outcome_tx: oneshot::Sender<JobOutcome>,
}

/// 消费工作者消息直到所有分段到达终态，然后执行一次收尾记账。
///
/// 分段进度表只被本循环修改（单写者纪律）；整体进度为各分段百分比的
/// 算术平均，未启动分段按 0 计入，不按分段大小加权。
pub(crate) async fn aggregate_worker_events(mut params: AggregateEventsParams) {
    let segment_count = params.segments.len();
    let mut terminal = 0usize;

    while terminal < segment_count {
        let Some(message) = params.consumer.recv().await else {
            // 生产者全部销毁却仍有分段未到终态：按通道关闭提前收尾
            error!(target: "downloader", "消息通道提前关闭，提前进入收尾");
            break;
        };

        let worker_id = message.worker_id();
        let Some(segment) = params.segments.get_mut(worker_id as usize) else {
            error!(target: "downloader", worker_id, "收到未知分段的消息，忽略");
            continue;
        };

        match message {
            WorkerMessage::Start { .. } => {
                segment.state = SegmentState::Running;
                info!(
                    target: "downloader",
                    worker_id,
                    start = segment.start,
                    end = segment.end,
                    "工作者已启动"
                );
            }
            WorkerMessage::Progress {
                downloaded_bytes, ..
            } => {
                segment.bytes_done = downloaded_bytes;
                let worker_pct = segment.pct();
                let overall_pct =
                    params.segments.iter().map(Segment::pct).sum::<f64>() / segment_count as f64;
                let snapshot = JobProgress {
                    overall_pct,
                    worker_id,
                    worker_pct,
                };
                params.progress.update(snapshot.clone());
                params.hooks.run_on_progress(&snapshot);
            }
            WorkerMessage::Complete { .. } => {
                segment.state = SegmentState::Completed;
                terminal += 1;
                info!(target: "downloader", worker_id, "工作者已完成");
            }
            WorkerMessage::Error { reason, .. } => {
                segment.state = SegmentState::Failed;
                terminal += 1;
                error!(target: "downloader", worker_id, reason = %reason, "工作者失败");
                params.hooks.run_on_segment_error(worker_id, &reason);
            }
        }
    }

    finalize_job(params).await;
}

/// 收尾记账：生成任务结果、触发收尾钩子、交付给等待方。恰好执行一次，
/// 与各分段成败无关。
async fn finalize_job(mut params: AggregateEventsParams) {
    let filename = params
        .target_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    // 记录的大小取自磁盘上的实际文件，而非探测值
    let size_bytes = tokio::fs::metadata(&params.target_path)
        .await
        .map(|m| m.len())
        .unwrap_or(0);

    let outcome = JobOutcome {
        filename,
        size: human_readable_size(size_bytes),
        status: JobStatus::Completed,
    };

    info!(
        target: "downloader",
        filename = %outcome.filename,
        size = %outcome.size,
        "所有工作者已退出，任务收尾"
    );
    params.hooks.run_after_complete(&outcome).await;
    let _ = params.outcome_tx.send(outcome);
}
