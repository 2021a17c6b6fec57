//! 分段规划：把 `[0, total_size - 1]` 切成连续、互不重叠的区间。

use tracing::info;

use crate::internal::downloader::structs::download_error::DownloadError;

use super::segment::{Segment, SegmentState};

/// 一次任务的完整分段规划。
///
/// `chunk_size = floor(total_size / 分段数)`；第 i 段（非末段）覆盖
/// `[i * chunk_size, (i + 1) * chunk_size - 1]`，末段覆盖到
/// `total_size - 1`，吸收整除余数。
#[derive(Debug, Clone)]
pub struct SegmentPlan {
    total_size: u64,
    segments: Vec<Segment>,
}

impl SegmentPlan {
    /// 按请求的工作者数生成规划。
    ///
    /// - `worker_count == 0` → [`DownloadError::InvalidWorkerCount`]；
    /// - `worker_count > total_size` 时收窄为 `total_size`，
    ///   保证每段至少 1 字节。
    pub fn new(total_size: u64, worker_count: u32) -> Result<Self, DownloadError> {
        if worker_count == 0 {
            return Err(DownloadError::InvalidWorkerCount);
        }
        debug_assert!(total_size > 0, "探测阶段已保证 total_size > 0");

        let effective = (worker_count as u64).min(total_size);
        let chunk_size = total_size / effective;

        let mut segments = Vec::with_capacity(effective as usize);
        for i in 0..effective {
            let start = i * chunk_size;
            let end = if i == effective - 1 {
                total_size - 1
            } else {
                (i + 1) * chunk_size - 1
            };
            segments.push(Segment {
                index: i as u32,
                start,
                end,
                bytes_done: 0,
                state: SegmentState::Pending,
            });
        }

        if effective < worker_count as u64 {
            info!(
                target: "plan",
                requested = worker_count,
                effective,
                total_size,
                "工作者数超过对象字节数，已收窄"
            );
        }

        Ok(Self {
            total_size,
            segments,
        })
    }

    /// 对象总大小（字节）。
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// 实际分段数（收窄后）。
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// 分段列表视图。
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// 取出分段列表（移交给协调器事件循环）。
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}
