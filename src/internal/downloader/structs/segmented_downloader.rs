//! 分段并行下载器
//!
//! 把一个远程对象切成连续字节区间，由多个工作者并发抓取后按偏移
//! 合并成一个与源对象逐比特一致的文件。
//!
//! ## 流程
//!
//! 1. HEAD 探测对象大小（无有效大小则失败）；
//! 2. 目标文件预分配到最终大小；
//! 3. `[0, total - 1]` 切成 N 个连续分段，每段一个工作者任务；
//! 4. 工作者消息在协调器事件循环内聚合为整体进度与收尾记账。
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use ranged_dl::SegmentedDownloader;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handle = SegmentedDownloader::new(
//!     "https://example.com/big.zip",
//!     "downloads/big.zip",
//! )
//! .worker_count(4)
//! .start()
//! .await?;
//!
//! println!("总大小: {} 字节", handle.total_size());
//! let outcome = handle.wait().await?;
//! println!("{} {}", outcome.filename, outcome.size);
//! # Ok(())
//! # }
//! ```
//!
//! ## 失败语义
//!
//! 启动前的失败（探测 / 规划 / 预分配）同步返回；启动后单个分段的
//! 失败只终止该分段，通过 `on_segment_error` 上报，不取消兄弟分段，
//! 收尾记账在全部工作者退出后照常发生一次。部分失败会留下一个大小
//! 正确、但失败区间仍为预分配填充字节的文件，是否可用由调用方判断。

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tokio::sync::oneshot;
use tracing::info;

use crate::internal::downloader::functions::aggregate_events::{
    AggregateEventsParams, aggregate_worker_events,
};
use crate::internal::downloader::functions::prepare_target::{
    cleanup_stale_scratch, prepare_target_file,
};
use crate::internal::job::structs::hook_adapters;
use crate::internal::job::structs::job_config::JobConfig;
use crate::internal::job::structs::job_hooks_container::JobHooksContainer;
use crate::internal::job::structs::job_outcome::JobOutcome;
use crate::internal::job::structs::job_progress::JobProgress;
use crate::internal::job::structs::segment_plan::SegmentPlan;
use crate::internal::job::traits::job_hook::{HookAbort, JobHook};
use crate::internal::probe::functions::probe_object::probe_object;
use crate::internal::states::message_queue::MessageQueue;
use crate::internal::states::watched_value::WatchedValue;
use crate::internal::worker::structs::segment_worker::{
    SegmentWorkerParams, run_segment_worker,
};

use super::download_error::DownloadError;
use super::job_handle::JobHandle;

/// 分段并行下载器；链式配置后调用 [`SegmentedDownloader::start`]。
pub struct SegmentedDownloader {
    client: Client,
    url: String,
    save_path: PathBuf,
    config: JobConfig,
    hooks: JobHooksContainer,
    progress_state: WatchedValue<JobProgress>,
}

impl SegmentedDownloader {
    /// 创建一个指向 `url`、保存到 `save_path` 的下载器。
    pub fn new(url: impl Into<String>, save_path: impl AsRef<Path>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            save_path: save_path.as_ref().to_path_buf(),
            config: JobConfig::default(),
            hooks: JobHooksContainer::default(),
            progress_state: WatchedValue::new(JobProgress::default()),
        }
    }

    /// 使用外部构建的 HTTP 客户端（内部是 Arc，clone 即共享连接池）。
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// 设置请求的工作者数；超过对象字节数时会被收窄，0 在启动时报错。
    pub fn worker_count(mut self, n: u32) -> Self {
        self.config.worker_count = n;
        self
    }

    /// 设置单个请求的总超时（默认 30 秒）。
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// 注册「开始前」钩子；闭包返回 `Err(HookAbort)` 会中止本次任务。
    pub fn with_before_start_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<(), HookAbort>> + Send + 'static,
    {
        self.hooks.add(hook_adapters::BeforeStartHookAdapter(f));
        self
    }

    /// 注册「聚合进度」钩子。
    pub fn with_on_progress_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(&JobProgress) + Send + Sync + 'static,
    {
        self.hooks.add(hook_adapters::OnProgressHookAdapter(f));
        self
    }

    /// 注册「分段失败」钩子；参数为工作者 id 与可读原因。
    pub fn with_on_segment_error_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(u32, &str) + Send + Sync + 'static,
    {
        self.hooks.add(hook_adapters::OnSegmentErrorHookAdapter(f));
        self
    }

    /// 注册「收尾」钩子；所有工作者退出后调用一次。
    pub fn with_after_complete_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut(JobOutcome) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        self.hooks.add(hook_adapters::AfterCompleteHookAdapter(f));
        self
    }

    /// 注册完整钩子，在任务各阶段插入逻辑。
    pub fn with_hook(mut self, hook: impl JobHook + 'static) -> Self {
        self.hooks.add(hook);
        self
    }

    /// 聚合进度状态；返回可共享句柄，`.watch()` 后 `changed().await` 监听。
    pub fn progress(&self) -> WatchedValue<JobProgress> {
        self.progress_state.clone()
    }

    /// 启动任务：探测大小、预分配目标文件、spawn 各分段工作者。
    ///
    /// 返回 `Ok` 即表示任务已被接受并在后台运行；随后通过
    /// [`JobHandle`] 等待收尾或监听进度。本步骤的任何失败都发生在
    /// 工作者启动之前。
    pub async fn start(mut self) -> Result<JobHandle, DownloadError> {
        self.hooks
            .run_before_start()
            .await
            .map_err(DownloadError::HookAbort)?;

        let object_info =
            probe_object(&self.client, &self.url, self.config.request_timeout).await?;
        let total_size = object_info.size;

        let plan = SegmentPlan::new(total_size, self.config.worker_count)?;

        prepare_target_file(&self.save_path, total_size).await?;
        cleanup_stale_scratch(&self.save_path, plan.segment_count()).await;

        info!(
            target: "downloader",
            url = %self.url,
            total_size,
            workers = plan.segment_count(),
            "开始多线程下载"
        );

        let (messages, consumer) = MessageQueue::new();
        for segment in plan.segments() {
            tokio::spawn(run_segment_worker(SegmentWorkerParams {
                client: self.client.clone(),
                url: self.url.clone(),
                target_path: self.save_path.clone(),
                start_byte: segment.start,
                end_byte: segment.end,
                worker_id: segment.index,
                request_timeout: self.config.request_timeout,
                messages: messages.clone(),
            }));
        }
        // 协调器不保留生产者端：所有工作者退出后通道自然关闭
        drop(messages);

        let (outcome_tx, outcome_rx) = oneshot::channel();
        let segment_count = plan.segment_count();
        tokio::spawn(aggregate_worker_events(AggregateEventsParams {
            consumer,
            segments: plan.into_segments(),
            hooks: self.hooks,
            progress: self.progress_state.clone(),
            target_path: self.save_path.clone(),
            outcome_tx,
        }));

        Ok(JobHandle::new(
            total_size,
            segment_count,
            self.progress_state,
            outcome_rx,
        ))
    }
}
