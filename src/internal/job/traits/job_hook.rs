//! 任务流程钩子：在「开始前 / 进度 / 分段失败 / 收尾」插入自定义逻辑。

use async_trait::async_trait;

use crate::internal::job::structs::job_outcome::JobOutcome;
use crate::internal::job::structs::job_progress::JobProgress;

/// 钩子要求中止任务时使用的错误。
#[derive(Debug, Clone)]
pub struct HookAbort;

impl std::fmt::Display for HookAbort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("任务被钩子中止")
    }
}

impl std::error::Error for HookAbort {}

/// 任务流程钩子。
///
/// 使用方式二选一（可混用）：
/// - **单阶段**：用 `with_before_start_hook` / `with_on_progress_hook` /
///   `with_on_segment_error_hook` / `with_after_complete_hook` 传入闭包；
/// - **完整钩子**：实现本 trait，通过下载器的 `with_hook` 注册。
///
/// 进度与失败钩子在协调器事件循环内同步执行，应保持轻量。
#[async_trait]
pub trait JobHook: Send + Sync {
    /// 探测开始前调用。返回 `Err` 则中止本次任务。
    async fn before_start(&mut self) -> Result<(), HookAbort> {
        Ok(())
    }

    /// 聚合进度更新时调用。
    fn on_progress(&mut self, _progress: &JobProgress) {}

    /// 某个分段终止失败时调用；兄弟分段不会因此被取消。
    fn on_segment_error(&mut self, _worker_id: u32, _reason: &str) {}

    /// 所有工作者退出、收尾记账时调用，恰好一次。
    async fn after_complete(&mut self, _outcome: &JobOutcome) {}
}
