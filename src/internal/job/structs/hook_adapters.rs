//! 单阶段钩子适配器：把闭包包装成 [`JobHook`]，供 `with_xx_hook` 使用。

use std::future::Future;

use async_trait::async_trait;

use crate::internal::job::structs::job_outcome::JobOutcome;
use crate::internal::job::structs::job_progress::JobProgress;
use crate::internal::job::traits::job_hook::{HookAbort, JobHook};

/// 仅实现「开始前」的钩子适配器。
pub(crate) struct BeforeStartHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> JobHook for BeforeStartHookAdapter<F>
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HookAbort>> + Send + 'static,
{
    async fn before_start(&mut self) -> Result<(), HookAbort> {
        (self.0)().await
    }
}

/// 仅实现「聚合进度」的钩子适配器。
pub(crate) struct OnProgressHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> JobHook for OnProgressHookAdapter<F>
where
    F: FnMut(&JobProgress) + Send + Sync + 'static,
{
    fn on_progress(&mut self, progress: &JobProgress) {
        (self.0)(progress);
    }
}

/// 仅实现「分段失败」的钩子适配器。
pub(crate) struct OnSegmentErrorHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> JobHook for OnSegmentErrorHookAdapter<F>
where
    F: FnMut(u32, &str) + Send + Sync + 'static,
{
    fn on_segment_error(&mut self, worker_id: u32, reason: &str) {
        (self.0)(worker_id, reason);
    }
}

/// 仅实现「收尾」的钩子适配器；任务结果以克隆传入闭包。
pub(crate) struct AfterCompleteHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> JobHook for AfterCompleteHookAdapter<F>
where
    F: FnMut(JobOutcome) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn after_complete(&mut self, outcome: &JobOutcome) {
        (self.0)(outcome.clone()).await
    }
}
