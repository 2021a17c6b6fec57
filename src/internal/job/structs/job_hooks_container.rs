//! 钩子容器：持有注册的全部任务钩子，按注册顺序执行。

use crate::internal::job::structs::job_outcome::JobOutcome;
use crate::internal::job::structs::job_progress::JobProgress;
use crate::internal::job::traits::job_hook::{HookAbort, JobHook};

/// 钩子容器。协调器事件循环独占持有并驱动，无需加锁。
#[derive(Default)]
pub struct JobHooksContainer {
    hooks: Vec<Box<dyn JobHook>>,
}

impl JobHooksContainer {
    /// 注册一个钩子；可多次调用，按注册顺序依次执行。
    pub fn add(&mut self, hook: impl JobHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub async fn run_before_start(&mut self) -> Result<(), HookAbort> {
        for h in self.hooks.iter_mut() {
            h.before_start().await?;
        }
        Ok(())
    }

    pub fn run_on_progress(&mut self, progress: &JobProgress) {
        for h in self.hooks.iter_mut() {
            h.on_progress(progress);
        }
    }

    pub fn run_on_segment_error(&mut self, worker_id: u32, reason: &str) {
        for h in self.hooks.iter_mut() {
            h.on_segment_error(worker_id, reason);
        }
    }

    pub async fn run_after_complete(&mut self, outcome: &JobOutcome) {
        for h in self.hooks.iter_mut() {
            h.after_complete(outcome).await;
        }
    }
}
