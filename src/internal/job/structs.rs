pub mod download_record;
pub mod hook_adapters;
pub mod job_config;
pub mod job_hooks_container;
pub mod job_outcome;
pub mod job_progress;
pub mod segment;
pub mod segment_plan;
pub mod worker_message;

// 重导出公共类型
pub use download_record::DownloadRecord;
pub use job_config::JobConfig;
pub use job_hooks_container::JobHooksContainer;
pub use job_outcome::{JobOutcome, JobStatus};
pub use job_progress::JobProgress;
pub use segment::{Segment, SegmentState};
pub use segment_plan::SegmentPlan;
pub use worker_message::WorkerMessage;
