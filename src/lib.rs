/// 内部实现模块
mod internal;


/// 导出核心下载入口
pub use internal::downloader::structs::download_error::DownloadError;
pub use internal::downloader::structs::job_handle::JobHandle;
pub use internal::downloader::structs::segmented_downloader::SegmentedDownloader;

/// 任务领域模型：分段、消息、配置、结果与钩子
pub mod job {
    use crate::internal;
    // 领域模型
    pub use internal::job::structs::download_record::*;
    pub use internal::job::structs::job_config::*;
    pub use internal::job::structs::job_outcome::*;
    pub use internal::job::structs::job_progress::*;
    pub use internal::job::structs::segment::*;
    pub use internal::job::structs::segment_plan::*;
    pub use internal::job::structs::worker_message::*;
    // 钩子：trait 与容器
    pub use internal::job::structs::job_hooks_container::*;
    pub use internal::job::traits::job_hook::*;
}

/// 元数据探测：HEAD 获取对象大小、文件名推断
pub mod probe {
    use crate::internal;
    pub use internal::probe::functions::infer_filename::*;
    pub use internal::probe::functions::probe_object::*;
    pub use internal::probe::structs::remote_object_info::*;
}

pub mod states {
    pub mod watched_value {
        use crate::internal;
        pub use internal::states::watched_value::*;
    }
}

pub mod format {
    use crate::internal;
    pub use internal::format::human_size::*;
}
