pub mod download_error;
pub mod job_handle;
pub mod segmented_downloader;

// 重导出公共类型
pub use download_error::DownloadError;
pub use job_handle::JobHandle;
pub use segmented_downloader::SegmentedDownloader;
