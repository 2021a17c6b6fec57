//! 下载相关错误类型。

use thiserror::Error;

use crate::internal::job::traits::job_hook::HookAbort;

/// 下载错误。
///
/// 任务启动前（探测 / 规划 / 预分配）的错误由
/// [`crate::SegmentedDownloader::start`] 同步返回；工作者内部的错误只
/// 作用于其分段，通过 `Error` 消息与 `on_segment_error` 钩子上报，
/// 不会中止兄弟分段。
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("请求超时")]
    Timeout,

    #[error("服务器返回错误，状态码: {status}")]
    Server { status: u16 },

    #[error("无法获取文件大小，请确保 URL 有效")]
    SizeUnknown,

    #[error("服务器不支持范围请求，无法进行多线程下载")]
    RangeNotSupported,

    #[error("工作者数不能为 0")]
    InvalidWorkerCount,

    #[error("创建目录失败: {0}")]
    CreateDir(std::io::Error),

    #[error("预分配文件空间失败: {0}")]
    PreallocateFile(std::io::Error),

    #[error("创建暂存文件失败: {0}")]
    CreateScratch(std::io::Error),

    #[error("写入暂存文件失败: {0}")]
    WriteScratch(std::io::Error),

    #[error("刷新暂存文件失败: {0}")]
    FlushScratch(std::io::Error),

    #[error("读取暂存文件失败: {0}")]
    ReadScratch(std::io::Error),

    #[error("删除暂存文件失败: {0}")]
    RemoveScratch(std::io::Error),

    #[error("打开目标文件失败: {0}")]
    OpenTarget(std::io::Error),

    #[error("目标文件定位失败: {0}")]
    SeekTarget(std::io::Error),

    #[error("写入目标文件失败: {0}")]
    WriteTarget(std::io::Error),

    #[error("任务被钩子中止: {0}")]
    HookAbort(HookAbort),

    #[error("事件通道已关闭")]
    EventChannelClosed,
}

impl DownloadError {
    /// 把 reqwest 错误归类：超时单独成类，便于上报可读原因。
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            DownloadError::Timeout
        } else {
            DownloadError::Request(e)
        }
    }
}
