//! 分段抓取协议的常量与工具。

use std::time::Duration;

/// 固定的客户端标识头，所有请求统一携带。
pub(crate) const CLIENT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 单个请求的默认总超时（覆盖连接与读取）。
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 进度消息的触发步长：已下载计数每跨过 100 KiB 边界上报一次。
pub(crate) const PROGRESS_STEP: u64 = 100 * 1024;

/// 心跳周期：距上次进度上报超过该时长时补发一次，避免 UI 停滞。
pub(crate) const PROGRESS_HEARTBEAT: Duration = Duration::from_secs(1);

/// 生成 Range 请求头值：`bytes=start-end`，两端均为含边界。
pub(crate) fn range_header(start: u64, end: u64) -> String {
    format!("bytes={}-{}", start, end)
}
