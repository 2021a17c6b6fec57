//! 远程对象的探测结果。

/// HEAD 探测得到的远程对象信息。
///
/// `size` 一定大于 0：无法得到有效大小时探测直接失败。
/// 其余字段仅用于文件名推断，服务器未提供时为 `None`。
#[derive(Debug, Clone)]
pub struct RemoteObjectInfo {
    /// 对象总大小（字节）
    pub size: u64,
    /// 服务器是否声明支持字节范围请求（`accept-ranges: bytes`）。
    /// 仅供展示参考：服务器可能不声明却支持，最终以分段请求的
    /// 实际响应为准。
    pub supports_ranges: bool,
    /// `content-disposition` 响应头原文
    pub content_disposition: Option<String>,
    /// `content-type` 响应头原文
    pub content_type: Option<String>,
}
