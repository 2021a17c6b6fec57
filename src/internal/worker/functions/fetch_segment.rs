//! 发起单个分段的 Range 请求并校验响应状态。

use std::time::Duration;

use reqwest::header::{RANGE, USER_AGENT};
use reqwest::{Client, Response, StatusCode};

use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::worker::constants::{CLIENT_USER_AGENT, range_header};

/// 发起 Range 请求时的参数（形参超过 3 个，用 struct 承载）。
pub(crate) struct FetchSegmentParams<'a> {
    pub client: &'a Client,
    pub url: &'a str,
    pub start_byte: u64,
    pub end_byte: u64,
    pub worker_id: u32,
    pub timeout: Duration,
}

/// 发起 `Range: bytes=start-end` 的 GET 请求，返回响应供流式读取。
///
/// - 状态码 ≥ 400 → [`DownloadError::Server`]；
/// - 非 0 号工作者收到 200（服务器忽略了 Range，会回发整个对象）→
///   [`DownloadError::RangeNotSupported`]。0 号工作者的 200 被接受：
///   其区间从 0 开始，整个对象恰好落在正确偏移上。
pub(crate) async fn fetch_segment_response(
    params: FetchSegmentParams<'_>,
) -> Result<Response, DownloadError> {
    let resp = params
        .client
        .get(params.url)
        .header(RANGE, range_header(params.start_byte, params.end_byte))
        .header(USER_AGENT, CLIENT_USER_AGENT)
        .timeout(params.timeout)
        .send()
        .await
        .map_err(DownloadError::from_reqwest)?;

    let status = resp.status();
    if status.as_u16() >= 400 {
        return Err(DownloadError::Server {
            status: status.as_u16(),
        });
    }
    if status == StatusCode::OK && params.worker_id > 0 {
        return Err(DownloadError::RangeNotSupported);
    }
    Ok(resp)
}
