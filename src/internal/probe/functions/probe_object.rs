//! 发起 HEAD 探测：获取远程对象大小与文件名相关响应头。

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{
    ACCEPT_RANGES, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, HeaderName, USER_AGENT,
};
use tracing::info;

use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::probe::structs::remote_object_info::RemoteObjectInfo;
use crate::internal::worker::constants::CLIENT_USER_AGENT;

/// 对 `url` 发起 HEAD 请求，返回对象大小等元数据。
///
/// - 状态码 ≥ 400 → [`DownloadError::Server`]；
/// - 无 `content-length` 或为 0 → [`DownloadError::SizeUnknown`]。
pub async fn probe_object(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<RemoteObjectInfo, DownloadError> {
    info!(target: "probe", url, "正在获取文件信息");

    let resp = client
        .head(url)
        .header(USER_AGENT, CLIENT_USER_AGENT)
        .timeout(timeout)
        .send()
        .await
        .map_err(DownloadError::from_reqwest)?;

    let status = resp.status();
    if status.as_u16() >= 400 {
        return Err(DownloadError::Server {
            status: status.as_u16(),
        });
    }

    let size = resp
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);
    if size == 0 {
        return Err(DownloadError::SizeUnknown);
    }

    let header_text = |name: HeaderName| {
        resp.headers()
            .get(&name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let supports_ranges = header_text(ACCEPT_RANGES)
        .map(|v| v.eq_ignore_ascii_case("bytes"))
        .unwrap_or(false);

    Ok(RemoteObjectInfo {
        size,
        supports_ranges,
        content_disposition: header_text(CONTENT_DISPOSITION),
        content_type: header_text(CONTENT_TYPE),
    })
}
