//! 从 URL 与响应头推断保存文件名。
//!
//! 优先级：URL 路径末段（已带扩展名时直接用）→ `content-disposition`
//! 的 filename → 按 `content-type` 生成扩展名 → 兜底 `download.bin`。

use percent_encoding::percent_decode_str;
use url::Url;

use crate::internal::probe::structs::remote_object_info::RemoteObjectInfo;

/// 兜底文件名。
pub const FALLBACK_FILENAME: &str = "download.bin";

/// 从 URL 路径末段提取文件名（百分号解码；空段或含路径分隔符时放弃）。
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.next_back()?.to_string();
    let decoded = percent_decode_str(&segment).decode_utf8_lossy();
    let cleaned = decoded.trim();
    if cleaned.is_empty() || cleaned.contains('/') || cleaned.contains('\\') {
        return None;
    }
    Some(cleaned.to_string())
}

/// 从 `content-disposition` 头解析 `filename="..."` / `filename=...`。
pub fn filename_from_content_disposition(value: &str) -> Option<String> {
    let lower = value.to_ascii_lowercase();
    let idx = lower.find("filename=")?;
    let raw = value[idx + "filename=".len()..].trim();
    let raw = raw.split(';').next()?.trim();
    let name = raw.trim_matches('"').trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

/// 按 `content-type` 的子类型生成 `download.{ext}`；html/plain 不生成。
fn filename_from_content_type(content_type: &str) -> Option<String> {
    let subtype = content_type.split('/').nth(1)?.split(';').next()?.trim();
    if subtype.is_empty() || subtype == "html" || subtype == "plain" {
        return None;
    }
    Some(format!("download.{}", subtype))
}

/// 综合推断保存文件名。
pub fn infer_filename(url: &str, info: &RemoteObjectInfo) -> String {
    let from_url = filename_from_url(url);
    // URL 末段已带扩展名时直接使用，不再发 HEAD 结果推断
    if let Some(name) = &from_url {
        if name.contains('.') {
            return name.clone();
        }
    }
    if let Some(name) = info
        .content_disposition
        .as_deref()
        .and_then(filename_from_content_disposition)
    {
        return name;
    }
    if let Some(name) = info
        .content_type
        .as_deref()
        .and_then(filename_from_content_type)
    {
        return name;
    }
    from_url.unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}
