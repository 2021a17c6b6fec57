//! 下载历史记录条目：交给核心之外的历史持久化协作方。

use std::path::Path;

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

use super::job_outcome::JobOutcome;

/// 一条下载历史记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRecord {
    /// 唯一 id（毫秒时间戳）
    pub id: i64,
    pub filename: String,
    pub url: String,
    pub file_path: String,
    /// 人类可读大小
    pub size: String,
    /// 状态文案
    pub status: String,
    /// 记录日期（`YYYY-MM-DD`）
    pub date: String,
}

impl DownloadRecord {
    /// 由任务结果构建一条记录。
    pub fn from_outcome(outcome: &JobOutcome, url: &str, file_path: &Path) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            filename: outcome.filename.clone(),
            url: url.to_string(),
            file_path: file_path.display().to_string(),
            size: outcome.size.clone(),
            status: outcome.status.as_str().to_string(),
            date: Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}
