//! 合并：把暂存文件的内容写入目标文件的指定偏移。

use std::io::SeekFrom;
use std::path::Path;

use tokio::fs::OpenOptions;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

use crate::internal::downloader::structs::download_error::DownloadError;

/// 把 `scratch_path` 的全部内容写入 `target_path` 的 `offset` 处。
///
/// 目标文件须已存在（预分配阶段创建）。以相同暂存内容在相同偏移
/// 重复执行是幂等的：目标内容不变。
pub(crate) async fn merge_segment(
    target_path: &Path,
    scratch_path: &Path,
    offset: u64,
) -> Result<(), DownloadError> {
    let buffer = tokio::fs::read(scratch_path)
        .await
        .map_err(DownloadError::ReadScratch)?;

    let mut target = OpenOptions::new()
        .write(true)
        .open(target_path)
        .await
        .map_err(DownloadError::OpenTarget)?;

    target
        .seek(SeekFrom::Start(offset))
        .await
        .map_err(DownloadError::SeekTarget)?;
    target
        .write_all(&buffer)
        .await
        .map_err(DownloadError::WriteTarget)?;
    target
        .flush()
        .await
        .map_err(DownloadError::WriteTarget)?;

    Ok(())
}
