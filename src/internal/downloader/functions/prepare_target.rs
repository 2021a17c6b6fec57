//! 目标文件准备：目录创建、预分配、残留暂存清理。

use std::path::Path;

use tokio::fs::File;
use tracing::{info, warn};

use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::worker::functions::scratch_file::scratch_path;

/// 创建目标目录并把目标文件预分配到 `total_size` 字节。
///
/// 预分配失败时任务在任何工作者启动前中止；成功后目标文件恰好为
/// 最终大小，各工作者只在各自区间内定位写入，区间互不重叠，因此
/// 并发写同一文件无需加锁。
pub(crate) async fn prepare_target_file(
    target_path: &Path,
    total_size: u64,
) -> Result<(), DownloadError> {
    if let Some(dir) = target_path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(DownloadError::CreateDir)?;
    }

    let file = File::create(target_path)
        .await
        .map_err(DownloadError::PreallocateFile)?;
    file.set_len(total_size)
        .await
        .map_err(DownloadError::PreallocateFile)?;

    info!(target: "downloader", path = %target_path.display(), total_size, "目标文件已预分配");
    Ok(())
}

/// 尽力清理上一次运行可能残留的暂存文件；失败仅记日志，不中止任务。
pub(crate) async fn cleanup_stale_scratch(target_path: &Path, segment_count: usize) {
    for worker_id in 0..segment_count as u32 {
        let path = scratch_path(target_path, worker_id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(target: "downloader", path = %path.display(), "已清理残留暂存文件")
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(target: "downloader", path = %path.display(), error = %e, "清理残留暂存文件失败")
            }
        }
    }
}
