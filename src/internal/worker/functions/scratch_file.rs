//! 暂存文件：命名与清理。

use std::path::{Path, PathBuf};

use tracing::warn;

/// 暂存文件路径：在目标路径后追加 `.part{worker_id}`。
pub(crate) fn scratch_path(target_path: &Path, worker_id: u32) -> PathBuf {
    let mut name = target_path.as_os_str().to_os_string();
    name.push(format!(".part{}", worker_id));
    PathBuf::from(name)
}

/// 尽力删除暂存文件；不存在视为成功，其余失败仅记日志。
pub(crate) async fn remove_scratch_best_effort(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            warn!(target: "worker", path = %path.display(), error = %e, "清理暂存文件失败")
        }
    }
}
