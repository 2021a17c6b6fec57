//! 分段工作者：抓取一个字节区间并合并进目标文件。
//!
//! 协议：`Start` → Range 请求 → 流式写入暂存文件（按 100 KiB 边界
//! 上报进度，附带 1 秒心跳）→ 按偏移合并进目标文件 → 末次进度 +
//! `Complete`。任何失败以一条 `Error` 消息终止本分段，退出前删除
//! 暂存文件；兄弟分段不受影响。

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::time::{Instant, interval};
use tracing::{error, info};

use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::job::structs::worker_message::WorkerMessage;
use crate::internal::states::message_queue::MessageQueue;
use crate::internal::worker::constants::{PROGRESS_HEARTBEAT, PROGRESS_STEP};
use crate::internal::worker::functions::fetch_segment::{
    FetchSegmentParams, fetch_segment_response,
};
use crate::internal::worker::functions::merge_segment::merge_segment;
use crate::internal::worker::functions::scratch_file::{
    remove_scratch_best_effort, scratch_path,
};

use super::progress_gate::ProgressGate;

/// 启动分段工作者所需的全部参数（形参超过 3 个，用 struct 承载）。
pub(crate) struct SegmentWorkerParams {
    pub client: reqwest::Client,
    pub url: String,
    pub target_path: PathBuf,
    pub start_byte: u64,
    pub end_byte: u64,
    pub worker_id: u32,
    pub request_timeout: Duration,
    pub messages: MessageQueue<WorkerMessage>,
}

/// 执行一个分段的完整抓取与合并协议。
///
/// 只通过消息上报结果，从不向调用方返回错误；成功与失败路径都保证
/// 暂存文件最终不在磁盘上。
pub(crate) async fn run_segment_worker(params: SegmentWorkerParams) {
    let worker_id = params.worker_id;
    let messages = params.messages.clone();
    let scratch = scratch_path(&params.target_path, worker_id);

    let _ = messages.send(WorkerMessage::Start { worker_id });

    match execute_protocol(&params, &scratch).await {
        Ok(downloaded) => {
            // 末次进度：正常情况下 downloaded == total，即 100%
            let _ = messages.send(WorkerMessage::Progress {
                worker_id,
                downloaded_bytes: downloaded,
                total_bytes: params.end_byte - params.start_byte + 1,
            });
            let _ = messages.send(WorkerMessage::Complete { worker_id });
            info!(target: "worker", worker_id, "分段下载完成");
        }
        Err(e) => {
            remove_scratch_best_effort(&scratch).await;
            error!(target: "worker", worker_id, error = %e, "分段下载失败");
            let _ = messages.send(WorkerMessage::Error {
                worker_id,
                reason: e.to_string(),
            });
        }
    }
}

/// 协议主体：目录准备、请求、流式写暂存、合并、删除暂存。
/// 成功返回实际下载的字节数。
async fn execute_protocol(
    params: &SegmentWorkerParams,
    scratch: &Path,
) -> Result<u64, DownloadError> {
    if let Some(dir) = params.target_path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(DownloadError::CreateDir)?;
    }
    // 上一次运行残留的暂存文件会污染本次写入，先行清理
    remove_scratch_best_effort(scratch).await;

    let resp = fetch_segment_response(FetchSegmentParams {
        client: &params.client,
        url: &params.url,
        start_byte: params.start_byte,
        end_byte: params.end_byte,
        worker_id: params.worker_id,
        timeout: params.request_timeout,
    })
    .await?;

    let downloaded = stream_to_scratch(params, resp, scratch).await?;

    merge_segment(&params.target_path, scratch, params.start_byte).await?;
    tokio::fs::remove_file(scratch)
        .await
        .map_err(DownloadError::RemoveScratch)?;

    Ok(downloaded)
}

/// 把响应体流式写入暂存文件，期间按边界与心跳上报进度。
async fn stream_to_scratch(
    params: &SegmentWorkerParams,
    resp: reqwest::Response,
    scratch: &Path,
) -> Result<u64, DownloadError> {
    let total = params.end_byte - params.start_byte + 1;
    let mut file = File::create(scratch)
        .await
        .map_err(DownloadError::CreateScratch)?;

    let mut stream = resp.bytes_stream();
    let mut downloaded: u64 = 0;
    let mut gate = ProgressGate::new(PROGRESS_STEP);
    let mut last_emit = Instant::now();
    let mut heartbeat = interval(PROGRESS_HEARTBEAT);

    loop {
        tokio::select! {
            chunk = stream.next() => {
                let chunk: bytes::Bytes = match chunk {
                    Some(c) => c.map_err(DownloadError::from_reqwest)?,
                    None => break,
                };
                file.write_all(&chunk)
                    .await
                    .map_err(DownloadError::WriteScratch)?;
                downloaded += chunk.len() as u64;
                if gate.on_bytes(downloaded) {
                    let _ = params.messages.send(WorkerMessage::Progress {
                        worker_id: params.worker_id,
                        downloaded_bytes: downloaded,
                        total_bytes: total,
                    });
                    last_emit = Instant::now();
                }
            }
            _ = heartbeat.tick() => {
                // 数据到达缓慢时兜底上报，至多每秒一次
                if last_emit.elapsed() > PROGRESS_HEARTBEAT {
                    let _ = params.messages.send(WorkerMessage::Progress {
                        worker_id: params.worker_id,
                        downloaded_bytes: downloaded,
                        total_bytes: total,
                    });
                    last_emit = Instant::now();
                }
            }
        }
    }

    file.flush().await.map_err(DownloadError::FlushScratch)?;
    drop(file);

    Ok(downloaded)
}
