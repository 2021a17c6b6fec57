//! 工作者 → 协调器的消息协议。

/// 工作者生命周期消息；分段状态进入协调器的唯一通道。
///
/// 同一工作者的消息保序到达；不同工作者之间不保证相对顺序。
/// 协调器看到的是最终一致的视图，不与工作者的真实进度实时一致。
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// 工作者启动
    Start { worker_id: u32 },
    /// 本分段的进度快照
    Progress {
        worker_id: u32,
        /// 该分段已下载字节数
        downloaded_bytes: u64,
        /// 该分段需要下载的总字节数
        total_bytes: u64,
    },
    /// 本分段抓取并合并成功
    Complete { worker_id: u32 },
    /// 本分段终止失败；`reason` 为可读的失败原因
    Error { worker_id: u32, reason: String },
}

impl WorkerMessage {
    /// 消息来源的工作者 id。
    pub fn worker_id(&self) -> u32 {
        match self {
            WorkerMessage::Start { worker_id }
            | WorkerMessage::Progress { worker_id, .. }
            | WorkerMessage::Complete { worker_id }
            | WorkerMessage::Error { worker_id, .. } => *worker_id,
        }
    }
}
