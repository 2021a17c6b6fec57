//! 分段：目标对象中一个连续的字节区间。

/// 分段在生命周期中的状态，由协调器依据工作者消息维护。
///
/// 工作者内部还会经历请求、流式写入、合并等阶段，但跨越消息通道
/// 对协调器可见的只有这四种。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    /// 已规划，工作者尚未上报启动
    Pending,
    /// 工作者运行中
    Running,
    /// 工作者上报完成
    Completed,
    /// 工作者上报失败
    Failed,
}

/// 目标对象中的一个字节区间，闭区间 `[start, end]`。
///
/// 同一任务的各分段严格连续、互不重叠，并集恰好覆盖
/// `[0, total_size - 1]`；由 `SegmentPlan` 在规划时保证。
#[derive(Debug, Clone)]
pub struct Segment {
    /// 0 起始的分段序号，同时是工作者 id
    pub index: u32,
    /// 起始偏移（含）
    pub start: u64,
    /// 结束偏移（含）
    pub end: u64,
    /// 工作者最近一次上报的已下载字节数
    pub bytes_done: u64,
    /// 当前状态
    pub state: SegmentState,
}

impl Segment {
    /// 本分段需要下载的字节数。
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// 本分段的完成百分比（0~100）。上报值超出区间长度时会大于 100，
    /// 不截断。
    pub fn pct(&self) -> f64 {
        (self.bytes_done as f64 / self.len() as f64) * 100.0
    }
}
