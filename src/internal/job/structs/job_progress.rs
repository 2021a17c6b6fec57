//! 任务级聚合进度。

/// 聚合进度快照：整体百分比 + 触发本次更新的分段信息。
///
/// 整体百分比是各分段百分比的算术平均（未按分段大小加权），未启动的
/// 分段按 0 计入。末段大小与其余分段不同时，该值与真实的字节进度
/// 存在偏差；这是有意保留的聚合口径，属于对外契约的一部分。
#[derive(Debug, Clone, Default)]
pub struct JobProgress {
    /// 整体进度（0~100，不截断）
    pub overall_pct: f64,
    /// 最近一次上报进度的工作者 id
    pub worker_id: u32,
    /// 该工作者自身的进度（0~100）
    pub worker_pct: f64,
}
