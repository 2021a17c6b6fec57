//! 进度上报门限：按固定字节步长决定是否上报。

/// 跟踪已下载字节数跨越的步长边界。
///
/// 计数首次达到或越过下一个 `step` 整数倍时放行一次；
/// 一块数据同时跨过多个边界也只放行一次。
#[derive(Debug)]
pub(crate) struct ProgressGate {
    step: u64,
    next_boundary: u64,
}

impl ProgressGate {
    pub(crate) fn new(step: u64) -> Self {
        debug_assert!(step > 0);
        Self {
            step,
            next_boundary: step,
        }
    }

    /// 已下载计数更新后调用；返回 true 表示应当上报一次进度。
    pub(crate) fn on_bytes(&mut self, downloaded: u64) -> bool {
        if downloaded < self.next_boundary {
            return false;
        }
        while self.next_boundary <= downloaded {
            self.next_boundary += self.step;
        }
        true
    }
}
