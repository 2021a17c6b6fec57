//! 分段规划测试：连续性不变量、余数吸收、收窄策略。

use crate::DownloadError;
use crate::job::SegmentPlan;

/// 校验一个规划满足全部分段不变量。
fn assert_plan_invariants(total_size: u64, worker_count: u32) {
    let plan = SegmentPlan::new(total_size, worker_count).expect("规划失败");
    let segments = plan.segments();

    assert!(!segments.is_empty());
    assert_eq!(segments[0].start, 0, "首段必须从 0 开始");
    assert_eq!(
        segments[segments.len() - 1].end,
        total_size - 1,
        "末段必须覆盖到 total - 1"
    );

    for (i, seg) in segments.iter().enumerate() {
        assert_eq!(seg.index as usize, i);
        assert!(seg.start <= seg.end, "分段不能为空");
        if i + 1 < segments.len() {
            assert_eq!(seg.end + 1, segments[i + 1].start, "相邻分段必须严格连续");
        }
    }

    let covered: u64 = segments.iter().map(|s| s.len()).sum();
    assert_eq!(covered, total_size, "分段并集必须恰好覆盖整个对象");
}

#[test]
fn plan_invariants_hold_for_varied_sizes() {
    for &total in &[1u64, 2, 3, 7, 100, 1000, 999_999, 1_000_000, 1_000_001] {
        for &workers in &[1u32, 2, 3, 4, 5, 8, 16] {
            assert_plan_invariants(total, workers);
        }
    }
}

#[test]
fn plan_matches_documented_example() {
    let plan = SegmentPlan::new(1_000_000, 4).expect("规划失败");
    let ranges: Vec<(u64, u64)> = plan.segments().iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(
        ranges,
        vec![
            (0, 249_999),
            (250_000, 499_999),
            (500_000, 749_999),
            (750_000, 999_999)
        ]
    );
}

#[test]
fn last_segment_absorbs_remainder() {
    let plan = SegmentPlan::new(100, 3).expect("规划失败");
    let segments = plan.segments();
    assert_eq!(segments[0].len(), 33);
    assert_eq!(segments[1].len(), 33);
    assert_eq!(segments[2].len(), 34, "末段吸收余数");
}

#[test]
fn worker_count_is_clamped_to_total_size() {
    let plan = SegmentPlan::new(4, 10).expect("规划失败");
    assert_eq!(plan.segment_count(), 4);
    for seg in plan.segments() {
        assert_eq!(seg.len(), 1);
    }
}

#[test]
fn zero_workers_is_rejected() {
    match SegmentPlan::new(100, 0) {
        Err(DownloadError::InvalidWorkerCount) => {}
        other => panic!("预期 InvalidWorkerCount，得到 {:?}", other),
    }
}
