//! 下载器集成测试：逐比特一致性、暂存清理、分段失败隔离、
//! Range 不支持检测、超时、收尾记账恰好一次。

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::tempdir;

use crate::job::{DownloadRecord, HookAbort, JobOutcome, JobStatus, SegmentPlan};
use crate::tests::{RemoteBehavior, random_payload, spawn_remote};
use crate::{DownloadError, SegmentedDownloader};

#[tokio::test]
async fn single_worker_download_is_byte_identical() {
    let payload = random_payload(300 * 1024 + 17);
    let (_server, url) = spawn_remote(payload.clone(), RemoteBehavior::default()).await;
    let dir = tempdir().expect("建临时目录失败");
    let save_path = dir.path().join("single.bin");

    let handle = SegmentedDownloader::new(&url, &save_path)
        .worker_count(1)
        .start()
        .await
        .expect("启动失败");
    assert_eq!(handle.total_size(), payload.len() as u64);
    assert_eq!(handle.segment_count(), 1);

    let outcome = handle.wait().await.expect("收尾失败");
    assert_eq!(outcome.status, JobStatus::Completed);
    assert_eq!(outcome.filename, "single.bin");

    let written = tokio::fs::read(&save_path).await.expect("读目标失败");
    assert_eq!(written, payload, "单工作者下载应与源对象逐比特一致");
    assert!(
        !dir.path().join("single.bin.part0").exists(),
        "成功后不应残留暂存文件"
    );
}

#[tokio::test]
async fn multi_worker_download_merges_all_segments() {
    let payload = random_payload(1_000_000);
    let (_server, url) = spawn_remote(payload.clone(), RemoteBehavior::default()).await;
    let dir = tempdir().expect("建临时目录失败");
    let save_path = dir.path().join("multi.bin");

    let completions = Arc::new(AtomicUsize::new(0));
    let completions_c = Arc::clone(&completions);
    let overall_history: Arc<Mutex<Vec<f64>>> = Arc::new(Mutex::new(Vec::new()));
    let overall_history_c = Arc::clone(&overall_history);

    let handle = SegmentedDownloader::new(&url, &save_path)
        .worker_count(4)
        .with_on_progress_hook(move |p| {
            overall_history_c.lock().unwrap().push(p.overall_pct);
        })
        .with_after_complete_hook(move |_outcome| {
            let c = Arc::clone(&completions_c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        })
        .start()
        .await
        .expect("启动失败");
    assert_eq!(handle.segment_count(), 4);

    let progress = handle.progress();
    let outcome = handle.wait().await.expect("收尾失败");
    assert_eq!(outcome.size, "976.6 KB");
    assert_eq!(
        completions.load(Ordering::SeqCst),
        1,
        "收尾记账应恰好发生一次"
    );

    let written = tokio::fs::read(&save_path).await.expect("读目标失败");
    assert_eq!(written, payload, "四段合并后应与源对象逐比特一致");

    for worker_id in 0..4 {
        let scratch = dir.path().join(format!("multi.bin.part{}", worker_id));
        assert!(!scratch.exists(), "成功后不应残留暂存文件: {:?}", scratch);
    }

    // 聚合进度单调不减，最终到 100
    let history = overall_history.lock().unwrap();
    assert!(!history.is_empty(), "应至少上报一次聚合进度");
    for pair in history.windows(2) {
        assert!(pair[0] <= pair[1] + 1e-9, "聚合进度不应回退");
    }
    let final_pct = progress.get_current().overall_pct;
    assert!(
        (final_pct - 100.0).abs() < 1e-9,
        "最终聚合进度应为 100，实际 {}",
        final_pct
    );
}

#[tokio::test]
async fn failed_segment_is_isolated_and_siblings_merge() {
    let payload = random_payload(400_000);
    // 让远端对 2 号分段的起始偏移返回 403
    let plan = SegmentPlan::new(payload.len() as u64, 4).expect("规划失败");
    let seg2_start = plan.segments()[2].start;
    let behavior = RemoteBehavior {
        fail_range_at: Some(seg2_start),
        ..Default::default()
    };
    let (_server, url) = spawn_remote(payload.clone(), behavior).await;
    let dir = tempdir().expect("建临时目录失败");
    let save_path = dir.path().join("partial.bin");

    let errors: Arc<Mutex<Vec<(u32, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let errors_c = Arc::clone(&errors);
    let completions = Arc::new(AtomicUsize::new(0));
    let completions_c = Arc::clone(&completions);

    let handle = SegmentedDownloader::new(&url, &save_path)
        .worker_count(4)
        .with_on_segment_error_hook(move |worker_id, reason| {
            errors_c.lock().unwrap().push((worker_id, reason.to_string()));
        })
        .with_after_complete_hook(move |_outcome| {
            let c = Arc::clone(&completions_c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        })
        .start()
        .await
        .expect("启动失败");

    // 单段失败不应阻止收尾记账
    let outcome = handle.wait().await.expect("收尾失败");
    assert_eq!(outcome.status, JobStatus::Completed);
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    let captured = errors.lock().unwrap();
    assert_eq!(captured.len(), 1, "应只有 2 号分段失败");
    assert_eq!(captured[0].0, 2);
    assert!(captured[0].1.contains("403"), "原因应包含状态码: {}", captured[0].1);

    // 文件保持最终大小；成功分段字节正确，失败分段保持预分配填充
    let written = tokio::fs::read(&save_path).await.expect("读目标失败");
    assert_eq!(written.len(), payload.len());
    for seg in plan.segments() {
        let lo = seg.start as usize;
        let hi = seg.end as usize;
        if seg.index == 2 {
            assert!(
                written[lo..=hi].iter().all(|&b| b == 0),
                "失败分段区间应保持预分配填充"
            );
        } else {
            assert_eq!(&written[lo..=hi], &payload[lo..=hi], "分段 {} 字节错误", seg.index);
        }
    }

    assert!(
        !dir.path().join("partial.bin.part2").exists(),
        "失败分段的暂存文件也必须被清理"
    );
}

#[tokio::test]
async fn range_ignoring_server_fails_non_first_workers() {
    let payload = random_payload(200_000);
    let behavior = RemoteBehavior {
        ignore_range: true,
        ..Default::default()
    };
    let (_server, url) = spawn_remote(payload.clone(), behavior).await;
    let dir = tempdir().expect("建临时目录失败");
    let save_path = dir.path().join("norange.bin");

    let errors: Arc<Mutex<Vec<(u32, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let errors_c = Arc::clone(&errors);

    let handle = SegmentedDownloader::new(&url, &save_path)
        .worker_count(4)
        .with_on_segment_error_hook(move |worker_id, reason| {
            errors_c.lock().unwrap().push((worker_id, reason.to_string()));
        })
        .start()
        .await
        .expect("启动失败");

    handle.wait().await.expect("收尾失败");

    let mut failed_ids: Vec<u32> = errors.lock().unwrap().iter().map(|(id, _)| *id).collect();
    failed_ids.sort_unstable();
    assert_eq!(failed_ids, vec![1, 2, 3], "只有非 0 号工作者应失败");
    for (_, reason) in errors.lock().unwrap().iter() {
        assert!(reason.contains("不支持范围请求"), "原因应为范围不支持: {}", reason);
    }

    // 0 号工作者收到整个对象并写在偏移 0：最终文件仍与源一致
    let written = tokio::fs::read(&save_path).await.expect("读目标失败");
    assert_eq!(written, payload);
}

#[tokio::test]
async fn probe_failure_aborts_before_any_worker() {
    // 未挂载 mock → 一切请求 404
    let server = wiremock::MockServer::start().await;
    let dir = tempdir().expect("建临时目录失败");
    let save_path = dir.path().join("never.bin");

    let result = SegmentedDownloader::new(format!("{}/missing.bin", server.uri()), &save_path)
        .start()
        .await;
    match result {
        Err(DownloadError::Server { status }) => assert_eq!(status, 404),
        other => panic!("预期 Server 错误，得到 {:?}", other.map(|_| "JobHandle")),
    }
    assert!(!save_path.exists(), "探测失败时不应创建目标文件");
}

#[tokio::test]
async fn missing_length_aborts_with_size_unknown() {
    let behavior = RemoteBehavior {
        hide_length: true,
        ..Default::default()
    };
    let (_server, url) = spawn_remote(random_payload(1000), behavior).await;
    let dir = tempdir().expect("建临时目录失败");
    let save_path = dir.path().join("never.bin");

    match SegmentedDownloader::new(&url, &save_path).start().await {
        Err(DownloadError::SizeUnknown) => {}
        other => panic!("预期 SizeUnknown，得到 {:?}", other.map(|_| "JobHandle")),
    }
    assert!(!save_path.exists());
}

#[tokio::test]
async fn request_timeout_fails_segments_but_not_bookkeeping() {
    let payload = random_payload(100_000);
    let behavior = RemoteBehavior {
        delay: Some(Duration::from_millis(500)),
        ..Default::default()
    };
    let (_server, url) = spawn_remote(payload.clone(), behavior).await;
    let dir = tempdir().expect("建临时目录失败");
    let save_path = dir.path().join("timeout.bin");

    let errors: Arc<Mutex<Vec<(u32, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let errors_c = Arc::clone(&errors);

    let handle = SegmentedDownloader::new(&url, &save_path)
        .worker_count(2)
        .request_timeout(Duration::from_millis(100))
        .with_on_segment_error_hook(move |worker_id, reason| {
            errors_c.lock().unwrap().push((worker_id, reason.to_string()));
        })
        .start()
        .await
        .expect("启动失败");

    handle.wait().await.expect("收尾失败");

    let captured = errors.lock().unwrap();
    assert_eq!(captured.len(), 2, "两个分段都应超时失败");
    for (_, reason) in captured.iter() {
        assert!(reason.contains("超时"), "原因应为超时: {}", reason);
    }

    // 任务未回滚：目标文件保持预分配后的最终大小
    let metadata = tokio::fs::metadata(&save_path).await.expect("读元数据失败");
    assert_eq!(metadata.len(), payload.len() as u64);
    assert!(!dir.path().join("timeout.bin.part0").exists());
    assert!(!dir.path().join("timeout.bin.part1").exists());
}

#[tokio::test]
async fn before_start_hook_can_abort_job() {
    let (_server, url) = spawn_remote(random_payload(1000), RemoteBehavior::default()).await;
    let dir = tempdir().expect("建临时目录失败");

    let result = SegmentedDownloader::new(&url, dir.path().join("aborted.bin"))
        .with_before_start_hook(|| async { Err(HookAbort) })
        .start()
        .await;
    match result {
        Err(DownloadError::HookAbort(_)) => {}
        other => panic!("预期 HookAbort，得到 {:?}", other.map(|_| "JobHandle")),
    }
}

#[test]
fn download_record_carries_outcome_fields() {
    let outcome = JobOutcome {
        filename: "a.bin".to_string(),
        size: "1.0 KB".to_string(),
        status: JobStatus::Completed,
    };
    let record =
        DownloadRecord::from_outcome(&outcome, "https://e.com/a.bin", Path::new("/tmp/a.bin"));
    assert_eq!(record.filename, "a.bin");
    assert_eq!(record.url, "https://e.com/a.bin");
    assert_eq!(record.size, "1.0 KB");
    assert_eq!(record.status, "已完成");
    assert!(record.id > 0);
    assert_eq!(record.date.len(), 10, "日期应为 YYYY-MM-DD");
}
