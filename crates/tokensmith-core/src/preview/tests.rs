use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;

use tokensmith_types::ProducerConfig;

use super::{PreviewOptions, PreviewService, TokenFiles};
use crate::generators::builtin::{BASE_CSS_ARTIFACT, DARK_CSS_ARTIFACT};
use crate::generators::{Generator, GeneratorContext, GenerationEngine, GeneratorRegistry};

struct Run {
    n: u64,
    started: Instant,
    finished: Instant,
}

/// Stands in for the tailwind built-in and records when each run happened.
struct Recorder {
    runs: Arc<Mutex<Vec<Run>>>,
}

#[async_trait]
impl Generator for Recorder {
    fn name(&self) -> &str {
        "tailwind"
    }

    async fn generate(&self, ctx: &GeneratorContext<'_>) -> Result<(), String> {
        let n = ctx
            .tokens
            .get("order.json")
            .and_then(|v| v["n"].as_u64())
            .ok_or("missing order.json")?;
        let started = Instant::now();
        tokio::time::sleep(Duration::from_millis(15)).await;
        ctx.write_artifact(BASE_CSS_ARTIFACT, &format!("n={n}")).await?;
        let finished = Instant::now();
        self.runs.lock().unwrap().push(Run { n, started, finished });
        Ok(())
    }
}

/// Writes a fixed stylesheet, but panics on any tree containing `boom.json`.
struct Panicky;

#[async_trait]
impl Generator for Panicky {
    fn name(&self) -> &str {
        "tailwind"
    }

    async fn generate(&self, ctx: &GeneratorContext<'_>) -> Result<(), String> {
        if ctx.tokens.get("boom.json").is_some() {
            panic!("palette index out of range");
        }
        ctx.write_artifact(BASE_CSS_ARTIFACT, ":root {}").await
    }
}

fn order_payload(n: u64) -> TokenFiles {
    [("order.json".to_string(), json!({ "n": n }))].into_iter().collect()
}

fn color_payload(value: &str) -> TokenFiles {
    [
        ("base/colors.json".to_string(), json!({"color": {"$type": "color", "bg": {"$value": value}}})),
        ("dark/colors.json".to_string(), json!({"color": {"bg": {"$value": "#000"}}})),
    ]
    .into_iter()
    .collect()
}

fn builtin_service(scratch: &TempDir) -> PreviewService {
    let engine = GenerationEngine::new(Arc::new(GeneratorRegistry::with_builtins()));
    PreviewService::spawn(
        engine,
        PreviewOptions { scratch_root: scratch.path().to_path_buf(), ..PreviewOptions::default() },
    )
}

async fn scratch_entries(scratch: &TempDir) -> usize {
    let mut entries = tokio::fs::read_dir(scratch.path()).await.unwrap();
    let mut count = 0;
    while entries.next_entry().await.unwrap().is_some() {
        count += 1;
    }
    count
}

#[tokio::test]
async fn test_requests_run_one_at_a_time_in_submission_order() {
    let scratch = TempDir::new().unwrap();
    let runs = Arc::new(Mutex::new(Vec::new()));
    let mut registry = GeneratorRegistry::empty();
    registry.register(Arc::new(Recorder { runs: runs.clone() }));
    let service = PreviewService::spawn(
        GenerationEngine::new(Arc::new(registry)),
        PreviewOptions { scratch_root: scratch.path().to_path_buf(), ..PreviewOptions::default() },
    );

    let pending: Vec<_> = (0..6).map(|n| service.enqueue(order_payload(n))).collect();
    let results = futures::future::join_all(pending.into_iter().map(|p| p.wait())).await;

    for (n, result) in results.iter().enumerate() {
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.artifact(BASE_CSS_ARTIFACT), Some(format!("n={n}").as_str()));
    }

    let runs = runs.lock().unwrap();
    let order: Vec<u64> = runs.iter().map(|r| r.n).collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    for pair in runs.windows(2) {
        assert!(pair[0].finished <= pair[1].started, "runs {} and {} overlapped", pair[0].n, pair[1].n);
    }
}

#[tokio::test]
async fn test_concurrent_callers_never_overlap() {
    let scratch = TempDir::new().unwrap();
    let runs = Arc::new(Mutex::new(Vec::new()));
    let mut registry = GeneratorRegistry::empty();
    registry.register(Arc::new(Recorder { runs: runs.clone() }));
    let service = PreviewService::spawn(
        GenerationEngine::new(Arc::new(registry)),
        PreviewOptions { scratch_root: scratch.path().to_path_buf(), ..PreviewOptions::default() },
    );

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let service = service.clone();
            tokio::spawn(async move { service.submit(order_payload(n)).await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().success);
    }

    let mut runs = runs.lock().unwrap();
    assert_eq!(runs.len(), 4);
    runs.sort_by_key(|r| r.started);
    for pair in runs.windows(2) {
        assert!(pair[0].finished <= pair[1].started);
    }
}

#[tokio::test]
async fn test_failure_falls_back_to_last_good_artifacts() {
    let scratch = TempDir::new().unwrap();
    let service = builtin_service(&scratch);

    let good = service.submit(color_payload("#fff")).await;
    assert!(good.success);
    assert!(good.artifact(BASE_CSS_ARTIFACT).unwrap().contains("--color-bg: #fff;"));
    assert!(good.artifact(DARK_CSS_ARTIFACT).unwrap().contains("--color-bg: #000;"));

    let escaping: TokenFiles = [("../escape.json".to_string(), json!({}))].into_iter().collect();
    let bad = service.submit(escaping).await;

    assert!(!bad.success);
    assert!(bad.error.as_deref().unwrap().contains("escape"));
    assert_eq!(bad.artifact(BASE_CSS_ARTIFACT), good.artifact(BASE_CSS_ARTIFACT));
    assert_eq!(bad.artifact(DARK_CSS_ARTIFACT), good.artifact(DARK_CSS_ARTIFACT));
}

#[tokio::test]
async fn test_failure_before_any_success_has_no_artifacts() {
    let scratch = TempDir::new().unwrap();
    let service = builtin_service(&scratch);

    let result = service.submit([("notes.txt".to_string(), json!({}))].into_iter().collect()).await;
    assert!(!result.success);
    assert!(result.artifacts.is_empty());
    assert!(result.error.is_some());
}

#[tokio::test]
async fn test_newer_success_replaces_last_good() {
    let scratch = TempDir::new().unwrap();
    let service = builtin_service(&scratch);

    service.submit(color_payload("#fff")).await;
    let second = service.submit(color_payload("#eee")).await;
    let failed = service.submit([("x/../y.json".to_string(), json!({}))].into_iter().collect()).await;

    assert!(!failed.success);
    assert_eq!(failed.artifacts, second.artifacts);
    assert!(failed.artifact(BASE_CSS_ARTIFACT).unwrap().contains("#eee"));
}

#[tokio::test]
async fn test_panicking_generator_fails_only_its_request() {
    let scratch = TempDir::new().unwrap();
    let mut registry = GeneratorRegistry::empty();
    registry.register(Arc::new(Panicky));
    let service = PreviewService::spawn(
        GenerationEngine::new(Arc::new(registry)),
        PreviewOptions { scratch_root: scratch.path().to_path_buf(), ..PreviewOptions::default() },
    );

    let good = service.submit(order_payload(1)).await;
    assert!(good.success);

    let boom: TokenFiles = [("boom.json".to_string(), json!({}))].into_iter().collect();
    let crashed = service.submit(boom).await;
    assert!(!crashed.success);
    assert!(crashed.error.as_deref().unwrap().contains("palette index out of range"));
    assert_eq!(crashed.artifacts, good.artifacts);

    let after = service.submit(order_payload(2)).await;
    assert!(after.success, "{:?}", after.error);
    assert_eq!(scratch_entries(&scratch).await, 0);
}

#[tokio::test]
async fn test_scratch_dirs_are_removed_after_success_and_failure() {
    let scratch = TempDir::new().unwrap();
    let engine = GenerationEngine::new(Arc::new(GeneratorRegistry::with_builtins()));
    let mut config = ProducerConfig::preview_profile();
    config.generators.insert("android".to_string(), tokensmith_types::GeneratorSpec::Builtin);
    let failing = PreviewService::spawn(
        engine.clone(),
        PreviewOptions { scratch_root: scratch.path().to_path_buf(), config },
    );
    let working = PreviewService::spawn(
        engine,
        PreviewOptions { scratch_root: scratch.path().to_path_buf(), ..PreviewOptions::default() },
    );

    assert!(working.submit(color_payload("#fff")).await.success);
    assert!(!failing.submit(color_payload("#fff")).await.success);

    assert_eq!(scratch_entries(&scratch).await, 0);
}

#[test]
fn test_submit_after_worker_stopped_returns_failure() {
    let scratch = TempDir::new().unwrap();
    let first = tokio::runtime::Runtime::new().unwrap();
    let service = first.block_on(async { builtin_service(&scratch) });
    // Dropping the runtime drops the worker task and its receiver.
    drop(first);

    let second = tokio::runtime::Runtime::new().unwrap();
    let result = second.block_on(service.submit(color_payload("#fff")));
    assert!(!result.success);
    assert!(result.error.unwrap().contains("not running"));
}
