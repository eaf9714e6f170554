//! End-to-end pipeline tests with in-memory collaborators standing in
//! for Product Hunt, the AI provider and Telegram.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use huntcast_core::ai::{AnalysisResult, Analyzer, ContentAnalyzer};
use huntcast_core::telegram::{ChannelApi, Publisher};
use huntcast_core::trends::{Period, TrendSource, TrendingItem};
use huntcast_core::{Error, JobOrchestrator, JobOutcome, JobStage, Result};

fn item(id: &str, name: &str) -> TrendingItem {
    TrendingItem {
        id: id.to_string(),
        name: name.to_string(),
        tagline: "Does a thing".to_string(),
        description: format!("{name} is a product."),
        url: format!("https://www.producthunt.com/posts/{id}"),
        votes_count: 100,
        topics: vec!["Productivity".to_string()],
        comments: Vec::new(),
    }
}

struct StubSource {
    items: Vec<TrendingItem>,
    fail: bool,
}

impl StubSource {
    fn with_items(items: Vec<TrendingItem>) -> Arc<Self> {
        Arc::new(Self { items, fail: false })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            items: Vec::new(),
            fail: true,
        })
    }
}

#[async_trait]
impl TrendSource for StubSource {
    async fn fetch(&self, _period: Period) -> Result<Vec<TrendingItem>> {
        if self.fail {
            return Err(Error::Fetch("upstream unavailable".to_string()));
        }
        Ok(self.items.clone())
    }
}

struct StubAnalyzer {
    commentary_ids: Vec<String>,
    calls: AtomicUsize,
    fail: bool,
}

impl StubAnalyzer {
    fn with_commentary_for(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            commentary_ids: ids.iter().map(|s| s.to_string()).collect(),
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            commentary_ids: Vec::new(),
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentAnalyzer for StubAnalyzer {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn analyze(&self, items: &[TrendingItem], _period: Period) -> Result<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Analysis("model overloaded".to_string()));
        }

        let mut commentary = HashMap::new();
        for item in items {
            if self.commentary_ids.contains(&item.id) {
                commentary.insert(item.id.clone(), format!("Take on {}", item.name));
            }
        }
        Ok(AnalysisResult {
            summary: "The market keeps moving.".to_string(),
            commentary,
        })
    }
}

struct StubChannel {
    sent: Mutex<Vec<String>>,
    pinned: Mutex<Vec<i64>>,
    // message indexes (0-based, counting every send attempt) that fail
    fail_on: Vec<usize>,
    fail_pin: bool,
}

impl StubChannel {
    fn new() -> Arc<Self> {
        Self::failing_on(&[])
    }

    fn failing_on(indexes: &[usize]) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            pinned: Mutex::new(Vec::new()),
            fail_on: indexes.to_vec(),
            fail_pin: false,
        })
    }

    fn with_pin_failure() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            pinned: Mutex::new(Vec::new()),
            fail_on: Vec::new(),
            fail_pin: true,
        })
    }

    fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    fn pinned_ids(&self) -> Vec<i64> {
        self.pinned.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelApi for StubChannel {
    async fn send_message(&self, text: &str) -> Result<i64> {
        let mut sent = self.sent.lock().unwrap();
        let index = sent.len();
        if self.fail_on.contains(&index) {
            sent.push(format!("<failed #{index}>"));
            return Err(Error::Publish("flood control".to_string()));
        }
        sent.push(text.to_string());
        Ok(index as i64 + 1)
    }

    async fn pin_message(&self, message_id: i64) -> Result<()> {
        if self.fail_pin {
            return Err(Error::Publish("not enough rights".to_string()));
        }
        self.pinned.lock().unwrap().push(message_id);
        Ok(())
    }
}

fn orchestrator(
    source: Arc<StubSource>,
    analyzer: Arc<StubAnalyzer>,
    channel: Arc<StubChannel>,
) -> JobOrchestrator {
    JobOrchestrator::new(
        source,
        Analyzer::with_provider(analyzer, "en"),
        Publisher::new(channel, "en"),
    )
}

#[tokio::test]
async fn publishes_directory_then_items_in_order() {
    let source = StubSource::with_items(vec![item("a", "Alpha"), item("b", "Beta")]);
    let analyzer = StubAnalyzer::with_commentary_for(&["a", "b"]);
    let channel = StubChannel::new();
    let job = orchestrator(source, analyzer, channel.clone());

    let outcome = job.run(Period::Daily).await;
    assert!(outcome.is_done());

    let sent = channel.sent_messages();
    assert_eq!(sent.len(), 3);
    assert!(sent[0].contains("Product Directory"));
    assert!(sent[0].contains("The market keeps moving."));
    assert!(sent[1].contains("Alpha"));
    assert!(sent[2].contains("Beta"));
    assert_eq!(channel.pinned_ids(), vec![1]);
}

#[tokio::test]
async fn empty_fetch_skips_backend_and_publishes_empty_digest() {
    let source = StubSource::with_items(Vec::new());
    let analyzer = StubAnalyzer::with_commentary_for(&[]);
    let channel = StubChannel::new();
    let job = orchestrator(source, analyzer.clone(), channel.clone());

    let outcome = job.run(Period::Weekly).await;
    assert!(outcome.is_done());

    assert_eq!(analyzer.call_count(), 0);
    let sent = channel.sent_messages();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("No trending products were available"));
}

#[tokio::test]
async fn fetch_failure_stops_before_analysis() {
    let source = StubSource::failing();
    let analyzer = StubAnalyzer::with_commentary_for(&[]);
    let channel = StubChannel::new();
    let job = orchestrator(source, analyzer.clone(), channel.clone());

    let outcome = job.run(Period::Daily).await;
    assert_eq!(outcome.failed_stage(), Some(JobStage::Fetching));
    assert_eq!(analyzer.call_count(), 0);

    // No digest content, only the failure notice
    let sent = channel.sent_messages();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("❌"));
    assert!(sent[0].contains("Daily digest task failed"));
}

#[tokio::test]
async fn analysis_failure_stops_before_publishing() {
    let source = StubSource::with_items(vec![item("a", "Alpha")]);
    let analyzer = StubAnalyzer::failing();
    let channel = StubChannel::new();
    let job = orchestrator(source, analyzer.clone(), channel.clone());

    let outcome = job.run(Period::Monthly).await;
    assert_eq!(outcome.failed_stage(), Some(JobStage::Analyzing));
    assert_eq!(analyzer.call_count(), 1);

    let sent = channel.sent_messages();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("❌"));
    assert!(sent[0].contains("Monthly digest task failed"));
    assert!(sent[0].contains("model overloaded"));
}

#[tokio::test]
async fn directory_failure_aborts_item_messages() {
    let source = StubSource::with_items(vec![item("a", "Alpha"), item("b", "Beta")]);
    let analyzer = StubAnalyzer::with_commentary_for(&["a", "b"]);
    let channel = StubChannel::failing_on(&[0]);
    let job = orchestrator(source, analyzer, channel.clone());

    let outcome = job.run(Period::Daily).await;
    assert_eq!(outcome.failed_stage(), Some(JobStage::Publishing));

    // The failed directory attempt and the failure notice, no item sends
    let sent = channel.sent_messages();
    assert_eq!(sent.len(), 2);
    assert!(sent[1].starts_with("❌"));
    assert!(!sent.iter().any(|m| m.contains("Take on Alpha")));
}

#[tokio::test]
async fn undeliverable_failure_notice_is_swallowed() {
    let source = StubSource::failing();
    let analyzer = StubAnalyzer::with_commentary_for(&[]);
    // Every send fails, including the notice itself
    let channel = StubChannel::failing_on(&[0, 1, 2]);
    let job = orchestrator(source, analyzer, channel.clone());

    let outcome = job.run(Period::Weekly).await;
    assert_eq!(outcome.failed_stage(), Some(JobStage::Fetching));
    assert_eq!(channel.sent_messages().len(), 1);
}

#[tokio::test]
async fn item_failure_is_skipped_and_run_completes() {
    let source = StubSource::with_items(vec![
        item("a", "Alpha"),
        item("b", "Beta"),
        item("c", "Gamma"),
    ]);
    let analyzer = StubAnalyzer::with_commentary_for(&["a", "b", "c"]);
    // index 0 is the directory; index 2 is the second item
    let channel = StubChannel::failing_on(&[2]);
    let job = orchestrator(source, analyzer, channel.clone());

    let outcome = job.run(Period::Daily).await;
    match outcome {
        JobOutcome::Done { receipt, items, .. } => {
            assert_eq!(items, 3);
            assert_eq!(receipt.failed_items, 1);
            assert_eq!(receipt.item_message_ids.len(), 2);
        }
        JobOutcome::Failed { .. } => panic!("run should complete despite one failed item"),
    }

    let sent = channel.sent_messages();
    assert_eq!(sent.len(), 4);
    assert!(sent[3].contains("Gamma"));
}

#[tokio::test]
async fn pin_failure_does_not_fail_the_run() {
    let source = StubSource::with_items(vec![item("a", "Alpha")]);
    let analyzer = StubAnalyzer::with_commentary_for(&["a"]);
    let channel = StubChannel::with_pin_failure();
    let job = orchestrator(source, analyzer, channel.clone());

    let outcome = job.run(Period::Daily).await;
    assert!(outcome.is_done());
    assert!(channel.pinned_ids().is_empty());
    assert_eq!(channel.sent_messages().len(), 2);
}

#[tokio::test]
async fn partial_commentary_falls_back_to_metadata() {
    let source = StubSource::with_items(vec![
        item("a", "Alpha"),
        item("b", "Beta"),
        item("c", "Gamma"),
    ]);
    // The analyzer only has takes on the first and last item
    let analyzer = StubAnalyzer::with_commentary_for(&["a", "c"]);
    let channel = StubChannel::new();
    let job = orchestrator(source, analyzer, channel.clone());

    let outcome = job.run(Period::Weekly).await;
    assert!(outcome.is_done());

    let sent = channel.sent_messages();
    assert_eq!(sent.len(), 4);
    assert!(sent[1].contains("Take on Alpha"));
    assert!(sent[2].contains("Beta is a product."));
    assert!(sent[3].contains("Take on Gamma"));
}

#[tokio::test]
async fn concurrent_period_runs_do_not_interfere() {
    let source = StubSource::with_items(vec![item("a", "Alpha")]);
    let analyzer = StubAnalyzer::with_commentary_for(&["a"]);
    let channel = StubChannel::new();
    let job = Arc::new(orchestrator(source, analyzer, channel.clone()));

    let daily = {
        let job = Arc::clone(&job);
        tokio::spawn(async move { job.run(Period::Daily).await })
    };
    let weekly = {
        let job = Arc::clone(&job);
        tokio::spawn(async move { job.run(Period::Weekly).await })
    };

    let (daily, weekly) = (daily.await.unwrap(), weekly.await.unwrap());
    assert!(daily.is_done());
    assert!(weekly.is_done());
    // Two directories and two item messages, four sends total
    assert_eq!(channel.sent_messages().len(), 4);
}
