//! Pipeline integration tests.
//!
//! Drives `pipeline::run` with an in-memory renderer serving synthetic
//! trending pages and an exporter that records what it was handed.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use trending_scraper::config::{Config, OutputFormat, TimeRange};
use trending_scraper::error::{exit_codes, ScrapeError, ScrapeResult};
use trending_scraper::export::{Exporter, FileExporter, CSV_FILE_NAME, JSON_FILE_NAME};
use trending_scraper::pipeline;
use trending_scraper::record::TrendingRecord;
use trending_scraper::renderer::{LaunchOptions, NavigationResult, RenderSession, Renderer};

// ─────────────────────── helpers ───────────────────────

/// Serves a fixed document, optionally hanging on navigation.
struct StaticRenderer {
    html: String,
    hang: bool,
    launches: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    visited: Arc<Mutex<Vec<String>>>,
    launched_with: Arc<Mutex<Vec<LaunchOptions>>>,
}

impl StaticRenderer {
    fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            hang: false,
            launches: Arc::default(),
            closes: Arc::default(),
            visited: Arc::default(),
            launched_with: Arc::default(),
        }
    }

    fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::new("")
        }
    }
}

struct StaticSession {
    html: String,
    hang: bool,
    closes: Arc<AtomicUsize>,
    visited: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Renderer for StaticRenderer {
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn RenderSession>> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        self.launched_with.lock().unwrap().push(options.clone());
        Ok(Box::new(StaticSession {
            html: self.html.clone(),
            hang: self.hang,
            closes: Arc::clone(&self.closes),
            visited: Arc::clone(&self.visited),
        }))
    }
}

#[async_trait]
impl RenderSession for StaticSession {
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult> {
        self.visited.lock().unwrap().push(url.to_string());
        if self.hang {
            tokio::time::sleep(Duration::from_secs(60)).await;
            return Err(anyhow!("navigation should have timed out"));
        }
        Ok(NavigationResult {
            final_url: url.to_string(),
            load_time_ms: 3,
        })
    }

    async fn wait_for_selector(&mut self, _selector: &str) -> Result<()> {
        Ok(())
    }

    async fn get_html(&self) -> Result<String> {
        Ok(self.html.clone())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Records every export call instead of writing files.
#[derive(Default)]
struct RecordingExporter {
    calls: Mutex<Vec<(Vec<TrendingRecord>, OutputFormat)>>,
}

impl Exporter for RecordingExporter {
    fn export(
        &self,
        records: Vec<TrendingRecord>,
        format: OutputFormat,
    ) -> ScrapeResult<Vec<PathBuf>> {
        self.calls.lock().unwrap().push((records, format));
        Ok(vec![PathBuf::from("memory://trending")])
    }
}

fn config() -> Config {
    Config {
        nav_timeout_ms: 100,
        wait_timeout_ms: 100,
        ..Config::default()
    }
}

/// The two-entry page: one fully populated entry, one with no stats.
const TWO_ENTRY_PAGE: &str = r##"
<!DOCTYPE html>
<html><body>
<div class="Box">
  <article class="Box-row">
    <h2 class="h3 lh-condensed">
      <a href="/octocat/Hello-World" class="Link">octocat / Hello-World</a>
    </h2>
    <div class="f6 color-fg-muted mt-2">
      <a href="/octocat/Hello-World/stargazers" class="Link Link--muted d-inline-block mr-3">
        <svg aria-label="star" class="octicon octicon-star"><use href="#octicon-star-16"></use></svg>
        1,234
      </a>
      <a href="/octocat/Hello-World/forks" class="Link Link--muted d-inline-block mr-3">
        <svg aria-label="fork" class="octicon octicon-repo-forked"><use href="#octicon-repo-forked-16"></use></svg>
        56
      </a>
      <span class="d-inline-block float-sm-right">
        <svg class="octicon octicon-star"></svg>
        78 stars today
      </span>
    </div>
  </article>
  <article class="Box-row">
    <h2 class="h3 lh-condensed">
      <a href="/foo/bar" class="Link">foo / bar</a>
    </h2>
  </article>
</div>
</body></html>
"##;

// ─────────────────────── tests ───────────────────────

#[tokio::test]
async fn test_two_entry_scenario() {
    let renderer = StaticRenderer::new(TWO_ENTRY_PAGE);
    let exporter = RecordingExporter::default();

    let summary = pipeline::run(&config(), &renderer, &exporter).await.unwrap();
    assert_eq!(summary.record_count, 2);
    assert_eq!(summary.url, "https://github.com/trending?since=daily");

    let calls = exporter.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (records, format) = &calls[0];
    assert_eq!(*format, OutputFormat::Both);

    let expected = vec![
        TrendingRecord {
            rank: 1,
            author: "octocat".into(),
            name: "Hello-World".into(),
            full_name: "octocat/Hello-World".into(),
            url: "https://github.com/octocat/Hello-World".into(),
            description: "".into(),
            language: "".into(),
            stars: 1234,
            forks: 56,
            stars_today: 78,
        },
        TrendingRecord {
            rank: 2,
            author: "foo".into(),
            name: "bar".into(),
            full_name: "foo/bar".into(),
            url: "https://github.com/foo/bar".into(),
            description: "".into(),
            language: "".into(),
            stars: 0,
            forks: 0,
            stars_today: 0,
        },
    ];
    assert_eq!(records, &expected);

    assert_eq!(renderer.launches.load(Ordering::SeqCst), 1);
    assert_eq!(renderer.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_page_never_exports() {
    let renderer = StaticRenderer::new("<html><body><div class=\"Box\"></div></body></html>");
    let exporter = RecordingExporter::default();

    let err = pipeline::run(&config(), &renderer, &exporter)
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::EmptyResult { .. }));
    assert_eq!(err.exit_code(), exit_codes::EMPTY_RESULT);
    assert!(exporter.calls.lock().unwrap().is_empty());
    assert_eq!(renderer.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_navigation_timeout_tears_down_once_and_never_exports() {
    let renderer = StaticRenderer::hanging();
    let exporter = RecordingExporter::default();

    let err = pipeline::run(&config(), &renderer, &exporter)
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Navigation(_)));
    assert_eq!(err.exit_code(), exit_codes::NAVIGATION);
    assert_eq!(renderer.closes.load(Ordering::SeqCst), 1);
    assert!(exporter.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_config_reaches_renderer() {
    let renderer = StaticRenderer::new(TWO_ENTRY_PAGE);
    let exporter = RecordingExporter::default();
    let cfg = Config {
        language: "c++".into(),
        time_range: TimeRange::Weekly,
        output_format: OutputFormat::Json,
        headless: false,
        ..config()
    };

    let summary = pipeline::run(&cfg, &renderer, &exporter).await.unwrap();

    let visited = renderer.visited.lock().unwrap();
    assert_eq!(
        visited.as_slice(),
        ["https://github.com/trending/c%2B%2B?since=weekly".to_string()]
    );
    assert_eq!(summary.url, visited[0]);
    let launched = renderer.launched_with.lock().unwrap();
    assert!(!launched[0].headless);
    assert!(launched[0].user_agent.contains("Chrome/"));
    assert_eq!(exporter.calls.lock().unwrap()[0].1, OutputFormat::Json);
}

#[tokio::test]
async fn test_scrape_reports_the_visited_url_when_empty() {
    let renderer = StaticRenderer::new("<html><body></body></html>");
    let cfg = Config {
        language: "..".into(),
        ..config()
    };

    let err = pipeline::scrape(&cfg, &renderer).await.unwrap_err();

    let visited = renderer.visited.lock().unwrap();
    assert_eq!(visited.len(), 1);
    assert!(matches!(err, ScrapeError::EmptyResult { ref url } if *url == visited[0]));
    assert_eq!(visited[0], "https://github.com/trending/%2E%2E?since=daily");
}

#[tokio::test]
async fn test_concurrent_runs_use_independent_sessions() {
    let renderer = StaticRenderer::new(TWO_ENTRY_PAGE);
    let exporter = RecordingExporter::default();
    let rust = Config {
        language: "rust".into(),
        ..config()
    };
    let go = Config {
        language: "go".into(),
        ..config()
    };

    let (a, b) = tokio::join!(
        pipeline::run(&rust, &renderer, &exporter),
        pipeline::run(&go, &renderer, &exporter)
    );
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(renderer.launches.load(Ordering::SeqCst), 2);
    assert_eq!(renderer.closes.load(Ordering::SeqCst), 2);
    assert_eq!(exporter.calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_file_export_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = StaticRenderer::new(TWO_ENTRY_PAGE);
    let exporter = FileExporter::new(dir.path());

    let summary = pipeline::run(&config(), &renderer, &exporter).await.unwrap();
    assert_eq!(
        summary.destinations,
        vec![dir.path().join(JSON_FILE_NAME), dir.path().join(CSV_FILE_NAME)]
    );

    let json = std::fs::read_to_string(dir.path().join(JSON_FILE_NAME)).unwrap();
    let records: Vec<TrendingRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].full_name, "octocat/Hello-World");

    let csv = std::fs::read_to_string(dir.path().join(CSV_FILE_NAME)).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("rank,author,name,fullName,url,description,language,stars,forks,starsToday")
    );
    assert_eq!(
        lines.next(),
        Some("1,octocat,Hello-World,octocat/Hello-World,https://github.com/octocat/Hello-World,,,1234,56,78")
    );
    assert_eq!(
        lines.next(),
        Some("2,foo,bar,foo/bar,https://github.com/foo/bar,,,0,0,0")
    );
}
