//! Chromium-based renderer using chromiumoxide.

use super::{LaunchOptions, NavigationResult, RenderSession, Renderer};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    EventLifecycleEvent, SetLifecycleEventsEnabledParams,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Lifecycle event Chromium emits once at most two connections remain open
/// for 500ms.
const NETWORK_SETTLED_EVENT: &str = "networkAlmostIdle";

/// Delay between selector polls.
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long a closing browser may take to exit before it is killed.
const EXIT_GRACE: Duration = Duration::from_secs(5);

/// Find the Chromium binary path.
pub fn find_chromium(explicit: Option<&Path>) -> Option<PathBuf> {
    // 1. --chromium / TRENDING_CHROMIUM_PATH
    if let Some(path) = explicit {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    // 2. System PATH
    for name in [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
    ] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 3. Common macOS location
    if cfg!(target_os = "macos") {
        let common =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Chromium-based renderer. Each `launch` starts its own browser process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromiumRenderer;

impl ChromiumRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn RenderSession>> {
        let chrome_path = find_chromium(options.chromium_path.as_deref()).context(
            "Chromium not found. Install Chrome or set TRENDING_CHROMIUM_PATH.",
        )?;
        debug!(path = %chrome_path.display(), "launching Chromium");

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .no_sandbox()
            .arg("--disable-setuid-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        builder = if options.headless {
            builder.arg("--headless=new")
        } else {
            builder.with_head()
        };
        let config = builder
            .build()
            .map_err(|e| anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        // Spawn the handler task
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let mut session = ChromiumSession {
            browser,
            page: None,
            handler_task,
        };

        match session.open_page(&options.user_agent).await {
            Ok(()) => Ok(Box::new(session)),
            Err(e) => {
                session.shutdown().await;
                Err(e)
            }
        }
    }
}

/// A browser process with a single page.
///
/// Dropping it without `close` still kills the process (chromiumoxide's
/// `Browser` drop), but `close` shuts down cleanly.
pub struct ChromiumSession {
    browser: Browser,
    page: Option<Page>,
    handler_task: JoinHandle<()>,
}

impl ChromiumSession {
    async fn open_page(&mut self, user_agent: &str) -> Result<()> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;
        page.set_user_agent(user_agent)
            .await
            .context("failed to set user agent")?;
        page.execute(SetLifecycleEventsEnabledParams::new(true))
            .await
            .context("failed to enable lifecycle events")?;
        self.page = Some(page);
        Ok(())
    }

    fn page(&self) -> Result<&Page> {
        self.page.as_ref().context("browser session has no open page")
    }

    async fn shutdown(&mut self) {
        if let Some(page) = self.page.take() {
            let _ = tokio::time::timeout(EXIT_GRACE, page.close()).await;
        }
        terminate(&mut self.browser, EXIT_GRACE).await;
        self.handler_task.abort();
    }
}

/// The process-level operations teardown needs from a browser.
#[async_trait]
trait BrowserProcess: Send {
    /// Ask the browser to shut down over the protocol.
    async fn close(&mut self) -> Result<()>;
    /// Kill the child process.
    async fn kill(&mut self);
    /// Wait for the child process to exit.
    async fn wait(&mut self) -> Result<()>;
}

#[async_trait]
impl BrowserProcess for Browser {
    async fn close(&mut self) -> Result<()> {
        Browser::close(self).await?;
        Ok(())
    }

    async fn kill(&mut self) {
        if let Some(Err(e)) = Browser::kill(self).await {
            debug!("browser kill: {e}");
        }
    }

    async fn wait(&mut self) -> Result<()> {
        Browser::wait(self).await?;
        Ok(())
    }
}

/// Shut a browser down without ever blocking past `grace`.
///
/// A failed close means the protocol channel is gone, so the process is
/// killed before waiting. A process that has not exited after `grace` is
/// killed too.
async fn terminate<P: BrowserProcess + ?Sized>(process: &mut P, grace: Duration) {
    if let Err(e) = process.close().await {
        debug!("browser close failed, killing: {e:#}");
        process.kill().await;
    }

    if tokio::time::timeout(grace, process.wait()).await.is_err() {
        warn!("browser did not exit within {}ms, killing", grace.as_millis());
        process.kill().await;
        let _ = tokio::time::timeout(grace, process.wait()).await;
    }
}

#[async_trait]
impl RenderSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult> {
        let start = Instant::now();
        let page = self.page()?;

        // Subscribe before navigating so no lifecycle event is missed.
        let mut lifecycle = page
            .event_listener::<EventLifecycleEvent>()
            .await
            .context("failed to subscribe to lifecycle events")?;

        page.goto(url)
            .await
            .with_context(|| format!("navigation to {url} failed"))?;

        let main_frame = page.mainframe().await.ok().flatten();
        let mut document_started = false;
        while let Some(event) = lifecycle.next().await {
            if main_frame.as_ref().is_some_and(|id| *id != event.frame_id) {
                continue;
            }
            match event.name.as_str() {
                "init" => document_started = true,
                NETWORK_SETTLED_EVENT if document_started => break,
                _ => {}
            }
        }

        let final_url = page
            .url()
            .await
            .unwrap_or_default()
            .unwrap_or_else(|| url.to_string());

        Ok(NavigationResult {
            final_url,
            load_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn wait_for_selector(&mut self, selector: &str) -> Result<()> {
        let page = self.page()?;
        loop {
            if page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn get_html(&self) -> Result<String> {
        let result = self
            .page()?
            .evaluate("document.documentElement.outerHTML")
            .await
            .context("failed to get HTML")?;

        let html: String = result
            .into_value()
            .map_err(|e| anyhow!("failed to convert HTML result: {e:?}"))?;

        Ok(html)
    }

    async fn close(mut self: Box<Self>) -> Result<()> {
        self.shutdown().await;
        Ok(())
    }
}
