//! Renderer abstraction for browser-based page rendering.
//!
//! Defines the `Renderer` and `RenderSession` traits that abstract over
//! the browser engine (currently Chromium via chromiumoxide), and the
//! driver that runs one navigation against them.

pub mod chromium;
pub mod driver;

pub use chromium::ChromiumRenderer;
pub use driver::{render_page, RenderRequest};

use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Client identification string sent with every navigation.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// How to start a browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    pub headless: bool,
    pub user_agent: String,
    /// Explicit browser binary; `None` means auto-discovery.
    pub chromium_path: Option<PathBuf>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chromium_path: None,
        }
    }
}

/// Result of navigating to a URL.
#[derive(Debug, Clone)]
pub struct NavigationResult {
    /// The final URL after any redirects.
    pub final_url: String,
    /// Time taken to load the page in milliseconds.
    pub load_time_ms: u64,
}

/// A browser engine that can start independent sessions.
///
/// Every call to `launch` must return a fresh session; sessions are never
/// shared between runs.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Start a browser session with one open page.
    ///
    /// On error no session exists and nothing is left running.
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn RenderSession>>;
}

/// A single browser session with one page.
#[async_trait]
pub trait RenderSession: Send {
    /// Navigate to a URL and wait for network activity to settle.
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult>;
    /// Wait until at least one element matches `selector`.
    async fn wait_for_selector(&mut self, selector: &str) -> Result<()>;
    /// Get the current rendered DOM as HTML.
    async fn get_html(&self) -> Result<String>;
    /// Close the page and the browser.
    async fn close(self: Box<Self>) -> Result<()>;
}
