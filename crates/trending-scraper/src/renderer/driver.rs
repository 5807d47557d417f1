//! Drive one render session from launch to teardown.

use super::{LaunchOptions, NavigationResult, RenderSession, Renderer};
use crate::error::{ScrapeError, ScrapeResult};
use anyhow::{anyhow, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What to load and what to wait for.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub url: &'a str,
    /// Selector that must be present before the page counts as rendered.
    pub selector: &'a str,
    pub nav_timeout_ms: u64,
    pub wait_timeout_ms: u64,
}

/// Launch a session, load the page, wait for `request.selector`, and return
/// the rendered HTML.
///
/// The session is closed exactly once whether loading succeeds or not, and
/// before any failure is returned. Every failure is a
/// [`ScrapeError::Navigation`].
pub async fn render_page(
    renderer: &dyn Renderer,
    launch: &LaunchOptions,
    request: &RenderRequest<'_>,
) -> ScrapeResult<String> {
    let mut session = renderer
        .launch(launch)
        .await
        .map_err(|e| ScrapeError::Navigation(format!("{e:#}")))?;
    debug!(headless = launch.headless, "browser session started");

    let outcome = load(session.as_mut(), request).await;

    if let Err(e) = session.close().await {
        warn!("failed to close browser session: {e:#}");
    }
    debug!("browser session closed");

    outcome.map_err(|e| ScrapeError::Navigation(format!("{e:#}")))
}

async fn load(session: &mut dyn RenderSession, request: &RenderRequest<'_>) -> Result<String> {
    let nav: NavigationResult = tokio::time::timeout(
        Duration::from_millis(request.nav_timeout_ms),
        session.navigate(request.url),
    )
    .await
    .map_err(|_| anyhow!("navigation timed out after {}ms", request.nav_timeout_ms))??;
    info!(url = %nav.final_url, load_time_ms = nav.load_time_ms, "page loaded");

    tokio::time::timeout(
        Duration::from_millis(request.wait_timeout_ms),
        session.wait_for_selector(request.selector),
    )
    .await
    .map_err(|_| {
        anyhow!(
            "timed out after {}ms waiting for `{}`",
            request.wait_timeout_ms,
            request.selector
        )
    })??;

    let html = session.get_html().await?;
    debug!(bytes = html.len(), "captured rendered document");
    Ok(html)
}
