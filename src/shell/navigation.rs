//! Page navigation
//!
//! Single-attempt navigation with a timeout and a load-event wait. The
//! session bootstrap depends on the wait: [`PageNavigator::goto`] returning
//! is the engine's acknowledgment that the page actually loaded.

use crate::error::{Error, Result, ShellError};
use crate::shell::PageHandle;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Result of a navigation operation
#[derive(Debug)]
pub struct NavigationResult {
    /// Final URL after any redirects
    pub final_url: String,
    /// Page title, when the document exposes one
    pub title: Option<String>,
    /// Navigation duration in milliseconds
    pub duration_ms: u64,
}

/// Navigator for the shell's host page
pub struct PageNavigator;

impl PageNavigator {
    /// Navigate to a URL and wait for the load event.
    #[instrument(skip(page))]
    pub async fn goto(page: &PageHandle, url: &str, timeout_ms: u64) -> Result<NavigationResult> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ShellError::ConfigError(format!(
                "navigation target must be http(s): {url}"
            ))
            .into());
        }

        info!("navigating to {url}");
        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(timeout_ms);

        tokio::time::timeout(timeout, page.page.goto(url))
            .await
            .map_err(|_| ShellError::Timeout(timeout_ms))?
            .map_err(|e| Error::cdp(e.to_string()))?;

        Self::wait_for_load(page, timeout_ms).await?;

        let final_url = page
            .page
            .url()
            .await
            .map_err(|e| Error::cdp(e.to_string()))?
            .unwrap_or_else(|| url.to_string());

        let title = page
            .page
            .evaluate("document.title")
            .await
            .ok()
            .and_then(|v| v.into_value::<String>().ok())
            .filter(|t| !t.is_empty());

        page.set_url(final_url.clone()).await;

        let duration_ms = start.elapsed().as_millis() as u64;
        debug!("navigation complete: {url} -> {final_url} ({duration_ms}ms)");

        Ok(NavigationResult {
            final_url,
            title,
            duration_ms,
        })
    }

    /// Wait until the document's load event has fired.
    async fn wait_for_load(page: &PageHandle, timeout_ms: u64) -> Result<()> {
        let script = r#"
            new Promise(resolve => {
                if (document.readyState === 'complete') {
                    resolve(true);
                } else {
                    window.addEventListener('load', () => resolve(true));
                }
            })
        "#;

        let timeout = Duration::from_millis(timeout_ms);
        tokio::time::timeout(timeout, page.page.evaluate(script))
            .await
            .map_err(|_| ShellError::Timeout(timeout_ms))?
            .map_err(|e| Error::cdp(e.to_string()))?;

        Ok(())
    }
}
