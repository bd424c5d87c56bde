//! Browser lifecycle management
//!
//! Handles engine launch, page creation, and shutdown. The proxy endpoint
//! is a launch argument, so it is in force before any page exists.

use crate::error::{Error, Result, ShellError};
use crate::launch::proxy::ProxyConfig;
use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetUserAgentOverrideParams;
use chromiumoxide::Page;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Configuration for the shell window and its engine
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Show a browser window (default: true; false for automated runs)
    pub windowed: bool,
    /// Enable the Chromium sandbox (default: true)
    pub sandbox: bool,
    /// User agent string (None = engine default)
    pub user_agent: Option<String>,
    /// Engine operation timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
    /// Path to Chrome/Chromium executable (None = auto-detect)
    pub chrome_path: Option<String>,
    /// Process-wide proxy (None = direct connection)
    pub proxy: Option<ProxyConfig>,
    /// Additional Chrome arguments
    pub extra_args: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            windowed: true,
            sandbox: true,
            user_agent: Some(super::USER_AGENT.to_string()),
            timeout_ms: 30000,
            chrome_path: None,
            proxy: None,
            extra_args: Vec::new(),
        }
    }
}

impl ShellConfig {
    /// Create a new config builder
    pub fn builder() -> ShellConfigBuilder {
        ShellConfigBuilder::default()
    }
}

/// Builder for [`ShellConfig`]
#[derive(Default)]
pub struct ShellConfigBuilder {
    config: ShellConfig,
}

impl ShellConfigBuilder {
    /// Show or hide the browser window
    pub fn windowed(mut self, windowed: bool) -> Self {
        self.config.windowed = windowed;
        self
    }

    /// Enable/disable sandbox
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.config.sandbox = sandbox;
        self
    }

    /// Set user agent
    pub fn user_agent<S: Into<String>>(mut self, ua: S) -> Self {
        self.config.user_agent = Some(ua.into());
        self
    }

    /// Set engine operation timeout
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set Chrome path
    pub fn chrome_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Set the process-wide proxy
    pub fn proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.config.proxy = proxy;
        self
    }

    /// Add extra Chrome argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.config.extra_args.push(arg.into());
        self
    }

    /// Build the config
    pub fn build(self) -> ShellConfig {
        self.config
    }
}

/// Handle to the shell's host page
#[derive(Clone)]
pub struct PageHandle {
    pub(crate) page: Page,
    pub(crate) url: Arc<RwLock<String>>,
    pub(crate) timeout_ms: u64,
}

impl PageHandle {
    /// Get the underlying chromiumoxide Page
    pub fn inner(&self) -> &Page {
        &self.page
    }

    /// Get the current URL
    pub async fn url(&self) -> String {
        self.url.read().await.clone()
    }

    pub(crate) async fn set_url(&self, url: String) {
        *self.url.write().await = url;
    }
}

/// High-level shell controller owning the engine process
pub struct ShellController {
    browser: Browser,
    handler: Option<JoinHandle<()>>,
    config: ShellConfig,
}

impl ShellController {
    /// Launch the engine with the given config.
    #[instrument(skip(config))]
    pub async fn launch(config: ShellConfig) -> Result<Self> {
        info!(windowed = config.windowed, proxy = config.proxy.is_some(), "launching browser");

        let mut builder = CdpBrowserConfig::builder();

        if config.windowed {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.arg("--no-sandbox");
        }
        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }
        if let Some(ref proxy) = config.proxy {
            builder = builder.arg(proxy.server_arg());
        }
        for arg in &config.extra_args {
            builder = builder.arg(arg);
        }

        let cdp_config = builder
            .build()
            .map_err(ShellError::ConfigError)?;

        let (browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| ShellError::LaunchFailed(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    warn!("browser handler event error");
                    break;
                }
            }
            debug!("browser handler finished");
        });

        info!("browser launched");

        Ok(Self {
            browser,
            handler: Some(handler_task),
            config,
        })
    }

    /// Create the host page, with the user agent and proxy auth responder
    /// in place before any navigation.
    #[instrument(skip(self))]
    pub async fn new_page(&self) -> Result<PageHandle> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ShellError::PageCreationFailed(e.to_string()))?;

        if let Some(ref ua) = self.config.user_agent {
            page.execute(SetUserAgentOverrideParams::new(ua.clone()))
                .await
                .map_err(|e| Error::cdp(e.to_string()))?;
        }

        if let Some(ref proxy) = self.config.proxy {
            super::proxy_auth::answer_challenges(&page, proxy).await?;
        }

        debug!("host page ready");

        Ok(PageHandle {
            page,
            url: Arc::new(RwLock::new("about:blank".to_string())),
            timeout_ms: self.config.timeout_ms,
        })
    }

    /// Get the shell configuration
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Block until the user closes the browser window.
    #[instrument(skip(self))]
    pub async fn run_until_closed(mut self) -> Result<()> {
        if let Some(handler) = self.handler.take() {
            let _ = handler.await;
        }
        info!("browser window closed");
        Ok(())
    }

    /// Close the browser programmatically.
    #[instrument(skip(self))]
    pub async fn close(mut self) -> Result<()> {
        info!("closing browser");

        self.browser
            .close()
            .await
            .map_err(|e| Error::cdp(e.to_string()))?;

        if let Some(handler) = self.handler.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handler).await;
        }

        info!("browser closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_config_default() {
        let config = ShellConfig::default();
        assert!(config.windowed);
        assert!(config.sandbox);
        assert_eq!(config.timeout_ms, 30000);
        assert_eq!(config.user_agent.as_deref(), Some(super::super::USER_AGENT));
        assert!(config.proxy.is_none());
        assert!(config.extra_args.is_empty());
    }

    #[test]
    fn test_shell_config_builder() {
        let proxy = ProxyConfig::parse("http://alice:pw@10.0.0.1:8080").unwrap();
        let config = ShellConfig::builder()
            .windowed(false)
            .sandbox(false)
            .user_agent("TestShell/1.0")
            .timeout_ms(60000)
            .chrome_path("/usr/bin/chromium")
            .proxy(Some(proxy))
            .arg("--disable-gpu")
            .build();

        assert!(!config.windowed);
        assert!(!config.sandbox);
        assert_eq!(config.user_agent, Some("TestShell/1.0".to_string()));
        assert_eq!(config.timeout_ms, 60000);
        assert_eq!(config.chrome_path, Some("/usr/bin/chromium".to_string()));
        assert_eq!(config.proxy.as_ref().unwrap().host, "10.0.0.1");
        assert_eq!(config.extra_args, vec!["--disable-gpu"]);
    }
}
