//! Session bootstrap
//!
//! Applies decoded session state to the browser engine before the first
//! navigation. The engine is behind the [`WebEngine`] trait so the ordering
//! contract (clear, inject, then navigate, each call acknowledged) can be
//! exercised without a live browser.

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::launch::cookies::CookieEntry;
use crate::launch::proxy::ProxyConfig;
use crate::launch::request::LaunchRequest;

/// Session state applied to the engine before the first navigation
///
/// Built once from the launch request; an empty config is valid and simply
/// clears any stale state.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Cookies to inject, already decoded and normalized
    pub cookies: Vec<CookieEntry>,
    /// Process-wide proxy, applied at engine launch
    pub proxy: Option<ProxyConfig>,
}

impl SessionConfig {
    /// Derive session state from a parsed launch request.
    ///
    /// Fails whole: a single bad cookie value or proxy component discards
    /// the entire session, never a subset of it.
    pub fn from_request(request: &LaunchRequest) -> Result<Self> {
        let mut cookies = Vec::with_capacity(request.cookies.len());
        for (name, source) in &request.cookies {
            cookies.push(CookieEntry::from_source(name, source, &request.host)?);
        }

        let proxy = match request.proxy.as_deref() {
            Some(raw) => Some(ProxyConfig::parse(raw)?),
            None => None,
        };

        Ok(Self { cookies, proxy })
    }

    /// True when there is nothing to inject and no proxy to apply.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty() && self.proxy.is_none()
    }
}

/// The slice of the web-view engine the bootstrapper needs
///
/// Every method resolves once the engine has acknowledged the operation,
/// which is what makes the sequencing below a contract rather than a hope.
#[async_trait]
pub trait WebEngine {
    /// Remove every cookie from the engine's store.
    async fn clear_cookies(&self) -> Result<()>;

    /// Add one cookie to the engine's store.
    async fn set_cookie(&self, cookie: &CookieEntry) -> Result<()>;

    /// Navigate to a URL and wait for the page to load.
    async fn load(&self, url: &str) -> Result<()>;
}

/// Apply session state to the engine.
///
/// Existing cookies are always cleared first (at most one active session
/// per process) and every injection is awaited before returning.
#[instrument(skip(engine, config))]
pub async fn configure_session(engine: &dyn WebEngine, config: &SessionConfig) -> Result<()> {
    engine.clear_cookies().await?;
    for cookie in &config.cookies {
        debug!(name = %cookie.name, domain = %cookie.domain, "injecting cookie");
        engine.set_cookie(cookie).await?;
    }
    info!(cookies = config.cookies.len(), "session configured");
    Ok(())
}

/// Configure the session, then issue the first navigation.
///
/// The single place where the ordering contract is enforced: the engine has
/// acknowledged the full cookie state before the navigation request goes
/// out.
#[instrument(skip(engine, config))]
pub async fn bootstrap(
    engine: &dyn WebEngine,
    config: &SessionConfig,
    target_url: &str,
) -> Result<()> {
    configure_session(engine, config).await?;
    engine.load(target_url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::request::LaunchRequest;

    #[test]
    fn test_empty_request_empty_session() {
        let request = LaunchRequest::default_target();
        let session = SessionConfig::from_request(&request).unwrap();
        assert!(session.is_empty());
    }

    #[test]
    fn test_bad_proxy_fails_whole_session() {
        let mut request = LaunchRequest::default_target();
        request.proxy = Some("http://10.0.0.1:8080".to_string());
        assert!(SessionConfig::from_request(&request).is_err());
    }

    #[test]
    fn test_cookies_and_proxy_derived() {
        let mut url = url::Url::parse("autotrader://market.csgo.com/trade").unwrap();
        url.query_pairs_mut()
            .append_pair("cookies", r#"{"token": {"domain": "sub.market.csgo.com", "value": "c2VjcmV0"}}"#)
            .append_pair("proxy", "http://alice:pw@10.0.0.1:8080");
        let request = LaunchRequest::parse(url.as_str()).unwrap();

        let session = SessionConfig::from_request(&request).unwrap();
        assert_eq!(session.cookies.len(), 1);
        assert_eq!(session.cookies[0].value, "secret");
        assert_eq!(session.cookies[0].domain, ".csgo.com");
        assert_eq!(session.proxy.as_ref().unwrap().port, 8080);
    }
}
