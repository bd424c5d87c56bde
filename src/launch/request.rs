//! Scheme URL parsing
//!
//! Decodes an `autotrader://` URL into the HTTPS navigation target, the
//! cookie specs, and the raw proxy descriptor. Everything here is pure
//! string work; the fail-closed fallback lives one level up in
//! [`crate::launch::resolve`].

use std::collections::BTreeMap;

use url::Url;

use super::cookies::CookieSource;
use crate::error::ParseError;

/// The custom URL scheme this program registers and handles
pub const SCHEME: &str = "autotrader";

/// Scheme prefix as it appears at the front of a launch argument
pub const SCHEME_PREFIX: &str = "autotrader://";

/// Navigation target used when no (valid) scheme URL was supplied
pub const DEFAULT_TARGET_URL: &str = "https://market.csgo.com";

/// Everything decoded from one process invocation's launch argument
///
/// Constructed once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// HTTPS URL the shell will navigate to
    pub target_url: String,
    /// Host component, used as the fallback cookie domain
    pub host: String,
    /// Cookie specs keyed by cookie name
    pub cookies: BTreeMap<String, CookieSource>,
    /// Raw proxy descriptor, parsed later by the bootstrapper
    pub proxy: Option<String>,
}

impl LaunchRequest {
    /// The default marketplace target with no cookies and no proxy.
    pub fn default_target() -> Self {
        Self::plain(DEFAULT_TARGET_URL)
    }

    /// Wrap a non-scheme URL as a plain navigation target.
    pub fn plain(url: &str) -> Self {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();
        Self {
            target_url: url.to_string(),
            host,
            cookies: BTreeMap::new(),
            proxy: None,
        }
    }

    /// Parse a launch argument.
    ///
    /// Input that does not start with the scheme prefix is returned
    /// unchanged as a plain navigation target. A scheme URL must carry a
    /// host; a malformed URL or cookie payload fails the whole parse.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        if !raw.starts_with(SCHEME_PREFIX) {
            return Ok(Self::plain(raw));
        }

        // Senders occasionally embed a full https URL after the scheme.
        let normalized = match raw.strip_prefix("autotrader://https://") {
            Some(rest) => format!("{SCHEME_PREFIX}{rest}"),
            None => raw.to_string(),
        };

        let parsed =
            Url::parse(&normalized).map_err(|e| ParseError::InvalidUrl(e.to_string()))?;
        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or(ParseError::MissingHost)?
            .to_string();

        let authority = match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.clone(),
        };
        let target_url = collapse_double_prefix(&format!("https://{}{}", authority, parsed.path()));

        let mut cookies_json: Option<String> = None;
        let mut proxy: Option<String> = None;
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "cookies" => cookies_json = Some(value.into_owned()),
                "proxy" => proxy = Some(value.into_owned()),
                _ => {}
            }
        }

        let cookies = match cookies_json.as_deref() {
            Some(json) if !json.is_empty() => serde_json::from_str(json)
                .map_err(|e| ParseError::CookieJson(e.to_string()))?,
            _ => BTreeMap::new(),
        };

        Ok(Self {
            target_url,
            host,
            cookies,
            proxy: proxy.filter(|p| !p.is_empty()),
        })
    }
}

fn collapse_double_prefix(url: &str) -> String {
    url.replace("https://https://", "https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_and_path() {
        let req = LaunchRequest::parse("autotrader://market.csgo.com/trade").unwrap();
        assert_eq!(req.target_url, "https://market.csgo.com/trade");
        assert_eq!(req.host, "market.csgo.com");
        assert!(req.cookies.is_empty());
        assert!(req.proxy.is_none());
    }

    #[test]
    fn test_parse_collapses_doubled_prefix() {
        let req = LaunchRequest::parse("autotrader://https://market.csgo.com/trade").unwrap();
        assert_eq!(req.target_url, "https://market.csgo.com/trade");
        assert_eq!(req.host, "market.csgo.com");
    }

    #[test]
    fn test_parse_keeps_port() {
        let req = LaunchRequest::parse("autotrader://market.csgo.com:8443/trade").unwrap();
        assert_eq!(req.target_url, "https://market.csgo.com:8443/trade");
    }

    #[test]
    fn test_non_scheme_input_passes_through() {
        let req = LaunchRequest::parse("https://example.com/page").unwrap();
        assert_eq!(req.target_url, "https://example.com/page");
        assert_eq!(req.host, "example.com");
        assert!(req.cookies.is_empty());
    }

    #[test]
    fn test_missing_host_fails() {
        let err = LaunchRequest::parse("autotrader:///trade").unwrap_err();
        assert!(matches!(err, ParseError::MissingHost | ParseError::InvalidUrl(_)));
    }

    #[test]
    fn test_cookie_json_extraction() {
        let mut url = Url::parse("autotrader://market.csgo.com/trade").unwrap();
        url.query_pairs_mut()
            .append_pair("cookies", r#"{"sessionid": "plain"}"#);
        let req = LaunchRequest::parse(url.as_str()).unwrap();
        assert_eq!(req.cookies.len(), 1);
        assert!(req.cookies.contains_key("sessionid"));
    }

    #[test]
    fn test_invalid_cookie_json_fails() {
        let mut url = Url::parse("autotrader://market.csgo.com/trade").unwrap();
        url.query_pairs_mut().append_pair("cookies", "{not json");
        let err = LaunchRequest::parse(url.as_str()).unwrap_err();
        assert!(matches!(err, ParseError::CookieJson(_)));
    }

    #[test]
    fn test_proxy_is_opaque_here() {
        let mut url = Url::parse("autotrader://market.csgo.com/trade").unwrap();
        url.query_pairs_mut()
            .append_pair("proxy", "http://alice:pw@10.0.0.1:8080");
        let req = LaunchRequest::parse(url.as_str()).unwrap();
        assert_eq!(req.proxy.as_deref(), Some("http://alice:pw@10.0.0.1:8080"));
    }

    #[test]
    fn test_default_target() {
        let req = LaunchRequest::default_target();
        assert_eq!(req.target_url, DEFAULT_TARGET_URL);
        assert_eq!(req.host, "market.csgo.com");
    }
}
