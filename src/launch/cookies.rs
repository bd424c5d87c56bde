//! Cookie translation
//!
//! Cookie specs arrive as a JSON mapping inside the scheme URL's `cookies`
//! query parameter and are translated into entries the engine's cookie
//! store understands: base64-decoded values, normalized domains, and a
//! SameSite policy derived from the cookie name.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;

use crate::error::ParseError;

/// The one cookie name exempt from the secure/`SameSite=None` defaults.
///
/// The marketplace's PHP session cookie has to stay first-party and readable
/// by the site's own scripts, so it is injected as `SameSite=Lax` instead.
pub const LAX_COOKIE_NAME: &str = "PHPSESSID";

/// A cookie spec as it appears in the `cookies` JSON payload
///
/// The payload maps cookie name to either a bare value or the richer
/// `{domain, value}` object form. Only the object form carries a
/// base64-encoded value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CookieSource {
    /// Bare value, applied to the request host's domain
    Value(String),
    /// Full form with an explicit domain and base64-encoded value
    Full {
        /// Cookie domain
        domain: String,
        /// Base64-encoded cookie value
        value: String,
    },
}

/// SameSite policy applied to an injected cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// Sent on all requests; requires the secure attribute
    None,
    /// Sent on same-site and top-level navigations only
    Lax,
}

/// A cookie ready for injection into the engine's cookie store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieEntry {
    /// Cookie name
    pub name: String,
    /// Normalized cookie domain
    pub domain: String,
    /// Decoded cookie value
    pub value: String,
    /// Secure attribute
    pub secure: bool,
    /// HttpOnly attribute
    pub http_only: bool,
    /// SameSite attribute
    pub same_site: SameSite,
}

impl CookieEntry {
    /// Derive an engine-ready entry from a parsed cookie spec.
    ///
    /// A spec without a domain inherits `fallback_domain` (the request
    /// host). An undecodable value fails the whole derivation; the caller's
    /// fail-closed policy then discards every cookie, never a subset.
    pub fn from_source(
        name: &str,
        source: &CookieSource,
        fallback_domain: &str,
    ) -> Result<Self, ParseError> {
        let (domain, value) = match source {
            CookieSource::Value(value) => (fallback_domain.to_string(), value.clone()),
            CookieSource::Full { domain, value } => {
                (domain.clone(), decode_value(name, value)?)
            }
        };

        let domain = normalize_domain(&domain);

        let (secure, http_only, same_site) = if name == LAX_COOKIE_NAME {
            (false, false, SameSite::Lax)
        } else {
            (true, true, SameSite::None)
        };

        Ok(Self {
            name: name.to_string(),
            domain,
            value,
            secure,
            http_only,
            same_site,
        })
    }
}

fn decode_value(name: &str, encoded: &str) -> Result<String, ParseError> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| ParseError::CookieValue {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| ParseError::CookieValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Normalize a cookie domain so the cookie applies across subdomains.
///
/// A domain with more than one label beyond the TLD is stripped to the
/// parent domain with a leading dot: `sub.market.csgo.com` becomes
/// `.csgo.com`. A bare parent domain like `csgo.com` is left unchanged.
pub fn normalize_domain(domain: &str) -> String {
    let trimmed = domain.trim_start_matches('.');
    let labels: Vec<&str> = trimmed.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() > 2 {
        format!(".{}.{}", labels[labels.len() - 2], labels[labels.len() - 1])
    } else {
        domain.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_subdomains() {
        assert_eq!(normalize_domain("sub.market.csgo.com"), ".csgo.com");
        assert_eq!(normalize_domain("market.csgo.com"), ".csgo.com");
    }

    #[test]
    fn test_normalize_keeps_parent_domain() {
        assert_eq!(normalize_domain("csgo.com"), "csgo.com");
        assert_eq!(normalize_domain(".csgo.com"), ".csgo.com");
    }

    #[test]
    fn test_normalize_single_label() {
        assert_eq!(normalize_domain("localhost"), "localhost");
    }

    #[test]
    fn test_bare_value_inherits_host() {
        let source = CookieSource::Value("token".to_string());
        let entry = CookieEntry::from_source("sessionid", &source, "market.csgo.com").unwrap();
        assert_eq!(entry.value, "token");
        assert_eq!(entry.domain, ".csgo.com");
        assert!(entry.secure);
        assert!(entry.http_only);
        assert_eq!(entry.same_site, SameSite::None);
    }

    #[test]
    fn test_full_form_decodes_base64() {
        let source = CookieSource::Full {
            domain: "csgo.com".to_string(),
            value: "c2VjcmV0".to_string(),
        };
        let entry = CookieEntry::from_source("sessionid", &source, "market.csgo.com").unwrap();
        assert_eq!(entry.value, "secret");
        assert_eq!(entry.domain, "csgo.com");
    }

    #[test]
    fn test_invalid_base64_fails() {
        let source = CookieSource::Full {
            domain: "csgo.com".to_string(),
            value: "%%not-base64%%".to_string(),
        };
        let err = CookieEntry::from_source("sessionid", &source, "market.csgo.com").unwrap_err();
        assert!(matches!(err, ParseError::CookieValue { .. }));
    }

    #[test]
    fn test_lax_exception_cookie() {
        let source = CookieSource::Value("abc123".to_string());
        let entry = CookieEntry::from_source(LAX_COOKIE_NAME, &source, "market.csgo.com").unwrap();
        assert_eq!(entry.same_site, SameSite::Lax);
        assert!(!entry.secure);
        assert!(!entry.http_only);
    }

    #[test]
    fn test_cookie_source_deserialize_both_forms() {
        let bare: CookieSource = serde_json::from_str("\"plain\"").unwrap();
        assert_eq!(bare, CookieSource::Value("plain".to_string()));

        let full: CookieSource =
            serde_json::from_str(r#"{"domain": "csgo.com", "value": "dg=="}"#).unwrap();
        assert_eq!(
            full,
            CookieSource::Full {
                domain: "csgo.com".to_string(),
                value: "dg==".to_string(),
            }
        );
    }
}
