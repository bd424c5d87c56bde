//! Launch argument decoding
//!
//! Translates the custom-scheme URL handed over by the OS into the
//! navigation target and the session state to apply. The one policy
//! decision lives in [`resolve`]: any failure while decoding falls closed
//! to the default marketplace target with no cookies and no proxy. A bad
//! payload never produces a partially configured session.

pub mod cookies;
pub mod proxy;
pub mod request;

pub use cookies::{CookieEntry, CookieSource, SameSite, LAX_COOKIE_NAME};
pub use proxy::ProxyConfig;
pub use request::{LaunchRequest, DEFAULT_TARGET_URL, SCHEME, SCHEME_PREFIX};

use tracing::warn;

use crate::error::Result;
use crate::session::SessionConfig;

/// Resolve a launch argument into a request and its session state.
///
/// Fail-closed: on any parse or translation error the cause is logged and
/// the default marketplace target is returned with an empty session.
pub fn resolve(raw: &str) -> (LaunchRequest, SessionConfig) {
    match try_resolve(raw) {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!("falling back to default target: {err}");
            (LaunchRequest::default_target(), SessionConfig::default())
        }
    }
}

fn try_resolve(raw: &str) -> Result<(LaunchRequest, SessionConfig)> {
    let request = LaunchRequest::parse(raw)?;
    let session = SessionConfig::from_request(&request)?;
    Ok((request, session))
}
