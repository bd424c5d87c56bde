//! Error types for the AutoTrader shell
//!
//! This module provides the error type hierarchy using `thiserror`,
//! with one sub-enum per component folded into the top-level [`Error`].

use thiserror::Error;

/// The main error type for AutoTrader shell operations
#[derive(Error, Debug)]
pub enum Error {
    /// Scheme URL / cookie payload parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Proxy descriptor errors
    #[error("Proxy error: {0}")]
    Proxy(#[from] ProxyFormatError),

    /// Browser shell lifecycle errors
    #[error("Shell error: {0}")]
    Shell(#[from] ShellError),

    /// Scheme-handler registration errors
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ChromiumOxide errors
    #[error("CDP error: {0}")]
    Cdp(String),
}

/// Scheme URL parsing errors
///
/// Any of these fails the whole parse; the launcher then falls back to the
/// default marketplace target with no cookies and no proxy.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The URL could not be decomposed at all
    #[error("Invalid scheme URL: {0}")]
    InvalidUrl(String),

    /// The scheme URL carries no host
    #[error("Scheme URL has no host")]
    MissingHost,

    /// The `cookies` query parameter is not valid JSON
    #[error("Cookie payload is not valid JSON: {0}")]
    CookieJson(String),

    /// A cookie value is not valid base64-encoded UTF-8
    #[error("Cookie {name} has an undecodable value: {reason}")]
    CookieValue {
        /// Name of the offending cookie
        name: String,
        /// Decode failure detail
        reason: String,
    },
}

/// Proxy descriptor errors
///
/// A proxy URL must carry all four of user, password, host, and port.
/// There is no partial-proxy mode.
#[derive(Error, Debug)]
pub enum ProxyFormatError {
    /// The proxy string is not a parseable URL
    #[error("Invalid proxy URL: {0}")]
    InvalidUrl(String),

    /// No host component
    #[error("Proxy URL has no host")]
    MissingHost,

    /// No port component
    #[error("Proxy URL has no port")]
    MissingPort,

    /// Missing username or password
    #[error("Proxy URL has no user:password credentials")]
    MissingCredentials,
}

/// Browser shell lifecycle and control errors
#[derive(Error, Debug)]
pub enum ShellError {
    /// Failed to launch the browser process
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser configuration error
    #[error("Invalid browser configuration: {0}")]
    ConfigError(String),

    /// Failed to create the host page
    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),

    /// Timed out waiting for the engine
    #[error("Browser operation timed out after {0}ms")]
    Timeout(u64),
}

/// Scheme-handler registration errors
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Filesystem write failed (desktop entry, permissions)
    #[error("Registration I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Registry write failed
    #[error("Registry write failed: {0}")]
    Registry(String),

    /// The launcher executable path could not be determined
    #[error("Cannot determine launcher executable: {0}")]
    NoExecutable(String),

    /// The per-user applications directory could not be located
    #[error("Cannot locate the applications directory")]
    NoApplicationsDir,

    /// Registration is only supported on Linux and Windows
    #[error("Scheme registration is not supported on {0}")]
    UnsupportedPlatform(String),
}

/// Result type alias for AutoTrader shell operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a CDP error from a string
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }
}

/// Convert chromiumoxide errors
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}
