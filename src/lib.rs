//! AutoTrader Shell - Scheme-Handler Launcher for the Marketplace
//!
//! This crate implements a desktop launcher invoked through a custom
//! `autotrader://` URL scheme. The scheme URL carries the navigation
//! target plus optional session cookies and an HTTP proxy; the launcher
//! decodes it, boots a browser window, and applies the session state
//! before the first page load. Run without a scheme URL, it registers
//! itself as the OS-level handler for the scheme.
//!
//! # Architecture
//!
//! ```text
//! autotrader://host/path?cookies=...&proxy=...
//!        │
//!        ▼
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ launch       │ ──▶ │ session      │ ──▶ │ shell          │
//! │ parse/decode │     │ bootstrap    │     │ Chromium (CDP) │
//! └─────────────┘     └──────────────┘     └───────────────┘
//!
//! (no scheme URL) ──▶ install: desktop entry / registry keys
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use autotrader_shell::launch;
//! use autotrader_shell::session;
//! use autotrader_shell::shell::{ShellConfig, ShellController};
//!
//! #[tokio::main]
//! async fn main() -> autotrader_shell::Result<()> {
//!     let (request, config) = launch::resolve("autotrader://market.csgo.com/trade");
//!
//!     let controller = ShellController::launch(
//!         ShellConfig::builder().proxy(config.proxy.clone()).build(),
//!     )
//!     .await?;
//!     let page = controller.new_page().await?;
//!
//!     session::bootstrap(&page, &config, &request.target_url).await?;
//!     controller.run_until_closed().await
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod install;
pub mod launch;
pub mod session;
pub mod shell;

// Re-exports for convenience
pub use error::{Error, Result};
pub use launch::{CookieEntry, LaunchRequest, ProxyConfig, SameSite};
pub use session::{configure_session, SessionConfig, WebEngine};
pub use shell::{ShellConfig, ShellController};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
