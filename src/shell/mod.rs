//! Browser shell
//!
//! A thin host around a windowed Chromium instance driven over CDP. The
//! shell owns the engine process, applies the process-wide proxy at launch,
//! and hands out pages that implement the session bootstrap seam.

pub mod controller;
pub mod engine;
pub mod navigation;
pub mod proxy_auth;

pub use controller::{PageHandle, ShellConfig, ShellController};
pub use navigation::{NavigationResult, PageNavigator};

/// User agent presented to the trading site.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36";
