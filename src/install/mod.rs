//! OS scheme-handler registration
//!
//! Makes the OS treat `autotrader://` URLs as openable by this executable:
//! a desktop entry plus MIME default on Linux, two registry keys on
//! Windows. Registration is idempotent and user-triggered; failures are
//! reported, never rolled back or retried.

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "windows")]
pub mod windows;

use std::env;

use crate::error::RegistrationError;

/// Human-facing application name used in the registered association
pub const APP_NAME: &str = "AutoTrader";

/// What an installation wrote and how the OS will invoke the launcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Platform the association was written for
    pub platform: &'static str,
    /// Files or registry keys that were written
    pub artifacts: Vec<String>,
    /// The command the OS will run with the scheme URL appended
    pub launch_command: String,
}

/// A platform's scheme-handler installer
///
/// One implementation per supported OS, selected once at runtime by
/// [`platform_installer`]. `install` is safe to re-run.
pub trait Installer {
    /// Platform label for reporting
    fn platform(&self) -> &'static str;

    /// Write the scheme association.
    fn install(&self) -> Result<InstallReport, RegistrationError>;
}

/// Select the installer for the current OS.
///
/// Unsupported platforms fail immediately; there is no browser fallback
/// for registration.
pub fn platform_installer() -> Result<Box<dyn Installer>, RegistrationError> {
    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(linux::LinuxInstaller::from_env()?))
    }
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(windows::WindowsInstaller::from_env()?))
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Err(RegistrationError::UnsupportedPlatform(
            env::consts::OS.to_string(),
        ))
    }
}

/// Path of the launcher executable the OS association points at.
///
/// Quoting is platform-specific: the desktop entry quotes only when the
/// path contains spaces, the registry command always quotes.
pub fn launcher_path() -> Result<String, RegistrationError> {
    let exe = env::current_exe()
        .map_err(|e| RegistrationError::NoExecutable(e.to_string()))?;
    Ok(exe.display().to_string())
}
