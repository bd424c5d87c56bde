//! Windows scheme-handler registration
//!
//! Writes the two keys under the current user's class root: the scheme's
//! protocol declaration and the open command pointing at this launcher.
//! `HKEY_CURRENT_USER` needs no elevation and re-running simply overwrites
//! the same values.

use winreg::enums::HKEY_CURRENT_USER;
use winreg::RegKey;

use super::{launcher_path, Installer, InstallReport, APP_NAME};
use crate::error::RegistrationError;
use crate::launch::SCHEME;

/// Scheme-handler installer for Windows
#[derive(Debug, Clone)]
pub struct WindowsInstaller {
    exec_command: String,
}

impl WindowsInstaller {
    /// Create an installer registering an explicit launcher command.
    pub fn new(exec_command: String) -> Self {
        Self { exec_command }
    }

    /// Create an installer for this process's executable.
    pub fn from_env() -> Result<Self, RegistrationError> {
        Ok(Self::new(launcher_path()?))
    }
}

impl Installer for WindowsInstaller {
    fn platform(&self) -> &'static str {
        "windows"
    }

    fn install(&self) -> Result<InstallReport, RegistrationError> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let class_path = format!(r"Software\Classes\{SCHEME}");
        let command_path = format!(r"{class_path}\shell\open\command");

        let (class_key, _) = hkcu
            .create_subkey(&class_path)
            .map_err(|e| RegistrationError::Registry(e.to_string()))?;
        class_key
            .set_value("", &format!("URL:{APP_NAME} Protocol"))
            .map_err(|e| RegistrationError::Registry(e.to_string()))?;
        class_key
            .set_value("URL Protocol", &"")
            .map_err(|e| RegistrationError::Registry(e.to_string()))?;

        let (command_key, _) = hkcu
            .create_subkey(&command_path)
            .map_err(|e| RegistrationError::Registry(e.to_string()))?;
        let command = open_command(&self.exec_command);
        command_key
            .set_value("", &command)
            .map_err(|e| RegistrationError::Registry(e.to_string()))?;

        Ok(InstallReport {
            platform: self.platform(),
            artifacts: vec![
                format!(r"HKCU\{class_path}"),
                format!(r"HKCU\{command_path}"),
            ],
            launch_command: command,
        })
    }
}

/// The registry open command: launcher with the scheme URL appended.
pub fn open_command(exec_command: &str) -> String {
    format!("\"{exec_command}\" \"%1\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_command_appends_placeholder() {
        let command = open_command(r"C:\Program Files\AutoTrader\autotrader.exe");
        assert!(command.ends_with("\"%1\""));
        assert!(command.contains("autotrader.exe"));
    }
}
