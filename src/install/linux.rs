//! Linux scheme-handler registration
//!
//! Writes a desktop entry under the XDG applications directory, registers
//! it as the default handler for `x-scheme-handler/autotrader`, and
//! refreshes the desktop database. Only the desktop-entry write can fail
//! the install; the `xdg-mime`/`update-desktop-database` tools are invoked
//! best-effort because not every environment ships them.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use super::{launcher_path, Installer, InstallReport, APP_NAME};
use crate::error::RegistrationError;
use crate::launch::SCHEME;

/// Scheme-handler installer for Linux desktops
#[derive(Debug, Clone)]
pub struct LinuxInstaller {
    applications_dir: PathBuf,
    exec_command: String,
}

impl LinuxInstaller {
    /// Create an installer writing into an explicit applications directory.
    pub fn new(applications_dir: PathBuf, exec_command: String) -> Self {
        Self {
            applications_dir,
            exec_command,
        }
    }

    /// Create an installer for the current user's XDG applications
    /// directory and this process's executable.
    pub fn from_env() -> Result<Self, RegistrationError> {
        let applications_dir = dirs::data_dir()
            .ok_or(RegistrationError::NoApplicationsDir)?
            .join("applications");
        let path = launcher_path()?;
        let exec_command = if path.contains(' ') {
            format!("\"{path}\"")
        } else {
            path
        };
        Ok(Self::new(applications_dir, exec_command))
    }

    /// Path of the desktop entry this installer writes.
    pub fn desktop_file(&self) -> PathBuf {
        self.applications_dir.join(format!("{SCHEME}.desktop"))
    }

    fn write_desktop_entry(&self) -> Result<PathBuf, RegistrationError> {
        fs::create_dir_all(&self.applications_dir)?;

        let path = self.desktop_file();
        fs::write(&path, render_desktop_entry(&self.exec_command))?;

        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms)?;

        Ok(path)
    }

    fn register_mime_default(&self) {
        let desktop_id = format!("{SCHEME}.desktop");
        let mime_type = format!("x-scheme-handler/{SCHEME}");
        let result = Command::new("xdg-mime")
            .args(["default", desktop_id.as_str(), mime_type.as_str()])
            .output();
        match result {
            Ok(out) if out.status.success() => debug!("registered MIME default"),
            Ok(out) => warn!("xdg-mime default exited with {}", out.status),
            Err(err) => warn!("xdg-mime not available: {err}"),
        }
    }

    fn refresh_desktop_database(&self) {
        // The refresh tool is optional on many distributions.
        let result = Command::new("update-desktop-database")
            .arg(&self.applications_dir)
            .output();
        match result {
            Ok(out) if out.status.success() => debug!("desktop database refreshed"),
            Ok(out) => debug!("update-desktop-database exited with {}", out.status),
            Err(err) => debug!("update-desktop-database not available: {err}"),
        }
    }
}

impl Installer for LinuxInstaller {
    fn platform(&self) -> &'static str {
        "linux"
    }

    fn install(&self) -> Result<InstallReport, RegistrationError> {
        let path = self.write_desktop_entry()?;
        self.register_mime_default();
        self.refresh_desktop_database();

        Ok(InstallReport {
            platform: self.platform(),
            artifacts: vec![path.display().to_string()],
            launch_command: format!("{} %u", self.exec_command),
        })
    }
}

/// Render the desktop entry declaring this launcher as the scheme handler.
pub fn render_desktop_entry(exec_command: &str) -> String {
    format!(
        "[Desktop Entry]\n\
         Name={APP_NAME}\n\
         Exec={exec_command} %u\n\
         Icon=web-browser\n\
         Terminal=false\n\
         Type=Application\n\
         MimeType=x-scheme-handler/{SCHEME};\n\
         StartupNotify=true\n\
         Categories=Network;WebBrowser;\n"
    )
}

/// Mode bits of a path's permissions, for verifying the entry is executable.
pub fn mode_of(path: &Path) -> std::io::Result<u32> {
    Ok(fs::metadata(path)?.permissions().mode())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_entry_declares_handler() {
        let entry = render_desktop_entry("/usr/local/bin/autotrader");
        assert!(entry.starts_with("[Desktop Entry]\n"));
        assert!(entry.contains("Name=AutoTrader\n"));
        assert!(entry.contains("Exec=/usr/local/bin/autotrader %u\n"));
        assert!(entry.contains("MimeType=x-scheme-handler/autotrader;\n"));
        assert!(entry.contains("Type=Application\n"));
    }

    #[test]
    fn test_desktop_entry_quoted_exec() {
        let entry = render_desktop_entry("\"/opt/auto trader/autotrader\"");
        assert!(entry.contains("Exec=\"/opt/auto trader/autotrader\" %u\n"));
    }
}
