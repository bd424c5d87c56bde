//! Installer tests (Linux)
//!
//! Registration writes one desktop entry; these verify its content, the
//! executable bit, and that re-running produces identical state. The
//! `xdg-mime`/`update-desktop-database` steps are best-effort and may just
//! log in the test environment.

#![cfg(target_os = "linux")]

use std::fs;

use tempfile::TempDir;

use autotrader_shell::install::linux::{mode_of, render_desktop_entry, LinuxInstaller};
use autotrader_shell::install::Installer;

#[test]
fn desktop_entry_registers_the_scheme() {
    let entry = render_desktop_entry("/usr/local/bin/autotrader");
    assert!(entry.contains("MimeType=x-scheme-handler/autotrader;\n"));
    assert!(entry.contains("Exec=/usr/local/bin/autotrader %u\n"));
    assert!(entry.contains("Name=AutoTrader\n"));
}

#[test]
fn install_writes_executable_desktop_entry() {
    let dir = TempDir::new().unwrap();
    let installer = LinuxInstaller::new(
        dir.path().to_path_buf(),
        "/usr/local/bin/autotrader".to_string(),
    );

    let report = installer.install().unwrap();

    assert_eq!(report.platform, "linux");
    assert_eq!(report.launch_command, "/usr/local/bin/autotrader %u");

    let path = installer.desktop_file();
    assert_eq!(report.artifacts, vec![path.display().to_string()]);
    assert!(path.ends_with("autotrader.desktop"));

    let mode = mode_of(&path).unwrap();
    assert_eq!(mode & 0o777, 0o755);
}

#[test]
fn install_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let installer = LinuxInstaller::new(
        dir.path().to_path_buf(),
        "/usr/local/bin/autotrader".to_string(),
    );

    let first = installer.install().unwrap();
    let content_after_first = fs::read_to_string(installer.desktop_file()).unwrap();

    let second = installer.install().unwrap();
    let content_after_second = fs::read_to_string(installer.desktop_file()).unwrap();

    assert_eq!(first, second);
    assert_eq!(content_after_first, content_after_second);
}

#[test]
fn install_creates_missing_applications_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("share").join("applications");
    let installer = LinuxInstaller::new(nested.clone(), "/usr/local/bin/autotrader".to_string());

    installer.install().unwrap();

    assert!(nested.join("autotrader.desktop").exists());
}
