//! Installation discovery and external-open delegation for the standalone
//! eDrawings application.
//!
//! Both helpers are pure queries from this crate's point of view: nothing
//! in the preview state machine changes, and [`open_externally`]'s `true`
//! only means the shell launch was initiated — not that the handler
//! actually opened the file.

use std::path::PathBuf;

use log::debug;
use once_cell::sync::Lazy;

use crate::constants::EDRAWINGS_INSTALL_PATHS;

static INSTALL_CANDIDATES: Lazy<Vec<PathBuf>> =
    Lazy::new(|| EDRAWINGS_INSTALL_PATHS.iter().map(PathBuf::from).collect());

/// Locate an eDrawings installation.
///
/// Probes the well-known install paths in order, then falls back to the
/// `InstallPath` registry value under
/// `HKLM\SOFTWARE\SolidWorks\eDrawings\General`. Returns the first hit, or
/// `None` when neither the paths nor the registry key are present. No side
/// effects.
pub fn check_installed() -> Option<PathBuf> {
    if let Some(path) = first_existing(INSTALL_CANDIDATES.as_slice()) {
        debug!("[Install] eDrawings found at {}", path.display());
        return Some(path);
    }
    imp::registry_install_path()
}

/// Hand `path` to the OS default file-association handler.
///
/// Returns whether the launch was initiated (the classic `ShellExecute`
/// greater-than-32 heuristic), not whether the handler succeeded in
/// opening the file — callers must not read `true` as "file was opened".
pub fn open_externally(path: &str) -> bool {
    imp::open_externally(path)
}

/// First candidate that exists on disk, in the given order.
fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.exists()).cloned()
}

#[cfg(windows)]
mod imp {
    use std::path::PathBuf;

    use log::{debug, warn};
    use windows::Win32::System::Registry::{HKEY_LOCAL_MACHINE, RRF_RT_REG_SZ, RegGetValueW};
    use windows::Win32::UI::Shell::ShellExecuteW;
    use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
    use windows::core::{PCWSTR, w};

    use crate::constants::{EDRAWINGS_REGISTRY_KEY, EDRAWINGS_REGISTRY_VALUE};
    use crate::native::win32::to_wide;

    /// Read the install directory recorded by the eDrawings installer.
    /// The value type is not checked beyond "string"; unreadable payloads
    /// are treated as absent.
    pub(super) fn registry_install_path() -> Option<PathBuf> {
        let mut buf = [0u16; 260];
        let mut size = (buf.len() * 2) as u32;
        let status = unsafe {
            RegGetValueW(
                HKEY_LOCAL_MACHINE,
                EDRAWINGS_REGISTRY_KEY,
                EDRAWINGS_REGISTRY_VALUE,
                RRF_RT_REG_SZ,
                None,
                Some(buf.as_mut_ptr().cast()),
                Some(&mut size),
            )
        };
        if status.is_err() {
            return None;
        }
        let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
        if len == 0 {
            return None;
        }
        let path = PathBuf::from(String::from_utf16_lossy(&buf[..len]));
        debug!("[Install] eDrawings registry InstallPath: {}", path.display());
        Some(path)
    }

    pub(super) fn open_externally(path: &str) -> bool {
        let wide = to_wide(path);
        let hinst = unsafe {
            ShellExecuteW(
                None,
                w!("open"),
                PCWSTR(wide.as_ptr()),
                PCWSTR::null(),
                PCWSTR::null(),
                SW_SHOWNORMAL,
            )
        };
        // Values <= 32 are ShellExecute error codes, not instance handles.
        let code = hinst.0 as isize;
        if code > 32 {
            debug!("[Install] external open launched for {path}");
            true
        } else {
            warn!("[Install] ShellExecuteW declined for {path} (code {code})");
            false
        }
    }
}

#[cfg(not(windows))]
mod imp {
    use std::path::PathBuf;

    use log::debug;

    pub(super) fn registry_install_path() -> Option<PathBuf> {
        None
    }

    pub(super) fn open_externally(path: &str) -> bool {
        debug!("[Install] external open unavailable on this platform: {path}");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_existing_respects_candidate_order() {
        let dir = tempfile::tempdir().unwrap();
        let second = dir.path().join("b.exe");
        let third = dir.path().join("c.exe");
        std::fs::write(&second, b"x").unwrap();
        std::fs::write(&third, b"x").unwrap();

        let candidates = vec![dir.path().join("a.exe"), second.clone(), third];
        assert_eq!(first_existing(&candidates), Some(second));
    }

    #[test]
    fn first_existing_none_when_all_absent() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = vec![dir.path().join("missing.exe")];
        assert_eq!(first_existing(&candidates), None);
    }

    // These assume a machine without an eDrawings install, which is
    // guaranteed off-Windows.
    #[cfg(not(windows))]
    #[test]
    fn check_installed_reports_absent() {
        assert_eq!(check_installed(), None);
    }

    #[cfg(not(windows))]
    #[test]
    fn open_externally_reports_launch_failure() {
        assert!(!open_externally("no-such-file.SLDPRT"));
    }
}
