//! The lifecycle bridge: one [`PreviewControl`] per embedding request.
//!
//! State machine: `Unattached → Attached → Attached+Loaded`. `destroy`
//! maps any state back to `Unattached`; a failed load leaves the state at
//! `Attached` with the loaded flag cleared. Operational failures (window
//! creation, COM instantiation, dispatch errors, calls before attach)
//! surface as `false` returns so the host can treat preview problems as
//! recoverable; nothing here panics.

use log::{debug, info, warn};

use crate::native::ViewerHost;

/// Embedded eDrawings preview instance.
///
/// Owns its container window and COM references exclusively; the parent
/// window handle passed to [`attach_to_window`](Self::attach_to_window) is
/// borrowed and never destroyed by this crate. Dropping the instance is
/// equivalent to [`destroy`](Self::destroy).
///
/// The attached state is the presence of the native host aggregate, so the
/// dispatch interface, control reference, and container window can only
/// exist together — partial attachment is unrepresentable.
#[derive(Default)]
pub struct PreviewControl {
    host: Option<ViewerHost>,
    file_loaded: bool,
}

impl PreviewControl {
    /// Create an unattached preview. COM is initialized as a side effect
    /// (once per process, lazily, apartment-threaded) so the first attach
    /// runs on a ready thread.
    pub fn new() -> Self {
        crate::native::ensure_com_initialized();
        Self::default()
    }

    /// Attach under `parent`, a pointer-width HWND value from the host.
    ///
    /// Idempotent success once attached. Returns `false` — with no partial
    /// state retained — when the handle is not a live window, the container
    /// window cannot be created, or the viewer control cannot be
    /// instantiated.
    pub fn attach_to_window(&mut self, parent: usize) -> bool {
        if self.host.is_some() {
            return true;
        }
        match ViewerHost::create(parent) {
            Ok(host) => {
                info!("[Preview] attached under parent {:#x}", host.parent_handle());
                self.host = Some(host);
                true
            }
            Err(err) => {
                warn!("[Preview] attach failed: {err:#}");
                false
            }
        }
    }

    /// Load a CAD file into the attached viewer through its late-bound
    /// `OpenDoc` method. Returns `false` without attempting any COM call
    /// when unattached. The call is synchronous and blocks until the
    /// control returns.
    pub fn load_file(&mut self, path: &str) -> bool {
        let Some(host) = self.host.as_ref() else {
            debug!("[Preview] load_file before attach: {path}");
            return false;
        };
        match host.open_document(path) {
            Ok(()) => {
                info!("[Preview] loaded {path}");
                self.file_loaded = true;
            }
            Err(err) => {
                warn!("[Preview] load failed for {path}: {err:#}");
                self.file_loaded = false;
            }
        }
        self.file_loaded
    }

    /// Move/resize the container window, leaving z-order and activation
    /// untouched. Returns `false` when unattached.
    pub fn set_bounds(&mut self, x: i32, y: i32, width: i32, height: i32) -> bool {
        let Some(host) = self.host.as_ref() else {
            return false;
        };
        match host.set_bounds(x, y, width, height) {
            Ok(()) => true,
            Err(err) => {
                warn!("[Preview] set_bounds failed: {err:#}");
                false
            }
        }
    }

    /// Make the container window visible. Returns `false` when unattached.
    pub fn show(&mut self) -> bool {
        match self.host.as_ref() {
            Some(host) => {
                host.show();
                true
            }
            None => false,
        }
    }

    /// Hide the container window. Returns `false` when unattached.
    pub fn hide(&mut self) -> bool {
        match self.host.as_ref() {
            Some(host) => {
                host.hide();
                true
            }
            None => false,
        }
    }

    /// Tear down the instance: the dispatch interface and the control
    /// reference are released (in that order), then the container window is
    /// destroyed, then both flags reset. Always succeeds and is safe to
    /// call repeatedly; runs implicitly on drop.
    pub fn destroy(&mut self) -> bool {
        if let Some(host) = self.host.take() {
            debug!(
                "[Preview] destroying viewer under parent {:#x}",
                host.parent_handle()
            );
        }
        self.file_loaded = false;
        true
    }

    /// Whether the most recent [`load_file`](Self::load_file) succeeded
    /// with no destroy since. Pure accessor.
    pub fn is_loaded(&self) -> bool {
        self.file_loaded
    }

    /// Whether the instance currently owns a container window and control.
    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }
}

impl Drop for PreviewControl {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_instance_is_unattached() {
        let preview = PreviewControl::new();
        assert!(!preview.is_attached());
        assert!(!preview.is_loaded());
    }

    #[test]
    fn load_before_attach_fails_without_com() {
        let mut preview = PreviewControl::new();
        assert!(!preview.load_file(r"C:\part.SLDPRT"));
        assert!(!preview.is_loaded());
    }

    #[test]
    fn geometry_ops_before_attach_fail() {
        let mut preview = PreviewControl::new();
        assert!(!preview.set_bounds(0, 0, 640, 480));
        assert!(!preview.show());
        assert!(!preview.hide());
    }

    #[test]
    fn attach_rejects_null_handle() {
        let mut preview = PreviewControl::new();
        assert!(!preview.attach_to_window(0));
        assert!(!preview.is_attached());
    }

    #[test]
    fn attach_rejects_dead_handle() {
        // 0xdead is never a live window handle on any supported target.
        let mut preview = PreviewControl::new();
        assert!(!preview.attach_to_window(0xdead));
        assert!(!preview.is_attached());
        assert!(!preview.load_file("anything.SLDDRW"));
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut preview = PreviewControl::new();
        assert!(preview.destroy());
        assert!(preview.destroy());
        assert!(!preview.is_attached());
        assert!(!preview.is_loaded());
    }

    #[test]
    fn destroy_after_failed_attach_keeps_initial_state() {
        let mut preview = PreviewControl::default();
        assert!(!preview.attach_to_window(0));
        assert!(preview.destroy());
        assert!(!preview.is_attached());
        assert!(!preview.is_loaded());
    }
}
