//! Placeholder viewer host for non-Windows targets.
//!
//! The embedder needs the Win32/COM runtime; elsewhere every attach
//! reports an operational failure and the state machine stays Unattached.

use anyhow::{Result, bail};

/// No COM runtime to initialize here.
pub(crate) fn ensure_com_initialized() {}

/// Uninhabited stand-in for the Win32 viewer host: no value of this type
/// can exist, so the instance methods below are statically unreachable.
pub(crate) enum ViewerHost {}

impl ViewerHost {
    pub(crate) fn create(_parent_handle: usize) -> Result<Self> {
        bail!("eDrawings embedding requires the Win32/COM runtime")
    }

    pub(crate) fn open_document(&self, _path: &str) -> Result<()> {
        match *self {}
    }

    pub(crate) fn set_bounds(&self, _x: i32, _y: i32, _width: i32, _height: i32) -> Result<()> {
        match *self {}
    }

    pub(crate) fn show(&self) {
        match *self {}
    }

    pub(crate) fn hide(&self) {
        match *self {}
    }

    pub(crate) fn parent_handle(&self) -> usize {
        match *self {}
    }
}
