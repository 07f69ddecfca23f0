//! Platform seam for the native viewer host.
//!
//! Windows gets the real Win32/COM implementation; every other target gets
//! an uninhabited placeholder so the lifecycle state machine (and its
//! tests) still compile and run there.

#[cfg(windows)]
pub(crate) mod win32;
#[cfg(windows)]
pub(crate) use win32::{ViewerHost, ensure_com_initialized};

#[cfg(not(windows))]
mod unsupported;
#[cfg(not(windows))]
pub(crate) use unsupported::{ViewerHost, ensure_com_initialized};
