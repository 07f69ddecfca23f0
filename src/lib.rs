//! Embed the SOLIDWORKS eDrawings ActiveX viewer as a native child window.
//!
//! - Initializes COM (STA) once, lazily, before the first control instance
//! - Creates an owned container HWND under the host-supplied parent window
//! - Instantiates the viewer COM object in-process and drives it through
//!   late-bound `IDispatch` calls (`OpenDoc`)
//! - Tears everything down deterministically: dispatch, control, window,
//!   in that order
//!
//! There is no viewing, rendering, or CAD-format logic here; all of that
//! lives inside the opaque third-party control. See [`PreviewControl`] for
//! the lifecycle operations and [`check_installed`] / [`open_externally`]
//! for the queries around the standalone eDrawings application.

mod constants;
mod install;
mod native;
mod preview;

pub use install::{check_installed, open_externally};
pub use preview::PreviewControl;

use std::sync::Once;

use env_logger::{Builder, Env};

// A host may tear previews down and open new ones in the same process;
// env_logger errors on a second init, so it is gated on a static Once.
static LOGGER_INIT: Once = Once::new();

/// Initialize `env_logger` for hosts that bring no logger of their own.
/// Safe to call any number of times; `RUST_LOG` overrides the default
/// `info` filter.
pub fn init_logging() {
    LOGGER_INIT.call_once(|| {
        Builder::from_env(Env::default().default_filter_or("info")).init();
    });
}
