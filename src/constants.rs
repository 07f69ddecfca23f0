//! Fixed identity constants for the eDrawings integration.

/// Well-known eDrawings install locations, probed in order by
/// [`check_installed`](crate::check_installed). Order only affects which
/// path gets reported; any hit is an equivalent installation.
pub const EDRAWINGS_INSTALL_PATHS: [&str; 4] = [
    r"C:\Program Files\SOLIDWORKS Corp\eDrawings\eDrawings.exe",
    r"C:\Program Files\eDrawings\eDrawings.exe",
    r"C:\Program Files (x86)\eDrawings\eDrawings.exe",
    r"C:\Program Files\SOLIDWORKS Corp\SOLIDWORKS\eDrawings\eDrawings.exe",
];

#[cfg(windows)]
pub use win::*;

#[cfg(windows)]
mod win {
    use windows::core::{GUID, PCWSTR, w};

    /// CLSID of the eDrawings model-view ActiveX control,
    /// `{22945A69-1191-4DCF-9E6F-409BDE94D101}`.
    pub const CLSID_EMODEL_VIEW_CONTROL: GUID =
        GUID::from_u128(0x22945A69_1191_4DCF_9E6F_409BDE94D101);

    /// Class name registered for the owned container window.
    pub const CONTAINER_CLASS_NAME: PCWSTR = w!("EDrawingsContainer");

    /// Dispatch name of the control's open-document method.
    pub const OPEN_DOC_METHOD: PCWSTR = w!("OpenDoc");

    /// Registry fallback for installs outside the well-known paths.
    pub const EDRAWINGS_REGISTRY_KEY: PCWSTR = w!(r"SOFTWARE\SolidWorks\eDrawings\General");

    /// Value under [`EDRAWINGS_REGISTRY_KEY`] naming the install directory.
    pub const EDRAWINGS_REGISTRY_VALUE: PCWSTR = w!("InstallPath");

    /// Container size before the host issues its first `set_bounds`.
    pub const DEFAULT_CONTAINER_WIDTH: i32 = 400;

    /// See [`DEFAULT_CONTAINER_WIDTH`].
    pub const DEFAULT_CONTAINER_HEIGHT: i32 = 300;
}
