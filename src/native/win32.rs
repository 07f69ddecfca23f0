//! Win32/COM host for the embedded viewer: the owned container window, the
//! ActiveX control instance, and the late-bound dispatch calls into it.
//!
//! Creation runs the bridge steps in order (validate parent → container
//! window → COM instantiation → `IDispatch` cast) and releases every
//! partially created resource on any failure. Teardown is pure RAII: the
//! field declaration order of [`ViewerHost`] releases the dispatch
//! interface, then the control's `IUnknown`, then the container window.

use std::ffi::{OsStr, c_void};
use std::os::windows::ffi::OsStrExt;
use std::sync::Once;

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use windows::Win32::Foundation::{
    GetLastError, HWND, LPARAM, LRESULT, RPC_E_CHANGED_MODE, WPARAM,
};
use windows::Win32::Graphics::Gdi::HBRUSH;
use windows::Win32::System::Com::{
    CLSCTX_INPROC_SERVER, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx,
    DISPATCH_METHOD, DISPPARAMS, IDispatch,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, IDC_ARROW, IsWindow, LoadCursorW,
    RegisterClassW, SW_HIDE, SW_SHOW, SWP_NOACTIVATE, SWP_NOZORDER, SetWindowPos, ShowWindow,
    WINDOW_EX_STYLE, WNDCLASSW, WS_CHILD, WS_CLIPCHILDREN, WS_VISIBLE,
};
use windows::core::{BSTR, GUID, IUnknown, Interface, PCWSTR, VARIANT};

use crate::constants;

/// LCID passed to `GetIDsOfNames`/`Invoke` (`LOCALE_USER_DEFAULT`).
const LOCALE_USER_DEFAULT: u32 = 0x0400;

static COM_INIT: Once = Once::new();
static REGISTER_CLASS_ONCE: Once = Once::new();

/// Initialize COM apartment-threaded for this process, once, lazily.
///
/// Apartment init is per-thread; the host is expected to drive all preview
/// instances from its single UI thread. There is no matching
/// `CoUninitialize` — the apartment lives until the process exits.
pub(crate) fn ensure_com_initialized() {
    COM_INIT.call_once(|| {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        if hr.is_ok() {
            info!("[ViewerHost] COM initialized (STA)");
        } else if hr == RPC_E_CHANGED_MODE {
            warn!("[ViewerHost] COM already initialized with a different threading model");
        } else {
            warn!("[ViewerHost] COM init failed: {hr:?}");
        }
    });
}

/// Registers the container window class (once per process). A failure is
/// logged and left for `CreateWindowExW` to report.
fn register_container_class() {
    REGISTER_CLASS_ONCE.call_once(|| unsafe {
        let instance = GetModuleHandleW(None).unwrap_or_default();
        let wc = WNDCLASSW {
            hInstance: instance.into(),
            lpszClassName: constants::CONTAINER_CLASS_NAME,
            lpfnWndProc: Some(container_wnd_proc),
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            hbrBackground: HBRUSH::default(),
            ..Default::default()
        };
        if RegisterClassW(&wc) == 0 {
            warn!("[ViewerHost] RegisterClassW failed: {:?}", GetLastError());
        } else {
            debug!("[ViewerHost] container window class registered");
        }
    });
}

/// The container never paints or handles input itself; the hosted control
/// covers its entire client area.
unsafe extern "system" fn container_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

/// Build a null-terminated UTF-16 string for Win32 APIs.
pub(crate) fn to_wide(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(Some(0)).collect()
}

/// Owned native child window isolating the control's rendering surface
/// from the host's window tree. Destroyed on drop.
struct ContainerWindow(HWND);

impl ContainerWindow {
    /// Create the `WS_CHILD` container under `parent`, visible, clipping
    /// its hosted control.
    fn create(parent: HWND) -> Result<Self> {
        register_container_class();
        let instance = unsafe { GetModuleHandleW(None) }.context("resolving module handle")?;
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                constants::CONTAINER_CLASS_NAME,
                PCWSTR::null(),
                WS_CHILD | WS_VISIBLE | WS_CLIPCHILDREN,
                0,
                0,
                constants::DEFAULT_CONTAINER_WIDTH,
                constants::DEFAULT_CONTAINER_HEIGHT,
                parent,
                None,
                instance,
                None,
            )
        }
        .context("creating the viewer container window")?;
        debug!("[ViewerHost] container window {hwnd:?} created");
        Ok(Self(hwnd))
    }

    /// Move/resize without touching z-order or activation.
    fn set_bounds(&self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        unsafe { SetWindowPos(self.0, None, x, y, width, height, SWP_NOZORDER | SWP_NOACTIVATE) }
            .context("repositioning the viewer container window")
    }

    fn show(&self, visible: bool) {
        let cmd = if visible { SW_SHOW } else { SW_HIDE };
        unsafe {
            let _ = ShowWindow(self.0, cmd);
        }
    }
}

impl Drop for ContainerWindow {
    fn drop(&mut self) {
        // Release failures are not modeled; the handle is ours exclusively.
        unsafe {
            let _ = DestroyWindow(self.0);
        }
    }
}

/// Live bridge to one embedded viewer: container window plus the control's
/// COM references. Exists only in the fully attached state.
pub(crate) struct ViewerHost {
    // Field order is teardown order: dispatch, then the control's IUnknown,
    // then the container window.
    dispatch: IDispatch,
    #[allow(dead_code)] // held for its reference; all calls go through `dispatch`
    control: IUnknown,
    container: ContainerWindow,
    parent: usize,
}

impl ViewerHost {
    /// Run the attach sequence against the raw parent handle supplied by
    /// the host. Any failure unwinds the partially created resources (COM
    /// references before the window) before the error is returned.
    pub(crate) fn create(parent_handle: usize) -> Result<Self> {
        ensure_com_initialized();

        let parent = HWND(parent_handle as *mut c_void);
        if parent_handle == 0 || !unsafe { IsWindow(parent) }.as_bool() {
            bail!("parent handle {parent_handle:#x} is not a live window");
        }

        let container = ContainerWindow::create(parent)?;

        // `container` drops (destroying its window) if either COM step
        // below fails, so no partial state can escape this function.
        let control: IUnknown = unsafe {
            CoCreateInstance(
                &constants::CLSID_EMODEL_VIEW_CONTROL,
                None,
                CLSCTX_INPROC_SERVER,
            )
        }
        .context("instantiating the eDrawings viewer control")?;

        let dispatch: IDispatch = control
            .cast()
            .context("querying the viewer control for IDispatch")?;

        debug!("[ViewerHost] viewer control instantiated under parent {parent_handle:#x}");
        Ok(Self {
            dispatch,
            control,
            container,
            parent: parent_handle,
        })
    }

    /// Invoke the control's `OpenDoc` dispatch method with `path` as its
    /// single `BSTR` argument.
    ///
    /// The DISPID is resolved by name on every call — loads are infrequent
    /// and the control's identity is stable for the life of this host. The
    /// invoke is synchronous and unbounded: a hung control blocks the
    /// calling thread.
    pub(crate) fn open_document(&self, path: &str) -> Result<()> {
        let mut dispid = 0i32;
        unsafe {
            self.dispatch.GetIDsOfNames(
                &GUID::zeroed(),
                &constants::OPEN_DOC_METHOD,
                1,
                LOCALE_USER_DEFAULT,
                &mut dispid,
            )
        }
        .context("resolving the OpenDoc dispatch id")?;

        let mut arg = VARIANT::from(BSTR::from(path));
        let params = DISPPARAMS {
            rgvarg: &mut arg,
            cArgs: 1,
            ..Default::default()
        };
        let mut result = VARIANT::default();
        unsafe {
            self.dispatch.Invoke(
                dispid,
                &GUID::zeroed(),
                LOCALE_USER_DEFAULT,
                DISPATCH_METHOD,
                &params,
                Some(&mut result as *mut _),
                None,
                None,
            )
        }
        .with_context(|| format!("invoking OpenDoc for {path}"))?;
        Ok(())
    }

    pub(crate) fn set_bounds(&self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        self.container.set_bounds(x, y, width, height)
    }

    pub(crate) fn show(&self) {
        self.container.show(true);
    }

    pub(crate) fn hide(&self) {
        self.container.show(false);
    }

    /// The borrowed parent handle this host was attached under.
    pub(crate) fn parent_handle(&self) -> usize {
        self.parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::UI::WindowsAndMessaging::GetDesktopWindow;

    #[test]
    fn container_window_lifecycle() {
        let parent = unsafe { GetDesktopWindow() };
        let container = ContainerWindow::create(parent).expect("container under the desktop");
        assert!(unsafe { IsWindow(container.0) }.as_bool());

        container.set_bounds(10, 10, 200, 150).expect("set_bounds");
        container.show(false);
        container.show(true);

        let hwnd = container.0;
        drop(container);
        assert!(!unsafe { IsWindow(hwnd) }.as_bool());
    }

    #[test]
    fn to_wide_appends_terminator() {
        let wide = to_wide("ab");
        assert_eq!(wide, vec![b'a' as u16, b'b' as u16, 0]);
    }
}
