/*
 * Win32 implementation of the native decoration bridge.
 *
 * Installing decorations subclasses the top-level window: the original window
 * procedure is saved, and the replacement handles WM_NCCALCSIZE (the client
 * area covers the whole window, so the standard caption disappears),
 * WM_NCHITTEST (caption drag area and resize grips follow the insets pushed by
 * the title pane layout) and WM_ERASEBKGND (fills with the configured window
 * background). Everything else is forwarded to the original procedure.
 *
 * Per-window state lives in a thread-local map keyed by HWND. All calls come
 * from the UI thread that owns the windows, so no locking is involved.
 */

use super::NativeDecorationBridge;
use super::hit_test::{HitRegion, classify_hit};
use crate::error::{ChromeError, Result as ChromeResult};
use crate::styling_primitives::Color;
use crate::title_pane::layout::ContentInsets;
use crate::types::WindowHandle;

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::c_void;

use windows::Win32::{
    Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM},
    Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmExtendFrameIntoClientArea, DwmSetWindowAttribute},
    Graphics::Gdi::{CreateSolidBrush, DeleteObject, FillRect, HBRUSH, HDC, InvalidateRect},
    System::LibraryLoader::{GetModuleHandleW, GetProcAddress},
    System::SystemInformation::OSVERSIONINFOW,
    UI::Controls::MARGINS,
    UI::WindowsAndMessaging::{
        CallWindowProcW, DefWindowProcW, GWL_STYLE, GWLP_WNDPROC, GetClientRect,
        GetSystemMetrics, GetWindowLongPtrW, GetWindowRect, HTBOTTOM, HTBOTTOMLEFT,
        HTBOTTOMRIGHT, HTCAPTION, HTCLIENT, HTLEFT, HTRIGHT, HTTOP, HTTOPLEFT, HTTOPRIGHT,
        IsZoomed, NCCALCSIZE_PARAMS, SHOW_WINDOW_CMD, SM_CXFRAME, SM_CXPADDEDBORDER,
        SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE,
        SWP_NOSIZE, SWP_NOZORDER,
        SetWindowLongPtrW, SetWindowPos, ShowWindow, WM_ERASEBKGND, WM_NCCALCSIZE,
        WM_NCDESTROY, WM_NCHITTEST, WNDPROC, WS_MAXIMIZEBOX, WS_THICKFRAME,
    },
};
use windows::core::{s, w};

const DWMWA_USE_IMMERSIVE_DARK_MODE: DWMWINDOWATTRIBUTE = DWMWINDOWATTRIBUTE(20);
const DWMWA_CAPTION_COLOR: DWMWINDOWATTRIBUTE = DWMWINDOWATTRIBUTE(35);

#[derive(Debug)]
struct DecorationData {
    previous_proc: isize,
    original_style: isize,
    insets: ContentInsets,
    resizable: bool,
    background: Option<HBRUSH>,
}

thread_local! {
    static DECORATED_WINDOWS: RefCell<HashMap<isize, DecorationData>> =
        RefCell::new(HashMap::new());
}

fn hwnd_of(handle: WindowHandle) -> HWND {
    HWND(handle.raw() as *mut c_void)
}

/*
 * Creates a Win32 COLORREF from the platform-agnostic `Color` struct.
 * Win32 expects colors in BGR format.
 */
pub(crate) fn color_to_colorref(color: Color) -> COLORREF {
    COLORREF((color.r as u32) | ((color.g as u32) << 8) | ((color.b as u32) << 16))
}

fn hit_region_code(region: HitRegion) -> u32 {
    match region {
        HitRegion::Client => HTCLIENT,
        HitRegion::Caption => HTCAPTION,
        HitRegion::Left => HTLEFT,
        HitRegion::Right => HTRIGHT,
        HitRegion::Top => HTTOP,
        HitRegion::Bottom => HTBOTTOM,
        HitRegion::TopLeft => HTTOPLEFT,
        HitRegion::TopRight => HTTOPRIGHT,
        HitRegion::BottomLeft => HTBOTTOMLEFT,
        HitRegion::BottomRight => HTBOTTOMRIGHT,
    }
}

fn resize_border_thickness() -> i32 {
    unsafe { GetSystemMetrics(SM_CXFRAME) + GetSystemMetrics(SM_CXPADDEDBORDER) }
}

fn with_data<R>(hwnd: HWND, f: impl FnOnce(&mut DecorationData) -> R) -> Option<R> {
    DECORATED_WINDOWS.with(|map| map.borrow_mut().get_mut(&(hwnd.0 as isize)).map(f))
}

unsafe fn forward(
    previous: isize,
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        if previous != 0 {
            let prev_proc: WNDPROC = std::mem::transmute(previous);
            CallWindowProcW(prev_proc, hwnd, msg, wparam, lparam)
        } else {
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
    }
}

unsafe fn handle_nc_hit_test(
    hwnd: HWND,
    lparam: LPARAM,
    insets: ContentInsets,
    resizable: bool,
) -> LRESULT {
    let screen_x = (lparam.0 & 0xFFFF) as i16 as i32;
    let screen_y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
    let mut wr = RECT::default();
    if unsafe { GetWindowRect(hwnd, &mut wr) }.is_err() {
        return LRESULT(HTCLIENT as isize);
    }
    let maximized = unsafe { IsZoomed(hwnd) }.as_bool();
    let region = classify_hit(
        screen_x - wr.left,
        screen_y - wr.top,
        wr.right - wr.left,
        wr.bottom - wr.top,
        insets,
        resizable && !maximized,
        resize_border_thickness(),
    );
    LRESULT(hit_region_code(region) as isize)
}

/// Subclass window procedure installed by `Win32DecorationBridge::install`.
unsafe extern "system" fn decoration_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let Some((previous, insets, resizable, background)) = with_data(hwnd, |data| {
        (data.previous_proc, data.insets, data.resizable, data.background)
    }) else {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    };

    match msg {
        WM_NCCALCSIZE if wparam.0 != 0 => {
            // Maximized windows extend past the monitor by the frame thickness.
            if unsafe { IsZoomed(hwnd) }.as_bool() {
                let params = unsafe { &mut *(lparam.0 as *mut NCCALCSIZE_PARAMS) };
                let border = resize_border_thickness();
                let client = &mut params.rgrc[0];
                client.left += border;
                client.top += border;
                client.right -= border;
                client.bottom -= border;
            }
            LRESULT(0)
        }
        WM_NCHITTEST => unsafe { handle_nc_hit_test(hwnd, lparam, insets, resizable) },
        WM_ERASEBKGND => match background {
            Some(brush) => {
                let mut rc = RECT::default();
                unsafe {
                    if GetClientRect(hwnd, &mut rc).is_ok() {
                        FillRect(HDC(wparam.0 as *mut c_void), &rc, brush);
                    }
                }
                LRESULT(1)
            }
            None => unsafe { forward(previous, hwnd, msg, wparam, lparam) },
        },
        WM_NCDESTROY => {
            let result = unsafe { forward(previous, hwnd, msg, wparam, lparam) };
            release_window_data(hwnd);
            result
        }
        _ => unsafe { forward(previous, hwnd, msg, wparam, lparam) },
    }
}

/// What has to be written back to a window when its decorations go away.
#[derive(Debug, Clone, Copy)]
struct ReleasedWindow {
    previous_proc: isize,
    original_style: isize,
}

fn release_window_data(hwnd: HWND) -> Option<ReleasedWindow> {
    let data = DECORATED_WINDOWS.with(|map| map.borrow_mut().remove(&(hwnd.0 as isize)))?;
    if let Some(brush) = data.background {
        unsafe {
            let _ = DeleteObject(brush.into());
        }
    }
    Some(ReleasedWindow {
        previous_proc: data.previous_proc,
        original_style: data.original_style,
    })
}

/// Puts back the window procedure and the style bits `set_resizable` may have rewritten.
fn restore_window(hwnd: HWND, released: ReleasedWindow) {
    unsafe {
        if released.previous_proc != 0 {
            SetWindowLongPtrW(hwnd, GWLP_WNDPROC, released.previous_proc);
        }
        SetWindowLongPtrW(hwnd, GWL_STYLE, released.original_style);
    }
}

/// Window style with the resize border and maximize box switched on or off.
fn style_with_resizable(style: u32, resizable: bool) -> u32 {
    let bits = WS_THICKFRAME.0 | WS_MAXIMIZEBOX.0;
    if resizable { style | bits } else { style & !bits }
}

fn refresh_frame(hwnd: HWND) -> ChromeResult<()> {
    unsafe {
        SetWindowPos(
            hwnd,
            None,
            0,
            0,
            0,
            0,
            SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
        )?;
    }
    Ok(())
}

fn require_decorated(hwnd: HWND, operation: &str) -> ChromeResult<()> {
    let known = DECORATED_WINDOWS.with(|map| map.borrow().contains_key(&(hwnd.0 as isize)));
    if known {
        Ok(())
    } else {
        Err(ChromeError::NotInstalled(format!(
            "{operation} on HWND {hwnd:?} without installed decorations"
        )))
    }
}

#[derive(Debug, Default)]
pub(crate) struct Win32DecorationBridge;

impl Win32DecorationBridge {
    pub(crate) fn new() -> Self {
        Self
    }

    fn show(&self, handle: WindowHandle, cmd: SHOW_WINDOW_CMD) -> ChromeResult<()> {
        let hwnd = hwnd_of(handle);
        require_decorated(hwnd, "show window")?;
        unsafe {
            let _ = ShowWindow(hwnd, cmd);
        }
        Ok(())
    }
}

impl NativeDecorationBridge for Win32DecorationBridge {
    fn install(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        let hwnd = hwnd_of(handle);
        if require_decorated(hwnd, "install").is_ok() {
            log::warn!("NativeBridge: decorations already installed on HWND {hwnd:?}");
            return Ok(());
        }

        unsafe {
            let enable_dark: i32 = 1;
            let _ = DwmSetWindowAttribute(
                hwnd,
                DWMWA_USE_IMMERSIVE_DARK_MODE,
                &enable_dark as *const _ as *const _,
                std::mem::size_of_val(&enable_dark) as u32,
            );
            // A one pixel glass margin keeps the DWM drop shadow.
            let margins = MARGINS {
                cxLeftWidth: 0,
                cxRightWidth: 0,
                cyTopHeight: 1,
                cyBottomHeight: 0,
            };
            DwmExtendFrameIntoClientArea(hwnd, &margins)?;
        }

        let original_style = unsafe { GetWindowLongPtrW(hwnd, GWL_STYLE) };
        let resizable = original_style as u32 & WS_THICKFRAME.0 != 0;
        DECORATED_WINDOWS.with(|map| {
            map.borrow_mut().insert(
                hwnd.0 as isize,
                DecorationData {
                    previous_proc: 0,
                    original_style,
                    insets: ContentInsets::default(),
                    resizable,
                    background: None,
                },
            );
        });
        unsafe {
            #[allow(clippy::fn_to_numeric_cast)]
            let previous =
                SetWindowLongPtrW(hwnd, GWLP_WNDPROC, decoration_subclass_proc as isize);
            with_data(hwnd, |data| data.previous_proc = previous);
        }
        if let Err(err) = refresh_frame(hwnd) {
            log::error!("NativeBridge: frame refresh failed on HWND {hwnd:?}, rolling back: {err}");
            if let Some(released) = release_window_data(hwnd) {
                restore_window(hwnd, released);
            }
            return Err(err);
        }
        log::debug!("NativeBridge: installed decorations on HWND {hwnd:?}");
        Ok(())
    }

    fn uninstall(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        let hwnd = hwnd_of(handle);
        require_decorated(hwnd, "uninstall")?;
        if let Some(released) = release_window_data(hwnd) {
            restore_window(hwnd, released);
        }
        log::debug!("NativeBridge: uninstalled decorations from HWND {hwnd:?}");
        refresh_frame(hwnd)
    }

    fn minimize(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        self.show(handle, SW_MINIMIZE)
    }

    fn maximize(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        self.show(handle, SW_MAXIMIZE)
    }

    fn restore(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        self.show(handle, SW_RESTORE)
    }

    fn set_resizable(&mut self, handle: WindowHandle, resizable: bool) -> ChromeResult<()> {
        let hwnd = hwnd_of(handle);
        require_decorated(hwnd, "set resizable")?;
        with_data(hwnd, |data| data.resizable = resizable);
        unsafe {
            let style = GetWindowLongPtrW(hwnd, GWL_STYLE) as u32;
            let new_style = style_with_resizable(style, resizable);
            if new_style != style {
                SetWindowLongPtrW(hwnd, GWL_STYLE, new_style as isize);
            }
        }
        refresh_frame(hwnd)
    }

    fn set_background(&mut self, handle: WindowHandle, color: Color) -> ChromeResult<()> {
        let hwnd = hwnd_of(handle);
        require_decorated(hwnd, "set background")?;
        let colorref = color_to_colorref(color);
        let brush = unsafe { CreateSolidBrush(colorref) };
        if brush.is_invalid() {
            return Err(ChromeError::OperationFailed(format!(
                "CreateSolidBrush failed for {color:?}"
            )));
        }
        let old = with_data(hwnd, |data| data.background.replace(brush)).flatten();
        unsafe {
            if let Some(old) = old {
                let _ = DeleteObject(old.into());
            }
            let _ = DwmSetWindowAttribute(
                hwnd,
                DWMWA_CAPTION_COLOR,
                &colorref as *const _ as *const _,
                std::mem::size_of_val(&colorref) as u32,
            );
            let _ = InvalidateRect(Some(hwnd), None, true);
        }
        Ok(())
    }

    fn update_content_insets(
        &mut self,
        handle: WindowHandle,
        insets: ContentInsets,
    ) -> ChromeResult<()> {
        let hwnd = hwnd_of(handle);
        require_decorated(hwnd, "update content insets")?;
        with_data(hwnd, |data| data.insets = insets);
        Ok(())
    }

    fn is_maximize_supported(&self) -> bool {
        true
    }
}

type RtlGetVersionFn = unsafe extern "system" fn(*mut OSVERSIONINFOW) -> i32;

/*
 * Reads the real OS build number. `GetVersionExW` lies to unmanifested
 * processes, so this goes through `RtlGetVersion` in ntdll instead.
 */
pub(crate) fn query_windows_build() -> Option<u32> {
    unsafe {
        let module = GetModuleHandleW(w!("ntdll.dll")).ok()?;
        let proc = GetProcAddress(module, s!("RtlGetVersion"))?;
        let rtl_get_version: RtlGetVersionFn =
            std::mem::transmute::<unsafe extern "system" fn() -> isize, RtlGetVersionFn>(proc);
        let mut info = OSVERSIONINFOW {
            dwOSVersionInfoSize: std::mem::size_of::<OSVERSIONINFOW>() as u32,
            ..Default::default()
        };
        if rtl_get_version(&mut info) != 0 {
            log::debug!("NativeBridge: RtlGetVersion failed");
            return None;
        }
        Some(info.dwBuildNumber)
    }
}
