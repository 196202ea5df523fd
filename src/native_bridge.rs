/*
 * The seam between the portable title pane logic and the OS window manager.
 *
 * `NativeDecorationBridge` is the capability the controller drives: every call
 * names the window it acts on through an explicit `WindowHandle`, so nothing
 * here relies on global lookup of native state. On Windows the real bridge
 * subclasses the window to drop the standard caption and route hit-testing
 * through the drawn chrome; everywhere else the chrome degrades to
 * `NoopBridge`, which draws nothing natively and never fails.
 */

#[cfg(target_os = "windows")]
pub(crate) mod win32_bridge;

use crate::error::{ChromeError, Result as ChromeResult};
use crate::styling_primitives::Color;
use crate::title_pane::layout::ContentInsets;
use crate::types::WindowHandle;

/// First Windows 10 build; earlier systems lack the DWM attributes the bridge relies on.
const MIN_WINDOWS_BUILD: u32 = 10240;
/// Windows 11 keeps the Windows 10 major version; only the build number tells them apart.
const WINDOWS_11_BUILD: u32 = 22000;

pub trait NativeDecorationBridge {
    fn install(&mut self, handle: WindowHandle) -> ChromeResult<()>;
    fn uninstall(&mut self, handle: WindowHandle) -> ChromeResult<()>;
    fn minimize(&mut self, handle: WindowHandle) -> ChromeResult<()>;
    fn maximize(&mut self, handle: WindowHandle) -> ChromeResult<()>;
    fn restore(&mut self, handle: WindowHandle) -> ChromeResult<()>;
    fn set_resizable(&mut self, handle: WindowHandle, resizable: bool) -> ChromeResult<()>;
    fn set_background(&mut self, handle: WindowHandle, color: Color) -> ChromeResult<()>;
    fn update_content_insets(
        &mut self,
        handle: WindowHandle,
        insets: ContentInsets,
    ) -> ChromeResult<()>;
    fn is_maximize_supported(&self) -> bool;
}

/// Logical-only chrome: the title pane is still drawn, the OS window is left alone.
#[derive(Debug, Default)]
pub struct NoopBridge;

impl NativeDecorationBridge for NoopBridge {
    fn install(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        log::debug!("NativeBridge: no native decorations for {handle:?}, drawing logical chrome only");
        Ok(())
    }

    fn uninstall(&mut self, _handle: WindowHandle) -> ChromeResult<()> {
        Ok(())
    }

    fn minimize(&mut self, _handle: WindowHandle) -> ChromeResult<()> {
        Ok(())
    }

    fn maximize(&mut self, _handle: WindowHandle) -> ChromeResult<()> {
        Ok(())
    }

    fn restore(&mut self, _handle: WindowHandle) -> ChromeResult<()> {
        Ok(())
    }

    fn set_resizable(&mut self, _handle: WindowHandle, _resizable: bool) -> ChromeResult<()> {
        Ok(())
    }

    fn set_background(&mut self, _handle: WindowHandle, _color: Color) -> ChromeResult<()> {
        Ok(())
    }

    fn update_content_insets(
        &mut self,
        _handle: WindowHandle,
        _insets: ContentInsets,
    ) -> ChromeResult<()> {
        Ok(())
    }

    fn is_maximize_supported(&self) -> bool {
        true
    }
}

/*
 * Decides whether the native bridge can be used. The library only ships for
 * x86-compatible Windows 10 or newer; an unknown build number counts as
 * unsupported.
 */
pub fn platform_supports_native_decorations(
    os: &str,
    arch: &str,
    windows_build: Option<u32>,
) -> bool {
    let x86_compatible = matches!(arch, "x86" | "x86_64");
    os == "windows" && x86_compatible && windows_build.is_some_and(|b| b >= MIN_WINDOWS_BUILD)
}

pub fn is_windows_11_build(windows_build: Option<u32>) -> bool {
    windows_build.is_some_and(|b| b >= WINDOWS_11_BUILD)
}

/// Whether the running system is Windows 11 or newer. Always false off Windows.
pub fn is_windows_11() -> bool {
    is_windows_11_build(current_windows_build())
}

/// Returns the native bridge for the running platform, if there is one.
pub fn resolve_platform_bridge() -> ChromeResult<Box<dyn NativeDecorationBridge>> {
    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    let build = current_windows_build();
    if !platform_supports_native_decorations(os, arch, build) {
        return Err(ChromeError::UnsupportedPlatform(format!(
            "no native decoration bridge for {os}/{arch} (windows build {build:?})"
        )));
    }
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(win32_bridge::Win32DecorationBridge::new()))
    }
    #[cfg(not(target_os = "windows"))]
    {
        Err(ChromeError::UnsupportedPlatform(format!(
            "native decorations are not built for {os}"
        )))
    }
}

/// Like `resolve_platform_bridge`, but degrades to `NoopBridge` instead of failing.
pub fn platform_bridge_or_noop() -> Box<dyn NativeDecorationBridge> {
    match resolve_platform_bridge() {
        Ok(bridge) => bridge,
        Err(err) => {
            log::info!("NativeBridge: {err}; falling back to logical-only chrome");
            Box::new(NoopBridge)
        }
    }
}

#[cfg(target_os = "windows")]
fn current_windows_build() -> Option<u32> {
    win32_bridge::query_windows_build()
}

#[cfg(not(target_os = "windows"))]
fn current_windows_build() -> Option<u32> {
    None
}
