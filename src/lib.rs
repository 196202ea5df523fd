/*
 * Provides the public entry point for the duskchrome crate: a dark title bar
 * for toolkit-drawn windows that stays in sync with the native window it sits
 * on. The portable pieces (types, styling primitives, the title pane state
 * machine and its layout) compile on every platform so the chrome logic can be
 * tested anywhere; only the Win32 decoration bridge is gated on Windows.
 *
 * A host toolkit implements `WindowHost` for its top-level window, creates a
 * `DecorationController` with the bridge returned by `platform_bridge_or_noop`,
 * and forwards its window callbacks as `HostEvent`s.
 */
pub mod color_value_formatter;
pub mod error;
pub mod host;
pub mod native_bridge;
pub mod password_reveal;
pub mod styling_primitives;
pub mod title_pane;
pub mod types;
pub mod ui_task_queue;

pub use color_value_formatter::{
    ColorModel, ColorValue, ColorValueField, ColorValueFormatter, FieldTask,
};
pub use error::{ChromeError, Result as ChromeResult};
pub use host::{MenuBarId, PaintSurface, WindowHost};
pub use native_bridge::{
    NativeDecorationBridge, NoopBridge, is_windows_11, platform_bridge_or_noop,
    resolve_platform_bridge,
};
pub use password_reveal::{EyeIcon, FieldCursor, FieldGeometry, PasswordReveal, RevealTask};
pub use styling_primitives::{Color, ColorPair, TitlePanePalette};
pub use title_pane::{
    ActionSet, ButtonSlot, ContentInsets, ControllerPhase, DecorationController, LayoutOutcome,
    TitleBarGeometry, TitleBarMetrics, WindowAction,
};
pub use types::{
    ChildKind, ComponentOrientation, DecorationConfig, DecorationStyle, HostEvent, IconImage,
    ListenerKind, PropertyChange, PropertyValue, Rect, Size, SubscriptionToken, SystemIcon,
    WindowHandle, WindowKind, WindowState, WindowStateFlags,
};
