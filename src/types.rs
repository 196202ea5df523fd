/*
 * Core data types shared between the host adapter, the decoration controller
 * and the native bridge: opaque handles, decoration styles, raw OS state flags,
 * geometry primitives, and the closed set of events a host may deliver.
 *
 * Hosts translate their own callbacks (property listeners, window listeners,
 * container listeners) into `HostEvent` values so the controller can dispatch
 * with a `match` instead of comparing property-name strings.
 */

use crate::styling_primitives::{Color, TitlePanePalette};
use bitflags::bitflags;
use std::num::NonZeroIsize;

// An opaque identifier for an OS-level window.
//
// The raw value is whatever the platform uses (an `HWND` on Windows). Zero
// is reserved for "not installed" and can never be wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(NonZeroIsize);

impl WindowHandle {
    pub fn from_raw(raw: isize) -> Option<Self> {
        NonZeroIsize::new(raw).map(Self)
    }

    pub fn raw(self) -> isize {
        self.0.get()
    }
}

/*
 * The kind of chrome requested by the host's root configuration. Fixed for the
 * lifetime of a controller; switching style means building a new controller.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationStyle {
    Frame,
    PlainDialog,
    InformationDialog,
    ErrorDialog,
    ColorChooserDialog,
    FileChooserDialog,
    QuestionDialog,
    WarningDialog,
    None,
}

impl DecorationStyle {
    pub fn is_frame(self) -> bool {
        self == DecorationStyle::Frame
    }

    pub fn is_dialog(self) -> bool {
        !matches!(self, DecorationStyle::Frame | DecorationStyle::None)
    }

    pub fn has_close_button(self) -> bool {
        self != DecorationStyle::None
    }
}

/// What the realized host window actually is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Frame,
    Dialog,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Minimized,
    Maximized,
    /// The window is not a frame, so min/max state is meaningless.
    Undefined,
}

bitflags! {
    /// Raw OS window-state flags as reported by the host (frame extended state).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WindowStateFlags: u32 {
        const ICONIFIED       = 1;
        const MAXIMIZED_HORIZ = 1 << 1;
        const MAXIMIZED_VERT  = 1 << 2;
        const MAXIMIZED_BOTH  = Self::MAXIMIZED_HORIZ.bits() | Self::MAXIMIZED_VERT.bits();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentOrientation {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl ComponentOrientation {
    pub fn is_left_to_right(self) -> bool {
        self == ComponentOrientation::LeftToRight
    }
}

// An icon image owned by the host; the chrome only refers to it by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconImage {
    pub id: u64,
    pub width: i32,
    pub height: i32,
}

/// The icon shown in the window-icon slot of the title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemIcon {
    /// The host supplied no icon images; the theme's default title pane icon is used.
    Fallback,
    Image(IconImage),
    /// No window is attached, so no icon is displayed.
    None,
}

// --- Geometry primitives ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /*
     * Shrinks the rectangle by the given insets. Width and height never go
     * negative, so an inset larger than the rectangle collapses it to zero.
     */
    pub fn apply_insets(&self, insets: Insets) -> Rect {
        Rect {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.left - insets.right).max(0),
            height: (self.height - insets.top - insets.bottom).max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

// --- Host events ---

/// An untyped payload as delivered by a host property listener.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Color(Color),
    Bool(bool),
    Text(String),
    Absent,
}

/*
 * The closed set of window property changes the chrome reacts to. Anything the
 * host reports that is not modelled here arrives as `Other` and is ignored.
 */
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyChange {
    Resizable(bool),
    State(WindowStateFlags),
    Title(String),
    ComponentOrientation(ComponentOrientation),
    IconImages(Vec<IconImage>),
    Background(PropertyValue),
    /// The title font changed; the new text height is read back from the host.
    Font,
    Other(String),
}

/// Identifies the kind of child a container listener reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    MenuBar,
    LayeredPane,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Opened,
    Activated,
    Deactivated,
    Resized(Size),
    PropertyChanged(PropertyChange),
    ChildAdded(ChildKind),
    ChildRemoved(ChildKind),
}

/// Which listener family a subscription belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Window,
    Property,
    RootContainer,
    LayeredPaneContainer,
}

/// Returned by the host on subscribe; must be handed back exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(pub u64);

// --- Configuration ---

/*
 * Construction-time configuration for a decoration controller. The scale
 * factors convert the layout's logical units into device pixels when insets
 * are pushed to the native bridge.
 */
#[derive(Debug, Clone)]
pub struct DecorationConfig {
    pub style: DecorationStyle,
    pub scale_x: f64,
    pub scale_y: f64,
    pub palette: TitlePanePalette,
    /// Nudges the window size once after it opens so the host recomputes its
    /// client geometry under the freshly installed native decoration.
    pub relayout_on_open: bool,
}

impl DecorationConfig {
    pub fn new(style: DecorationStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            style: DecorationStyle::Frame,
            scale_x: 1.0,
            scale_y: 1.0,
            palette: TitlePanePalette::default(),
            relayout_on_open: true,
        }
    }
}
