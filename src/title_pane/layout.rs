/*
 * Title bar geometry.
 *
 * Pure layout calculation for the title pane: given the available width and
 * what the bar contains, returns the rectangle of every element plus the
 * insets the native bridge needs so that OS hit-testing (caption drag area,
 * resize grips) lines up with what is drawn. No host or bridge calls happen
 * here; the controller decides when to run it and where to push the result.
 */

use super::actions::ButtonSlot;
use crate::types::{ComponentOrientation, Rect};

/// Horizontal padding after the icon, after the menu bar, and around the title.
pub const PAD: i32 = 5;
/// Extra vertical room added to the font height.
const TEXT_PADDING: i32 = 7;

const BASE_BAR_HEIGHT: f64 = 56.0;
const BASE_BUTTON_WIDTH: f64 = 92.5;
const BASE_ICON_WIDTH: f64 = 65.0;

/// Size the window icon image is scaled to when the host offers several.
pub const ICON_IMAGE_SIZE: i32 = 16;

/*
 * Fixed sizes of the title bar, in logical units. The base values are device
 * pixels, so they shrink as the display scale grows.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleBarMetrics {
    pub min_bar_height: i32,
    pub button_width: i32,
    pub icon_width: i32,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl TitleBarMetrics {
    pub fn new(scale_x: f64, scale_y: f64) -> Self {
        let scale_x = if scale_x > 0.0 { scale_x } else { 1.0 };
        let scale_y = if scale_y > 0.0 { scale_y } else { 1.0 };
        Self {
            min_bar_height: (BASE_BAR_HEIGHT / scale_y) as i32,
            button_width: (BASE_BUTTON_WIDTH / scale_x) as i32,
            icon_width: (BASE_ICON_WIDTH / scale_x) as i32,
            scale_x,
            scale_y,
        }
    }

    pub fn bar_height(&self, text_height: i32, menu_min_height: Option<i32>) -> i32 {
        let mut height = text_height + TEXT_PADDING;
        if let Some(menu_height) = menu_min_height {
            height = height.max(menu_height);
        }
        height.max(self.min_bar_height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuBarMetrics {
    pub preferred_width: i32,
    pub min_height: i32,
    /// Bottom inset of the menu bar; it is allowed to overhang the bar by this much.
    pub bottom_inset: i32,
}

#[derive(Debug, Clone)]
pub struct LayoutInput {
    pub width: i32,
    pub orientation: ComponentOrientation,
    pub icon_present: bool,
    pub menu_bar: Option<MenuBarMetrics>,
    pub buttons: Vec<ButtonSlot>,
    pub maximize_supported: bool,
    pub text_height: i32,
}

/// Insets in device pixels, as handed to the native bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentInsets {
    pub left: i32,
    pub right: i32,
    pub top_height: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleBarGeometry {
    pub bar_height: i32,
    pub left_inset: i32,
    pub right_inset: i32,
    pub icon: Option<Rect>,
    pub menu_bar: Option<Rect>,
    pub buttons: Vec<(ButtonSlot, Rect)>,
    pub title: Rect,
}

impl TitleBarGeometry {
    pub fn device_insets(&self, metrics: &TitleBarMetrics) -> ContentInsets {
        ContentInsets {
            left: (self.left_inset as f64 * metrics.scale_x) as i32,
            right: (self.right_inset as f64 * metrics.scale_x) as i32,
            top_height: (self.bar_height as f64 * metrics.scale_y) as i32,
        }
    }

    pub fn button_bounds(&self, slot: ButtonSlot) -> Option<Rect> {
        self.buttons
            .iter()
            .find_map(|(s, rect)| (*s == slot).then_some(*rect))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutOutcome {
    Laid(TitleBarGeometry),
    // Mirrored placement has no reference behavior to check against yet, so
    // right-to-left bars are reported instead of guessed.
    RightToLeftUnsupported,
}

pub fn layout(input: &LayoutInput, metrics: &TitleBarMetrics) -> LayoutOutcome {
    if !input.orientation.is_left_to_right() {
        log::debug!("TitlePane: right-to-left title bar layout is not supported, skipping");
        return LayoutOutcome::RightToLeftUnsupported;
    }

    let height = metrics.bar_height(
        input.text_height,
        input.menu_bar.map(|menu| menu.min_height),
    );
    let y = 0;
    let mut start = 0;
    let mut left = 0;
    let mut right = 0;

    let icon = input.icon_present.then(|| {
        let rect = Rect::new(start, y, metrics.icon_width, height);
        start += metrics.icon_width + PAD;
        left = start;
        rect
    });

    let menu_bar = input.menu_bar.map(|menu| {
        let width = menu.preferred_width.max(0);
        let rect = Rect::new(start, y, width, height + menu.bottom_inset.max(0));
        start += width + PAD;
        left += width;
        rect
    });

    let mut x = input.width;
    let mut buttons = Vec::with_capacity(input.buttons.len());
    for slot in &input.buttons {
        let placed = match slot {
            ButtonSlot::Close => true,
            ButtonSlot::MaximizeToggle | ButtonSlot::Minimize => input.maximize_supported,
        };
        if !placed {
            continue;
        }
        x -= metrics.button_width;
        right += metrics.button_width;
        buttons.push((*slot, Rect::new(x, y, metrics.button_width, height)));
    }

    let start = start.max(PAD);
    let title = Rect::new(start, 0, (x - start - PAD).max(0), height);

    LayoutOutcome::Laid(TitleBarGeometry {
        bar_height: height,
        left_inset: left.max(0),
        right_inset: right.max(0),
        icon,
        menu_bar,
        buttons,
        title,
    })
}
