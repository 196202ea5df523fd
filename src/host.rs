/*
 * Interfaces the surrounding widget toolkit implements for the title pane.
 *
 * `WindowHost` is the adapter over the host's top-level window and root pane:
 * query accessors for the current window properties, listener subscription
 * with explicit tokens, menu bar relocation, and repaint/relayout requests.
 * `PaintSurface` is the minimal drawing target the title pane paints onto.
 * Both are implemented outside this crate; the controller only calls them
 * from the UI thread while handling a host event.
 */

use crate::styling_primitives::Color;
use crate::title_pane::layout::MenuBarMetrics;
use crate::types::{
    ComponentOrientation, IconImage, ListenerKind, Rect, Size, SubscriptionToken, WindowHandle,
    WindowKind, WindowStateFlags,
};

/// Identifies a menu bar owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuBarId(pub u64);

pub trait WindowHost {
    /// The kind of window the title pane currently sits in, or `None` when detached.
    fn window_kind(&self) -> Option<WindowKind>;
    /// The OS handle of that window, if the platform exposes one.
    fn native_handle(&self) -> Option<WindowHandle>;

    fn title(&self) -> String;
    fn is_resizable(&self) -> bool;
    fn state_flags(&self) -> WindowStateFlags;
    fn is_active(&self) -> bool;
    fn background(&self) -> Color;
    fn orientation(&self) -> ComponentOrientation;
    fn icon_images(&self) -> Vec<IconImage>;
    /// Picks or renders the best image of `images` for the requested size.
    fn scaled_icon(&self, images: &[IconImage], width: i32, height: i32) -> IconImage;
    /// Height of a line of text in the title font, in logical units.
    fn text_height(&self) -> i32;
    /// Width available to the title pane, in logical units.
    fn bar_width(&self) -> i32;

    fn size(&self) -> Size;
    fn set_size(&mut self, size: Size);

    /// The menu bar currently configured on the root pane.
    fn menu_bar(&self) -> Option<MenuBarId>;
    /*
     * `preferred_width` is the bar's own preferred width. It must ignore the
     * zero-size override set through `set_menu_bar_preferred_size` while the
     * bar is docked, or the docked bar is laid out with no room.
     */
    fn menu_bar_metrics(&self, menu_bar: MenuBarId) -> MenuBarMetrics;
    /// `None` clears an override so the menu bar reports its own preferred size again.
    fn set_menu_bar_preferred_size(&mut self, menu_bar: MenuBarId, size: Option<Size>);
    /// Moves the menu bar into the title pane.
    fn dock_menu_bar(&mut self, menu_bar: MenuBarId);
    /// Removes the menu bar from the title pane without handing it back.
    fn undock_menu_bar(&mut self, menu_bar: MenuBarId);
    /// Hands the menu bar back to the root pane.
    fn restore_menu_bar(&mut self, menu_bar: MenuBarId);

    fn subscribe(&mut self, kind: ListenerKind) -> SubscriptionToken;
    fn unsubscribe(&mut self, token: SubscriptionToken);

    fn request_repaint(&mut self);
    fn request_relayout(&mut self);
    /// Delivers a window-closing request, as if the user clicked the OS close box.
    fn request_close(&mut self);
}

pub trait PaintSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
}
