/*
 * The four window-control actions of the title pane and their enablement.
 *
 * Maximize and Restore share one visual button. Which of the two the button
 * is bound to is stored as a single `ToggleBinding` value, so switching the
 * binding replaces the action and its icon in one assignment and a repaint can
 * never observe a maximize icon wired to the restore action or vice versa.
 */

use crate::types::{DecorationStyle, WindowState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowAction {
    Close,
    Minimize,
    Maximize,
    Restore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Close,
    Minimize,
    Maximize,
    Restore,
}

/// An icon with an active and an inactive variant, switched with the window's focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitlePaneIcon {
    pub kind: IconKind,
    pub active: bool,
}

impl TitlePaneIcon {
    fn new(kind: IconKind) -> Self {
        Self { kind, active: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEntry {
    pub enabled: bool,
    pub icon: TitlePaneIcon,
}

impl ActionEntry {
    fn new(kind: IconKind, enabled: bool) -> Self {
        Self {
            enabled,
            icon: TitlePaneIcon::new(kind),
        }
    }
}

/// The action and icon currently shown on the shared maximize/restore button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleBinding {
    pub action: WindowAction,
    pub icon: IconKind,
}

impl ToggleBinding {
    const MAXIMIZE: ToggleBinding = ToggleBinding {
        action: WindowAction::Maximize,
        icon: IconKind::Maximize,
    };
    const RESTORE: ToggleBinding = ToggleBinding {
        action: WindowAction::Restore,
        icon: IconKind::Restore,
    };
}

/// Buttons in the title bar, listed from the right edge inwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSlot {
    Close,
    MaximizeToggle,
    Minimize,
}

/// What changed during a `recompute`, so the caller knows whether to relayout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionDelta {
    pub toggle_rebound: bool,
    pub buttons_changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemMenuItem {
    Action { action: WindowAction, enabled: bool },
    Separator,
}

#[derive(Debug, Clone)]
pub struct ActionSet {
    style: DecorationStyle,
    close: ActionEntry,
    minimize: ActionEntry,
    maximize: ActionEntry,
    restore: ActionEntry,
    toggle: ToggleBinding,
    minimize_visible: bool,
    toggle_visible: bool,
}

impl ActionSet {
    pub fn new(style: DecorationStyle) -> Self {
        let is_frame = style.is_frame();
        Self {
            style,
            close: ActionEntry::new(IconKind::Close, style.has_close_button()),
            minimize: ActionEntry::new(IconKind::Minimize, false),
            maximize: ActionEntry::new(IconKind::Maximize, false),
            restore: ActionEntry::new(IconKind::Restore, false),
            toggle: ToggleBinding::MAXIMIZE,
            minimize_visible: is_frame,
            toggle_visible: is_frame,
        }
    }

    /*
     * Applies the enablement table:
     *   not a frame              -> only Close enabled
     *   frame, not resizable     -> only Close enabled
     *   frame, resizable, normal -> Minimize, Maximize, Close
     *   frame, resizable, max    -> Minimize, Restore, Close
     * Minimize and the toggle button are only shown on resizable frames.
     */
    pub fn recompute(&mut self, state: WindowState, resizable: bool, is_frame: bool) -> ActionDelta {
        let mut delta = ActionDelta::default();
        let frame_style = is_frame && self.style.is_frame();
        let full_controls = frame_style && resizable;
        let maximized = state == WindowState::Maximized;

        self.close.enabled = self.style.has_close_button();
        self.minimize.enabled = full_controls;
        self.maximize.enabled = full_controls && !maximized;
        self.restore.enabled = full_controls && maximized;

        if full_controls {
            let binding = if maximized {
                ToggleBinding::RESTORE
            } else {
                ToggleBinding::MAXIMIZE
            };
            if binding != self.toggle {
                self.toggle = binding;
                delta.toggle_rebound = true;
                log::debug!("TitlePane: toggle button rebound to {:?}", binding.action);
            }
        }

        if self.minimize_visible != full_controls || self.toggle_visible != full_controls {
            self.minimize_visible = full_controls;
            self.toggle_visible = full_controls;
            delta.buttons_changed = true;
        }
        delta
    }

    pub fn entry(&self, action: WindowAction) -> &ActionEntry {
        match action {
            WindowAction::Close => &self.close,
            WindowAction::Minimize => &self.minimize,
            WindowAction::Maximize => &self.maximize,
            WindowAction::Restore => &self.restore,
        }
    }

    pub fn is_enabled(&self, action: WindowAction) -> bool {
        self.entry(action).enabled
    }

    pub fn toggle_binding(&self) -> ToggleBinding {
        self.toggle
    }

    pub fn visible_buttons(&self) -> Vec<ButtonSlot> {
        let mut slots = Vec::with_capacity(3);
        if self.style.has_close_button() {
            slots.push(ButtonSlot::Close);
        }
        if self.style.is_frame() {
            if self.toggle_visible {
                slots.push(ButtonSlot::MaximizeToggle);
            }
            if self.minimize_visible {
                slots.push(ButtonSlot::Minimize);
            }
        }
        slots
    }

    pub fn set_active(&mut self, active: bool) {
        self.close.icon.active = active;
        if self.style.is_frame() {
            self.minimize.icon.active = active;
            self.maximize.icon.active = active;
            self.restore.icon.active = active;
        }
    }

    /// Entries for the popup menu behind the window icon. Only frames get one.
    pub fn system_menu_items(&self, maximize_supported: bool) -> Vec<SystemMenuItem> {
        if !self.style.is_frame() {
            return Vec::new();
        }
        let item = |action| SystemMenuItem::Action {
            action,
            enabled: self.is_enabled(action),
        };
        let mut items = vec![item(WindowAction::Restore), item(WindowAction::Minimize)];
        if maximize_supported {
            items.push(item(WindowAction::Maximize));
        }
        items.push(SystemMenuItem::Separator);
        items.push(item(WindowAction::Close));
        items
    }
}
