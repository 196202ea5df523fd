/*
 * Logical window state for the title pane.
 *
 * The OS reports raw state flags; the model caches the last flags it saw and
 * derives a `WindowState` from them. Re-reporting identical flags is a no-op
 * unless the caller forces an update, which lets the controller skip redundant
 * bridge calls while still re-rendering after programmatic actions such as the
 * first install. The active/inactive flag lives here too because it is the
 * other half of what the title pane needs to know to paint itself.
 */

use crate::error::{ChromeError, Result as ChromeResult};
use crate::types::{WindowState, WindowStateFlags};

/// Outcome of feeding new OS flags into the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateUpdate {
    pub changed: bool,
    pub state: WindowState,
    pub maximized: bool,
}

#[derive(Debug)]
pub(crate) struct WindowStateModel {
    realized: bool,
    is_frame: bool,
    cached_flags: Option<WindowStateFlags>,
    state: WindowState,
    active: bool,
}

impl WindowStateModel {
    pub(crate) fn new() -> Self {
        Self {
            realized: false,
            is_frame: false,
            cached_flags: None,
            state: WindowState::Undefined,
            active: false,
        }
    }

    /// Marks the model as bound to a realized window and clears cached flags.
    pub(crate) fn realize(&mut self, is_frame: bool) {
        self.realized = true;
        self.is_frame = is_frame;
        self.cached_flags = None;
        self.state = WindowState::Undefined;
    }

    pub(crate) fn release(&mut self) {
        self.realized = false;
        self.cached_flags = None;
        self.state = WindowState::Undefined;
        self.active = false;
    }

    pub(crate) fn is_frame(&self) -> bool {
        self.is_frame
    }

    pub(crate) fn state(&self) -> WindowState {
        self.state
    }

    pub(crate) fn is_maximized(&self) -> bool {
        self.cached_flags
            .is_some_and(|flags| Self::has_maximized_bits(flags) && self.is_frame)
    }

    /*
     * Feeds new OS flags into the model. Identical flags leave the model
     * untouched and report `changed = false` unless `force` is set.
     */
    pub(crate) fn update(
        &mut self,
        flags: WindowStateFlags,
        force: bool,
    ) -> ChromeResult<StateUpdate> {
        if !self.realized {
            log::error!("TitlePane: window state update with flags {flags:?} before realize");
            return Err(ChromeError::NotInstalled(format!(
                "window state update with flags {flags:?} before the window was realized"
            )));
        }

        if self.cached_flags == Some(flags) && !force {
            log::trace!("TitlePane: window state flags {flags:?} unchanged, skipping update");
            return Ok(StateUpdate {
                changed: false,
                state: self.state,
                maximized: self.is_maximized(),
            });
        }

        self.cached_flags = Some(flags);
        self.state = Self::derive_state(flags, self.is_frame);
        log::debug!(
            "TitlePane: window state now {:?} (flags {flags:?}, forced: {force})",
            self.state
        );
        Ok(StateUpdate {
            changed: true,
            state: self.state,
            maximized: self.is_maximized(),
        })
    }

    fn has_maximized_bits(flags: WindowStateFlags) -> bool {
        flags.intersects(WindowStateFlags::MAXIMIZED_BOTH)
    }

    fn derive_state(flags: WindowStateFlags, is_frame: bool) -> WindowState {
        if !is_frame {
            WindowState::Undefined
        } else if Self::has_maximized_bits(flags) {
            // An iconified window that was maximized still restores to maximized.
            WindowState::Maximized
        } else if flags.contains(WindowStateFlags::ICONIFIED) {
            WindowState::Minimized
        } else {
            WindowState::Normal
        }
    }

    /// Returns `true` when the flag actually flipped.
    pub(crate) fn set_active(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }
}
