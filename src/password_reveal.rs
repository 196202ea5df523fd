/*
 * Press-to-reveal behavior for a dark password field.
 *
 * A password field can show an eye icon at the right end of its text area.
 * While the mouse button is held down on the eye, the field stops masking its
 * text; releasing the button anywhere masks it again. The eye only appears
 * when the field opts into it and the password is not empty. The pointer
 * cursor follows what lies under it, and typing re-evaluates the cursor one
 * turn of the UI loop later, once the text it depends on has changed.
 */

use crate::types::Rect;
use crate::ui_task_queue::UiTaskQueue;

/// Gap between the eye icon and the right edge of the drawing area.
pub const EYE_PADDING: i32 = 4;
/// Edge length of the square eye icon.
pub const EYE_ICON_SIZE: i32 = 16;
pub const DEFAULT_ECHO_CHAR: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCursor {
    Text,
    Hand,
    Default,
}

/// Which eye icon the field paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeIcon {
    Show,
    ShowPressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTask {
    /// Re-evaluate the pointer cursor at the pointer's position at run time.
    UpdateCursor,
}

/// Where the field currently draws itself. Supplied by the host on each query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldGeometry {
    /// Interior of the field's border.
    pub drawing: Rect,
    /// Left edge of the text, after the field's own margins.
    pub text_x: i32,
}

#[derive(Debug, Clone)]
pub struct PasswordReveal {
    echo_char: char,
    view_enabled: bool,
    revealed: bool,
    password_len: usize,
    cursor: FieldCursor,
}

impl Default for PasswordReveal {
    fn default() -> Self {
        Self::new(DEFAULT_ECHO_CHAR)
    }
}

impl PasswordReveal {
    /// `echo_char` is the mask the field used before the reveal behavior was installed.
    pub fn new(echo_char: char) -> Self {
        Self {
            echo_char,
            view_enabled: false,
            revealed: false,
            password_len: 0,
            cursor: FieldCursor::Default,
        }
    }

    pub fn set_view_enabled(&mut self, enabled: bool) {
        self.view_enabled = enabled;
    }

    pub fn view_enabled(&self) -> bool {
        self.view_enabled
    }

    pub fn set_password_len(&mut self, len: usize) {
        self.password_len = len;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn cursor(&self) -> FieldCursor {
        self.cursor
    }

    /// The mask to draw text with. `None` means the text is shown in clear.
    pub fn echo_char(&self) -> Option<char> {
        if self.revealed { None } else { Some(self.echo_char) }
    }

    fn shows_eye(&self) -> bool {
        self.view_enabled && self.password_len > 0
    }

    /// Bounds of the eye icon, vertically centred at the right end of the drawing area.
    pub fn eye_bounds(geometry: &FieldGeometry) -> Rect {
        let drawing = geometry.drawing;
        Rect::new(
            drawing.right() - EYE_ICON_SIZE - EYE_PADDING,
            drawing.y + (drawing.height - EYE_ICON_SIZE) / 2,
            EYE_ICON_SIZE,
            EYE_ICON_SIZE,
        )
    }

    pub fn is_over_eye(&self, geometry: &FieldGeometry, x: i32, y: i32) -> bool {
        self.shows_eye() && Self::eye_bounds(geometry).contains(x, y)
    }

    /// The icon to paint, if any.
    pub fn eye_icon(&self) -> Option<EyeIcon> {
        if !self.shows_eye() {
            None
        } else if self.revealed {
            Some(EyeIcon::ShowPressed)
        } else {
            Some(EyeIcon::Show)
        }
    }

    /// Starts revealing when the press lands on the eye. Returns whether a repaint is needed.
    pub fn mouse_pressed(&mut self, geometry: &FieldGeometry, x: i32, y: i32) -> bool {
        if !self.is_over_eye(geometry, x, y) {
            return false;
        }
        log::trace!("PasswordReveal: revealing text");
        self.revealed = true;
        true
    }

    /// Masks the text again. A release anywhere ends the reveal.
    pub fn mouse_released(&mut self) -> bool {
        if self.revealed {
            log::trace!("PasswordReveal: masking text");
        }
        self.revealed = false;
        true
    }

    pub fn mouse_moved(&mut self, geometry: &FieldGeometry, x: i32, y: i32) -> FieldCursor {
        self.update_cursor(geometry, x, y)
    }

    pub fn key_typed(&mut self, tasks: &mut UiTaskQueue<RevealTask>) {
        tasks.post(RevealTask::UpdateCursor);
    }

    /// Runs a task posted by `key_typed`, given where the pointer is now.
    pub fn run_task(
        &mut self,
        task: RevealTask,
        geometry: &FieldGeometry,
        pointer: (i32, i32),
    ) -> FieldCursor {
        match task {
            RevealTask::UpdateCursor => self.update_cursor(geometry, pointer.0, pointer.1),
        }
    }

    pub fn cursor_at(&self, geometry: &FieldGeometry, x: i32, y: i32) -> FieldCursor {
        let eye = Self::eye_bounds(geometry);
        let in_text = geometry.drawing.contains(x, y) && x >= geometry.text_x && x < eye.x;
        if in_text {
            FieldCursor::Text
        } else if self.is_over_eye(geometry, x, y) {
            FieldCursor::Hand
        } else {
            FieldCursor::Default
        }
    }

    fn update_cursor(&mut self, geometry: &FieldGeometry, x: i32, y: i32) -> FieldCursor {
        self.cursor = self.cursor_at(geometry, x, y);
        self.cursor
    }
}
