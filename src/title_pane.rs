// The drawn title bar: its actions, geometry, window state and the controller tying them together.

pub mod actions;
pub mod controller;
pub mod layout;
pub(crate) mod window_state;

pub use actions::{ActionSet, ButtonSlot, SystemMenuItem, ToggleBinding, WindowAction};
pub use controller::{ControllerPhase, DecorationController};
pub use layout::{ContentInsets, LayoutOutcome, TitleBarGeometry, TitleBarMetrics};
pub use window_state::StateUpdate;
