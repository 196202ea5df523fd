/*
 * The title pane controller. It keeps three things consistent: the chrome the
 * host draws (title, icon, buttons, menu bar), the logical window state, and
 * the OS window behind the native bridge.
 *
 * Lifecycle: `Uninstalled -> Installing -> Installed -> Uninstalling ->
 * Uninstalled`. `on_realize` acquires the window handle, installs the native
 * decoration and subscribes to the host's listeners; `uninstall` releases all
 * of it exactly once. Realizing again while installed uninstalls first, so a
 * title pane moved to another top-level window never keeps the old handle.
 *
 * Errors are handled here and never reach the host: a missing handle means
 * logical-only chrome, a failed bridge call is logged, and a malformed property
 * payload is ignored.
 */

use super::actions::{ActionSet, ButtonSlot, SystemMenuItem, WindowAction};
use super::layout::{
    self, ICON_IMAGE_SIZE, LayoutInput, LayoutOutcome, TitleBarGeometry, TitleBarMetrics,
};
use super::window_state::WindowStateModel;
use crate::error::{ChromeError, Result as ChromeResult};
use crate::host::{MenuBarId, PaintSurface, WindowHost};
use crate::native_bridge::NativeDecorationBridge;
use crate::styling_primitives::Color;
use crate::types::{
    ChildKind, DecorationConfig, DecorationStyle, HostEvent, IconImage, ListenerKind,
    PropertyChange, PropertyValue, Rect, Size, SubscriptionToken, SystemIcon, WindowHandle,
    WindowKind, WindowState, WindowStateFlags,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    Uninstalled,
    Installing,
    Installed,
    Uninstalling,
}

pub struct DecorationController {
    config: DecorationConfig,
    metrics: TitleBarMetrics,
    bridge: Box<dyn NativeDecorationBridge>,
    phase: ControllerPhase,
    handle: Option<WindowHandle>,
    window_kind: Option<WindowKind>,
    state_model: WindowStateModel,
    actions: ActionSet,
    subscriptions: Vec<(ListenerKind, SubscriptionToken)>,
    menu_bar: Option<MenuBarId>,
    title: String,
    system_icon: SystemIcon,
    resizable: bool,
    title_foreground: Color,
    geometry: Option<TitleBarGeometry>,
    laid_text_height: Option<i32>,
}

impl std::fmt::Debug for DecorationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecorationController")
            .field("style", &self.config.style)
            .field("phase", &self.phase)
            .field("handle", &self.handle)
            .field("window_kind", &self.window_kind)
            .field("menu_bar", &self.menu_bar)
            .finish_non_exhaustive()
    }
}

impl DecorationController {
    pub fn new(config: DecorationConfig, bridge: Box<dyn NativeDecorationBridge>) -> Self {
        let metrics = TitleBarMetrics::new(config.scale_x, config.scale_y);
        let actions = ActionSet::new(config.style);
        let title_foreground = config.palette.active_for(config.style).foreground;
        Self {
            config,
            metrics,
            bridge,
            phase: ControllerPhase::Uninstalled,
            handle: None,
            window_kind: None,
            state_model: WindowStateModel::new(),
            actions,
            subscriptions: Vec::new(),
            menu_bar: None,
            title: String::new(),
            system_icon: SystemIcon::None,
            resizable: true,
            title_foreground,
            geometry: None,
            laid_text_height: None,
        }
    }

    // --- Accessors used by the host while painting and laying out ---

    pub fn style(&self) -> DecorationStyle {
        self.config.style
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn handle(&self) -> Option<WindowHandle> {
        self.handle
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn title_foreground(&self) -> Color {
        self.title_foreground
    }

    pub fn system_icon(&self) -> SystemIcon {
        self.system_icon
    }

    pub fn window_state(&self) -> WindowState {
        self.state_model.state()
    }

    pub fn is_active(&self) -> bool {
        self.state_model.is_active()
    }

    pub fn menu_bar(&self) -> Option<MenuBarId> {
        self.menu_bar
    }

    pub fn geometry(&self) -> Option<&TitleBarGeometry> {
        self.geometry.as_ref()
    }

    pub fn metrics(&self) -> &TitleBarMetrics {
        &self.metrics
    }

    pub fn system_menu_items(&self) -> Vec<SystemMenuItem> {
        self.actions
            .system_menu_items(self.bridge.is_maximize_supported())
    }

    // --- Lifecycle ---

    /*
     * Binds the title pane to the host's top-level window. Safe to call again
     * for a different window: an installed controller is uninstalled first.
     */
    pub fn on_realize(&mut self, host: &mut dyn WindowHost) {
        if self.phase == ControllerPhase::Installed {
            log::debug!("TitlePane: realize while installed, uninstalling previous window first");
            if let Err(err) = self.uninstall(host) {
                log::error!("TitlePane: uninstall before re-realize failed: {err}");
            }
        }

        let Some(kind) = host.window_kind() else {
            log::warn!("TitlePane: realized without a window ancestor, nothing to decorate");
            return;
        };

        self.phase = ControllerPhase::Installing;
        self.window_kind = Some(kind);
        let decoratable = matches!(kind, WindowKind::Frame | WindowKind::Dialog);

        if decoratable {
            self.handle = host.native_handle();
            match self.handle {
                Some(handle) => {
                    if let Err(err) = self.bridge.install(handle) {
                        log::error!(
                            "TitlePane: native decoration install failed for {handle:?}: {err}; using logical chrome"
                        );
                        // The bridge may have applied part of the install before failing.
                        if let Err(err) = self.bridge.uninstall(handle) {
                            log::debug!("TitlePane: release after failed install of {handle:?}: {err}");
                        }
                        self.handle = None;
                    }
                }
                None => {
                    log::info!("TitlePane: host exposes no native handle, using logical chrome only");
                }
            }
            self.resizable = self.is_window_resizable(host);
            let resizable = self.resizable;
            let pushed = self.bridge_call("set resizable", |bridge, handle| {
                bridge.set_resizable(handle, resizable)
            });
            Self::log_failure(pushed, "initial resizable push");
            let background = host.background();
            let pushed = self.bridge_call("set background", |bridge, handle| {
                bridge.set_background(handle, background)
            });
            Self::log_failure(pushed, "initial background push");
            self.title = host.title();
        }

        let is_frame = kind == WindowKind::Frame;
        self.state_model.realize(is_frame);
        let flags = if is_frame {
            host.state_flags()
        } else {
            WindowStateFlags::empty()
        };
        self.apply_state(flags, true);

        let active = host.is_active();
        self.set_active(host, active);

        for kind in [
            ListenerKind::Window,
            ListenerKind::Property,
            ListenerKind::RootContainer,
            ListenerKind::LayeredPaneContainer,
        ] {
            let token = host.subscribe(kind);
            self.subscriptions.push((kind, token));
        }

        let images = host.icon_images();
        self.update_system_icon(host, images);
        if let Some(menu_bar) = host.menu_bar() {
            self.adopt_menu_bar(host, menu_bar);
        }

        self.phase = ControllerPhase::Installed;
        log::debug!(
            "TitlePane: installed on {kind:?} (handle {:?}, style {:?})",
            self.handle,
            self.config.style
        );
        self.layout(host);
        host.request_relayout();
    }

    /*
     * Releases everything `on_realize` acquired: listener tokens, the native
     * decoration and handle, the docked menu bar and cached chrome state.
     */
    pub fn uninstall(&mut self, host: &mut dyn WindowHost) -> ChromeResult<()> {
        if self.phase != ControllerPhase::Installed {
            log::error!("TitlePane: uninstall requested in phase {:?}", self.phase);
            return Err(ChromeError::NotInstalled(format!(
                "uninstall requested in phase {:?}",
                self.phase
            )));
        }
        self.phase = ControllerPhase::Uninstalling;

        for (kind, token) in self.subscriptions.drain(..) {
            log::trace!("TitlePane: releasing {kind:?} subscription {token:?}");
            host.unsubscribe(token);
        }

        if let Some(handle) = self.handle.take() {
            if let Err(err) = self.bridge.uninstall(handle) {
                log::error!("TitlePane: native decoration uninstall failed for {handle:?}: {err}");
            }
        }

        if let Some(menu_bar) = self.menu_bar.take() {
            host.set_menu_bar_preferred_size(menu_bar, None);
            host.restore_menu_bar(menu_bar);
        }

        self.window_kind = None;
        self.title.clear();
        self.system_icon = SystemIcon::None;
        self.geometry = None;
        self.laid_text_height = None;
        self.state_model.release();
        self.phase = ControllerPhase::Uninstalled;
        log::debug!("TitlePane: uninstalled");
        Ok(())
    }

    // --- Event dispatch ---

    pub fn handle_event(&mut self, host: &mut dyn WindowHost, event: HostEvent) {
        if self.phase != ControllerPhase::Installed {
            log::warn!("TitlePane: ignoring {event:?} in phase {:?}", self.phase);
            return;
        }
        match event {
            HostEvent::Opened => self.on_window_opened(host),
            HostEvent::Activated => self.on_activation_changed(host, true),
            HostEvent::Deactivated => self.on_activation_changed(host, false),
            HostEvent::Resized(_) => {
                self.layout(host);
            }
            HostEvent::PropertyChanged(change) => {
                if let Err(err) = self.on_property_change(host, change) {
                    log::warn!("TitlePane: property change ignored: {err}");
                }
            }
            HostEvent::ChildAdded(kind) => self.on_child_added(host, kind),
            HostEvent::ChildRemoved(kind) => self.on_child_removed(host, kind),
        }
    }

    pub fn on_property_change(
        &mut self,
        host: &mut dyn WindowHost,
        change: PropertyChange,
    ) -> ChromeResult<()> {
        if self.phase != ControllerPhase::Installed {
            return Err(ChromeError::NotInstalled(format!(
                "property change {change:?} in phase {:?}",
                self.phase
            )));
        }

        match change {
            PropertyChange::Resizable(resizable) => {
                self.resizable = resizable;
                if self.window_kind == Some(WindowKind::Frame) {
                    self.apply_state(host.state_flags(), true);
                }
                let pushed = self.bridge_call("set resizable", |bridge, handle| {
                    bridge.set_resizable(handle, resizable)
                });
                Self::log_failure(pushed, "resizable change");
                self.relayout_if_needed(host, true);
                host.request_repaint();
            }
            PropertyChange::State(flags) => {
                if self.window_kind == Some(WindowKind::Frame) {
                    self.apply_state(flags, true);
                    self.relayout_if_needed(host, true);
                }
            }
            PropertyChange::Title(title) => {
                self.title = title;
                host.request_repaint();
            }
            PropertyChange::ComponentOrientation(orientation) => {
                log::debug!("TitlePane: orientation changed to {orientation:?}");
                self.relayout_if_needed(host, true);
                host.request_repaint();
            }
            PropertyChange::IconImages(images) => {
                self.update_system_icon(host, images);
                self.relayout_if_needed(host, true);
                host.request_repaint();
            }
            PropertyChange::Background(PropertyValue::Color(color)) => {
                self.bridge_call("set background", |bridge, handle| {
                    bridge.set_background(handle, color)
                })?;
            }
            PropertyChange::Background(other) => {
                return Err(ChromeError::InvalidPropertyValue(format!(
                    "background change carried {other:?} instead of a color"
                )));
            }
            PropertyChange::Font => {
                self.relayout_if_needed(host, true);
                host.request_repaint();
            }
            PropertyChange::Other(name) => {
                log::trace!("TitlePane: property '{name}' is not tracked");
            }
        }
        Ok(())
    }

    /// Focus changes only affect presentation; the native window is never touched.
    pub fn on_activation_changed(&mut self, host: &mut dyn WindowHost, active: bool) {
        self.set_active(host, active);
    }

    pub fn on_child_added(&mut self, host: &mut dyn WindowHost, kind: ChildKind) {
        match kind {
            ChildKind::MenuBar => {
                if let Some(menu_bar) = host.menu_bar() {
                    if self.menu_bar != Some(menu_bar) {
                        self.adopt_menu_bar(host, menu_bar);
                    }
                }
            }
            ChildKind::LayeredPane => {
                self.release_subscription(host, ListenerKind::LayeredPaneContainer);
                let token = host.subscribe(ListenerKind::LayeredPaneContainer);
                self.subscriptions
                    .push((ListenerKind::LayeredPaneContainer, token));
            }
            ChildKind::Other => {}
        }
        self.drop_stale_menu_bar(host);
    }

    pub fn on_child_removed(&mut self, host: &mut dyn WindowHost, kind: ChildKind) {
        if kind == ChildKind::LayeredPane {
            self.release_subscription(host, ListenerKind::LayeredPaneContainer);
        }
        self.drop_stale_menu_bar(host);
    }

    /*
     * Hosts that lay out the content pane before the native decoration is in
     * place keep stale client bounds. Growing the window by one pixel and
     * shrinking it back forces a fresh layout pass.
     */
    pub fn on_window_opened(&mut self, host: &mut dyn WindowHost) {
        if !self.config.relayout_on_open || self.window_kind.is_none() {
            return;
        }
        let size = host.size();
        host.set_size(Size {
            width: size.width + 1,
            ..size
        });
        host.set_size(size);
        log::trace!("TitlePane: nudged window size to force client relayout");
    }

    /// Runs a window-control action if it is currently enabled.
    pub fn perform(&mut self, host: &mut dyn WindowHost, action: WindowAction) -> ChromeResult<()> {
        if self.phase != ControllerPhase::Installed {
            return Err(ChromeError::NotInstalled(format!(
                "{action:?} requested in phase {:?}",
                self.phase
            )));
        }
        if !self.actions.is_enabled(action) {
            log::warn!("TitlePane: {action:?} requested while disabled");
            return Ok(());
        }
        match action {
            WindowAction::Close => {
                host.request_close();
                Ok(())
            }
            WindowAction::Minimize => {
                self.bridge_call("minimize", |bridge, handle| bridge.minimize(handle))
            }
            WindowAction::Maximize => {
                self.bridge_call("maximize", |bridge, handle| bridge.maximize(handle))
            }
            WindowAction::Restore => {
                self.bridge_call("restore", |bridge, handle| bridge.restore(handle))
            }
        }
    }

    // --- Layout and painting ---

    /// Applies new display scale factors, e.g. after the window moved to another monitor.
    pub fn set_scale(&mut self, host: &mut dyn WindowHost, scale_x: f64, scale_y: f64) {
        self.config.scale_x = scale_x;
        self.config.scale_y = scale_y;
        self.metrics = TitleBarMetrics::new(scale_x, scale_y);
        log::debug!("TitlePane: display scale now {scale_x}x{scale_y}");
        if self.phase == ControllerPhase::Installed {
            self.layout(host);
            host.request_relayout();
        }
    }

    /*
     * Recomputes the bar geometry and pushes the resulting insets to the
     * native bridge. Right-to-left bars keep no geometry and push nothing.
     */
    pub fn layout(&mut self, host: &mut dyn WindowHost) -> Option<&TitleBarGeometry> {
        if self.phase != ControllerPhase::Installed {
            return None;
        }
        let text_height = host.text_height();
        let input = LayoutInput {
            width: host.bar_width(),
            orientation: host.orientation(),
            icon_present: self.config.style.is_frame(),
            menu_bar: self.menu_bar.map(|menu_bar| host.menu_bar_metrics(menu_bar)),
            buttons: self.actions.visible_buttons(),
            maximize_supported: self.bridge.is_maximize_supported(),
            text_height,
        };
        match layout::layout(&input, &self.metrics) {
            LayoutOutcome::Laid(geometry) => {
                let insets = geometry.device_insets(&self.metrics);
                let pushed = self.bridge_call("update content insets", |bridge, handle| {
                    bridge.update_content_insets(handle, insets)
                });
                Self::log_failure(pushed, "content insets push");
                self.geometry = Some(geometry);
                self.laid_text_height = Some(text_height);
            }
            LayoutOutcome::RightToLeftUnsupported => {
                self.geometry = None;
                self.laid_text_height = None;
            }
        }
        self.geometry.as_ref()
    }

    /*
     * Fills the bar with the active or inactive background and draws the
     * bottom border line. Also re-syncs the window state and the resizable
     * flag, which hosts may change without notifying a property listener.
     */
    pub fn paint(&mut self, host: &mut dyn WindowHost, surface: &mut dyn PaintSurface) {
        if self.phase == ControllerPhase::Installed {
            let resize_changed = self.update_resize_behaviour(host);
            let is_frame = self.window_kind == Some(WindowKind::Frame);
            if is_frame && self.apply_state(host.state_flags(), resize_changed) {
                self.relayout_if_needed(host, false);
            }
            // Font swaps do not always arrive as a property change.
            let text_height = host.text_height();
            if self.geometry.is_some() && self.laid_text_height != Some(text_height) {
                log::debug!("TitlePane: title font height changed to {text_height}, relaying out");
                self.layout(host);
                host.request_relayout();
            }
        }

        let active = self.window_kind.is_none() || self.state_model.is_active();
        let colors = self.config.palette.pair_for(self.config.style, active);
        let width = host.bar_width();
        let height = self
            .geometry
            .as_ref()
            .map(|geometry| geometry.bar_height)
            .unwrap_or_else(|| self.metrics.bar_height(host.text_height(), None));

        surface.fill_rect(Rect::new(0, 0, width, height), colors.background);
        surface.fill_rect(Rect::new(0, height - 1, width, 1), self.config.palette.border);
    }

    // --- Internals ---

    fn is_window_resizable(&self, host: &dyn WindowHost) -> bool {
        if self.config.style == DecorationStyle::None {
            return false;
        }
        match self.window_kind {
            Some(WindowKind::Frame | WindowKind::Dialog) => host.is_resizable(),
            _ => false,
        }
    }

    /// Returns whether the flag changed since it was last pushed.
    fn update_resize_behaviour(&mut self, host: &dyn WindowHost) -> bool {
        let resizable = self.is_window_resizable(host);
        if resizable == self.resizable {
            return false;
        }
        self.resizable = resizable;
        let pushed = self.bridge_call("set resizable", |bridge, handle| {
            bridge.set_resizable(handle, resizable)
        });
        Self::log_failure(pushed, "resizable sync");
        true
    }

    /*
     * Feeds flags into the state model and, when something changed, reruns the
     * action table. Returns whether the visible button set changed.
     */
    fn apply_state(&mut self, flags: WindowStateFlags, force: bool) -> bool {
        let update = match self.state_model.update(flags, force) {
            Ok(update) => update,
            Err(err) => {
                log::error!("TitlePane: {err}");
                return false;
            }
        };
        if !update.changed {
            return false;
        }
        let is_frame = self.state_model.is_frame();
        let resizable = is_frame && self.resizable_for_actions();
        let delta = self.actions.recompute(update.state, resizable, is_frame);
        delta.buttons_changed || delta.toggle_rebound
    }

    fn resizable_for_actions(&self) -> bool {
        self.config.style != DecorationStyle::None && self.resizable
    }

    fn relayout_if_needed(&mut self, host: &mut dyn WindowHost, always: bool) {
        let buttons_now = self.actions.visible_buttons();
        let buttons_before: Vec<ButtonSlot> = self
            .geometry
            .as_ref()
            .map(|geometry| geometry.buttons.iter().map(|(slot, _)| *slot).collect())
            .unwrap_or_default();
        if always || buttons_now != buttons_before {
            self.layout(host);
            host.request_relayout();
        }
    }

    fn set_active(&mut self, host: &mut dyn WindowHost, active: bool) {
        self.state_model.set_active(active);
        self.actions.set_active(active);
        self.title_foreground = self
            .config
            .palette
            .pair_for(self.config.style, active)
            .foreground;
        host.request_repaint();
    }

    fn update_system_icon(&mut self, host: &dyn WindowHost, images: Vec<IconImage>) {
        if self.window_kind.is_none() {
            self.system_icon = SystemIcon::None;
            return;
        }
        self.system_icon = match images.as_slice() {
            [] => SystemIcon::Fallback,
            [single] => SystemIcon::Image(*single),
            many => SystemIcon::Image(host.scaled_icon(many, ICON_IMAGE_SIZE, ICON_IMAGE_SIZE)),
        };
    }

    fn adopt_menu_bar(&mut self, host: &mut dyn WindowHost, menu_bar: MenuBarId) {
        if let Some(previous) = self.menu_bar.take() {
            host.undock_menu_bar(previous);
            host.set_menu_bar_preferred_size(previous, None);
        }
        // Otherwise the root pane leaves an empty strip where the menu bar used to be.
        host.set_menu_bar_preferred_size(menu_bar, Some(Size::default()));
        host.dock_menu_bar(menu_bar);
        self.menu_bar = Some(menu_bar);
        log::debug!("TitlePane: docked menu bar {menu_bar:?}");
        if self.phase == ControllerPhase::Installed {
            self.layout(host);
            host.request_relayout();
        }
    }

    fn drop_stale_menu_bar(&mut self, host: &mut dyn WindowHost) {
        if host.menu_bar().is_some() {
            return;
        }
        if let Some(menu_bar) = self.menu_bar.take() {
            host.undock_menu_bar(menu_bar);
            host.set_menu_bar_preferred_size(menu_bar, None);
            log::debug!("TitlePane: host dropped menu bar {menu_bar:?}, undocked it");
            self.layout(host);
            host.request_relayout();
        }
    }

    fn release_subscription(&mut self, host: &mut dyn WindowHost, kind: ListenerKind) {
        self.subscriptions.retain(|(k, token)| {
            if *k == kind {
                host.unsubscribe(*token);
                false
            } else {
                true
            }
        });
    }

    /*
     * Routes a call to the bridge. Outside the install/uninstall window this is
     * a precondition violation; without a handle (logical-only chrome) the call
     * is skipped.
     */
    fn bridge_call(
        &mut self,
        operation: &str,
        call: impl FnOnce(&mut dyn NativeDecorationBridge, WindowHandle) -> ChromeResult<()>,
    ) -> ChromeResult<()> {
        if self.phase == ControllerPhase::Uninstalled {
            log::error!("TitlePane: {operation} requested while not installed");
            return Err(ChromeError::NotInstalled(format!(
                "{operation} requested while not installed"
            )));
        }
        let Some(handle) = self.handle else {
            log::trace!("TitlePane: {operation} skipped, logical chrome only");
            return Ok(());
        };
        log::debug!("TitlePane: bridge {operation} on {handle:?}");
        call(self.bridge.as_mut(), handle)
    }

    fn log_failure(result: ChromeResult<()>, context: &str) {
        if let Err(err) = result {
            log::error!("TitlePane: {context} failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::title_pane::layout::{MenuBarMetrics, PAD};
    use crate::types::ComponentOrientation;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum BridgeCall {
        Install(isize),
        Uninstall(isize),
        Minimize(isize),
        Maximize(isize),
        Restore(isize),
        SetResizable(isize, bool),
        SetBackground(isize, Color),
        UpdateInsets(isize, i32, i32, i32),
    }

    #[derive(Clone, Default)]
    struct RecordingBridge {
        calls: Rc<RefCell<Vec<BridgeCall>>>,
        fail_install: bool,
    }

    impl RecordingBridge {
        fn record(&self, call: BridgeCall) -> ChromeResult<()> {
            self.calls.borrow_mut().push(call);
            Ok(())
        }
    }

    impl NativeDecorationBridge for RecordingBridge {
        fn install(&mut self, handle: WindowHandle) -> ChromeResult<()> {
            self.record(BridgeCall::Install(handle.raw()))?;
            if self.fail_install {
                return Err(ChromeError::OperationFailed("frame refresh failed".into()));
            }
            Ok(())
        }
        fn uninstall(&mut self, handle: WindowHandle) -> ChromeResult<()> {
            self.record(BridgeCall::Uninstall(handle.raw()))
        }
        fn minimize(&mut self, handle: WindowHandle) -> ChromeResult<()> {
            self.record(BridgeCall::Minimize(handle.raw()))
        }
        fn maximize(&mut self, handle: WindowHandle) -> ChromeResult<()> {
            self.record(BridgeCall::Maximize(handle.raw()))
        }
        fn restore(&mut self, handle: WindowHandle) -> ChromeResult<()> {
            self.record(BridgeCall::Restore(handle.raw()))
        }
        fn set_resizable(&mut self, handle: WindowHandle, resizable: bool) -> ChromeResult<()> {
            self.record(BridgeCall::SetResizable(handle.raw(), resizable))
        }
        fn set_background(&mut self, handle: WindowHandle, color: Color) -> ChromeResult<()> {
            self.record(BridgeCall::SetBackground(handle.raw(), color))
        }
        fn update_content_insets(
            &mut self,
            handle: WindowHandle,
            insets: crate::title_pane::layout::ContentInsets,
        ) -> ChromeResult<()> {
            self.record(BridgeCall::UpdateInsets(
                handle.raw(),
                insets.left,
                insets.right,
                insets.top_height,
            ))
        }
        fn is_maximize_supported(&self) -> bool {
            true
        }
    }

    struct FakeHost {
        kind: Option<WindowKind>,
        next_handle: isize,
        title: String,
        resizable: bool,
        flags: WindowStateFlags,
        active: bool,
        background: Color,
        orientation: ComponentOrientation,
        icons: Vec<IconImage>,
        text_height: i32,
        size: Size,
        size_history: Vec<Size>,
        menu_bar: Option<MenuBarId>,
        menu_overrides: HashMap<MenuBarId, Option<Size>>,
        docked: Option<MenuBarId>,
        restored: Vec<MenuBarId>,
        next_token: u64,
        live_tokens: Vec<SubscriptionToken>,
        released_tokens: Vec<SubscriptionToken>,
        repaints: usize,
        relayouts: usize,
        close_requests: usize,
    }

    impl FakeHost {
        fn frame() -> Self {
            Self {
                kind: Some(WindowKind::Frame),
                next_handle: 0x100,
                title: "Editor".to_string(),
                resizable: true,
                flags: WindowStateFlags::empty(),
                active: true,
                background: Color::rgb(0x2B, 0x2B, 0x2B),
                orientation: ComponentOrientation::LeftToRight,
                icons: Vec::new(),
                text_height: 16,
                size: Size {
                    width: 800,
                    height: 600,
                },
                size_history: Vec::new(),
                menu_bar: None,
                menu_overrides: HashMap::new(),
                docked: None,
                restored: Vec::new(),
                next_token: 1,
                live_tokens: Vec::new(),
                released_tokens: Vec::new(),
                repaints: 0,
                relayouts: 0,
                close_requests: 0,
            }
        }

        fn dialog() -> Self {
            Self {
                kind: Some(WindowKind::Dialog),
                ..Self::frame()
            }
        }
    }

    impl WindowHost for FakeHost {
        fn window_kind(&self) -> Option<WindowKind> {
            self.kind
        }
        fn native_handle(&self) -> Option<WindowHandle> {
            WindowHandle::from_raw(self.next_handle)
        }
        fn title(&self) -> String {
            self.title.clone()
        }
        fn is_resizable(&self) -> bool {
            self.resizable
        }
        fn state_flags(&self) -> WindowStateFlags {
            self.flags
        }
        fn is_active(&self) -> bool {
            self.active
        }
        fn background(&self) -> Color {
            self.background
        }
        fn orientation(&self) -> ComponentOrientation {
            self.orientation
        }
        fn icon_images(&self) -> Vec<IconImage> {
            self.icons.clone()
        }
        fn scaled_icon(&self, images: &[IconImage], width: i32, height: i32) -> IconImage {
            images
                .iter()
                .copied()
                .min_by_key(|image| (image.width - width).abs() + (image.height - height).abs())
                .unwrap_or(IconImage {
                    id: 0,
                    width,
                    height,
                })
        }
        fn text_height(&self) -> i32 {
            self.text_height
        }
        fn bar_width(&self) -> i32 {
            self.size.width
        }
        fn size(&self) -> Size {
            self.size
        }
        fn set_size(&mut self, size: Size) {
            self.size = size;
            self.size_history.push(size);
        }
        fn menu_bar(&self) -> Option<MenuBarId> {
            self.menu_bar
        }
        fn menu_bar_metrics(&self, _menu_bar: MenuBarId) -> MenuBarMetrics {
            MenuBarMetrics {
                preferred_width: 150,
                min_height: 24,
                bottom_inset: 0,
            }
        }
        fn set_menu_bar_preferred_size(&mut self, menu_bar: MenuBarId, size: Option<Size>) {
            self.menu_overrides.insert(menu_bar, size);
        }
        fn dock_menu_bar(&mut self, menu_bar: MenuBarId) {
            self.docked = Some(menu_bar);
        }
        fn undock_menu_bar(&mut self, menu_bar: MenuBarId) {
            if self.docked == Some(menu_bar) {
                self.docked = None;
            }
        }
        fn restore_menu_bar(&mut self, menu_bar: MenuBarId) {
            self.docked = None;
            self.menu_bar = Some(menu_bar);
            self.restored.push(menu_bar);
        }
        fn subscribe(&mut self, _kind: ListenerKind) -> SubscriptionToken {
            let token = SubscriptionToken(self.next_token);
            self.next_token += 1;
            self.live_tokens.push(token);
            token
        }
        fn unsubscribe(&mut self, token: SubscriptionToken) {
            assert!(
                self.live_tokens.contains(&token),
                "token {token:?} released twice or never issued"
            );
            self.live_tokens.retain(|t| *t != token);
            self.released_tokens.push(token);
        }
        fn request_repaint(&mut self) {
            self.repaints += 1;
        }
        fn request_relayout(&mut self) {
            self.relayouts += 1;
        }
        fn request_close(&mut self) {
            self.close_requests += 1;
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        fills: Vec<(Rect, Color)>,
    }

    impl PaintSurface for RecordingSurface {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.fills.push((rect, color));
        }
    }

    fn controller_with(style: DecorationStyle) -> (DecorationController, Rc<RefCell<Vec<BridgeCall>>>) {
        let bridge = RecordingBridge::default();
        let calls = Rc::clone(&bridge.calls);
        let controller = DecorationController::new(DecorationConfig::new(style), Box::new(bridge));
        (controller, calls)
    }

    fn count(calls: &[BridgeCall], pred: impl Fn(&BridgeCall) -> bool) -> usize {
        calls.iter().filter(|call| pred(call)).count()
    }

    #[test]
    fn realize_installs_and_pushes_initial_state() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();

        controller.on_realize(&mut host);

        assert_eq!(controller.phase(), ControllerPhase::Installed);
        assert_eq!(controller.handle().map(WindowHandle::raw), Some(0x100));
        assert_eq!(controller.title(), "Editor");
        assert_eq!(controller.window_state(), WindowState::Normal);
        assert_eq!(controller.system_icon(), SystemIcon::Fallback);
        assert_eq!(host.live_tokens.len(), 4);
        let calls = calls.borrow();
        assert_eq!(calls[0], BridgeCall::Install(0x100));
        assert!(calls.contains(&BridgeCall::SetResizable(0x100, true)));
        assert!(calls.contains(&BridgeCall::SetBackground(0x100, host.background)));
        assert_eq!(
            count(&calls, |c| matches!(c, BridgeCall::UpdateInsets(..))),
            1
        );
    }

    #[test]
    fn install_uninstall_install_keeps_bridge_calls_paired() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();

        controller.on_realize(&mut host);
        controller.uninstall(&mut host).expect("uninstall");
        assert!(controller.handle().is_none());
        assert!(host.live_tokens.is_empty());

        host.next_handle = 0x200;
        controller.on_realize(&mut host);
        assert_eq!(controller.handle().map(WindowHandle::raw), Some(0x200));

        // Moving to yet another window while installed uninstalls implicitly.
        host.next_handle = 0x300;
        controller.on_realize(&mut host);
        controller.uninstall(&mut host).expect("uninstall");

        let calls = calls.borrow();
        let installs: Vec<_> = calls
            .iter()
            .filter_map(|c| match c {
                BridgeCall::Install(h) => Some(*h),
                _ => None,
            })
            .collect();
        let uninstalls: Vec<_> = calls
            .iter()
            .filter_map(|c| match c {
                BridgeCall::Uninstall(h) => Some(*h),
                _ => None,
            })
            .collect();
        assert_eq!(installs, vec![0x100, 0x200, 0x300]);
        assert_eq!(installs, uninstalls);
        assert!(host.live_tokens.is_empty());
        assert_eq!(host.released_tokens.len(), 12);
    }

    #[test]
    fn uninstall_twice_is_not_installed() {
        let (mut controller, _calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        controller.uninstall(&mut host).unwrap();
        assert!(matches!(
            controller.uninstall(&mut host),
            Err(ChromeError::NotInstalled(_))
        ));
    }

    #[test]
    fn activation_toggling_never_touches_bridge() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        calls.borrow_mut().clear();
        let repaints_before = host.repaints;

        controller.handle_event(&mut host, HostEvent::Activated);
        controller.handle_event(&mut host, HostEvent::Deactivated);

        assert!(calls.borrow().is_empty());
        assert!(!controller.is_active());
        assert_eq!(host.repaints, repaints_before + 2);
        let palette = crate::styling_primitives::TitlePanePalette::default();
        assert_eq!(controller.title_foreground(), palette.inactive.foreground);
        assert!(!controller.actions().entry(WindowAction::Close).icon.active);
    }

    #[test]
    fn menu_bar_attach_then_detach_restores_preferred_size() {
        let (mut controller, _calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);

        let menu = MenuBarId(9);
        host.menu_bar = Some(menu);
        controller.handle_event(&mut host, HostEvent::ChildAdded(ChildKind::MenuBar));
        assert_eq!(controller.menu_bar(), Some(menu));
        assert_eq!(host.docked, Some(menu));
        assert_eq!(host.menu_overrides[&menu], Some(Size::default()));
        let geometry = controller.geometry().expect("geometry");
        assert_eq!(geometry.menu_bar.map(|r| r.width), Some(150));

        host.menu_bar = None;
        controller.handle_event(&mut host, HostEvent::ChildRemoved(ChildKind::MenuBar));
        assert_eq!(controller.menu_bar(), None);
        assert_eq!(host.docked, None);
        assert_eq!(host.menu_overrides[&menu], None);
        assert!(controller.geometry().unwrap().menu_bar.is_none());
    }

    #[test]
    fn uninstall_hands_menu_bar_back_to_host() {
        let (mut controller, _calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        let menu = MenuBarId(3);
        host.menu_bar = Some(menu);
        controller.on_realize(&mut host);
        assert_eq!(host.docked, Some(menu));

        controller.uninstall(&mut host).unwrap();
        assert_eq!(host.restored, vec![menu]);
        assert_eq!(host.menu_bar, Some(menu));
        assert_eq!(host.menu_overrides[&menu], None);
        assert!(controller.menu_bar().is_none());
    }

    #[test]
    fn resizable_change_recomputes_actions_and_pushes_to_bridge() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        calls.borrow_mut().clear();

        host.resizable = false;
        controller.handle_event(
            &mut host,
            HostEvent::PropertyChanged(PropertyChange::Resizable(false)),
        );

        assert!(calls.borrow().contains(&BridgeCall::SetResizable(0x100, false)));
        assert!(!controller.actions().is_enabled(WindowAction::Maximize));
        assert!(!controller.actions().is_enabled(WindowAction::Minimize));
        assert_eq!(controller.actions().visible_buttons(), vec![ButtonSlot::Close]);
        let geometry = controller.geometry().unwrap();
        assert_eq!(geometry.right_inset, controller.metrics().button_width);
    }

    #[test]
    fn state_change_rebinds_toggle_to_restore() {
        let (mut controller, _calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);

        host.flags = WindowStateFlags::MAXIMIZED_BOTH;
        controller.handle_event(
            &mut host,
            HostEvent::PropertyChanged(PropertyChange::State(WindowStateFlags::MAXIMIZED_BOTH)),
        );

        assert_eq!(controller.window_state(), WindowState::Maximized);
        assert_eq!(controller.actions().toggle_binding().action, WindowAction::Restore);
        assert!(controller.actions().is_enabled(WindowAction::Restore));
    }

    #[test]
    fn non_color_background_is_rejected_without_bridge_call() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        calls.borrow_mut().clear();

        let result = controller.on_property_change(
            &mut host,
            PropertyChange::Background(PropertyValue::Text("red".into())),
        );
        assert!(matches!(result, Err(ChromeError::InvalidPropertyValue(_))));
        assert!(calls.borrow().is_empty());

        let color = Color::rgb(10, 20, 30);
        controller
            .on_property_change(&mut host, PropertyChange::Background(PropertyValue::Color(color)))
            .unwrap();
        assert_eq!(*calls.borrow(), vec![BridgeCall::SetBackground(0x100, color)]);
    }

    #[test]
    fn unknown_properties_and_title_updates() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        calls.borrow_mut().clear();

        controller
            .on_property_change(&mut host, PropertyChange::Other("alwaysOnTop".into()))
            .unwrap();
        controller
            .on_property_change(&mut host, PropertyChange::Title("Renamed".into()))
            .unwrap();
        assert_eq!(controller.title(), "Renamed");
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn icon_selection_depends_on_image_count() {
        let (mut controller, _calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);

        let small = IconImage { id: 1, width: 16, height: 16 };
        let large = IconImage { id: 2, width: 64, height: 64 };
        controller
            .on_property_change(&mut host, PropertyChange::IconImages(vec![large]))
            .unwrap();
        assert_eq!(controller.system_icon(), SystemIcon::Image(large));

        controller
            .on_property_change(&mut host, PropertyChange::IconImages(vec![large, small]))
            .unwrap();
        assert_eq!(controller.system_icon(), SystemIcon::Image(small));

        controller
            .on_property_change(&mut host, PropertyChange::IconImages(Vec::new()))
            .unwrap();
        assert_eq!(controller.system_icon(), SystemIcon::Fallback);
    }

    #[test]
    fn property_change_before_realize_is_not_installed() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        let result = controller.on_property_change(&mut host, PropertyChange::Resizable(false));
        assert!(matches!(result, Err(ChromeError::NotInstalled(_))));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn window_opened_nudges_width_once() {
        let (mut controller, _calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);

        controller.handle_event(&mut host, HostEvent::Opened);
        assert_eq!(
            host.size_history,
            vec![
                Size { width: 801, height: 600 },
                Size { width: 800, height: 600 },
            ]
        );
    }

    #[test]
    fn window_opened_shim_can_be_disabled() {
        let mut config = DecorationConfig::new(DecorationStyle::Frame);
        config.relayout_on_open = false;
        let mut controller = DecorationController::new(config, Box::new(RecordingBridge::default()));
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        controller.handle_event(&mut host, HostEvent::Opened);
        assert!(host.size_history.is_empty());
    }

    #[test]
    fn dialog_has_close_only_and_undefined_state() {
        let (mut controller, _calls) = controller_with(DecorationStyle::ErrorDialog);
        let mut host = FakeHost::dialog();
        controller.on_realize(&mut host);

        assert_eq!(controller.window_state(), WindowState::Undefined);
        assert_eq!(controller.actions().visible_buttons(), vec![ButtonSlot::Close]);
        assert!(controller.actions().is_enabled(WindowAction::Close));
        assert!(!controller.actions().is_enabled(WindowAction::Minimize));
        let geometry = controller.geometry().unwrap();
        assert!(geometry.icon.is_none());
        assert_eq!(
            geometry.title.width,
            800 - controller.metrics().button_width - 2 * PAD
        );
    }

    #[test]
    fn missing_handle_degrades_to_logical_chrome() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        host.next_handle = 0;
        controller.on_realize(&mut host);

        assert_eq!(controller.phase(), ControllerPhase::Installed);
        assert!(controller.handle().is_none());
        assert!(controller.geometry().is_some());
        assert!(controller.perform(&mut host, WindowAction::Minimize).is_ok());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn perform_routes_actions_and_skips_disabled_ones() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        calls.borrow_mut().clear();

        controller.perform(&mut host, WindowAction::Maximize).unwrap();
        controller.perform(&mut host, WindowAction::Restore).unwrap();
        controller.perform(&mut host, WindowAction::Minimize).unwrap();
        controller.perform(&mut host, WindowAction::Close).unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![BridgeCall::Maximize(0x100), BridgeCall::Minimize(0x100)]
        );
        assert_eq!(host.close_requests, 1);
    }

    #[test]
    fn right_to_left_orientation_keeps_no_geometry() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        calls.borrow_mut().clear();

        host.orientation = ComponentOrientation::RightToLeft;
        controller
            .on_property_change(
                &mut host,
                PropertyChange::ComponentOrientation(ComponentOrientation::RightToLeft),
            )
            .unwrap();
        assert!(controller.geometry().is_none());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn paint_uses_active_palette_and_border_line() {
        let (mut controller, _calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        let palette = crate::styling_primitives::TitlePanePalette::default();
        let height = controller.geometry().unwrap().bar_height;

        let mut surface = RecordingSurface::default();
        controller.paint(&mut host, &mut surface);
        assert_eq!(
            surface.fills,
            vec![
                (Rect::new(0, 0, 800, height), palette.frame.background),
                (Rect::new(0, height - 1, 800, 1), palette.border),
            ]
        );

        controller.handle_event(&mut host, HostEvent::Deactivated);
        let mut surface = RecordingSurface::default();
        controller.paint(&mut host, &mut surface);
        assert_eq!(surface.fills[0].1, palette.inactive.background);
    }

    #[test]
    fn paint_syncs_resizable_only_when_it_changes() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        calls.borrow_mut().clear();

        let mut surface = RecordingSurface::default();
        controller.paint(&mut host, &mut surface);
        assert!(calls.borrow().is_empty());

        host.resizable = false;
        controller.paint(&mut host, &mut surface);
        let calls = calls.borrow();
        assert_eq!(
            count(&calls, |c| matches!(c, BridgeCall::SetResizable(..))),
            1
        );
        assert!(calls.contains(&BridgeCall::SetResizable(0x100, false)));
        assert_eq!(controller.actions().visible_buttons(), vec![ButtonSlot::Close]);
    }

    #[test]
    fn layered_pane_replacement_resubscribes_container_listener() {
        let (mut controller, _calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);

        controller.handle_event(&mut host, HostEvent::ChildRemoved(ChildKind::LayeredPane));
        assert_eq!(host.live_tokens.len(), 3);
        controller.handle_event(&mut host, HostEvent::ChildAdded(ChildKind::LayeredPane));
        assert_eq!(host.live_tokens.len(), 4);

        controller.uninstall(&mut host).unwrap();
        assert!(host.live_tokens.is_empty());
    }

    #[test]
    fn events_after_uninstall_are_ignored() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        controller.uninstall(&mut host).unwrap();
        calls.borrow_mut().clear();

        controller.handle_event(
            &mut host,
            HostEvent::PropertyChanged(PropertyChange::Resizable(false)),
        );
        assert!(calls.borrow().is_empty());
        assert!(matches!(
            controller.perform(&mut host, WindowAction::Close),
            Err(ChromeError::NotInstalled(_))
        ));
        assert_eq!(host.close_requests, 0);
    }
    fn inset_pushes(calls: &[BridgeCall]) -> Vec<(i32, i32, i32)> {
        calls
            .iter()
            .filter_map(|c| match c {
                BridgeCall::UpdateInsets(_, left, right, top) => Some((*left, *right, *top)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn font_change_raises_bar_and_pushes_new_insets() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        assert_eq!(controller.geometry().unwrap().bar_height, 56);
        calls.borrow_mut().clear();

        host.text_height = 80;
        controller.handle_event(&mut host, HostEvent::PropertyChanged(PropertyChange::Font));

        assert_eq!(controller.geometry().unwrap().bar_height, 87);
        assert_eq!(inset_pushes(&calls.borrow()).last().map(|i| i.2), Some(87));
    }

    #[test]
    fn paint_notices_text_height_change_without_property_event() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        calls.borrow_mut().clear();

        host.text_height = 80;
        controller.handle_event(
            &mut host,
            HostEvent::PropertyChanged(PropertyChange::Other("font".into())),
        );
        let mut surface = RecordingSurface::default();
        controller.paint(&mut host, &mut surface);

        assert_eq!(surface.fills[0].0, Rect::new(0, 0, 800, 87));
        assert_eq!(inset_pushes(&calls.borrow()).len(), 1);

        let mut surface = RecordingSurface::default();
        controller.paint(&mut host, &mut surface);
        assert_eq!(inset_pushes(&calls.borrow()).len(), 1);
    }

    #[test]
    fn failed_install_is_released_and_chrome_stays_logical() {
        let bridge = RecordingBridge {
            fail_install: true,
            ..RecordingBridge::default()
        };
        let calls = Rc::clone(&bridge.calls);
        let mut controller =
            DecorationController::new(DecorationConfig::new(DecorationStyle::Frame), Box::new(bridge));
        let mut host = FakeHost::frame();

        controller.on_realize(&mut host);
        assert_eq!(controller.phase(), ControllerPhase::Installed);
        assert!(controller.handle().is_none());
        controller.uninstall(&mut host).unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![BridgeCall::Install(0x100), BridgeCall::Uninstall(0x100)]
        );
    }

    #[test]
    fn resize_recomputes_title_and_pushes_insets() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        let title_before = controller.geometry().unwrap().title.width;
        calls.borrow_mut().clear();

        host.size.width = 1000;
        let size = host.size;
        controller.handle_event(&mut host, HostEvent::Resized(size));

        let geometry = controller.geometry().unwrap();
        assert_eq!(geometry.title.width, title_before + 200);
        assert_eq!(
            geometry.button_bounds(ButtonSlot::Close).map(|r| r.right()),
            Some(1000)
        );
        assert_eq!(inset_pushes(&calls.borrow()).len(), 1);
    }

    #[test]
    fn scale_change_recomputes_metrics_and_layout() {
        let (mut controller, calls) = controller_with(DecorationStyle::Frame);
        let mut host = FakeHost::frame();
        controller.on_realize(&mut host);
        calls.borrow_mut().clear();

        controller.set_scale(&mut host, 2.0, 2.0);

        assert_eq!(controller.metrics().button_width, 46);
        let geometry = controller.geometry().unwrap();
        assert_eq!(geometry.bar_height, 28);
        // Three 46 px buttons, pushed in device pixels.
        assert_eq!(inset_pushes(&calls.borrow()).last().map(|i| i.1), Some(3 * 46 * 2));
    }
}
