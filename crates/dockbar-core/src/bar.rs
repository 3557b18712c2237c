//! The dock bar coordinator.
//!
//! Owns the height pipeline, the keyboard signal handling, component
//! selection, and the drag-to-raise session. Every entry point takes the
//! host, runs synchronously, and either completes or becomes a logged no-op;
//! nothing here panics or blocks.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::animation::{HeightAnimator, Step, TransitionTiming};
use crate::component::{Component, ComponentId, InputSurfaceId};
use crate::config::DockConfig;
use crate::delegate::BarStatus;
use crate::drag::{DragAction, DragContext, DragController, DragPhase};
use crate::error::{Error, Result};
use crate::geometry::heights_equal;
use crate::keyboard::{
    KeyboardMonitor, KeyboardNotification, KeyboardSignal, NotificationRouting, SignalContext,
};
use crate::observe::{Observed, Watcher};
use crate::scroll::{PanPhase, ScrollMetrics};
use crate::surface::{BarHost, HostSurface};

/// A component registered with the bar
struct Registered {
    id: ComponentId,
    component: Box<dyn Component>,
}

/// Commit bookkeeping for the in-flight transition
#[derive(Debug, Clone, Copy)]
struct PendingCommit {
    target: f32,
    keyboard_height: f32,
    generation: u64,
}

/// Prior selection facts captured before a switch
#[derive(Debug, Clone, Copy)]
struct PriorSelection {
    id: ComponentId,
    focused: bool,
}

/// The resizable input dock bar.
///
/// The bar is headless: it owns coordination state and drives the platform
/// through the host passed into each call. The host pushes keyboard
/// notifications, scroll and pan updates, and frame ticks in; the bar pushes
/// constraint changes, layout, mounting and focus back out.
pub struct DockBar {
    config: DockConfig,
    committed_height: f32,
    keyboard_presented: bool,
    components: Vec<Registered>,
    selected: Option<ComponentId>,
    next_component_id: u64,
    animator: HeightAnimator,
    pending_commit: Option<PendingCommit>,
    monitor: KeyboardMonitor,
    drag: DragController,
    content_height: Observed<f32>,
    content_watch: Watcher,
}

impl DockBar {
    pub fn new(config: DockConfig) -> Self {
        let content_height = Observed::new(0.0);
        let content_watch = content_height.watch();
        Self {
            config,
            committed_height: 0.0,
            keyboard_presented: false,
            components: Vec::new(),
            selected: None,
            next_component_id: 1,
            animator: HeightAnimator::new(0.0),
            pending_commit: None,
            monitor: KeyboardMonitor::new(),
            drag: DragController::new(),
            content_height,
            content_watch,
        }
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DockConfig) {
        self.config = config;
    }

    /// The most recently decided target height. Equals the committed height
    /// when no transition is in flight.
    pub fn height(&self) -> f32 {
        self.pending_commit
            .map(|commit| commit.target)
            .unwrap_or(self.committed_height)
    }

    /// The last committed height
    pub fn committed_height(&self) -> f32 {
        self.committed_height
    }

    /// The height currently presented, interpolated mid-transition
    pub fn display_height(&self) -> f32 {
        self.animator.display()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn keyboard_presented(&self) -> bool {
        self.keyboard_presented
    }

    pub fn notification_routing(&self) -> &NotificationRouting {
        self.monitor.routing()
    }

    pub fn notification_routing_mut(&mut self) -> &mut NotificationRouting {
        self.monitor.routing_mut()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_interactive_enabling(&self) -> bool {
        self.drag.is_enabling()
    }

    pub fn is_drag_engaged(&self) -> bool {
        self.drag.is_engaged()
    }

    // ----- geometry -----

    /// Tallest the bar content may grow: the screen minus the keyboard slice
    /// beneath the bar and the reserved area at the top.
    pub fn maximum_height<H: BarHost + ?Sized>(&mut self, host: &mut H) -> f32 {
        let status = self.status(host);
        let maximum_bar_y = host
            .maximum_bar_y(status)
            .unwrap_or_else(|| host.top_bar_height());
        let keyboard_slice = host.container_frame().height() - host.bar_frame().height();
        host.screen_height() - keyboard_slice - maximum_bar_y
    }

    /// The keyboard height currently visible on screen, `None` when the bar
    /// is detached or no height constraint is installed.
    pub fn visible_height<H: HostSurface + ?Sized>(&self, host: &H) -> Option<f32> {
        if !host.is_attached() {
            return None;
        }
        let constraint = host.height_constraint()?;
        let container_y = host.container_frame().min_y();
        Some(host.screen_height() - (container_y + constraint - self.height()))
    }

    /// The keyboard height once fully presented with the current content
    pub fn presented_height<H: HostSurface + ?Sized>(&self, host: &H) -> f32 {
        host.container_frame().height() - host.bar_frame().height() + self.height()
    }

    /// Whether the presented keyboard has nothing left to slide in
    pub fn keyboard_fully_extended<H: HostSurface + ?Sized>(&self, host: &H) -> bool {
        match self.visible_height(host) {
            Some(visible) => heights_equal(visible, self.presented_height(host)),
            None => false,
        }
    }

    fn status<H: HostSurface + ?Sized>(&self, host: &H) -> BarStatus {
        BarStatus {
            height: self.height(),
            committed_height: self.committed_height,
            keyboard_presented: self.keyboard_presented,
            frame_height: host.bar_frame().height(),
            animating: self.animator.is_animating(),
        }
    }

    // ----- components -----

    /// Replace the registered components. The first becomes selected and its
    /// view is mounted. Returns the minted ids, in the given order.
    pub fn set_components<H: BarHost + ?Sized>(
        &mut self,
        components: Vec<Box<dyn Component>>,
        host: &mut H,
    ) -> Vec<ComponentId> {
        let prior = self.capture_prior_selection(host);
        self.components.clear();
        self.selected = None;

        let mut ids = Vec::with_capacity(components.len());
        for component in components {
            let id = ComponentId::from_raw(self.next_component_id);
            self.next_component_id += 1;
            self.components.push(Registered { id, component });
            ids.push(id);
        }

        match ids.first().copied() {
            Some(first) => self.apply_selection(prior, first, host),
            None => {
                if let Some(prior) = prior {
                    host.unmount_component(prior.id);
                }
            }
        }
        ids
    }

    /// Select a registered component, mounting its view and transferring
    /// focus when the outgoing component's input surface held it.
    pub fn select_component<H: BarHost + ?Sized>(
        &mut self,
        id: ComponentId,
        host: &mut H,
    ) -> Result<()> {
        if self.selected == Some(id) {
            return Ok(());
        }
        if !self.components.iter().any(|registered| registered.id == id) {
            return Err(Error::UnknownComponent(id));
        }
        let prior = self.capture_prior_selection(host);
        self.apply_selection(prior, id, host);
        Ok(())
    }

    pub fn selected_component(&self) -> Option<ComponentId> {
        self.selected
    }

    pub fn component_ids(&self) -> Vec<ComponentId> {
        self.components.iter().map(|registered| registered.id).collect()
    }

    pub fn component(&self, id: ComponentId) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|registered| registered.id == id)
            .map(|registered| registered.component.as_ref())
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut (dyn Component + 'static)> {
        self.components
            .iter_mut()
            .find(|registered| registered.id == id)
            .map(|registered| registered.component.as_mut())
    }

    /// Input surface of the selected component, if it exposes one
    pub fn selected_input_surface(&self) -> Option<InputSurfaceId> {
        self.selected.and_then(|id| self.input_surface_of(id))
    }

    fn input_surface_of(&self, id: ComponentId) -> Option<InputSurfaceId> {
        self.component(id).and_then(|component| component.input_surface())
    }

    fn capture_prior_selection<H: HostSurface + ?Sized>(
        &self,
        host: &H,
    ) -> Option<PriorSelection> {
        self.selected.map(|id| PriorSelection {
            id,
            focused: self
                .input_surface_of(id)
                .is_some_and(|surface| host.focused_surface() == Some(surface)),
        })
    }

    fn apply_selection<H: BarHost + ?Sized>(
        &mut self,
        prior: Option<PriorSelection>,
        next: ComponentId,
        host: &mut H,
    ) {
        host.mount_component(next);
        if let Some(prior) = prior {
            if prior.focused {
                if let Some(surface) = self.input_surface_of(next) {
                    host.focus_surface(surface, true);
                }
            }
            if prior.id != next {
                host.unmount_component(prior.id);
            }
        }
        self.selected = Some(next);
        debug!(component = next.as_raw(), "component selected");
        self.reload_height(host);
    }

    fn selected_content_height(&self) -> Option<f32> {
        self.selected
            .and_then(|id| self.component(id))
            .map(|component| component.content_height())
    }

    fn with_selected<F: FnOnce(&mut dyn Component)>(&mut self, f: F) {
        if let Some(id) = self.selected {
            if let Some(registered) = self
                .components
                .iter_mut()
                .find(|registered| registered.id == id)
            {
                f(registered.component.as_mut());
            }
        }
    }

    // ----- height pipeline -----

    /// Ask the bar to move its content height. Invalid situations become
    /// logged no-ops; use [`DockBar::try_request_height`] for the cause.
    pub fn request_height<H: BarHost + ?Sized>(
        &mut self,
        target: f32,
        animated: bool,
        host: &mut H,
    ) {
        if let Err(error) = self.try_request_height(target, animated, host) {
            match error {
                Error::Detached => trace!("height request ignored: {error}"),
                _ => warn!(%error, "height request aborted"),
            }
        }
    }

    pub fn try_request_height<H: BarHost + ?Sized>(
        &mut self,
        target: f32,
        animated: bool,
        host: &mut H,
    ) -> Result<()> {
        if !host.is_attached() {
            return Err(Error::Detached);
        }

        let maximum = self.maximum_height(host);
        let clamped = target.min(maximum).max(0.0);

        let status = self.status(host);
        let next = host.next_height(status, clamped, self.height());

        if heights_equal(next, self.height()) {
            trace!(height = next, "height request deduplicated");
            return Ok(());
        }

        if host.height_constraint().is_none() {
            return Err(Error::MissingHeightConstraint);
        }

        let keyboard_slice =
            host.container_frame().height() - host.bar_frame().height() + next;
        let keyboard_height = if keyboard_slice < 0.0 { next } else { keyboard_slice };

        self.begin_transition(next, keyboard_height, animated, host);
        Ok(())
    }

    /// Set the content height without animation
    pub fn set_height<H: BarHost + ?Sized>(&mut self, height: f32, host: &mut H) {
        self.request_height(height, false, host);
    }

    /// Re-request the selected component's content height, animated per the
    /// bar configuration. The no-op comparison in the pipeline absorbs
    /// reloads that change nothing.
    pub fn reload_height<H: BarHost + ?Sized>(&mut self, host: &mut H) {
        if let Err(error) = self.try_reload_height(host) {
            match error {
                Error::NoSelection | Error::Detached => {
                    trace!("height reload ignored: {error}")
                }
                _ => warn!(%error, "height reload aborted"),
            }
        }
    }

    pub fn try_reload_height<H: BarHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let height = self.selected_content_height().ok_or(Error::NoSelection)?;
        self.try_request_height(height, self.config.bar.animate_height_on_reload, host)
    }

    fn begin_transition<H: BarHost + ?Sized>(
        &mut self,
        next: f32,
        keyboard_height: f32,
        animated: bool,
        host: &mut H,
    ) {
        if animated {
            let from = if self.config.animation.begin_from_current_state {
                self.animator.display()
            } else {
                self.committed_height
            };
            let timing = TransitionTiming::from(&self.config.animation);
            let generation = self.animator.begin(from, next, timing);
            self.pending_commit = Some(PendingCommit {
                target: next,
                keyboard_height,
                generation,
            });
            debug!(from, to = next, generation, "height transition started");
        } else {
            self.animator.set_display(next);
            self.pending_commit = Some(PendingCommit {
                target: next,
                keyboard_height,
                generation: self.animator.generation(),
            });
            debug!(to = next, "height set without animation");
        }

        let status = self.status(host);
        host.will_animate_to_height(status, next, keyboard_height);
        self.with_selected(|component| component.on_animated_layout(next));

        if !animated {
            host.set_content_height(next);
            self.complete_transition(host);
        }
    }

    fn complete_transition<H: BarHost + ?Sized>(&mut self, host: &mut H) {
        let Some(commit) = self.pending_commit.take() else {
            return;
        };
        host.set_height_constraint(commit.target);
        host.layout_now();
        self.committed_height = commit.target;

        let status = self.status(host);
        host.did_animate_to_height(status, commit.target, commit.keyboard_height);
        self.with_selected(|component| component.on_post_animation_layout(commit.target));
        trace!(height = commit.target, "height committed");
    }

    /// Advance animations and pick up component content changes. Call once
    /// per frame with the elapsed delta.
    pub fn tick<H: BarHost + ?Sized>(&mut self, dt: Duration, host: &mut H) {
        match self.animator.advance(dt) {
            Step::Idle => {}
            Step::Running(height) => host.set_content_height(height),
            Step::Finished { target, generation } => {
                host.set_content_height(target);
                match self.pending_commit {
                    Some(commit) if commit.generation == generation => {
                        self.complete_transition(host)
                    }
                    _ => debug!(generation, "stale transition completion dropped"),
                }
            }
        }
        self.sync_content_height(host);
    }

    fn sync_content_height<H: BarHost + ?Sized>(&mut self, host: &mut H) {
        let Some(reported) = self.selected_content_height() else {
            return;
        };
        self.content_height.set(reported);
        if self.content_watch.changed(&self.content_height) {
            debug!(height = reported, "component content height changed");
            self.reload_height(host);
        }
    }

    // ----- keyboard -----

    /// Feed a raw keyboard notification.
    pub fn handle_keyboard<H: BarHost + ?Sized>(
        &mut self,
        note: &KeyboardNotification,
        host: &mut H,
    ) {
        let ctx = SignalContext {
            keyboard_presented: self.keyboard_presented,
            bar_frame_height: host.bar_frame().height(),
            height_constraint: host.height_constraint(),
            visible_height: self.visible_height(host),
            animating: self.animator.is_animating(),
            drag_engaged: self.drag.is_engaged(),
        };
        let Some(signal) = self.monitor.translate(note, &ctx) else {
            return;
        };

        match signal {
            KeyboardSignal::Presenting => {
                self.keyboard_presented = true;
                debug!("keyboard presenting");
                let height = self.presented_height(host);
                let status = self.status(host);
                host.keyboard_will_present(status, height, &note.timing);
            }
            KeyboardSignal::Dismissing => {
                self.keyboard_presented = false;
                debug!("keyboard dismissing");
                let status = self.status(host);
                host.keyboard_will_dismiss(status, note);
            }
            KeyboardSignal::FrameChanged { visible_height } => {
                trace!(visible_height, "keyboard frame changed");
                let status = self.status(host);
                host.keyboard_did_change_height(status, visible_height);
            }
        }
    }

    // ----- interactive drag -----

    /// Start a drag-to-raise session over the host's scroll surface. An
    /// existing session is replaced; if it was mid-enable, the constraint
    /// and keyboard routing are restored first.
    pub fn interactive_engage<H: BarHost + ?Sized>(&mut self, host: &mut H) {
        if self.drag.engage() == DragAction::EndEnable {
            self.end_interactive_enable(host);
        }
    }

    /// End the drag session, restoring the constraint and keyboard routing
    /// when the drag was mid-enable.
    pub fn interactive_disengage<H: BarHost + ?Sized>(&mut self, host: &mut H) {
        if self.drag.disengage() == DragAction::EndEnable {
            self.end_interactive_enable(host);
        }
    }

    /// Feed a pan gesture phase change from the monitored scroll surface.
    /// `touch_y_in_bar` is the touch's vertical offset within the bar's
    /// content view, when known.
    pub fn pan_gesture_changed<H: BarHost + ?Sized>(
        &mut self,
        phase: PanPhase,
        touch_y_in_bar: Option<f32>,
        host: &mut H,
    ) {
        if self.drag.pan_changed(phase, touch_y_in_bar) == DragAction::EndEnable {
            self.end_interactive_enable(host);
        }
    }

    /// Feed a scroll offset update from the monitored scroll surface.
    pub fn scroll_offset_changed<H: BarHost + ?Sized>(
        &mut self,
        metrics: &ScrollMetrics,
        host: &mut H,
    ) {
        let ctx = DragContext {
            keyboard_presented: self.keyboard_presented,
            scrolled_to_bottom: metrics.is_scrolled_to_bottom(),
            has_input_surface: self.selected_input_surface().is_some(),
            fully_extended: self.keyboard_fully_extended(host),
        };
        match self.drag.scroll_changed(&ctx) {
            DragAction::BeginEnable { touch_offset } => {
                self.begin_interactive_enable(touch_offset, host);
                if !self.keyboard_fully_extended(host) {
                    self.report_visible_height(host);
                }
            }
            DragAction::ReportVisibleHeight => self.report_visible_height(host),
            DragAction::EndEnable => self.end_interactive_enable(host),
            DragAction::None => {}
        }
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    fn begin_interactive_enable<H: BarHost + ?Sized>(&mut self, touch_offset: f32, host: &mut H) {
        self.monitor.routing_mut().suspend_all();
        host.set_height_constraint(self.height() + touch_offset);
        if let Some(surface) = self.selected_input_surface() {
            host.focus_surface(surface, false);
        }
        debug!(touch_offset, "interactive enable engaged");
    }

    fn end_interactive_enable<H: BarHost + ?Sized>(&mut self, host: &mut H) {
        host.set_height_constraint(self.height());
        self.monitor.routing_mut().restore_all();
        debug!("interactive enable released");
    }

    fn report_visible_height<H: BarHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(visible) = self.visible_height(host) {
            let status = self.status(host);
            host.keyboard_did_change_height(status, visible);
        }
    }
}
