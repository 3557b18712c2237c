//! Host surface abstraction.
//!
//! The engine never touches platform views. Geometry reads and view
//! mutations go through [`HostSurface`]; app-level collaboration goes
//! through [`BarDelegate`]. [`HeadlessSurface`] implements both in memory,
//! with enough emulation of a docked keyboard host to drive the entire
//! engine from unit tests or a host prototype.

use crate::component::{ComponentId, InputSurfaceId};
use crate::delegate::{BarDelegate, BarStatus};
use crate::geometry::Rect;
use crate::keyboard::{KeyboardNotification, KeyboardTiming};

/// Platform glue the bar drives.
///
/// The container frame is the keyboard host view the bar lives in: the bar
/// alone when the keyboard is down, keyboard plus bar when it is up. The
/// height constraint is the bar's true view height; the content height is
/// the animated portion inside it.
pub trait HostSurface {
    /// Whether the bar is installed in a view hierarchy
    fn is_attached(&self) -> bool;

    /// Full screen height
    fn screen_height(&self) -> f32;

    /// Frame of the view containing the bar, in screen coordinates
    fn container_frame(&self) -> Rect;

    /// The bar's own frame
    fn bar_frame(&self) -> Rect;

    /// Height of host chrome pinned to the top of the screen
    fn top_bar_height(&self) -> f32 {
        0.0
    }

    /// The installed bar height constraint, if any
    fn height_constraint(&self) -> Option<f32>;

    /// Move the bar height constraint without animation
    fn set_height_constraint(&mut self, height: f32);

    /// Present a content height; called with interpolated values while a
    /// transition runs and with the target on commit
    fn set_content_height(&mut self, height: f32);

    /// Flush pending layout so frames reflect the constraints
    fn layout_now(&mut self);

    /// Attach a component's view to the content container
    fn mount_component(&mut self, id: ComponentId);

    /// Detach a component's view from the content container
    fn unmount_component(&mut self, id: ComponentId);

    /// The input surface that currently has focus, if any
    fn focused_surface(&self) -> Option<InputSurfaceId>;

    /// Give focus to an input surface. `animated` selects the surface's
    /// normal focus presentation; interactive enable passes false.
    fn focus_surface(&mut self, id: InputSurfaceId, animated: bool);
}

/// Everything a bar entry point needs from the host
pub trait BarHost: HostSurface + BarDelegate {}

impl<T: HostSurface + BarDelegate + ?Sized> BarHost for T {}

/// A focus request recorded by the headless surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub surface: InputSurfaceId,
    pub animated: bool,
}

/// Delegate hook invocation recorded by the headless surface
#[derive(Debug, Clone, PartialEq)]
pub enum DelegateCall {
    NextHeight { suggested: f32, current: f32 },
    WillAnimate { height: f32, keyboard_height: f32 },
    DidAnimate { height: f32, keyboard_height: f32 },
    KeyboardWillPresent { height: f32 },
    KeyboardWillDismiss,
    KeyboardDidChangeHeight { height: f32 },
}

/// In-memory host surface.
///
/// Emulates a keyboard host docked to the bottom of the screen: laying out
/// syncs the bar frame to the installed constraint and grows the container
/// with it. Geometry fields are public so scenarios can be staged directly.
#[derive(Debug)]
pub struct HeadlessSurface {
    pub attached: bool,
    pub screen_height: f32,
    pub container_frame: Rect,
    pub bar_frame: Rect,
    pub top_bar_height: f32,
    /// Keep the container pinned to the bottom edge during layout
    pub docked: bool,
    /// Returned from the delegate's `next_height` when set
    pub next_height_override: Option<f32>,
    /// Returned from the delegate's `maximum_bar_y` when set
    pub maximum_bar_y: Option<f32>,
    height_constraint: Option<f32>,
    content_height: f32,
    content_history: Vec<f32>,
    focused: Option<InputSurfaceId>,
    focus_log: Vec<FocusRequest>,
    mounted: Vec<ComponentId>,
    layout_count: u32,
    delegate_calls: Vec<DelegateCall>,
}

impl HeadlessSurface {
    /// Screen width used for staged frames
    const WIDTH: f32 = 375.0;

    /// A bar of `bar_height` docked at the bottom of a `screen_height`
    /// screen, keyboard down.
    pub fn new(screen_height: f32, bar_height: f32) -> Self {
        let frame = Rect::new(
            0.0,
            screen_height - bar_height,
            Self::WIDTH,
            bar_height,
        );
        Self {
            attached: true,
            screen_height,
            container_frame: frame,
            bar_frame: frame,
            top_bar_height: 0.0,
            docked: true,
            next_height_override: None,
            maximum_bar_y: None,
            height_constraint: Some(bar_height),
            content_height: bar_height,
            content_history: Vec::new(),
            focused: None,
            focus_log: Vec::new(),
            mounted: Vec::new(),
            layout_count: 0,
            delegate_calls: Vec::new(),
        }
    }

    /// Grow the container to hold a system keyboard of `keyboard_height`
    /// beneath the bar, pinned to the bottom edge.
    pub fn present_keyboard(&mut self, keyboard_height: f32) {
        let total = keyboard_height + self.bar_frame.height();
        self.container_frame.size.height = total;
        self.container_frame.origin.y = self.screen_height - total;
    }

    /// Shrink the container back to the bar alone
    pub fn dismiss_keyboard(&mut self) {
        let total = self.bar_frame.height();
        self.container_frame.size.height = total;
        self.container_frame.origin.y = self.screen_height - total;
    }

    /// Remove the height constraint, as a host that never installed one
    pub fn remove_height_constraint(&mut self) {
        self.height_constraint = None;
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Every content height presented so far, in call order
    pub fn content_history(&self) -> &[f32] {
        &self.content_history
    }

    pub fn layout_count(&self) -> u32 {
        self.layout_count
    }

    pub fn mounted(&self) -> &[ComponentId] {
        &self.mounted
    }

    pub fn focus_log(&self) -> &[FocusRequest] {
        &self.focus_log
    }

    pub fn delegate_calls(&self) -> &[DelegateCall] {
        &self.delegate_calls
    }

    pub fn clear_logs(&mut self) {
        self.content_history.clear();
        self.focus_log.clear();
        self.delegate_calls.clear();
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(800.0, 44.0)
    }
}

impl HostSurface for HeadlessSurface {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn screen_height(&self) -> f32 {
        self.screen_height
    }

    fn container_frame(&self) -> Rect {
        self.container_frame
    }

    fn bar_frame(&self) -> Rect {
        self.bar_frame
    }

    fn top_bar_height(&self) -> f32 {
        self.top_bar_height
    }

    fn height_constraint(&self) -> Option<f32> {
        self.height_constraint
    }

    fn set_height_constraint(&mut self, height: f32) {
        if self.height_constraint.is_some() {
            self.height_constraint = Some(height);
        }
    }

    fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
        self.content_history.push(height);
    }

    fn layout_now(&mut self) {
        self.layout_count += 1;
        let Some(constraint) = self.height_constraint else {
            return;
        };
        let delta = constraint - self.bar_frame.height();
        self.bar_frame.size.height = constraint;
        self.container_frame.size.height += delta;
        if self.docked {
            self.container_frame.origin.y = self.screen_height - self.container_frame.height();
        }
    }

    fn mount_component(&mut self, id: ComponentId) {
        if !self.mounted.contains(&id) {
            self.mounted.push(id);
        }
    }

    fn unmount_component(&mut self, id: ComponentId) {
        self.mounted.retain(|mounted| *mounted != id);
    }

    fn focused_surface(&self) -> Option<InputSurfaceId> {
        self.focused
    }

    fn focus_surface(&mut self, id: InputSurfaceId, animated: bool) {
        self.focused = Some(id);
        self.focus_log.push(FocusRequest {
            surface: id,
            animated,
        });
    }
}

impl BarDelegate for HeadlessSurface {
    fn maximum_bar_y(&mut self, _status: BarStatus) -> Option<f32> {
        self.maximum_bar_y
    }

    fn next_height(&mut self, _status: BarStatus, suggested: f32, current: f32) -> f32 {
        self.delegate_calls.push(DelegateCall::NextHeight {
            suggested,
            current,
        });
        self.next_height_override.unwrap_or(suggested)
    }

    fn will_animate_to_height(&mut self, _status: BarStatus, height: f32, keyboard_height: f32) {
        self.delegate_calls.push(DelegateCall::WillAnimate {
            height,
            keyboard_height,
        });
    }

    fn did_animate_to_height(&mut self, _status: BarStatus, height: f32, keyboard_height: f32) {
        self.delegate_calls.push(DelegateCall::DidAnimate {
            height,
            keyboard_height,
        });
    }

    fn keyboard_will_present(
        &mut self,
        _status: BarStatus,
        height: f32,
        _timing: &KeyboardTiming,
    ) {
        self.delegate_calls
            .push(DelegateCall::KeyboardWillPresent { height });
    }

    fn keyboard_will_dismiss(
        &mut self,
        _status: BarStatus,
        _notification: &KeyboardNotification,
    ) {
        self.delegate_calls.push(DelegateCall::KeyboardWillDismiss);
    }

    fn keyboard_did_change_height(&mut self, _status: BarStatus, height: f32) {
        self.delegate_calls
            .push(DelegateCall::KeyboardDidChangeHeight { height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_syncs_frames_to_constraint() {
        let mut surface = HeadlessSurface::new(800.0, 44.0);
        surface.present_keyboard(300.0);
        assert_eq!(surface.container_frame().height(), 344.0);
        assert_eq!(surface.container_frame().min_y(), 456.0);

        surface.set_height_constraint(100.0);
        surface.layout_now();
        assert_eq!(surface.bar_frame().height(), 100.0);
        assert_eq!(surface.container_frame().height(), 400.0);
        assert_eq!(surface.container_frame().min_y(), 400.0);
    }

    #[test]
    fn test_constraint_setter_requires_installed_constraint() {
        let mut surface = HeadlessSurface::new(800.0, 44.0);
        surface.remove_height_constraint();
        surface.set_height_constraint(100.0);
        assert_eq!(surface.height_constraint(), None);
        let before = surface.bar_frame().height();
        surface.layout_now();
        assert_eq!(surface.bar_frame().height(), before);
    }

    #[test]
    fn test_mount_is_idempotent() {
        let mut surface = HeadlessSurface::default();
        let id = ComponentId::from_raw(1);
        surface.mount_component(id);
        surface.mount_component(id);
        assert_eq!(surface.mounted(), &[id]);
        surface.unmount_component(id);
        assert!(surface.mounted().is_empty());
    }

    #[test]
    fn test_focus_recording() {
        let mut surface = HeadlessSurface::default();
        let id = InputSurfaceId::from_raw(9);
        surface.focus_surface(id, false);
        assert_eq!(surface.focused_surface(), Some(id));
        assert_eq!(
            surface.focus_log(),
            &[FocusRequest {
                surface: id,
                animated: false
            }]
        );
    }

    #[test]
    fn test_delegate_override_applies() {
        let mut surface = HeadlessSurface::default();
        surface.next_height_override = Some(99.0);
        let status = BarStatus {
            height: 44.0,
            committed_height: 44.0,
            keyboard_presented: false,
            frame_height: 44.0,
            animating: false,
        };
        assert_eq!(surface.next_height(status, 120.0, 44.0), 99.0);
    }
}
