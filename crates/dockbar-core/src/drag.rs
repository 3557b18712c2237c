//! Interactive drag-to-raise state machine.
//!
//! A host that wants drag-to-raise engages a session and then forwards pan
//! phase changes and scroll offset updates. The controller decides what the
//! bar must do; the bar executes against the host. Keeping the decisions
//! here makes the machine testable without any host at all.

use tracing::debug;

use crate::scroll::PanPhase;

/// Phase of the interactive drag machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No active touch
    Idle,
    /// A pan is in progress but has not reached the engage predicate
    Dragging,
    /// The drag is raising the bar; keyboard routing is suspended
    Enabling,
}

/// What the bar must do in response to a drag input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragAction {
    None,
    /// Enter interactive enable: suspend keyboard routing, jump the height
    /// constraint by the touch offset, and focus without animation
    BeginEnable { touch_offset: f32 },
    /// Report the visible keyboard height to the delegate
    ReportVisibleHeight,
    /// Leave interactive enable: restore the constraint and routing
    EndEnable,
}

/// Bar state the engage predicate reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragContext {
    /// Whether the presenting signal has latched
    pub keyboard_presented: bool,
    /// Whether the monitored surface is scrolled to its content bottom
    pub scrolled_to_bottom: bool,
    /// Whether the selected component exposes an input surface
    pub has_input_surface: bool,
    /// Whether the keyboard is already fully extended
    pub fully_extended: bool,
}

/// State machine for one drag-to-raise session.
#[derive(Debug)]
pub struct DragController {
    phase: DragPhase,
    engaged: bool,
    /// Vertical touch location within the bar's content view, captured from
    /// the most recent pan update
    last_touch_y: f32,
}

impl Default for DragController {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
            engaged: false,
            last_touch_y: 0.0,
        }
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session currently owns the scroll surface
    #[inline]
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Whether a pan is in progress (dragging or enabling)
    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging | DragPhase::Enabling)
    }

    /// Whether the drag is currently raising the bar
    #[inline]
    pub fn is_enabling(&self) -> bool {
        self.phase == DragPhase::Enabling
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Start a session. An existing session is replaced and its state reset.
    /// Returns `EndEnable` when the replaced session was mid-enable so the
    /// bar can restore the constraint and routing.
    pub fn engage(&mut self) -> DragAction {
        let was_enabling = self.phase == DragPhase::Enabling;
        if self.engaged {
            debug!(was_enabling, "drag session replaced");
        }
        self.engaged = true;
        self.phase = DragPhase::Idle;
        self.last_touch_y = 0.0;
        if was_enabling {
            DragAction::EndEnable
        } else {
            DragAction::None
        }
    }

    /// End the session. Returns `EndEnable` when the machine was mid-enable
    /// so the bar can restore the constraint and routing.
    pub fn disengage(&mut self) -> DragAction {
        let was_enabling = self.phase == DragPhase::Enabling;
        self.engaged = false;
        self.phase = DragPhase::Idle;
        if was_enabling {
            DragAction::EndEnable
        } else {
            DragAction::None
        }
    }

    /// Feed a pan gesture phase change.
    pub fn pan_changed(&mut self, phase: PanPhase, touch_y_in_bar: Option<f32>) -> DragAction {
        if !self.engaged {
            return DragAction::None;
        }
        if let Some(y) = touch_y_in_bar {
            self.last_touch_y = y;
        }
        match phase {
            PanPhase::Began => {
                if self.phase == DragPhase::Idle {
                    debug!("drag began");
                    self.phase = DragPhase::Dragging;
                }
                DragAction::None
            }
            PanPhase::Changed => DragAction::None,
            PanPhase::Ended | PanPhase::Cancelled => {
                let was_enabling = self.phase == DragPhase::Enabling;
                if self.phase != DragPhase::Idle {
                    debug!(was_enabling, "drag ended");
                }
                self.phase = DragPhase::Idle;
                if was_enabling {
                    DragAction::EndEnable
                } else {
                    DragAction::None
                }
            }
        }
    }

    /// Feed a scroll offset update.
    ///
    /// The first action moves the machine into `Enabling` when the engage
    /// predicate holds; once enabling, every update reports the visible
    /// height until the keyboard is fully extended. The bar re-checks the
    /// report condition itself right after executing `BeginEnable`, since
    /// the same update that engages also reports.
    pub fn scroll_changed(&mut self, ctx: &DragContext) -> DragAction {
        if !self.is_dragging() {
            return DragAction::None;
        }

        if self.phase == DragPhase::Dragging
            && !ctx.keyboard_presented
            && ctx.scrolled_to_bottom
            && ctx.has_input_surface
        {
            debug!(touch_y = self.last_touch_y, "interactive enable started");
            self.phase = DragPhase::Enabling;
            return DragAction::BeginEnable {
                touch_offset: self.last_touch_y.abs(),
            };
        }

        if self.phase == DragPhase::Enabling && !ctx.fully_extended {
            return DragAction::ReportVisibleHeight;
        }

        DragAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engageable() -> DragContext {
        DragContext {
            keyboard_presented: false,
            scrolled_to_bottom: true,
            has_input_surface: true,
            fully_extended: false,
        }
    }

    fn engaged_controller() -> DragController {
        let mut controller = DragController::new();
        controller.engage();
        controller
    }

    #[test]
    fn test_idle_ignores_scroll() {
        let mut controller = engaged_controller();
        assert_eq!(controller.scroll_changed(&engageable()), DragAction::None);
        assert_eq!(controller.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_began_then_bottom_scroll_enables() {
        let mut controller = engaged_controller();
        controller.pan_changed(PanPhase::Began, Some(-18.0));
        assert_eq!(controller.phase(), DragPhase::Dragging);

        let action = controller.scroll_changed(&engageable());
        assert_eq!(action, DragAction::BeginEnable { touch_offset: 18.0 });
        assert_eq!(controller.phase(), DragPhase::Enabling);
        assert!(controller.is_dragging());
        assert!(controller.is_enabling());
    }

    #[test]
    fn test_engage_predicate_requires_all_conditions() {
        for broken in [
            DragContext {
                keyboard_presented: true,
                ..engageable()
            },
            DragContext {
                scrolled_to_bottom: false,
                ..engageable()
            },
            DragContext {
                has_input_surface: false,
                ..engageable()
            },
        ] {
            let mut controller = engaged_controller();
            controller.pan_changed(PanPhase::Began, None);
            assert_eq!(controller.scroll_changed(&broken), DragAction::None);
            assert_eq!(controller.phase(), DragPhase::Dragging);
        }
    }

    #[test]
    fn test_enabling_reports_until_fully_extended() {
        let mut controller = engaged_controller();
        controller.pan_changed(PanPhase::Began, Some(10.0));
        controller.scroll_changed(&engageable());

        assert_eq!(
            controller.scroll_changed(&engageable()),
            DragAction::ReportVisibleHeight
        );

        let extended = DragContext {
            fully_extended: true,
            ..engageable()
        };
        assert_eq!(controller.scroll_changed(&extended), DragAction::None);
    }

    #[test]
    fn test_end_from_enabling_requests_restore() {
        let mut controller = engaged_controller();
        controller.pan_changed(PanPhase::Began, Some(10.0));
        controller.scroll_changed(&engageable());

        let action = controller.pan_changed(PanPhase::Ended, None);
        assert_eq!(action, DragAction::EndEnable);
        assert_eq!(controller.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_end_from_dragging_is_quiet() {
        let mut controller = engaged_controller();
        controller.pan_changed(PanPhase::Began, None);
        assert_eq!(
            controller.pan_changed(PanPhase::Cancelled, None),
            DragAction::None
        );
        assert_eq!(controller.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_unengaged_controller_ignores_input() {
        let mut controller = DragController::new();
        assert_eq!(
            controller.pan_changed(PanPhase::Began, Some(5.0)),
            DragAction::None
        );
        assert_eq!(controller.scroll_changed(&engageable()), DragAction::None);
    }

    #[test]
    fn test_disengage_mid_enable_requests_restore() {
        let mut controller = engaged_controller();
        controller.pan_changed(PanPhase::Began, Some(4.0));
        controller.scroll_changed(&engageable());
        assert_eq!(controller.disengage(), DragAction::EndEnable);
        assert!(!controller.is_engaged());
    }

    #[test]
    fn test_reengage_mid_enable_requests_restore() {
        let mut controller = engaged_controller();
        controller.pan_changed(PanPhase::Began, Some(4.0));
        controller.scroll_changed(&engageable());
        assert_eq!(controller.engage(), DragAction::EndEnable);
        assert_eq!(controller.phase(), DragPhase::Idle);
        assert!(controller.is_engaged());
    }

    #[test]
    fn test_reengage_while_dragging_is_quiet() {
        let mut controller = engaged_controller();
        controller.pan_changed(PanPhase::Began, Some(4.0));
        assert_eq!(controller.engage(), DragAction::None);
        assert_eq!(controller.phase(), DragPhase::Idle);
    }
}
