//! Keyboard notification adaptation.
//!
//! Translates raw keyboard frame notifications into the semantic signals the
//! bar acts on. Translation is deliberately lossy: a notification that fails
//! its filtering predicate produces no signal, and the reason is logged at
//! debug level. Routing gates drop whole categories before translation,
//! which is how an interactive drag session silences the keyboard while it
//! owns the gesture.

use std::time::Duration;

use tracing::{debug, trace};

use crate::animation::AnimationCurve;
use crate::geometry::{heights_equal, Rect};

/// Animation parameters carried by a keyboard notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardTiming {
    /// Duration of the keyboard's own animation
    pub duration: Duration,
    /// Curve of the keyboard's own animation
    pub curve: AnimationCurve,
}

impl Default for KeyboardTiming {
    fn default() -> Self {
        Self {
            duration: Duration::ZERO,
            curve: AnimationCurve::EaseInOut,
        }
    }
}

/// Raw keyboard notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardNotificationKind {
    WillShow,
    DidShow,
    WillHide,
    DidHide,
    WillChangeFrame,
    DidChangeFrame,
}

impl KeyboardNotificationKind {
    /// The routing category this kind belongs to
    pub fn category(&self) -> NotificationCategory {
        match self {
            KeyboardNotificationKind::WillShow | KeyboardNotificationKind::DidShow => {
                NotificationCategory::Show
            }
            KeyboardNotificationKind::WillHide | KeyboardNotificationKind::DidHide => {
                NotificationCategory::Hide
            }
            KeyboardNotificationKind::WillChangeFrame
            | KeyboardNotificationKind::DidChangeFrame => NotificationCategory::ChangeFrame,
        }
    }
}

/// Independently routable notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    Show,
    Hide,
    ChangeFrame,
}

/// A raw keyboard frame notification delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardNotification {
    pub kind: KeyboardNotificationKind,
    /// Keyboard frame before the change, in screen coordinates
    pub begin_frame: Rect,
    /// Keyboard frame after the change, in screen coordinates
    pub end_frame: Rect,
    /// The keyboard's own animation parameters
    pub timing: KeyboardTiming,
}

impl KeyboardNotification {
    pub fn new(
        kind: KeyboardNotificationKind,
        begin_frame: Rect,
        end_frame: Rect,
        timing: KeyboardTiming,
    ) -> Self {
        Self {
            kind,
            begin_frame,
            end_frame,
            timing,
        }
    }

    pub fn will_show(begin_frame: Rect, end_frame: Rect, timing: KeyboardTiming) -> Self {
        Self::new(KeyboardNotificationKind::WillShow, begin_frame, end_frame, timing)
    }

    pub fn will_hide(begin_frame: Rect, end_frame: Rect, timing: KeyboardTiming) -> Self {
        Self::new(KeyboardNotificationKind::WillHide, begin_frame, end_frame, timing)
    }

    pub fn did_change_frame(begin_frame: Rect, end_frame: Rect, timing: KeyboardTiming) -> Self {
        Self::new(
            KeyboardNotificationKind::DidChangeFrame,
            begin_frame,
            end_frame,
            timing,
        )
    }
}

/// Per-category delivery gates.
///
/// All categories are enabled by default. Each gate can be toggled on its
/// own; a disabled category drops its notifications before translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationRouting {
    show: bool,
    hide: bool,
    change_frame: bool,
}

impl Default for NotificationRouting {
    fn default() -> Self {
        Self {
            show: true,
            hide: true,
            change_frame: true,
        }
    }
}

impl NotificationRouting {
    pub fn is_enabled(&self, category: NotificationCategory) -> bool {
        match category {
            NotificationCategory::Show => self.show,
            NotificationCategory::Hide => self.hide,
            NotificationCategory::ChangeFrame => self.change_frame,
        }
    }

    pub fn set_enabled(&mut self, category: NotificationCategory, enabled: bool) {
        match category {
            NotificationCategory::Show => self.show = enabled,
            NotificationCategory::Hide => self.hide = enabled,
            NotificationCategory::ChangeFrame => self.change_frame = enabled,
        }
    }

    /// Disable every category
    pub fn suspend_all(&mut self) {
        self.show = false;
        self.hide = false;
        self.change_frame = false;
    }

    /// Enable every category
    pub fn restore_all(&mut self) {
        self.show = true;
        self.hide = true;
        self.change_frame = true;
    }
}

/// Bar state the translation predicates read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalContext {
    /// Whether the presenting signal has latched
    pub keyboard_presented: bool,
    /// The bar's frame height on the host surface
    pub bar_frame_height: f32,
    /// The installed height constraint, if any
    pub height_constraint: Option<f32>,
    /// The keyboard height currently visible on screen, if computable
    pub visible_height: Option<f32>,
    /// Whether a height transition is currently animating
    pub animating: bool,
    /// Whether an interactive drag session owns the scroll surface
    pub drag_engaged: bool,
}

/// Semantic keyboard event produced by translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardSignal {
    /// The keyboard is presenting for the first time
    Presenting,
    /// The keyboard is dismissing
    Dismissing,
    /// The visible keyboard height changed while presented
    FrameChanged { visible_height: f32 },
}

/// Stateless translator from raw notifications to semantic signals
#[derive(Debug, Default)]
pub struct KeyboardMonitor {
    routing: NotificationRouting,
}

impl KeyboardMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routing(&self) -> &NotificationRouting {
        &self.routing
    }

    pub fn routing_mut(&mut self) -> &mut NotificationRouting {
        &mut self.routing
    }

    /// Translate a raw notification under the current bar state.
    ///
    /// Returns `None` when the notification is gated off or fails its
    /// filtering predicate.
    pub fn translate(
        &self,
        note: &KeyboardNotification,
        ctx: &SignalContext,
    ) -> Option<KeyboardSignal> {
        if !self.routing.is_enabled(note.kind.category()) {
            debug!(kind = ?note.kind, "keyboard notification dropped by routing gate");
            return None;
        }

        match note.kind {
            KeyboardNotificationKind::WillShow => self.translate_will_show(note, ctx),
            KeyboardNotificationKind::WillHide => self.translate_will_hide(ctx),
            KeyboardNotificationKind::DidChangeFrame => self.translate_did_change_frame(ctx),
            KeyboardNotificationKind::DidShow
            | KeyboardNotificationKind::DidHide
            | KeyboardNotificationKind::WillChangeFrame => {
                trace!(kind = ?note.kind, "keyboard notification carries no signal");
                None
            }
        }
    }

    /// A show notification only presents a fresh keyboard whose frame is
    /// settled and is not the bar's own frame docking.
    fn translate_will_show(
        &self,
        note: &KeyboardNotification,
        ctx: &SignalContext,
    ) -> Option<KeyboardSignal> {
        if ctx.keyboard_presented {
            debug!("will-show ignored: keyboard already presented");
            return None;
        }
        if heights_equal(note.end_frame.height(), ctx.bar_frame_height) {
            debug!(
                end_height = note.end_frame.height(),
                "will-show ignored: frame matches the bar itself"
            );
            return None;
        }
        if !heights_equal(note.begin_frame.height(), note.end_frame.height()) {
            debug!(
                begin_height = note.begin_frame.height(),
                end_height = note.end_frame.height(),
                "will-show ignored: keyboard frame still changing"
            );
            return None;
        }
        Some(KeyboardSignal::Presenting)
    }

    /// A hide notification only dismisses when the visible height sits inside
    /// the bar's own constraint range.
    fn translate_will_hide(&self, ctx: &SignalContext) -> Option<KeyboardSignal> {
        let (Some(visible), Some(constraint)) = (ctx.visible_height, ctx.height_constraint) else {
            debug!("will-hide ignored: bar geometry unavailable");
            return None;
        };
        if visible < 0.0 || visible > constraint {
            debug!(
                visible,
                constraint, "will-hide ignored: visible height outside bar range"
            );
            return None;
        }
        Some(KeyboardSignal::Dismissing)
    }

    fn translate_did_change_frame(&self, ctx: &SignalContext) -> Option<KeyboardSignal> {
        if ctx.animating {
            debug!("frame-change ignored: height transition in flight");
            return None;
        }
        if !ctx.keyboard_presented {
            debug!("frame-change ignored: keyboard not presented");
            return None;
        }
        if ctx.drag_engaged {
            debug!("frame-change ignored: interactive drag session engaged");
            return None;
        }
        let visible = ctx.visible_height?;
        Some(KeyboardSignal::FrameChanged {
            visible_height: visible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SignalContext {
        SignalContext {
            keyboard_presented: false,
            bar_frame_height: 44.0,
            height_constraint: Some(44.0),
            visible_height: Some(300.0),
            animating: false,
            drag_engaged: false,
        }
    }

    fn settled_show(height: f32) -> KeyboardNotification {
        let frame = Rect::new(0.0, 500.0, 375.0, height);
        KeyboardNotification::will_show(frame, frame, KeyboardTiming::default())
    }

    #[test]
    fn test_will_show_presents_fresh_keyboard() {
        let monitor = KeyboardMonitor::new();
        let signal = monitor.translate(&settled_show(300.0), &ctx());
        assert_eq!(signal, Some(KeyboardSignal::Presenting));
    }

    #[test]
    fn test_will_show_ignored_when_already_presented() {
        let monitor = KeyboardMonitor::new();
        let presented = SignalContext {
            keyboard_presented: true,
            ..ctx()
        };
        assert_eq!(monitor.translate(&settled_show(300.0), &presented), None);
    }

    #[test]
    fn test_will_show_ignored_for_bar_sized_frame() {
        let monitor = KeyboardMonitor::new();
        assert_eq!(monitor.translate(&settled_show(44.0), &ctx()), None);
    }

    #[test]
    fn test_will_show_ignored_while_frame_changing() {
        let monitor = KeyboardMonitor::new();
        let note = KeyboardNotification::will_show(
            Rect::new(0.0, 800.0, 375.0, 260.0),
            Rect::new(0.0, 500.0, 375.0, 300.0),
            KeyboardTiming::default(),
        );
        assert_eq!(monitor.translate(&note, &ctx()), None);
    }

    #[test]
    fn test_will_hide_requires_visible_height_in_range() {
        let monitor = KeyboardMonitor::new();
        let frame = Rect::new(0.0, 500.0, 375.0, 300.0);
        let note = KeyboardNotification::will_hide(frame, frame, KeyboardTiming::default());

        let in_range = SignalContext {
            keyboard_presented: true,
            visible_height: Some(20.0),
            ..ctx()
        };
        assert_eq!(
            monitor.translate(&note, &in_range),
            Some(KeyboardSignal::Dismissing)
        );

        let negative = SignalContext {
            visible_height: Some(-5.0),
            ..in_range
        };
        assert_eq!(monitor.translate(&note, &negative), None);

        let above_constraint = SignalContext {
            visible_height: Some(90.0),
            height_constraint: Some(44.0),
            ..in_range
        };
        assert_eq!(monitor.translate(&note, &above_constraint), None);

        let no_constraint = SignalContext {
            height_constraint: None,
            ..in_range
        };
        assert_eq!(monitor.translate(&note, &no_constraint), None);
    }

    #[test]
    fn test_frame_change_gates() {
        let monitor = KeyboardMonitor::new();
        let frame = Rect::new(0.0, 450.0, 375.0, 350.0);
        let note = KeyboardNotification::did_change_frame(frame, frame, KeyboardTiming::default());

        let live = SignalContext {
            keyboard_presented: true,
            visible_height: Some(280.0),
            ..ctx()
        };
        assert_eq!(
            monitor.translate(&note, &live),
            Some(KeyboardSignal::FrameChanged {
                visible_height: 280.0
            })
        );

        let animating = SignalContext {
            animating: true,
            ..live
        };
        assert_eq!(monitor.translate(&note, &animating), None);

        let not_presented = SignalContext {
            keyboard_presented: false,
            ..live
        };
        assert_eq!(monitor.translate(&note, &not_presented), None);

        let dragging = SignalContext {
            drag_engaged: true,
            ..live
        };
        assert_eq!(monitor.translate(&note, &dragging), None);
    }

    #[test]
    fn test_routing_gate_drops_category() {
        let mut monitor = KeyboardMonitor::new();
        monitor
            .routing_mut()
            .set_enabled(NotificationCategory::Show, false);
        assert_eq!(monitor.translate(&settled_show(300.0), &ctx()), None);

        // Other categories keep flowing
        let frame = Rect::new(0.0, 500.0, 375.0, 300.0);
        let hide = KeyboardNotification::will_hide(frame, frame, KeyboardTiming::default());
        let hide_ctx = SignalContext {
            visible_height: Some(10.0),
            ..ctx()
        };
        assert_eq!(
            monitor.translate(&hide, &hide_ctx),
            Some(KeyboardSignal::Dismissing)
        );
    }

    #[test]
    fn test_suspend_and_restore_all() {
        let mut monitor = KeyboardMonitor::new();
        monitor.routing_mut().suspend_all();
        for category in [
            NotificationCategory::Show,
            NotificationCategory::Hide,
            NotificationCategory::ChangeFrame,
        ] {
            assert!(!monitor.routing().is_enabled(category));
        }
        monitor.routing_mut().restore_all();
        assert!(monitor.routing().is_enabled(NotificationCategory::Show));
    }

    #[test]
    fn test_inert_kinds_produce_no_signal() {
        let monitor = KeyboardMonitor::new();
        let frame = Rect::new(0.0, 500.0, 375.0, 300.0);
        for kind in [
            KeyboardNotificationKind::DidShow,
            KeyboardNotificationKind::DidHide,
            KeyboardNotificationKind::WillChangeFrame,
        ] {
            let note = KeyboardNotification::new(kind, frame, frame, KeyboardTiming::default());
            assert_eq!(monitor.translate(&note, &ctx()), None);
        }
    }
}
