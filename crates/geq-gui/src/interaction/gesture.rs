//! Gesture classification
//!
//! Raw pointer, touch and wheel input is ambiguous: a press on a handle may
//! become a drag, a tap, half of a double tap or a long-press. The
//! classifier resolves that with movement thresholds and a few cancellable
//! timers, and emits discrete [`Intent`]s for the engine to carry out.
//!
//! - tap vs drag: moving 5 px from the press point commits to a drag
//! - double tap (300 ms, same handle): cycle the filter type
//! - single tap: toggle secondary controls after 250 ms
//! - long-press (touch, 500 ms, 3 px tolerance): exclusive toggle
//! - wheel: Q step of 0.1, or 0.01 with shift
//! - auto-hide: 2 s after hover leaves, 3 s after a touch interaction

use geq_core::{Edge, Precision};

use super::drag::crossed_threshold;
use super::mapper::Point;
use super::timer::{Millis, TimerKey, TimerKind, TimerQueue};
use crate::config::GestureConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// Keyboard modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        alt: false,
        ctrl: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        alt: false,
        ctrl: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        alt: true,
        ctrl: false,
    };

    /// Shift selects fine Q steps
    #[inline]
    pub fn precision(&self) -> Precision {
        Precision::from_modifier(self.shift)
    }

    /// Alt reveals the value tooltip of the hovered handle
    #[inline]
    pub fn reveals_tooltip(&self) -> bool {
        self.alt
    }
}

/// What a pointer position lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Empty plot area
    Background,
    Handle(usize),
    Whisker(usize, Edge),
    /// Delete affordance of a selected handle
    Delete(usize),
    /// Outside the plot area
    Outside,
}

impl HitTarget {
    pub fn filter(&self) -> Option<usize> {
        match *self {
            HitTarget::Handle(f) | HitTarget::Whisker(f, _) | HitTarget::Delete(f) => Some(f),
            HitTarget::Background | HitTarget::Outside => None,
        }
    }
}

/// Part of a handle that is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grab {
    /// Moves frequency and gain
    Body,
    /// Sets Q from one band edge
    Whisker(Edge),
}

/// Input to the classifier, with targets already hit-tested
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    Down { target: HitTarget, pos: Point, kind: PointerKind },
    Move { pos: Point },
    Up { pos: Point },
    Cancel,
    Wheel { target: HitTarget, delta_y: f64, modifiers: Modifiers },
    /// Handle under a hovering (not pressed) mouse changed. `left_shown` is
    /// whether the handle being left has its secondary controls showing.
    Hover { filter: Option<usize>, left_shown: bool },
    Modifiers(Modifiers),
}

/// Editing intent produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    CreateFilter { pos: Point },
    BeginDrag { filter: usize, grab: Grab, origin: Point },
    UpdateDrag { pos: Point },
    EndDrag { pos: Point },
    CancelDrag,
    CycleType { filter: usize },
    AdjustQStep { filter: usize, delta: f64, precision: Precision },
    ToggleSecondaryControls { filter: usize, exclusive: bool, source: PointerKind },
    HideSecondaryControls { filter: usize },
    DeleteFilter { filter: usize },
    Tooltip { filter: Option<usize> },
}

#[derive(Debug, Clone, Copy)]
struct Press {
    target: HitTarget,
    origin: Point,
    kind: PointerKind,
    dragged: bool,
    long_pressed: bool,
}

#[derive(Debug, Clone, Copy)]
struct PendingTap {
    filter: usize,
    kind: PointerKind,
}

/// Gesture state machine for one chart (single active pointer)
#[derive(Debug)]
pub struct GestureClassifier {
    config: GestureConfig,
    timers: TimerQueue,
    press: Option<Press>,
    last_tap: Option<(usize, Millis)>,
    pending_tap: Option<PendingTap>,
    /// Single tap whose toggle already fired inside the double-tap window
    fired_tap: Option<PendingTap>,
    hovered: Option<usize>,
    tooltip: Option<usize>,
    modifiers: Modifiers,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            timers: TimerQueue::new(),
            press: None,
            last_tap: None,
            pending_tap: None,
            fired_tap: None,
            hovered: None,
            tooltip: None,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn pressed_target(&self) -> Option<HitTarget> {
        self.press.map(|p| p.target)
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Drop every gesture in flight and all timers
    pub fn reset(&mut self) {
        self.timers.clear();
        self.press = None;
        self.last_tap = None;
        self.pending_tap = None;
        self.fired_tap = None;
        self.hovered = None;
        self.tooltip = None;
    }

    /// Start the inactivity hide for a handle whose controls are showing
    pub fn arm_auto_hide(&mut self, filter: usize, source: PointerKind, now: Millis) {
        let delay = match source {
            PointerKind::Touch => self.config.touch_hide_ms,
            PointerKind::Mouse | PointerKind::Pen => self.config.hover_hide_ms,
        };
        self.timers.arm(TimerKey::new(filter, TimerKind::AutoHide), now + delay);
    }

    pub fn cancel_auto_hide(&mut self, filter: usize) -> bool {
        self.timers.cancel(TimerKey::new(filter, TimerKind::AutoHide))
    }

    /// Handles waiting to be auto-hidden
    pub fn auto_hide_pending(&self) -> Vec<usize> {
        self.timers.armed(TimerKind::AutoHide)
    }

    pub fn handle(&mut self, input: GestureInput, now: Millis) -> Vec<Intent> {
        let mut out = Vec::new();
        match input {
            GestureInput::Down { target, pos, kind } => self.on_down(target, pos, kind, now, &mut out),
            GestureInput::Move { pos } => self.on_move(pos, &mut out),
            GestureInput::Up { pos } => self.on_up(pos, now, &mut out),
            GestureInput::Cancel => self.on_cancel(&mut out),
            GestureInput::Wheel {
                target,
                delta_y,
                modifiers,
            } => self.on_wheel(target, delta_y, modifiers, &mut out),
            GestureInput::Hover { filter, left_shown } => self.on_hover(filter, left_shown, now, &mut out),
            GestureInput::Modifiers(modifiers) => {
                self.modifiers = modifiers;
                self.update_tooltip(&mut out);
            }
        }
        out
    }

    /// Fire expired timers
    pub fn tick(&mut self, now: Millis) -> Vec<Intent> {
        let mut out = Vec::new();
        for key in self.timers.take_due(now) {
            match key.kind {
                TimerKind::SingleTap => {
                    if let Some(tap) = self.pending_tap.filter(|t| t.filter == key.filter) {
                        self.pending_tap = None;
                        self.fired_tap = Some(tap);
                        out.push(Intent::ToggleSecondaryControls {
                            filter: tap.filter,
                            exclusive: false,
                            source: tap.kind,
                        });
                    }
                }
                TimerKind::LongPress => {
                    if let Some(press) = self.press.as_mut() {
                        if press.target == HitTarget::Handle(key.filter) && !press.dragged {
                            press.long_pressed = true;
                            log::trace!("long-press on filter {}", key.filter);
                            out.push(Intent::ToggleSecondaryControls {
                                filter: key.filter,
                                exclusive: true,
                                source: PointerKind::Touch,
                            });
                        }
                    }
                }
                TimerKind::AutoHide => out.push(Intent::HideSecondaryControls { filter: key.filter }),
            }
        }
        out
    }

    fn on_down(&mut self, target: HitTarget, pos: Point, kind: PointerKind, now: Millis, out: &mut Vec<Intent>) {
        if self.press.is_some() {
            log::trace!("ignoring second pointer");
            return;
        }

        match target {
            HitTarget::Outside => return,
            HitTarget::Handle(filter) => {
                self.cancel_auto_hide(filter);
                out.push(Intent::BeginDrag {
                    filter,
                    grab: Grab::Body,
                    origin: pos,
                });
                if kind == PointerKind::Touch {
                    self.timers
                        .arm(TimerKey::new(filter, TimerKind::LongPress), now + self.config.long_press_ms);
                }
            }
            HitTarget::Whisker(filter, edge) => {
                self.cancel_auto_hide(filter);
                out.push(Intent::BeginDrag {
                    filter,
                    grab: Grab::Whisker(edge),
                    origin: pos,
                });
            }
            HitTarget::Delete(filter) => {
                self.cancel_auto_hide(filter);
            }
            HitTarget::Background => {}
        }

        self.press = Some(Press {
            target,
            origin: pos,
            kind,
            dragged: false,
            long_pressed: false,
        });
    }

    fn on_move(&mut self, pos: Point, out: &mut Vec<Intent>) {
        let Some(press) = self.press.as_mut() else {
            return;
        };

        if let HitTarget::Handle(filter) = press.target {
            if press.origin.distance(pos) > self.config.long_press_tolerance_px
                && self.timers.cancel(TimerKey::new(filter, TimerKind::LongPress))
            {
                log::trace!("long-press on filter {filter} cancelled by movement");
            }
        }

        if crossed_threshold(press.origin, pos, self.config.drag_threshold_px) {
            press.dragged = true;
        }

        if matches!(press.target, HitTarget::Handle(_) | HitTarget::Whisker(..)) {
            out.push(Intent::UpdateDrag { pos });
        }
    }

    fn on_up(&mut self, pos: Point, now: Millis, out: &mut Vec<Intent>) {
        let Some(mut press) = self.press.take() else {
            return;
        };
        if crossed_threshold(press.origin, pos, self.config.drag_threshold_px) {
            press.dragged = true;
        }

        match press.target {
            HitTarget::Handle(filter) => {
                self.timers.cancel(TimerKey::new(filter, TimerKind::LongPress));
                out.push(Intent::EndDrag { pos });
                if !press.dragged && !press.long_pressed {
                    self.on_tap(filter, press.kind, now, out);
                }
            }
            HitTarget::Whisker(..) => out.push(Intent::EndDrag { pos }),
            HitTarget::Delete(filter) => {
                if !press.dragged {
                    out.push(Intent::DeleteFilter { filter });
                }
            }
            HitTarget::Background => {
                if !press.dragged {
                    out.push(Intent::CreateFilter { pos });
                }
            }
            HitTarget::Outside => {}
        }
    }

    fn on_tap(&mut self, filter: usize, kind: PointerKind, now: Millis, out: &mut Vec<Intent>) {
        let double_tap = matches!(
            self.last_tap,
            Some((prev, at)) if prev == filter && now.saturating_sub(at) <= self.config.double_tap_ms
        );

        if double_tap {
            // Both taps are consumed; the next tap starts a fresh window
            self.last_tap = None;
            if let Some(tap) = self.pending_tap.take() {
                self.timers.cancel(TimerKey::new(tap.filter, TimerKind::SingleTap));
            } else if let Some(tap) = self.fired_tap.take().filter(|t| t.filter == filter) {
                // The first tap's toggle fired before the second tap landed; undo it
                out.push(Intent::ToggleSecondaryControls {
                    filter,
                    exclusive: false,
                    source: tap.kind,
                });
            }
            out.push(Intent::CycleType { filter });
            return;
        }

        // A tap elsewhere settles the previous handle's pending tap at once
        if let Some(tap) = self.pending_tap.take() {
            if self.timers.cancel(TimerKey::new(tap.filter, TimerKind::SingleTap)) {
                out.push(Intent::ToggleSecondaryControls {
                    filter: tap.filter,
                    exclusive: false,
                    source: tap.kind,
                });
            }
        }

        self.fired_tap = None;
        self.last_tap = Some((filter, now));
        self.pending_tap = Some(PendingTap { filter, kind });
        self.timers
            .arm(TimerKey::new(filter, TimerKind::SingleTap), now + self.config.single_tap_delay_ms);
    }

    fn on_cancel(&mut self, out: &mut Vec<Intent>) {
        let Some(press) = self.press.take() else {
            return;
        };
        match press.target {
            HitTarget::Handle(filter) => {
                self.timers.cancel(TimerKey::new(filter, TimerKind::LongPress));
                out.push(Intent::CancelDrag);
            }
            HitTarget::Whisker(..) => out.push(Intent::CancelDrag),
            _ => {}
        }
    }

    fn on_wheel(&mut self, target: HitTarget, delta_y: f64, modifiers: Modifiers, out: &mut Vec<Intent>) {
        let filter = match target {
            HitTarget::Handle(f) | HitTarget::Whisker(f, _) => f,
            _ => return,
        };
        if delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }

        self.cancel_auto_hide(filter);

        let precision = modifiers.precision();
        let step = precision.q_step();
        // Scrolling up narrows the band
        let delta = if delta_y < 0.0 { step } else { -step };
        out.push(Intent::AdjustQStep {
            filter,
            delta,
            precision,
        });
    }

    fn on_hover(&mut self, filter: Option<usize>, left_shown: bool, now: Millis, out: &mut Vec<Intent>) {
        if self.press.is_some() || filter == self.hovered {
            return;
        }
        if let Some(left) = self.hovered.filter(|_| left_shown) {
            self.arm_auto_hide(left, PointerKind::Mouse, now);
        }
        if let Some(entered) = filter {
            self.cancel_auto_hide(entered);
        }
        self.hovered = filter;
        self.update_tooltip(out);
    }

    fn update_tooltip(&mut self, out: &mut Vec<Intent>) {
        let wanted = if self.modifiers.reveals_tooltip() { self.hovered } else { None };
        if wanted != self.tooltip {
            self.tooltip = wanted;
            out.push(Intent::Tooltip { filter: wanted });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(GestureConfig::default())
    }

    fn down(c: &mut GestureClassifier, target: HitTarget, kind: PointerKind, at: Millis) -> Vec<Intent> {
        c.handle(
            GestureInput::Down {
                target,
                pos: Point::new(100.0, 100.0),
                kind,
            },
            at,
        )
    }

    fn up(c: &mut GestureClassifier, dx: f64, at: Millis) -> Vec<Intent> {
        c.handle(GestureInput::Up { pos: Point::new(100.0 + dx, 100.0) }, at)
    }

    fn tap(c: &mut GestureClassifier, filter: usize, at: Millis) -> Vec<Intent> {
        down(c, HitTarget::Handle(filter), PointerKind::Mouse, at);
        up(c, 0.0, at + 40)
    }

    fn toggles(intents: &[Intent]) -> usize {
        intents
            .iter()
            .filter(|i| matches!(i, Intent::ToggleSecondaryControls { .. }))
            .count()
    }

    #[test]
    fn test_single_tap_toggles_after_delay() {
        let mut c = classifier();
        let intents = tap(&mut c, 0, 0);
        assert_eq!(intents, vec![Intent::EndDrag { pos: Point::new(100.0, 100.0) }]);

        assert!(c.tick(200).is_empty());
        assert_eq!(
            c.tick(290),
            vec![Intent::ToggleSecondaryControls {
                filter: 0,
                exclusive: false,
                source: PointerKind::Mouse
            }]
        );
    }

    #[test]
    fn test_drag_suppresses_tap() {
        let mut c = classifier();
        down(&mut c, HitTarget::Handle(0), PointerKind::Mouse, 0);
        let moved = c.handle(GestureInput::Move { pos: Point::new(106.0, 100.0) }, 10);
        assert_eq!(moved, vec![Intent::UpdateDrag { pos: Point::new(106.0, 100.0) }]);
        up(&mut c, 6.0, 20);
        assert_eq!(toggles(&c.tick(1000)), 0);
    }

    #[test]
    fn test_jitter_below_threshold_is_still_a_tap() {
        let mut c = classifier();
        down(&mut c, HitTarget::Handle(0), PointerKind::Mouse, 0);
        c.handle(GestureInput::Move { pos: Point::new(103.0, 102.0) }, 10);
        up(&mut c, 3.0, 20);
        assert_eq!(toggles(&c.tick(1000)), 1);
    }

    #[test]
    fn test_double_tap_cycles_and_cancels_single_tap() {
        let mut c = classifier();
        tap(&mut c, 2, 0);
        let second = tap(&mut c, 2, 200);
        assert!(second.contains(&Intent::CycleType { filter: 2 }));
        assert_eq!(toggles(&c.tick(2000)), 0);
    }

    #[test]
    fn test_double_tap_window_is_inclusive() {
        let mut c = classifier();
        tap(&mut c, 0, 0);
        // Released exactly 300 ms after the first release
        let second = tap(&mut c, 0, 300);
        assert!(second.contains(&Intent::CycleType { filter: 0 }));

        let mut c = classifier();
        tap(&mut c, 0, 0);
        // One millisecond past the window
        let second = tap(&mut c, 0, 301);
        assert!(!second.iter().any(|i| matches!(i, Intent::CycleType { .. })));
        assert!(c.timers().is_armed(TimerKey::new(0, TimerKind::SingleTap)));
        assert_eq!(c.next_deadline(), Some(341 + 250));
    }

    #[test]
    fn test_double_tap_after_single_tap_fired_undoes_toggle() {
        let mut c = classifier();
        tap(&mut c, 0, 0);
        assert_eq!(toggles(&c.tick(290)), 1);

        // Second release at 335 is still inside the 300 ms window
        let second = tap(&mut c, 0, 295);
        assert_eq!(
            second,
            vec![
                Intent::EndDrag { pos: Point::new(100.0, 100.0) },
                Intent::ToggleSecondaryControls {
                    filter: 0,
                    exclusive: false,
                    source: PointerKind::Mouse
                },
                Intent::CycleType { filter: 0 },
            ]
        );
        assert_eq!(toggles(&c.tick(2000)), 0);
    }

    #[test]
    fn test_tap_after_window_restarts_disambiguation() {
        let mut c = classifier();
        tap(&mut c, 0, 0);
        tap(&mut c, 0, 100);
        // Both taps were consumed by the double-tap
        let third = tap(&mut c, 0, 441);
        assert!(!third.iter().any(|i| matches!(i, Intent::CycleType { .. })));
        assert!(c.timers().is_armed(TimerKey::new(0, TimerKind::SingleTap)));
    }

    #[test]
    fn test_taps_on_different_handles_are_not_double() {
        let mut c = classifier();
        tap(&mut c, 0, 0);
        let second = tap(&mut c, 1, 100);
        assert!(!second.iter().any(|i| matches!(i, Intent::CycleType { .. })));
        // The first handle's tap is settled immediately
        assert!(second.contains(&Intent::ToggleSecondaryControls {
            filter: 0,
            exclusive: false,
            source: PointerKind::Mouse
        }));
    }

    #[test]
    fn test_long_press_is_exclusive_toggle() {
        let mut c = classifier();
        down(&mut c, HitTarget::Handle(1), PointerKind::Touch, 0);
        assert_eq!(
            c.tick(500),
            vec![Intent::ToggleSecondaryControls {
                filter: 1,
                exclusive: true,
                source: PointerKind::Touch
            }]
        );
        up(&mut c, 0.0, 700);
        // No single-tap toggle after a long-press
        assert_eq!(toggles(&c.tick(2000)), 0);
    }

    #[test]
    fn test_long_press_cancelled_by_movement() {
        let mut c = classifier();
        down(&mut c, HitTarget::Handle(1), PointerKind::Touch, 0);
        c.handle(GestureInput::Move { pos: Point::new(104.0, 100.0) }, 100);
        assert!(c.tick(600).is_empty());
    }

    #[test]
    fn test_mouse_has_no_long_press() {
        let mut c = classifier();
        down(&mut c, HitTarget::Handle(1), PointerKind::Mouse, 0);
        assert!(c.tick(5000).is_empty());
    }

    #[test]
    fn test_wheel_steps() {
        let mut c = classifier();
        let coarse = c.handle(
            GestureInput::Wheel {
                target: HitTarget::Handle(0),
                delta_y: -120.0,
                modifiers: Modifiers::NONE,
            },
            0,
        );
        assert_eq!(
            coarse,
            vec![Intent::AdjustQStep {
                filter: 0,
                delta: 0.1,
                precision: Precision::Coarse
            }]
        );

        let fine = c.handle(
            GestureInput::Wheel {
                target: HitTarget::Handle(0),
                delta_y: 3.0,
                modifiers: Modifiers::SHIFT,
            },
            0,
        );
        assert_eq!(
            fine,
            vec![Intent::AdjustQStep {
                filter: 0,
                delta: -0.01,
                precision: Precision::Fine
            }]
        );

        let background = c.handle(
            GestureInput::Wheel {
                target: HitTarget::Background,
                delta_y: 3.0,
                modifiers: Modifiers::NONE,
            },
            0,
        );
        assert!(background.is_empty());
    }

    #[test]
    fn test_hover_leave_auto_hides() {
        let mut c = classifier();
        c.handle(GestureInput::Hover { filter: Some(0), left_shown: false }, 0);
        c.handle(GestureInput::Hover { filter: None, left_shown: true }, 1000);
        assert!(c.tick(2900).is_empty());
        assert_eq!(c.tick(3000), vec![Intent::HideSecondaryControls { filter: 0 }]);
    }

    #[test]
    fn test_hover_leave_of_hidden_controls_arms_nothing() {
        let mut c = classifier();
        c.handle(GestureInput::Hover { filter: Some(2), left_shown: false }, 0);
        c.handle(GestureInput::Hover { filter: None, left_shown: false }, 100);
        assert_eq!(c.next_deadline(), None);
        assert!(c.auto_hide_pending().is_empty());
    }

    #[test]
    fn test_hover_return_cancels_auto_hide() {
        let mut c = classifier();
        c.handle(GestureInput::Hover { filter: Some(0), left_shown: false }, 0);
        c.handle(GestureInput::Hover { filter: None, left_shown: true }, 100);
        c.handle(GestureInput::Hover { filter: Some(0), left_shown: false }, 1500);
        assert!(c.tick(5000).is_empty());
    }

    #[test]
    fn test_background_click_creates_and_drag_does_not() {
        let mut c = classifier();
        down(&mut c, HitTarget::Background, PointerKind::Mouse, 0);
        assert_eq!(up(&mut c, 1.0, 50), vec![Intent::CreateFilter { pos: Point::new(101.0, 100.0) }]);

        down(&mut c, HitTarget::Background, PointerKind::Mouse, 100);
        assert!(up(&mut c, 40.0, 150).is_empty());
    }

    #[test]
    fn test_delete_click() {
        let mut c = classifier();
        down(&mut c, HitTarget::Delete(3), PointerKind::Touch, 0);
        assert_eq!(up(&mut c, 0.0, 80), vec![Intent::DeleteFilter { filter: 3 }]);
    }

    #[test]
    fn test_whisker_drag_never_taps() {
        let mut c = classifier();
        let begin = down(&mut c, HitTarget::Whisker(0, Edge::High), PointerKind::Mouse, 0);
        assert_eq!(
            begin,
            vec![Intent::BeginDrag {
                filter: 0,
                grab: Grab::Whisker(Edge::High),
                origin: Point::new(100.0, 100.0)
            }]
        );
        assert_eq!(up(&mut c, 0.0, 30), vec![Intent::EndDrag { pos: Point::new(100.0, 100.0) }]);
        assert!(c.tick(1000).is_empty());
    }

    #[test]
    fn test_tooltip_modifier() {
        let mut c = classifier();
        c.handle(GestureInput::Hover { filter: Some(4), left_shown: false }, 0);
        assert_eq!(
            c.handle(GestureInput::Modifiers(Modifiers::ALT), 10),
            vec![Intent::Tooltip { filter: Some(4) }]
        );
        assert_eq!(
            c.handle(GestureInput::Hover { filter: None, left_shown: false }, 20),
            vec![Intent::Tooltip { filter: None }]
        );
        assert!(c.handle(GestureInput::Modifiers(Modifiers::NONE), 30).is_empty());
    }

    #[test]
    fn test_cancel_ends_drag_without_tap() {
        let mut c = classifier();
        down(&mut c, HitTarget::Handle(0), PointerKind::Touch, 0);
        assert_eq!(c.handle(GestureInput::Cancel, 10), vec![Intent::CancelDrag]);
        assert!(!c.is_pressed());
        assert!(c.tick(2000).is_empty());
    }
}
