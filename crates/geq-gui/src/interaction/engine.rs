//! EqEngine - graph EQ interaction facade
//!
//! Owns the per-chart interaction state (gesture classifier, drag session,
//! handle views) and wires it to the host. The host feeds it timestamped
//! input, calls [`EqEngine::frame`] when a frame was requested and
//! [`EqEngine::tick`] when [`EqEngine::next_deadline`] passes.

use geq_core::{DEFAULT_Q, Filter, FilterType, GeqError, GeqResult, Precision, clamp_gain, clamp_q, sanitize_q};

use super::drag::{DragOutcome, DragSession, DragStep, DragUpdate, compute_update};
use super::gesture::{GestureClassifier, GestureInput, Grab, HitTarget, Intent, Modifiers, PointerKind};
use super::handles::{HandleSetController, HandleViewState};
use super::mapper::{CoordinateMapper, Point, ScreenTransform};
use super::timer::Millis;
use crate::config::EngineConfig;
use crate::host::{EqHost, ListenerId, ListenerKind};

/// Platform pointer identifier (one per finger, pen or mouse)
pub type PointerId = u64;

/// Raw input from the host, in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { pointer: PointerId, pos: Point, kind: PointerKind },
    PointerMove { pointer: PointerId, pos: Point, kind: PointerKind },
    PointerUp { pointer: PointerId, pos: Point },
    PointerCancel { pointer: PointerId },
    /// Pointer left the chart without a press
    PointerLeave,
    Wheel { pos: Point, delta_y: f64, modifiers: Modifiers },
    Modifiers(Modifiers),
}

const LISTENERS: [ListenerKind; 3] = [ListenerKind::Pointer, ListenerKind::Wheel, ListenerKind::Keyboard];

pub struct EqEngine<H: EqHost> {
    host: H,
    config: EngineConfig,
    mapper: Option<CoordinateMapper>,
    enabled: bool,
    listeners: Vec<ListenerId>,
    classifier: GestureClassifier,
    drag: Option<DragSession>,
    handles: HandleSetController,
    modifiers: Modifiers,
    press_kind: PointerKind,
    /// Pointer that owns the current press
    active_pointer: Option<PointerId>,
    now: Millis,
}

impl<H: EqHost> EqEngine<H> {
    pub fn new(host: H, config: EngineConfig) -> Self {
        Self {
            host,
            classifier: GestureClassifier::new(config.gesture.clone()),
            handles: HandleSetController::new(config.handles.clone()),
            config,
            mapper: None,
            enabled: false,
            listeners: Vec::new(),
            drag: None,
            modifiers: Modifiers::NONE,
            press_kind: PointerKind::Mouse,
            active_pointer: None,
            now: 0,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════

    /// Attach (or replace) the chart the engine works on
    pub fn attach_chart(&mut self, mapper: CoordinateMapper) {
        self.mapper = Some(mapper);
        if self.enabled {
            self.update_handles();
        }
    }

    /// Follow a change of the chart's screen transform (resize, scroll,
    /// zoom). A singular transform is rejected and the previous chart kept.
    pub fn set_screen_transform(&mut self, screen: ScreenTransform) -> GeqResult<()> {
        let Some(current) = self.mapper else {
            return Err(GeqError::InvalidParam("no chart attached".to_string()));
        };
        match CoordinateMapper::new(screen, current.freq_scale(), current.gain_scale()) {
            Ok(mapper) => {
                self.attach_chart(mapper);
                Ok(())
            }
            Err(e) => {
                log::warn!("keeping previous chart transform: {e}");
                Err(e)
            }
        }
    }

    pub fn mapper(&self) -> Option<&CoordinateMapper> {
        self.mapper.as_ref()
    }

    /// Start accepting input. No-op when already enabled or without a chart.
    pub fn enable(&mut self) -> bool {
        if self.enabled {
            return true;
        }
        if self.mapper.is_none() {
            log::debug!("EQ handles not enabled: no chart attached");
            return false;
        }

        for kind in LISTENERS {
            let id = self.host.register(kind);
            self.listeners.push(id);
        }
        self.enabled = true;
        self.host.clear_labels();
        self.update_handles();
        log::debug!("EQ handles enabled ({} handles)", self.handles.len());
        true
    }

    /// Stop accepting input and release every listener
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.drag = None;
        self.active_pointer = None;
        self.classifier.reset();
        self.handles.clear();
        for id in self.listeners.drain(..) {
            self.host.unregister(id);
        }
        self.enabled = false;
        self.host.update_paths();
        log::debug!("EQ handles disabled");
    }

    /// Disable and forget the chart
    pub fn destroy(&mut self) {
        self.disable();
        self.mapper = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn handles(&self) -> &HandleSetController {
        &self.handles
    }

    pub fn handle(&self, filter: usize) -> Option<&HandleViewState> {
        self.handles.view(filter)
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Whether a drag has crossed the threshold and is writing parameters
    pub fn is_dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(DragSession::is_active)
    }

    /// When the host should call [`EqEngine::tick`] next
    pub fn next_deadline(&self) -> Option<Millis> {
        self.classifier.next_deadline()
    }

    /// What a client-space point lands on
    pub fn hit_test(&self, client: Point) -> HitTarget {
        let Some(mapper) = self.mapper.as_ref() else {
            return HitTarget::Outside;
        };
        let chart = mapper.client_to_chart(client);
        match self.handles.hit_test(chart) {
            HitTarget::Background if !mapper.contains(chart) => HitTarget::Outside,
            target => target,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // RENDERING
    // ═══════════════════════════════════════════════════════════════════════

    /// Re-derive handles from the filter list, placing them immediately
    pub fn update_handles(&mut self) {
        if !self.enabled {
            return;
        }
        let Some(mapper) = self.mapper else {
            return;
        };
        let filters = self.host.filters();
        let curve = self.host.reference_curve();
        self.handles.reconcile(&filters, &mapper, curve.as_ref());
    }

    /// Re-derive handles, animating moves over `duration_ms`
    pub fn transition_handles(&mut self, duration_ms: Millis) {
        if !self.enabled {
            return;
        }
        let Some(mapper) = self.mapper else {
            return;
        };
        let filters = self.host.filters();
        let curve = self.host.reference_curve();
        self.handles
            .transition(&filters, &mapper, curve.as_ref(), duration_ms, self.now);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // INPUT
    // ═══════════════════════════════════════════════════════════════════════

    /// Feed one input event stamped with the host clock.
    ///
    /// Only an edit against a filter the host no longer has is reported;
    /// everything else falls back silently. Pointers other than the one
    /// holding the current press are ignored until it is released.
    pub fn handle_event(&mut self, event: InputEvent, now: Millis) -> GeqResult<()> {
        if !self.enabled {
            return Ok(());
        }
        self.now = now;

        let mut pressing = None;
        let input = match event {
            InputEvent::PointerDown { pointer, pos, kind } => {
                if self.active_pointer.is_some() {
                    log::trace!("ignoring down from second pointer {pointer}");
                    return Ok(());
                }
                pressing = Some(pointer);
                self.press_kind = kind;
                GestureInput::Down {
                    target: self.hit_test(pos),
                    pos,
                    kind,
                }
            }
            InputEvent::PointerMove { pointer, pos, kind } => match self.active_pointer {
                Some(active) if active == pointer => GestureInput::Move { pos },
                Some(_) => return Ok(()),
                None if kind == PointerKind::Touch => return Ok(()),
                None => self.hover_input(self.hit_test(pos).filter()),
            },
            InputEvent::PointerUp { pointer, pos } => {
                if self.active_pointer != Some(pointer) {
                    return Ok(());
                }
                self.active_pointer = None;
                GestureInput::Up { pos }
            }
            InputEvent::PointerCancel { pointer } => {
                if self.active_pointer != Some(pointer) {
                    return Ok(());
                }
                self.active_pointer = None;
                GestureInput::Cancel
            }
            InputEvent::PointerLeave => self.hover_input(None),
            InputEvent::Wheel {
                pos,
                delta_y,
                modifiers,
            } => {
                self.modifiers = modifiers;
                GestureInput::Wheel {
                    target: self.hit_test(pos),
                    delta_y,
                    modifiers,
                }
            }
            InputEvent::Modifiers(modifiers) => {
                self.modifiers = modifiers;
                GestureInput::Modifiers(modifiers)
            }
        };

        let released = match input {
            GestureInput::Up { .. } => self.classifier.pressed_target(),
            _ => None,
        };

        let intents = self.classifier.handle(input, now);
        // A press outside the chart is not tracked
        if self.classifier.is_pressed() {
            self.active_pointer = self.active_pointer.or(pressing);
        }
        let result = self.apply_all(intents);

        // A touch interaction on a handle with its controls showing starts
        // the longer touch auto-hide
        if self.press_kind == PointerKind::Touch {
            if let Some(filter) = released.and_then(|t| t.filter()) {
                if self.handles.is_selected(filter) {
                    self.classifier.arm_auto_hide(filter, PointerKind::Touch, now);
                }
            }
        }
        result
    }

    fn hover_input(&self, filter: Option<usize>) -> GestureInput {
        let left_shown = self.classifier.hovered().is_some_and(|h| self.handles.is_selected(h));
        GestureInput::Hover { filter, left_shown }
    }

    /// Drain the drag frame slot. Call once per requested frame.
    pub fn frame(&mut self) {
        let Some(session) = self.drag.as_mut() else {
            return;
        };
        let Some(pos) = session.take_frame() else {
            return;
        };
        let (filter, grab) = (session.filter(), session.grab());

        if self.write_update(filter, grab, pos) {
            self.host.update_preview();
            self.update_handles();
        }
    }

    /// Fire due gesture timers and advance handle transitions
    pub fn tick(&mut self, now: Millis) -> bool {
        self.now = now;
        if self.enabled {
            let intents = self.classifier.tick(now);
            if let Err(e) = self.apply_all(intents) {
                log::debug!("timer intent failed: {e}");
            }
        }
        self.handles.tick(now)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // INTENTS
    // ═══════════════════════════════════════════════════════════════════════

    fn apply_all(&mut self, intents: Vec<Intent>) -> GeqResult<()> {
        let mut result = Ok(());
        for intent in intents {
            if let Err(e) = self.apply(intent) {
                log::debug!("{intent:?} declined: {e}");
                result = Err(e);
            }
        }
        result
    }

    fn apply(&mut self, intent: Intent) -> GeqResult<()> {
        match intent {
            Intent::CreateFilter { pos } => self.create_filter(pos)?,
            Intent::BeginDrag { filter, grab, origin } => {
                self.drag = Some(DragSession::begin(
                    filter,
                    grab,
                    origin,
                    self.config.gesture.drag_threshold_px,
                ));
            }
            Intent::UpdateDrag { pos } => {
                if let Some(session) = self.drag.as_mut() {
                    if session.move_to(pos) == DragStep::ScheduleFrame {
                        self.host.request_frame();
                    }
                }
            }
            Intent::EndDrag { pos } => {
                if let Some(mut session) = self.drag.take() {
                    let outcome = session.end(pos);
                    self.finish_drag(&session, outcome);
                }
            }
            Intent::CancelDrag => {
                if let Some(mut session) = self.drag.take() {
                    let outcome = session.cancel();
                    self.finish_drag(&session, outcome);
                }
            }
            Intent::CycleType { filter } => self.cycle_type(filter),
            Intent::AdjustQStep {
                filter,
                delta,
                precision,
            } => self.adjust_q(filter, delta, precision),
            Intent::ToggleSecondaryControls {
                filter,
                exclusive,
                source,
            } => self.toggle_controls(filter, exclusive, source),
            Intent::HideSecondaryControls { filter } => {
                self.handles.hide(filter);
            }
            Intent::DeleteFilter { filter } => self.delete_filter(filter)?,
            Intent::Tooltip { filter } => self.handles.set_tooltip(filter),
        }
        Ok(())
    }

    fn finish_drag(&mut self, session: &DragSession, outcome: DragOutcome) {
        match outcome {
            DragOutcome::Commit { pos } => {
                self.write_update(session.filter(), session.grab(), pos);
                self.host.apply_eq();
                self.update_handles();
                log::debug!("drag on filter {} committed", session.filter());
            }
            DragOutcome::Tap | DragOutcome::Cancelled => {}
        }
    }

    /// Compute and write one drag update; false when nothing was written
    fn write_update(&mut self, filter: usize, grab: Grab, pos: Point) -> bool {
        let Some(mapper) = self.mapper else {
            return false;
        };
        let precision = self.modifiers.precision();

        let update = {
            let Some(current) = self.host.filter(filter) else {
                return false;
            };
            let curve = self.host.reference_curve();
            compute_update(grab, &current, pos, &mapper, curve.as_ref(), precision)
        };

        match update {
            Some(DragUpdate::Position { freq, gain }) => {
                log::trace!("filter {filter}: {freq} Hz {gain} dB");
                self.host.set_freq(filter, freq);
                self.host.set_gain(filter, gain);
                true
            }
            Some(DragUpdate::Q(q)) => {
                log::trace!("filter {filter}: Q {q}");
                self.host.set_q(filter, q);
                true
            }
            None => false,
        }
    }

    fn cycle_type(&mut self, filter: usize) {
        let Some(current) = self.host.filter(filter) else {
            return;
        };
        let next = current.filter_type.next();
        self.host.set_filter_type(filter, next);
        self.host.apply_eq();
        self.update_handles();
        log::debug!("filter {filter}: {} → {next}", current.filter_type);
    }

    fn adjust_q(&mut self, filter: usize, delta: f64, precision: Precision) {
        let Some(current) = self.host.filter(filter) else {
            return;
        };
        let q = clamp_q(sanitize_q(current.q) + delta, precision);
        if q == current.q {
            return;
        }
        self.host.set_q(filter, q);
        self.host.apply_eq();
        self.update_handles();
    }

    fn toggle_controls(&mut self, filter: usize, exclusive: bool, source: PointerKind) {
        if exclusive {
            for other in self.handles.hide_all_except(filter) {
                self.classifier.cancel_auto_hide(other);
            }
        }

        let Some(shown) = self.handles.toggle(filter) else {
            return;
        };

        if shown {
            if !exclusive {
                for other in self.classifier.auto_hide_pending() {
                    if other != filter {
                        self.classifier.cancel_auto_hide(other);
                        self.handles.hide(other);
                    }
                }
            }
            if source == PointerKind::Touch {
                self.classifier.arm_auto_hide(filter, source, self.now);
            }
        } else {
            self.classifier.cancel_auto_hide(filter);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // FILTER LIST EDITS
    // ═══════════════════════════════════════════════════════════════════════

    /// New peak filter under the pointer, reusing the first unassigned slot
    fn create_filter(&mut self, pos: Point) -> GeqResult<()> {
        let Some(mapper) = self.mapper else {
            return Ok(());
        };

        let target = mapper.to_domain(pos);
        let gain = {
            let curve = self.host.reference_curve();
            clamp_gain(target.gain - mapper.reference_level(curve.as_ref(), target.freq))
        };

        let count = self.host.filter_count();
        let index = match (0..count).find(|&i| self.host.filter(i).is_some_and(|f| !f.is_assigned())) {
            Some(free) => free,
            None => {
                let needed = count + 1;
                let max = self.host.bands_max();
                if needed > max {
                    log::debug!("band limit reached ({max} bands), not creating a filter");
                    return Ok(());
                }
                if needed > self.host.bands() {
                    self.host.set_bands(needed);
                }
                count
            }
        };

        self.host
            .put(Filter::new(index, FilterType::Peak, target.freq, gain, DEFAULT_Q));
        self.host.update_filter_elements();
        self.host.apply_eq();
        self.update_handles();
        log::debug!("created filter {index} at {} Hz {gain} dB", target.freq);
        Ok(())
    }

    fn delete_filter(&mut self, filter: usize) -> GeqResult<()> {
        let count = self.host.filter_count();
        if filter >= count {
            return Err(GeqError::FilterNotFound(filter));
        }

        self.host.remove(filter);
        self.host.set_bands(count.saturating_sub(1).max(1));
        self.host.update_filter_elements();

        // Indices shifted; any per-handle state is stale
        self.drag = None;
        self.active_pointer = None;
        self.classifier.reset();
        self.handles.hide_all();
        self.handles.set_tooltip(None);

        self.host.update_paths();
        self.host.update_preamp_display();
        self.host.apply_eq();
        self.update_handles();
        log::debug!("deleted filter {filter}");
        Ok(())
    }
}

impl<H: EqHost> Drop for EqEngine<H> {
    fn drop(&mut self) {
        self.disable();
    }
}
