//! Handle view state
//!
//! One handle per visible filter, placed at (frequency, curve level + gain)
//! with a whisker on each side marking the band edges. The controller keeps
//! the per-handle UI state (selected, tooltip) that survives re-renders,
//! reconciles against the filter list and animates transitions.

use std::collections::BTreeMap;
use std::f64::consts::SQRT_2;

use geq_core::{CurveView, Edge, FREQ_MAX, FREQ_MIN, Filter, FilterType, Q_MAX, Q_MIN, edges_from_q, sanitize_q};

use super::gesture::HitTarget;
use super::mapper::{CoordinateMapper, Point};
use super::timer::Millis;
use crate::config::HandleConfig;

/// Render state of one handle, in chart coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleViewState {
    pub filter: usize,
    pub filter_type: FilterType,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub whisker_low_x: f64,
    pub whisker_high_x: f64,
    /// Secondary controls (whiskers, delete) shown
    pub selected: bool,
    pub tooltip: bool,
}

impl HandleViewState {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn whisker_end(&self, edge: Edge) -> Point {
        match edge {
            Edge::Low => Point::new(self.whisker_low_x, self.y),
            Edge::High => Point::new(self.whisker_high_x, self.y),
        }
    }

    /// Center of the delete affordance, up and right of the body
    pub fn delete_anchor(&self, config: &HandleConfig) -> Point {
        let offset = (self.radius + config.delete_gap + config.delete_radius) / SQRT_2;
        Point::new(self.x + offset, self.y - offset)
    }

    fn lerp(&self, to: &HandleViewState, t: f64) -> HandleViewState {
        let pos = self.position().lerp(to.position(), t);
        HandleViewState {
            x: pos.x,
            y: pos.y,
            radius: self.radius + (to.radius - self.radius) * t,
            whisker_low_x: self.whisker_low_x + (to.whisker_low_x - self.whisker_low_x) * t,
            whisker_high_x: self.whisker_high_x + (to.whisker_high_x - self.whisker_high_x) * t,
            ..*to
        }
    }
}

/// Handle radius for a Q: wide bands get big handles
pub fn radius_for_q(q: f64, config: &HandleConfig) -> f64 {
    let q = sanitize_q(q).clamp(Q_MIN, Q_MAX);
    let t = (q / Q_MIN).ln() / (Q_MAX / Q_MIN).ln();
    config.radius_max + (config.radius_min - config.radius_max) * t
}

/// Compute where a filter's handle goes
pub fn view_for(
    filter: &Filter,
    mapper: &CoordinateMapper,
    curve: Option<&CurveView<'_>>,
    config: &HandleConfig,
) -> HandleViewState {
    let level = mapper.reference_level(curve, filter.freq) + filter.gain;
    let pos = mapper.to_screen(filter.freq, level);
    let edges = edges_from_q(filter.freq, sanitize_q(filter.q));

    HandleViewState {
        filter: filter.index,
        filter_type: filter.filter_type,
        x: pos.x,
        y: pos.y,
        radius: radius_for_q(filter.q, config),
        whisker_low_x: mapper.freq_to_x(edges.low.clamp(FREQ_MIN, FREQ_MAX)),
        whisker_high_x: mapper.freq_to_x(edges.high.clamp(FREQ_MIN, FREQ_MAX)),
        selected: false,
        tooltip: false,
    }
}

/// Tooltip line for a handle
pub fn tooltip_text(filter: &Filter) -> String {
    format!(
        "{} {:.0} Hz {:+.1} dB Q {:.2}",
        filter.filter_type.code(),
        filter.freq,
        filter.gain,
        filter.q
    )
}

/// What a reconcile pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: Vec<usize>,
    pub updated: Vec<usize>,
    pub removed: Vec<usize>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: HandleViewState,
    to: HandleViewState,
    start: Millis,
    duration: Millis,
}

#[derive(Debug, Clone, Copy)]
struct HandleSlot {
    view: HandleViewState,
    transition: Option<Transition>,
}

/// Owns the handle views of one chart
#[derive(Debug, Clone, Default)]
pub struct HandleSetController {
    config: HandleConfig,
    slots: BTreeMap<usize, HandleSlot>,
    tooltip: Option<usize>,
}

impl HandleSetController {
    pub fn new(config: HandleConfig) -> Self {
        Self {
            config,
            slots: BTreeMap::new(),
            tooltip: None,
        }
    }

    pub fn config(&self) -> &HandleConfig {
        &self.config
    }

    /// Sync handles with the filter list, placing them immediately
    pub fn reconcile(
        &mut self,
        filters: &[Filter],
        mapper: &CoordinateMapper,
        curve: Option<&CurveView<'_>>,
    ) -> ReconcileReport {
        self.sync(filters, mapper, curve, None)
    }

    /// Sync handles, moving existing ones to their new place over `duration`
    pub fn transition(
        &mut self,
        filters: &[Filter],
        mapper: &CoordinateMapper,
        curve: Option<&CurveView<'_>>,
        duration: Millis,
        now: Millis,
    ) -> ReconcileReport {
        self.sync(filters, mapper, curve, Some((duration, now)))
    }

    fn sync(
        &mut self,
        filters: &[Filter],
        mapper: &CoordinateMapper,
        curve: Option<&CurveView<'_>>,
        animate: Option<(Millis, Millis)>,
    ) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let visible: Vec<&Filter> = filters.iter().filter(|f| f.is_visible()).collect();

        let stale: Vec<usize> = self
            .slots
            .keys()
            .copied()
            .filter(|k| !visible.iter().any(|f| f.index == *k))
            .collect();
        for key in stale {
            self.slots.remove(&key);
            report.removed.push(key);
        }
        if self.tooltip.is_some_and(|t| !self.slots.contains_key(&t)) {
            self.tooltip = None;
        }

        for filter in visible {
            let mut target = view_for(filter, mapper, curve, &self.config);
            target.tooltip = self.tooltip == Some(filter.index);

            match self.slots.get_mut(&filter.index) {
                Some(slot) => {
                    target.selected = slot.view.selected;
                    match animate {
                        Some((duration, now)) if duration > 0 => {
                            let from = slot.view;
                            slot.view = HandleViewState {
                                selected: target.selected,
                                tooltip: target.tooltip,
                                filter_type: target.filter_type,
                                ..from
                            };
                            slot.transition = Some(Transition {
                                from,
                                to: target,
                                start: now,
                                duration,
                            });
                        }
                        _ => {
                            slot.view = target;
                            slot.transition = None;
                        }
                    }
                    report.updated.push(filter.index);
                }
                None => {
                    self.slots.insert(
                        filter.index,
                        HandleSlot {
                            view: target,
                            transition: None,
                        },
                    );
                    report.created.push(filter.index);
                }
            }
        }

        if !report.created.is_empty() || !report.removed.is_empty() {
            log::trace!(
                "handles reconciled: +{} -{} ~{}",
                report.created.len(),
                report.removed.len(),
                report.updated.len()
            );
        }
        report
    }

    /// Advance transitions; returns true while any is still running
    pub fn tick(&mut self, now: Millis) -> bool {
        let mut running = false;
        for slot in self.slots.values_mut() {
            let Some(tr) = slot.transition else {
                continue;
            };
            let elapsed = now.saturating_sub(tr.start);
            if elapsed >= tr.duration {
                slot.view = HandleViewState {
                    selected: slot.view.selected,
                    tooltip: slot.view.tooltip,
                    ..tr.to
                };
                slot.transition = None;
            } else {
                let t = elapsed as f64 / tr.duration as f64;
                slot.view = HandleViewState {
                    selected: slot.view.selected,
                    tooltip: slot.view.tooltip,
                    ..tr.from.lerp(&tr.to, t)
                };
                running = true;
            }
        }
        running
    }

    pub fn is_animating(&self) -> bool {
        self.slots.values().any(|s| s.transition.is_some())
    }

    /// What a chart-space point hits.
    ///
    /// Secondary controls of selected handles win over bodies; among bodies
    /// the nearest one within its grab radius wins.
    pub fn hit_test(&self, chart: Point) -> HitTarget {
        let config = &self.config;

        for slot in self.slots.values().filter(|s| s.view.selected) {
            let view = &slot.view;
            if view.delete_anchor(config).distance(chart) <= config.delete_radius {
                return HitTarget::Delete(view.filter);
            }
            let outside_body = view.position().distance(chart) > view.radius;
            for edge in [Edge::Low, Edge::High] {
                if outside_body && view.whisker_end(edge).distance(chart) <= config.whisker_hit_radius {
                    return HitTarget::Whisker(view.filter, edge);
                }
            }
        }

        self.slots
            .values()
            .map(|s| (s.view.filter, s.view.position().distance(chart), s.view.radius))
            .filter(|&(_, d, r)| d <= r + config.hit_slop)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(HitTarget::Background, |(filter, _, _)| HitTarget::Handle(filter))
    }

    /// Flip secondary controls; `None` if there is no such handle
    pub fn toggle(&mut self, filter: usize) -> Option<bool> {
        let slot = self.slots.get_mut(&filter)?;
        slot.view.selected = !slot.view.selected;
        Some(slot.view.selected)
    }

    pub fn show(&mut self, filter: usize) -> bool {
        self.set_selected(filter, true)
    }

    pub fn hide(&mut self, filter: usize) -> bool {
        self.set_selected(filter, false)
    }

    fn set_selected(&mut self, filter: usize, selected: bool) -> bool {
        match self.slots.get_mut(&filter) {
            Some(slot) => {
                let changed = slot.view.selected != selected;
                slot.view.selected = selected;
                changed
            }
            None => false,
        }
    }

    /// Hide every other handle's controls, returning those that were shown
    pub fn hide_all_except(&mut self, keep: usize) -> Vec<usize> {
        let mut hidden = Vec::new();
        for (&key, slot) in self.slots.iter_mut() {
            if key != keep && slot.view.selected {
                slot.view.selected = false;
                hidden.push(key);
            }
        }
        hidden
    }

    pub fn hide_all(&mut self) {
        for slot in self.slots.values_mut() {
            slot.view.selected = false;
        }
    }

    pub fn is_selected(&self, filter: usize) -> bool {
        self.slots.get(&filter).is_some_and(|s| s.view.selected)
    }

    pub fn set_tooltip(&mut self, filter: Option<usize>) {
        self.tooltip = filter.filter(|f| self.slots.contains_key(f));
        for (&key, slot) in self.slots.iter_mut() {
            slot.view.tooltip = self.tooltip == Some(key);
        }
    }

    pub fn tooltip(&self) -> Option<usize> {
        self.tooltip
    }

    pub fn view(&self, filter: usize) -> Option<&HandleViewState> {
        self.slots.get(&filter).map(|s| &s.view)
    }

    /// Views in filter order
    pub fn views(&self) -> impl Iterator<Item = &HandleViewState> {
        self.slots.values().map(|s| &s.view)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.tooltip = None;
    }
}
