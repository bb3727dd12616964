//! Drag sessions
//!
//! A session starts `Pending` on press and only becomes `Active` once the
//! pointer has moved past the drag threshold, so a plain click never writes
//! to a filter. While active, pointer moves land in a single frame slot that
//! the engine drains once per display frame.

use geq_core::{CurveView, Filter, Precision, clamp_gain, q_from_edge};

use super::gesture::Grab;
use super::mapper::{CoordinateMapper, Point};

/// Whether `pos` is at least `threshold` px from `origin`
#[inline]
pub fn crossed_threshold(origin: Point, pos: Point, threshold: f64) -> bool {
    origin.distance(pos) >= threshold
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Pressed, threshold not yet crossed
    Pending,
    Active,
    Ended,
}

/// What a pointer move did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStep {
    /// Still below the threshold
    Pending,
    /// A frame must be requested
    ScheduleFrame,
    /// Folded into the frame already requested
    Coalesced,
    Ignored,
}

/// How a session finished
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// Released without crossing the threshold
    Tap,
    /// Write the final position
    Commit { pos: Point },
    Cancelled,
}

/// Filter write computed from a pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    Position { freq: f64, gain: f64 },
    Q(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    filter: usize,
    grab: Grab,
    origin: Point,
    phase: DragPhase,
    pending: Option<Point>,
    last: Point,
    threshold: f64,
}

impl DragSession {
    pub fn begin(filter: usize, grab: Grab, origin: Point, threshold: f64) -> Self {
        Self {
            filter,
            grab,
            origin,
            phase: DragPhase::Pending,
            pending: None,
            last: origin,
            threshold,
        }
    }

    pub fn filter(&self) -> usize {
        self.filter
    }

    pub fn grab(&self) -> Grab {
        self.grab
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == DragPhase::Active
    }

    /// Whether a frame is waiting to be drained
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn move_to(&mut self, pos: Point) -> DragStep {
        match self.phase {
            DragPhase::Pending => {
                if !crossed_threshold(self.origin, pos, self.threshold) {
                    return DragStep::Pending;
                }
                self.phase = DragPhase::Active;
                self.last = pos;
                self.pending = Some(pos);
                DragStep::ScheduleFrame
            }
            DragPhase::Active => {
                self.last = pos;
                if self.pending.replace(pos).is_some() {
                    DragStep::Coalesced
                } else {
                    DragStep::ScheduleFrame
                }
            }
            DragPhase::Ended => DragStep::Ignored,
        }
    }

    /// Drain the frame slot (latest position only)
    pub fn take_frame(&mut self) -> Option<Point> {
        if self.phase != DragPhase::Active {
            return None;
        }
        self.pending.take()
    }

    pub fn end(&mut self, pos: Point) -> DragOutcome {
        let outcome = match self.phase {
            DragPhase::Active => DragOutcome::Commit { pos },
            DragPhase::Pending if crossed_threshold(self.origin, pos, self.threshold) => DragOutcome::Commit { pos },
            DragPhase::Pending => DragOutcome::Tap,
            DragPhase::Ended => DragOutcome::Cancelled,
        };
        self.pending = None;
        self.phase = DragPhase::Ended;
        outcome
    }

    /// Interrupted by the platform; an active drag keeps its last position
    pub fn cancel(&mut self) -> DragOutcome {
        let outcome = match self.phase {
            DragPhase::Active => DragOutcome::Commit { pos: self.last },
            DragPhase::Pending | DragPhase::Ended => DragOutcome::Cancelled,
        };
        self.pending = None;
        self.phase = DragPhase::Ended;
        outcome
    }
}

/// Translate a pointer position into a filter write.
///
/// Body drags set frequency and curve-relative gain. Whisker drags set Q
/// from the dragged band edge and leave frequency and gain alone. Returns
/// `None` when the position yields no valid parameter.
pub fn compute_update(
    grab: Grab,
    filter: &Filter,
    pos: Point,
    mapper: &CoordinateMapper,
    curve: Option<&CurveView<'_>>,
    precision: Precision,
) -> Option<DragUpdate> {
    match grab {
        Grab::Body => {
            let target = mapper.to_domain(pos);
            let gain = clamp_gain(target.gain - mapper.reference_level(curve, target.freq));
            Some(DragUpdate::Position {
                freq: target.freq,
                gain,
            })
        }
        Grab::Whisker(edge) => {
            let f_edge = mapper.x_to_freq(mapper.client_to_chart(pos).x);
            match q_from_edge(filter.freq, f_edge, edge, precision) {
                Ok(q) => Some(DragUpdate::Q(q)),
                Err(e) => {
                    log::trace!("dropping whisker frame for filter {}: {e}", filter.index);
                    None
                }
            }
        }
    }
}
