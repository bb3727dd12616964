//! Host application interface
//!
//! The engine never owns the filter list, the reference curves or the
//! rendering. It reaches them through one narrow trait per concern; a host
//! implements all of them (usually on a single adapter type) and gets
//! [`EqHost`] for free.

use geq_core::{Baseline, CurvePoint, CurveView, Filter, FilterType};

/// Read/write access to the host's filter list.
///
/// Indices are positions in the list; `remove` must re-index the remaining
/// filters contiguously from 0.
pub trait FilterStore {
    fn filter_count(&self) -> usize;

    fn filter(&self, index: usize) -> Option<Filter>;

    fn set_freq(&mut self, index: usize, freq: f64);

    fn set_gain(&mut self, index: usize, gain: f64);

    fn set_q(&mut self, index: usize, q: f64);

    fn set_filter_type(&mut self, index: usize, filter_type: FilterType);

    /// Store `filter` at `filter.index`, appending when the index equals the
    /// current count
    fn put(&mut self, filter: Filter);

    fn remove(&mut self, index: usize);

    /// Snapshot of the whole list
    fn filters(&self) -> Vec<Filter> {
        (0..self.filter_count()).filter_map(|i| self.filter(i)).collect()
    }
}

/// Band-count bookkeeping
pub trait BandBudget {
    fn bands(&self) -> usize;

    fn bands_max(&self) -> usize;

    fn set_bands(&mut self, bands: usize);

    /// Rebuild the host's per-band form elements after a count change
    fn update_filter_elements(&mut self);
}

/// A measured response the user can pick as reference
#[derive(Debug, Clone, PartialEq)]
pub struct CurveOwner {
    pub id: String,
    /// Sorted by ascending frequency
    pub samples: Vec<CurvePoint>,
}

impl CurveOwner {
    pub fn new(id: impl Into<String>, samples: Vec<CurvePoint>) -> Self {
        Self {
            id: id.into(),
            samples,
        }
    }
}

/// Resolution of the reference curve
pub trait CurveSource {
    /// Curves currently shown on the chart
    fn active_curves(&self) -> &[CurveOwner];

    /// Id of the curve selected as EQ reference
    fn selected_curve(&self) -> Option<&str>;

    /// Display offset (dB) of a curve
    fn offset(&self, owner: &CurveOwner) -> f64;

    fn baseline(&self) -> &dyn Baseline;

    /// Selected curve with its offset and baseline, if any
    fn reference_curve(&self) -> Option<CurveView<'_>> {
        let id = self.selected_curve()?;
        let owner = self.active_curves().iter().find(|c| c.id == id)?;
        Some(CurveView::new(&owner.samples, self.offset(owner), self.baseline()))
    }
}

/// Side-effect hooks called at defined lifecycle points
pub trait EqHooks {
    /// Recompute authoritative output from the current filter state
    fn apply_eq(&mut self);

    /// Live preview during a drag (smoothing/averaging happen host side)
    fn update_preview(&mut self) {}

    fn clear_labels(&mut self) {}

    fn update_paths(&mut self) {}

    fn update_preamp_display(&mut self) {}

    /// Ask for one [`crate::EqEngine::frame`] call on the next display refresh
    fn request_frame(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Pointer,
    Wheel,
    Keyboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Event listener registration on the host's chart/window
pub trait ListenerRegistry {
    fn register(&mut self, kind: ListenerKind) -> ListenerId;

    fn unregister(&mut self, id: ListenerId);
}

/// Everything the engine needs from its host
pub trait EqHost: FilterStore + BandBudget + CurveSource + EqHooks + ListenerRegistry {}

impl<T> EqHost for T where T: FilterStore + BandBudget + CurveSource + EqHooks + ListenerRegistry {}
