//! Shared test host for the engine integration tests

#![allow(dead_code)]

use std::collections::BTreeSet;

use geq_core::{Baseline, CurvePoint, Filter, FilterType, FlatBaseline};
use geq_gui::{
    BandBudget, CoordinateMapper, CurveOwner, CurveSource, EngineConfig, EqEngine, EqHooks, FilterStore, LinearScale,
    ListenerId, ListenerKind, ListenerRegistry, LogScale, Point, ScreenTransform,
};

/// In-memory host that records every side effect
#[derive(Debug, Default)]
pub struct MockHost {
    pub filters: Vec<Filter>,
    pub bands: usize,
    pub bands_max: usize,
    pub curves: Vec<CurveOwner>,
    pub selected: Option<String>,
    pub curve_offset: f64,
    pub baseline: FlatBaseline,

    pub writes: usize,
    pub apply_count: usize,
    pub preview_count: usize,
    pub frame_requests: usize,
    pub element_updates: usize,
    pub path_updates: usize,
    pub preamp_updates: usize,
    pub labels_cleared: usize,

    pub next_listener: u64,
    pub registered: usize,
    pub live_listeners: BTreeSet<ListenerId>,
}

impl MockHost {
    pub fn with_filters(filters: Vec<Filter>) -> Self {
        let bands = filters.len();
        Self {
            filters,
            bands,
            bands_max: 10,
            ..Self::default()
        }
    }

    /// Select a flat reference curve at `level` dB
    pub fn select_flat_curve(&mut self, level: f64, offset: f64) {
        self.curves = vec![CurveOwner::new(
            "headphone",
            vec![CurvePoint::new(20.0, level), CurvePoint::new(20_000.0, level)],
        )];
        self.selected = Some("headphone".to_string());
        self.curve_offset = offset;
    }
}

impl FilterStore for MockHost {
    fn filter_count(&self) -> usize {
        self.filters.len()
    }

    fn filter(&self, index: usize) -> Option<Filter> {
        self.filters.get(index).cloned()
    }

    fn set_freq(&mut self, index: usize, freq: f64) {
        self.writes += 1;
        self.filters[index].freq = freq;
    }

    fn set_gain(&mut self, index: usize, gain: f64) {
        self.writes += 1;
        self.filters[index].gain = gain;
    }

    fn set_q(&mut self, index: usize, q: f64) {
        self.writes += 1;
        self.filters[index].q = q;
    }

    fn set_filter_type(&mut self, index: usize, filter_type: FilterType) {
        self.writes += 1;
        self.filters[index].filter_type = filter_type;
    }

    fn put(&mut self, filter: Filter) {
        self.writes += 1;
        if filter.index < self.filters.len() {
            let index = filter.index;
            self.filters[index] = filter;
        } else {
            self.filters.push(filter);
        }
    }

    fn remove(&mut self, index: usize) {
        self.filters.remove(index);
        for (i, f) in self.filters.iter_mut().enumerate() {
            f.index = i;
        }
    }
}

impl BandBudget for MockHost {
    fn bands(&self) -> usize {
        self.bands
    }

    fn bands_max(&self) -> usize {
        self.bands_max
    }

    fn set_bands(&mut self, bands: usize) {
        self.bands = bands;
    }

    fn update_filter_elements(&mut self) {
        self.element_updates += 1;
    }
}

impl CurveSource for MockHost {
    fn active_curves(&self) -> &[CurveOwner] {
        &self.curves
    }

    fn selected_curve(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    fn offset(&self, _owner: &CurveOwner) -> f64 {
        self.curve_offset
    }

    fn baseline(&self) -> &dyn Baseline {
        &self.baseline
    }
}

impl EqHooks for MockHost {
    fn apply_eq(&mut self) {
        self.apply_count += 1;
    }

    fn update_preview(&mut self) {
        self.preview_count += 1;
    }

    fn clear_labels(&mut self) {
        self.labels_cleared += 1;
    }

    fn update_paths(&mut self) {
        self.path_updates += 1;
    }

    fn update_preamp_display(&mut self) {
        self.preamp_updates += 1;
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }
}

impl ListenerRegistry for MockHost {
    fn register(&mut self, _kind: ListenerKind) -> ListenerId {
        self.next_listener += 1;
        self.registered += 1;
        let id = ListenerId(self.next_listener);
        self.live_listeners.insert(id);
        id
    }

    fn unregister(&mut self, id: ListenerId) {
        assert!(self.live_listeners.remove(&id), "unregistered unknown listener {id:?}");
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 800×400 chart, 20 Hz..20 kHz by -20..+20 dB, offset in the page by (50, 20)
pub fn mapper() -> CoordinateMapper {
    CoordinateMapper::new(
        ScreenTransform::scale_translate(1.0, 1.0, 50.0, 20.0),
        LogScale::audible(0.0, 800.0),
        LinearScale::new((-20.0, 20.0), (400.0, 0.0)),
    )
    .unwrap()
}

/// Enabled engine over `filters`
pub fn engine(filters: Vec<Filter>) -> EqEngine<MockHost> {
    init_logging();
    let mut engine = EqEngine::new(MockHost::with_filters(filters), EngineConfig::default());
    engine.attach_chart(mapper());
    assert!(engine.enable());
    engine
}

/// Client position of a (freq, level) point on the chart
pub fn client_at(freq: f64, level: f64) -> Point {
    let m = mapper();
    m.chart_to_client(m.to_screen(freq, level))
}

/// Client position of a chart point
pub fn client(chart: Point) -> Point {
    mapper().chart_to_client(chart)
}

pub fn peak(index: usize, freq: f64, gain: f64, q: f64) -> Filter {
    Filter::new(index, FilterType::Peak, freq, gain, q)
}
