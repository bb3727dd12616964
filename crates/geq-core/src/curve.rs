//! Reference curve sampling
//!
//! Filter gain is stored relative to the selected device's measured
//! response. Handles and drags both need "the level of the reference curve
//! at this frequency", which is what this module answers. Sampling is
//! linear in frequency between the two bracketing points, uses a binary
//! search and never allocates, since it runs on every drag frame.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One measured point: frequency (Hz) and level (dB)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub freq: f64,
    pub level: f64,
}

impl CurvePoint {
    pub const fn new(freq: f64, level: f64) -> Self {
        Self { freq, level }
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.freq.is_finite() && self.level.is_finite()
    }
}

impl From<(f64, f64)> for CurvePoint {
    fn from((freq, level): (f64, f64)) -> Self {
        Self::new(freq, level)
    }
}

/// Pointwise transform applied to raw curve samples before they are used
/// (e.g. compensation against a target response)
pub trait Baseline {
    fn apply(&self, freq: f64, level: f64) -> f64;
}

/// Identity baseline
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatBaseline;

impl Baseline for FlatBaseline {
    #[inline]
    fn apply(&self, _freq: f64, level: f64) -> f64 {
        level
    }
}

/// Baseline that subtracts a target curve
#[derive(Debug, Clone, Default)]
pub struct TargetBaseline {
    target: Vec<CurvePoint>,
}

impl TargetBaseline {
    pub fn new(target: Vec<CurvePoint>) -> Self {
        Self { target }
    }
}

impl Baseline for TargetBaseline {
    fn apply(&self, freq: f64, level: f64) -> f64 {
        level - interpolate(&self.target, freq, |p| p.level).unwrap_or(0.0)
    }
}

/// Result of sampling a reference curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveLevel {
    Level(f64),
    /// No curve selected, or the curve is empty or malformed
    NoCurve,
}

impl CurveLevel {
    #[inline]
    pub fn unwrap_or(self, fallback: f64) -> f64 {
        match self {
            CurveLevel::Level(level) => level,
            CurveLevel::NoCurve => fallback,
        }
    }

    #[inline]
    pub fn is_no_curve(&self) -> bool {
        matches!(self, CurveLevel::NoCurve)
    }
}

/// Borrowed view of the currently selected reference curve.
///
/// Samples must be sorted by ascending frequency.
#[derive(Clone, Copy)]
pub struct CurveView<'a> {
    pub samples: &'a [CurvePoint],
    pub offset: f64,
    pub baseline: &'a dyn Baseline,
}

impl<'a> CurveView<'a> {
    pub fn new(samples: &'a [CurvePoint], offset: f64, baseline: &'a dyn Baseline) -> Self {
        Self {
            samples,
            offset,
            baseline,
        }
    }

    /// Curve with no baseline and no offset
    pub fn flat(samples: &'a [CurvePoint]) -> Self {
        Self::new(samples, 0.0, &FlatBaseline)
    }

    pub fn is_valid(&self) -> bool {
        !self.samples.is_empty() && self.offset.is_finite() && self.samples.iter().all(CurvePoint::is_finite)
    }

    /// Baseline-adjusted, offset level at `freq`
    pub fn sample_at(&self, freq: f64) -> CurveLevel {
        if !self.is_valid() {
            return CurveLevel::NoCurve;
        }
        let baseline = self.baseline;
        match interpolate(self.samples, freq, |p| baseline.apply(p.freq, p.level)) {
            Some(level) if level.is_finite() => CurveLevel::Level(level + self.offset),
            _ => CurveLevel::NoCurve,
        }
    }
}

impl fmt::Debug for CurveView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveView")
            .field("samples", &self.samples.len())
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

/// Sample an optional curve; `None` yields `NoCurve`
#[inline]
pub fn sample_at(curve: Option<&CurveView<'_>>, freq: f64) -> CurveLevel {
    match curve {
        Some(curve) => curve.sample_at(freq),
        None => CurveLevel::NoCurve,
    }
}

/// Linear interpolation over sorted samples.
///
/// The first sample at or above `freq` is the upper bracket. At or below the
/// first sample its level is used directly; past the last sample the last
/// level is held.
fn interpolate(samples: &[CurvePoint], freq: f64, level: impl Fn(&CurvePoint) -> f64) -> Option<f64> {
    let last = samples.last()?;
    let idx = samples.partition_point(|p| p.freq < freq);

    if idx == 0 {
        return Some(level(&samples[0]));
    }
    if idx >= samples.len() {
        return Some(level(last));
    }

    let lo = &samples[idx - 1];
    let hi = &samples[idx];
    let (lo_level, hi_level) = (level(lo), level(hi));

    let span = hi.freq - lo.freq;
    if span <= 0.0 {
        return Some(hi_level);
    }

    let t = (freq - lo.freq) / span;
    Some(lo_level + (hi_level - lo_level) * t)
}
