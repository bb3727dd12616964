//! Q ⇄ bandwidth edge conversion
//!
//! Band edges are placed symmetrically around the center frequency in
//! log-frequency space, so `low · high = f0²` always holds. Bandwidth in
//! octaves relates to Q by the usual constant-Q bandpass identity:
//!
//! ```text
//! bw = 2·asinh(1 / 2q) / ln 2        q = 1 / (2·sinh(bw·ln 2 / 2))
//! ```

use std::f64::consts::LN_2;

use crate::error::{GeqError, GeqResult};
use crate::params::{Precision, clamp_q};

/// Which edge of the band a whisker controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Low,
    High,
}

/// Band edge frequencies (Hz)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandEdges {
    pub low: f64,
    pub high: f64,
}

impl BandEdges {
    #[inline]
    pub fn get(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Low => self.low,
            Edge::High => self.high,
        }
    }

    /// Width in octaves
    #[inline]
    pub fn octaves(&self) -> f64 {
        (self.high / self.low).log2()
    }
}

#[inline]
pub fn octaves_from_q(q: f64) -> f64 {
    2.0 * (1.0 / (2.0 * q)).asinh() / LN_2
}

#[inline]
pub fn q_from_octaves(octaves: f64) -> f64 {
    1.0 / (2.0 * (octaves * LN_2 / 2.0).sinh())
}

/// Edge frequencies of a band centered on `f0` with quality `q`
pub fn edges_from_q(f0: f64, q: f64) -> BandEdges {
    let half = 2.0_f64.powf(octaves_from_q(q) / 2.0);
    BandEdges {
        low: f0 / half,
        high: f0 * half,
    }
}

/// Q for a band whose `edge` was moved to `f_edge`.
///
/// The opposite edge is mirrored through the center (`f0² / f_edge`).
/// Crossed or collapsed edges are rejected instead of producing a
/// non-finite Q; the result is clamped and rounded for `precision`.
pub fn q_from_edge(f0: f64, f_edge: f64, edge: Edge, precision: Precision) -> GeqResult<f64> {
    let other = f0 * f0 / f_edge;
    let (low, high) = match edge {
        Edge::Low => (f_edge, other),
        Edge::High => (other, f_edge),
    };

    if !(low.is_finite() && high.is_finite()) || low <= 0.0 || high <= low {
        return Err(GeqError::DegenerateBandwidth { low, high });
    }

    let octaves = (high / low).log2();
    if !(octaves > 0.0) {
        return Err(GeqError::DegenerateBandwidth { low, high });
    }

    let q = q_from_octaves(octaves);
    if !q.is_finite() {
        return Err(GeqError::DegenerateBandwidth { low, high });
    }

    Ok(clamp_q(q, precision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Q_MAX, Q_MIN};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_geometric_symmetry() {
        for &f0 in &[20.0, 440.0, 1000.0, 12_345.0] {
            for &q in &[0.1, 0.5, 0.707, 1.0, 4.3, 10.0] {
                let edges = edges_from_q(f0, q);
                assert_relative_eq!(edges.low * edges.high, f0 * f0, max_relative = 1e-12);
                assert!(edges.low < f0 && f0 < edges.high);
            }
        }
    }

    #[test]
    fn test_q_one_is_about_1_39_octaves() {
        let edges = edges_from_q(1000.0, 1.0);
        assert_abs_diff_eq!(edges.octaves(), 1.3885, epsilon = 1e-3);
    }

    #[test]
    fn test_round_trip_both_edges() {
        let f0 = 1000.0;
        let mut q = Q_MIN;
        while q <= Q_MAX {
            let edges = edges_from_q(f0, q);
            let from_high = q_from_edge(f0, edges.high, Edge::High, Precision::Fine).unwrap();
            let from_low = q_from_edge(f0, edges.low, Edge::Low, Precision::Fine).unwrap();
            assert_abs_diff_eq!(from_high, q, epsilon = 0.006);
            assert_abs_diff_eq!(from_low, q, epsilon = 0.006);
            q += 0.37;
        }
    }

    #[test]
    fn test_narrower_edge_means_higher_q() {
        let wide = q_from_edge(1000.0, 4000.0, Edge::High, Precision::Fine).unwrap();
        let narrow = q_from_edge(1000.0, 1200.0, Edge::High, Precision::Fine).unwrap();
        assert!(narrow > wide);
    }

    #[test]
    fn test_crossed_edges_rejected() {
        // Low whisker dragged past the center
        assert!(q_from_edge(1000.0, 1500.0, Edge::Low, Precision::Coarse).is_err());
        // High whisker dragged below the center
        assert!(q_from_edge(1000.0, 800.0, Edge::High, Precision::Coarse).is_err());
        // Edge on the center collapses the band
        assert!(q_from_edge(1000.0, 1000.0, Edge::High, Precision::Coarse).is_err());
        assert!(q_from_edge(1000.0, 0.0, Edge::Low, Precision::Coarse).is_err());
        assert!(q_from_edge(0.0, 500.0, Edge::High, Precision::Coarse).is_err());
    }

    #[test]
    fn test_result_is_clamped() {
        // Nearly collapsed band → huge Q, clamped
        let q = q_from_edge(1000.0, 1000.5, Edge::High, Precision::Coarse).unwrap();
        assert_eq!(q, Q_MAX);
        // Extremely wide band → tiny Q, clamped
        let q = q_from_edge(1000.0, 20.0, Edge::Low, Precision::Coarse).unwrap();
        assert_eq!(q, Q_MIN);
    }
}
