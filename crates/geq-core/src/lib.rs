//! geq-core: Shared types and parameter math for the graph EQ
//!
//! This crate provides the pieces that do not depend on a chart or on input:
//! the filter model, parameter ranges, Q/bandwidth conversion and reference
//! curve sampling.

mod error;
mod filter;
mod params;

pub mod bandwidth;
pub mod curve;

pub use bandwidth::{BandEdges, Edge, edges_from_q, q_from_edge};
pub use curve::{Baseline, CurveLevel, CurvePoint, CurveView, FlatBaseline, TargetBaseline, sample_at};
pub use error::*;
pub use filter::*;
pub use params::*;
