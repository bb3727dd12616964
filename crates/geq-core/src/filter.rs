//! Parametric filter model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::params::DEFAULT_Q;

/// EQ filter types that can be placed on the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterType {
    #[default]
    #[serde(rename = "PK")]
    Peak,
    #[serde(rename = "LSQ")]
    LowShelf,
    #[serde(rename = "HSQ")]
    HighShelf,
}

impl FilterType {
    pub const ALL: [FilterType; 3] = [FilterType::Peak, FilterType::LowShelf, FilterType::HighShelf];

    pub fn name(&self) -> &'static str {
        match self {
            FilterType::Peak => "Peak",
            FilterType::LowShelf => "Low Shelf",
            FilterType::HighShelf => "High Shelf",
        }
    }

    /// Short code used by the filter form fields
    pub fn code(&self) -> &'static str {
        match self {
            FilterType::Peak => "PK",
            FilterType::LowShelf => "LSQ",
            FilterType::HighShelf => "HSQ",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Next type in the double-tap cycle: Peak → LowShelf → HighShelf → Peak
    pub fn next(self) -> Self {
        match self {
            FilterType::Peak => FilterType::LowShelf,
            FilterType::LowShelf => FilterType::HighShelf,
            FilterType::HighShelf => FilterType::Peak,
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One parametric band, as stored in the host's filter list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Position in the filter list
    pub index: usize,
    pub filter_type: FilterType,
    /// Center frequency in Hz; `<= 0` means the slot is unassigned
    pub freq: f64,
    /// Gain in dB, relative to the reference curve
    pub gain: f64,
    pub q: f64,
    pub enabled: bool,
}

impl Filter {
    pub fn new(index: usize, filter_type: FilterType, freq: f64, gain: f64, q: f64) -> Self {
        Self {
            index,
            filter_type,
            freq,
            gain,
            q,
            enabled: true,
        }
    }

    /// Empty slot waiting for a frequency
    pub fn unassigned(index: usize) -> Self {
        Self::new(index, FilterType::Peak, 0.0, 0.0, DEFAULT_Q)
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.freq > 0.0
    }

    /// Whether this filter gets a handle on the graph
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.enabled && self.is_assigned()
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::unassigned(0)
    }
}
