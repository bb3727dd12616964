//! Parameter ranges, clamping and rounding
//!
//! Every value the editor stores goes through one of the `clamp_*`
//! functions at the point where it is produced, so filter state is always
//! in range and on the rounding grid.

use serde::{Deserialize, Serialize};

/// Lowest editable frequency (Hz)
pub const FREQ_MIN: f64 = 20.0;
/// Highest editable frequency (Hz)
pub const FREQ_MAX: f64 = 20_000.0;

/// Gain limits (dB)
pub const GAIN_MIN: f64 = -40.0;
pub const GAIN_MAX: f64 = 40.0;

/// Q limits
pub const Q_MIN: f64 = 0.1;
pub const Q_MAX: f64 = 10.0;

/// Q used for new filters and as fallback for unreadable values
pub const DEFAULT_Q: f64 = 1.0;

pub const Q_STEP_COARSE: f64 = 0.1;
pub const Q_STEP_FINE: f64 = 0.01;

/// Gain is stored on a 0.1 dB grid
pub const GAIN_STEP: f64 = 0.1;

/// Q precision mode, selected by the precision modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Precision {
    #[default]
    Coarse,
    Fine,
}

impl Precision {
    #[inline]
    pub fn from_modifier(fine: bool) -> Self {
        if fine { Self::Fine } else { Self::Coarse }
    }

    /// Step size for Q in this mode
    #[inline]
    pub fn q_step(self) -> f64 {
        match self {
            Precision::Coarse => Q_STEP_COARSE,
            Precision::Fine => Q_STEP_FINE,
        }
    }
}

/// Round to the nearest multiple of `step`.
///
/// Works on the reciprocal so decimal steps like 0.1 land on the closest
/// representable value (0.3, not 0.30000000000000004).
#[inline]
pub fn round_to_step(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    let inv = (1.0 / step).round();
    if inv >= 1.0 {
        (value * inv).round() / inv
    } else {
        (value / step).round() * step
    }
}

/// Clamp to [20, 20000] Hz and round to whole Hz
#[inline]
pub fn clamp_freq(freq: f64) -> f64 {
    if freq.is_nan() {
        return FREQ_MIN;
    }
    freq.clamp(FREQ_MIN, FREQ_MAX).round()
}

/// Clamp to [-40, 40] dB and round to 0.1 dB
#[inline]
pub fn clamp_gain(gain: f64) -> f64 {
    if gain.is_nan() {
        return 0.0;
    }
    round_to_step(gain.clamp(GAIN_MIN, GAIN_MAX), GAIN_STEP)
}

/// Clamp to [0.1, 10] and round to the precision step
#[inline]
pub fn clamp_q(q: f64, precision: Precision) -> f64 {
    let q = sanitize_q(q);
    round_to_step(q.clamp(Q_MIN, Q_MAX), precision.q_step())
}

/// Replace an unusable Q (NaN, infinite, zero or negative) with the default
#[inline]
pub fn sanitize_q(q: f64) -> f64 {
    if q.is_finite() && q > 0.0 { q } else { DEFAULT_Q }
}

/// Parse a Q form field, falling back to the default on anything unusable
pub fn parse_q(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(q) => sanitize_q(q),
        Err(_) => {
            log::debug!("unparseable Q field {text:?}, using {DEFAULT_Q}");
            DEFAULT_Q
        }
    }
}
