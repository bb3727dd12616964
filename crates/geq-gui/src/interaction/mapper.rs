//! Client ⇄ chart ⇄ domain coordinate mapping
//!
//! Three spaces are involved:
//! - client: pointer coordinates as delivered by the host
//! - chart: the chart's own drawing space (where handles are placed)
//! - domain: frequency (Hz, log axis) and gain (dB, linear axis)

use geq_core::{CurveView, FREQ_MAX, FREQ_MIN, GeqError, GeqResult, clamp_freq, clamp_gain, sample_at};

/// 2D point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn lerp(self, to: Point, t: f64) -> Point {
        Point::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }
}

/// Affine chart → client transform, laid out like an SVG screen CTM:
///
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl ScreenTransform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Uniform zoom plus offset, the usual shape for a chart in a page
    pub fn scale_translate(sx: f64, sy: f64, dx: f64, dy: f64) -> Self {
        Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            e: dx,
            f: dy,
        }
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn inverse(&self) -> GeqResult<Self> {
        let det = self.a * self.d - self.b * self.c;
        if !det.is_finite() || det.abs() < 1e-12 {
            return Err(GeqError::SingularTransform(det));
        }
        Ok(Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }
}

impl Default for ScreenTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Logarithmic scale (domain must be strictly positive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LogScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Full audible range onto `[x0, x1]`
    pub fn audible(x0: f64, x1: f64) -> Self {
        Self::new((FREQ_MIN, FREQ_MAX), (x0, x1))
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[inline]
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = (self.domain.0.ln(), self.domain.1.ln());
        let t = (value.ln() - d0) / (d1 - d0);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = (self.domain.0.ln(), self.domain.1.ln());
        let t = (px - self.range.0) / (self.range.1 - self.range.0);
        (d0 + t * (d1 - d0)).exp()
    }
}

/// Linear scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[inline]
    pub fn map(&self, value: f64) -> f64 {
        let t = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let t = (px - self.range.0) / (self.range.1 - self.range.0);
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }

    #[inline]
    pub fn midpoint(&self) -> f64 {
        (self.domain.0 + self.domain.1) / 2.0
    }
}

/// Domain-space position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainPoint {
    pub freq: f64,
    pub gain: f64,
}

/// Bidirectional client/chart/domain mapping for one chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    screen: ScreenTransform,
    to_chart: ScreenTransform,
    freq: LogScale,
    gain: LinearScale,
}

impl CoordinateMapper {
    /// Fails if `screen` cannot be inverted
    pub fn new(screen: ScreenTransform, freq: LogScale, gain: LinearScale) -> GeqResult<Self> {
        let to_chart = screen.inverse()?;
        Ok(Self {
            screen,
            to_chart,
            freq,
            gain,
        })
    }

    pub fn screen_transform(&self) -> ScreenTransform {
        self.screen
    }

    pub fn freq_scale(&self) -> LogScale {
        self.freq
    }

    pub fn gain_scale(&self) -> LinearScale {
        self.gain
    }

    /// Follow a zoom/pan of the gain axis
    pub fn with_gain_domain(mut self, lo: f64, hi: f64) -> Self {
        self.gain = LinearScale::new((lo, hi), self.gain.range);
        self
    }

    #[inline]
    pub fn client_to_chart(&self, client: Point) -> Point {
        self.to_chart.apply(client)
    }

    #[inline]
    pub fn chart_to_client(&self, chart: Point) -> Point {
        self.screen.apply(chart)
    }

    /// Whether a chart-space point lies inside the plot area
    pub fn contains(&self, chart: Point) -> bool {
        let (x0, x1) = self.freq.range;
        let (y0, y1) = self.gain.range;
        chart.x >= x0.min(x1) && chart.x <= x0.max(x1) && chart.y >= y0.min(y1) && chart.y <= y0.max(y1)
    }

    /// Pointer position → clamped, rounded frequency and gain
    pub fn to_domain(&self, client: Point) -> DomainPoint {
        let chart = self.client_to_chart(client);
        DomainPoint {
            freq: self.x_to_freq(chart.x),
            gain: clamp_gain(self.gain.invert(chart.y)),
        }
    }

    /// Chart x → clamped, rounded frequency
    #[inline]
    pub fn x_to_freq(&self, x: f64) -> f64 {
        clamp_freq(self.freq.invert(x))
    }

    #[inline]
    pub fn freq_to_x(&self, freq: f64) -> f64 {
        self.freq.map(freq)
    }

    #[inline]
    pub fn gain_to_y(&self, gain: f64) -> f64 {
        self.gain.map(gain)
    }

    /// Domain position → chart position (where handles are drawn)
    #[inline]
    pub fn to_screen(&self, freq: f64, gain: f64) -> Point {
        Point::new(self.freq_to_x(freq), self.gain_to_y(gain))
    }

    /// Center of the visible gain axis, the stand-in level when no
    /// reference curve is selected
    #[inline]
    pub fn gain_midpoint(&self) -> f64 {
        self.gain.midpoint()
    }

    /// Reference level under `freq`: the curve if there is one, otherwise
    /// the visible gain midpoint. Drags and handle placement both use this.
    #[inline]
    pub fn reference_level(&self, curve: Option<&CurveView<'_>>, freq: f64) -> f64 {
        sample_at(curve, freq).unwrap_or(self.gain_midpoint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geq_core::{CurvePoint, GAIN_MAX, GAIN_MIN};

    fn mapper(screen: ScreenTransform) -> CoordinateMapper {
        CoordinateMapper::new(
            screen,
            LogScale::audible(0.0, 800.0),
            LinearScale::new((-10.0, 10.0), (300.0, 0.0)),
        )
        .unwrap()
    }

    #[test]
    fn test_frequency_always_in_range() {
        let m = mapper(ScreenTransform::IDENTITY);
        for &x in &[-1e6, -50.0, 0.0, 400.0, 800.0, 900.0, 1e9, f64::NAN] {
            let d = m.to_domain(Point::new(x, 150.0));
            assert!((FREQ_MIN..=FREQ_MAX).contains(&d.freq), "x = {x} gave {}", d.freq);
        }
    }

    #[test]
    fn test_gain_always_in_range() {
        // Zoomed far out so the axis itself exceeds ±40 dB
        let m = mapper(ScreenTransform::IDENTITY).with_gain_domain(-200.0, 200.0);
        for &y in &[-1e6, 0.0, 150.0, 300.0, 1e6] {
            let d = m.to_domain(Point::new(400.0, y));
            assert!((GAIN_MIN..=GAIN_MAX).contains(&d.gain));
        }
    }

    #[test]
    fn test_domain_rounding() {
        let m = mapper(ScreenTransform::IDENTITY);
        let d = m.to_domain(Point::new(400.0, 137.0));
        assert_eq!(d.freq, d.freq.round());
        assert_abs_diff_eq!(d.gain * 10.0, (d.gain * 10.0).round(), epsilon = 1e-9);
        // Middle of a 20..20k log axis is ~632 Hz
        assert_eq!(d.freq, 632.0);
    }

    #[test]
    fn test_screen_transform_inverse() {
        let screen = ScreenTransform::scale_translate(2.0, 2.0, 100.0, 50.0);
        let m = mapper(screen);
        let chart = Point::new(123.0, 45.0);
        let back = m.client_to_chart(m.chart_to_client(chart));
        assert_abs_diff_eq!(back.x, chart.x, epsilon = 1e-9);
        assert_abs_diff_eq!(back.y, chart.y, epsilon = 1e-9);

        // Client (900, 350) is chart (400, 150): center of both axes
        let d = m.to_domain(Point::new(900.0, 350.0));
        assert_eq!(d.freq, 632.0);
        assert_eq!(d.gain, 0.0);
    }

    #[test]
    fn test_singular_transform_rejected() {
        let flat = ScreenTransform::scale_translate(0.0, 1.0, 0.0, 0.0);
        let result = CoordinateMapper::new(flat, LogScale::audible(0.0, 800.0), LinearScale::new((-10.0, 10.0), (300.0, 0.0)));
        assert!(matches!(result, Err(GeqError::SingularTransform(_))));
    }

    #[test]
    fn test_to_screen_inverts_to_domain() {
        let m = mapper(ScreenTransform::IDENTITY);
        let p = m.to_screen(1000.0, 2.0);
        let d = m.to_domain(p);
        assert_eq!(d.freq, 1000.0);
        assert_abs_diff_eq!(d.gain, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_reference_level_fallback() {
        let m = mapper(ScreenTransform::IDENTITY).with_gain_domain(-4.0, 10.0);
        assert_eq!(m.reference_level(None, 1000.0), 3.0);

        let samples = vec![CurvePoint::new(20.0, -1.0), CurvePoint::new(20_000.0, -1.0)];
        let curve = CurveView::flat(&samples);
        assert_eq!(m.reference_level(Some(&curve), 1000.0), -1.0);
    }
}
