//! Engine configuration
//!
//! Gesture timings, pixel thresholds and handle geometry. Every section is
//! `#[serde(default)]`, so a partial JSON file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use geq_core::{GeqError, GeqResult};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub gesture: GestureConfig,
    pub handles: HandleConfig,
}

/// Gesture disambiguation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Movement (px) from the press point that turns a press into a drag
    pub drag_threshold_px: f64,
    /// Movement (px) that cancels a pending long-press
    pub long_press_tolerance_px: f64,
    /// Window for the second tap of a double-tap (ms)
    pub double_tap_ms: u64,
    /// Delay before a single tap toggles secondary controls (ms)
    pub single_tap_delay_ms: u64,
    /// Hold time for a touch long-press (ms)
    pub long_press_ms: u64,
    /// Auto-hide after mouse hover leaves a handle (ms)
    pub hover_hide_ms: u64,
    /// Auto-hide after a touch interaction (ms)
    pub touch_hide_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 5.0,
            long_press_tolerance_px: 3.0,
            double_tap_ms: 300,
            single_tap_delay_ms: 250,
            long_press_ms: 500,
            hover_hide_ms: 2000,
            touch_hide_ms: 3000,
        }
    }
}

/// Handle geometry (chart pixels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleConfig {
    /// Radius at Q = 10
    pub radius_min: f64,
    /// Radius at Q = 0.1
    pub radius_max: f64,
    /// Extra grab distance around the handle body
    pub hit_slop: f64,
    /// Grab radius of a whisker endpoint
    pub whisker_hit_radius: f64,
    /// Gap between the handle edge and the delete affordance
    pub delete_gap: f64,
    pub delete_radius: f64,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            radius_min: 6.0,
            radius_max: 16.0,
            hit_slop: 4.0,
            whisker_hit_radius: 6.0,
            delete_gap: 4.0,
            delete_radius: 7.0,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    pub fn load_from<P: AsRef<Path>>(path: P) -> GeqResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| GeqError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults on any error
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default EQ engine config ({}): {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> GeqResult<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| GeqError::Serialization(e.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> GeqResult<()> {
        let g = &self.gesture;
        if !(g.drag_threshold_px > 0.0) {
            return Err(GeqError::InvalidParam(format!(
                "drag_threshold_px must be positive, got {}",
                g.drag_threshold_px
            )));
        }
        if !(g.long_press_tolerance_px >= 0.0) {
            return Err(GeqError::InvalidParam(format!(
                "long_press_tolerance_px must not be negative, got {}",
                g.long_press_tolerance_px
            )));
        }

        let h = &self.handles;
        if !(h.radius_min > 0.0 && h.radius_min <= h.radius_max) {
            return Err(GeqError::InvalidParam(format!(
                "handle radius range [{}, {}] is invalid",
                h.radius_min, h.radius_max
            )));
        }
        if h.hit_slop < 0.0 || h.whisker_hit_radius < 0.0 || h.delete_radius < 0.0 {
            return Err(GeqError::InvalidParam("hit radii must not be negative".to_string()));
        }
        Ok(())
    }
}
