//! Numeric policy shared by the placement, splice and eraser code.

use serde::{Deserialize, Serialize};

/// Canvas scale: 40 px on screen stand for 2 m.
pub const METERS_PER_PIXEL: f64 = 0.05;

/// Tolerances and defaults for plan editing. All distances are in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Max cross-axis offset between an opening and the wall it is cut into.
    pub align_tolerance: f64,
    /// Overlap along the wall must exceed this to count as a hit.
    pub min_overlap: f64,
    /// Eraser radius around a vent's start point.
    pub vent_pick_radius: f64,
    /// Pixel-to-meter scale used for areas.
    pub meters_per_pixel: f64,
    /// Thickness given to newly placed windows and doors.
    pub opening_thickness: u32,
    /// Opacity hint attached to onion-skin items.
    pub onion_opacity: f64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            align_tolerance: 10.0,
            min_overlap: 5.0,
            vent_pick_radius: 10.0,
            meters_per_pixel: METERS_PER_PIXEL,
            opening_thickness: 5,
            onion_opacity: 0.35,
        }
    }
}

impl PlanConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
