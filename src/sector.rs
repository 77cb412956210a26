//! Sector proximity test
//!
//! Two colors share a sector when they sit within both a radial tolerance in
//! the (L*, C*) plane and an angular tolerance on the hue circle. Both
//! comparisons are strict `<`: a candidate exactly on a boundary survives.
//! Prior study output depends on that boundary choice, so it stays.

use crate::color::Lch;

/// Exclusion tolerances for the sector test
#[derive(Debug, Clone, Copy)]
pub struct SectorThresholds {
    /// Hue tolerance in degrees
    pub delta_h: f64,
    /// Radius tolerance in the (L*, C*) plane
    pub delta_r: f64,
}

impl Default for SectorThresholds {
    fn default() -> Self {
        Self {
            delta_h: 20.0,
            delta_r: 10.0,
        }
    }
}

/// Smallest circular distance between two hue angles, in degrees
pub fn hue_dist_deg(h1: f64, h2: f64) -> f64 {
    let d = (h1 - h2).abs() % 360.0;
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

/// Whether `b` falls inside the exclusion sector around `a`
pub fn in_sector(a: Lch, b: Lch, t: SectorThresholds) -> bool {
    let d_lc = (b.l - a.l).hypot(b.c - a.c);
    let d_h = hue_dist_deg(a.h, b.h);
    d_lc < t.delta_r && d_h < t.delta_h
}
