//! Slab loads per IS 875 and the IS 456 load factor
//!
//! # Overview
//!
//! - [`SlabLoads`] - Superimposed service loads given by the user (kN/m²)
//! - [`LoadSummary`] - Self weight plus superimposed loads, service and ultimate totals
//! - [`accumulate`] - Builds a [`LoadSummary`] for a slab of known thickness
//!
//! Only one combination is relevant for a gravity slab, `1.5(DL + LL)`
//! (IS 456 Table 18), so the factor lives in
//! [`DesignSettings::load_factor`](crate::settings::DesignSettings::load_factor).
//!
//! # Example
//!
//! ```
//! use slab_core::loads::{accumulate, SlabLoads};
//! use slab_core::settings::DesignSettings;
//!
//! let loads = SlabLoads::new(0.5, 3.0);
//! let summary = accumulate(&loads, 225.0, &DesignSettings::default());
//!
//! assert!((summary.self_weight_kn_m2 - 5.625).abs() < 1e-9);
//! assert!((summary.ultimate_kn_m2 - 13.6875).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::slab::{partition_allowance, self_weight};
use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignSettings;
use crate::units::{KnPerM2, Meters, Millimeters};

/// Superimposed service loads on a slab.
///
/// ## JSON Example
///
/// ```json
/// {
///   "floor_finish_kn_m2": 1.0,
///   "live_kn_m2": 3.0,
///   "partitions_kn_m2": 0.0,
///   "wall_thickness_mm": 115.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlabLoads {
    /// Floor finish (kN/m²)
    pub floor_finish_kn_m2: f64,

    /// Imposed (live) load (kN/m²)
    pub live_kn_m2: f64,

    /// Partition load (kN/m²). When zero, a wall thickness derives it.
    #[serde(default)]
    pub partitions_kn_m2: f64,

    /// Thickness of partition walls carried by the slab (mm)
    #[serde(default)]
    pub wall_thickness_mm: f64,
}

impl SlabLoads {
    /// Finish and live load, no partitions
    pub fn new(floor_finish_kn_m2: f64, live_kn_m2: f64) -> Self {
        SlabLoads {
            floor_finish_kn_m2,
            live_kn_m2,
            partitions_kn_m2: 0.0,
            wall_thickness_mm: 0.0,
        }
    }

    /// Builder: explicit partition load
    pub fn with_partitions(mut self, partitions_kn_m2: f64) -> Self {
        self.partitions_kn_m2 = partitions_kn_m2;
        self
    }

    /// Builder: derive partitions from wall thickness
    pub fn with_wall_thickness(mut self, wall_thickness_mm: f64) -> Self {
        self.wall_thickness_mm = wall_thickness_mm;
        self
    }

    /// All load values must be finite and non-negative.
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("floor_finish_kn_m2", self.floor_finish_kn_m2),
            ("live_kn_m2", self.live_kn_m2),
            ("partitions_kn_m2", self.partitions_kn_m2),
            ("wall_thickness_mm", self.wall_thickness_mm),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Load must be a non-negative number",
                ));
            }
        }
        Ok(())
    }

    /// Partition load actually applied (kN/m²)
    ///
    /// An explicit value wins; otherwise the wall thickness gives
    /// `3.5·t/115` with the default settings.
    pub fn partition_load(&self, settings: &DesignSettings) -> f64 {
        if self.partitions_kn_m2 > 0.0 {
            self.partitions_kn_m2
        } else if self.wall_thickness_mm > 0.0 {
            partition_allowance(self.wall_thickness_mm, settings.partition_load_per_115mm_wall)
        } else {
            0.0
        }
    }

    /// True when the partition load came from the wall thickness
    pub fn partitions_from_walls(&self) -> bool {
        self.partitions_kn_m2 <= 0.0 && self.wall_thickness_mm > 0.0
    }
}

/// Accumulated slab loads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Self weight γc·D (kN/m²)
    pub self_weight_kn_m2: f64,
    /// Floor finish (kN/m²)
    pub floor_finish_kn_m2: f64,
    /// Partition load applied (kN/m²)
    pub partitions_kn_m2: f64,
    /// Total dead load (kN/m²)
    pub dead_kn_m2: f64,
    /// Imposed load (kN/m²)
    pub live_kn_m2: f64,
    /// Total service load (kN/m²)
    pub service_kn_m2: f64,
    /// Load factor applied
    pub load_factor: f64,
    /// Factored load wu (kN/m²)
    pub ultimate_kn_m2: f64,
    /// Factored line load on the design strip (kN/m)
    pub ultimate_kn_per_m: f64,
}

/// Accumulate loads for a slab of overall depth `overall_depth_mm`.
pub fn accumulate(loads: &SlabLoads, overall_depth_mm: f64, settings: &DesignSettings) -> LoadSummary {
    let self_weight_kn_m2 = self_weight(overall_depth_mm, settings.unit_weight_kn_m3);
    let partitions_kn_m2 = loads.partition_load(settings);
    let dead_kn_m2 = self_weight_kn_m2 + loads.floor_finish_kn_m2 + partitions_kn_m2;
    let service_kn_m2 = dead_kn_m2 + loads.live_kn_m2;
    let ultimate = KnPerM2(settings.load_factor * service_kn_m2);
    let strip = Meters::from(Millimeters(settings.strip_width_mm));

    LoadSummary {
        self_weight_kn_m2,
        floor_finish_kn_m2: loads.floor_finish_kn_m2,
        partitions_kn_m2,
        dead_kn_m2,
        live_kn_m2: loads.live_kn_m2,
        service_kn_m2,
        load_factor: settings.load_factor,
        ultimate_kn_m2: ultimate.value(),
        ultimate_kn_per_m: ultimate.over_strip(strip).value(),
    }
}
