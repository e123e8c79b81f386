//! # Unit Types
//!
//! Type-safe wrappers for the SI units used in slab design. These provide
//! compile-time safety against unit confusion while remaining lightweight
//! (just f64 wrappers).
//!
//! ## Unit System
//!
//! The engine uses one fixed set of units and converts only at component
//! boundaries:
//! - Length: metres (spans), millimetres (section dimensions)
//! - Force: kilonewtons (loads, reactions), newtons (stress calculations)
//! - Moment: kN·m (reporting), N·mm (section design)
//! - Distributed load: kN/m² (area loads), kN/m (per strip)
//!
//! Stresses (MPa) and steel areas (mm² per metre width) stay plain `f64`
//! fields named with their unit suffix.
//!
//! ## Example
//!
//! ```rust
//! use slab_core::units::{KiloNewtonMeters, Meters, Millimeters, NewtonMillimeters};
//!
//! let span = Meters(4.0);
//! let span_mm: Millimeters = span.into();
//! assert_eq!(span_mm.0, 4000.0);
//!
//! let mu: NewtonMillimeters = KiloNewtonMeters(27.375).into();
//! assert_eq!(mu.0, 27_375_000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

impl From<KiloNewtonMeters> for NewtonMillimeters {
    fn from(knm: KiloNewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * 1.0e6)
    }
}

impl From<NewtonMillimeters> for KiloNewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KiloNewtonMeters(nmm.0 / 1.0e6)
    }
}

// ============================================================================
// Distributed Load Units
// ============================================================================

/// Area load in kN/m²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnPerM2(pub f64);

/// Line load in kN/m (load on a strip of given width)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnPerM(pub f64);

impl KnPerM2 {
    /// Line load carried by a strip of the given width
    pub fn over_strip(self, width: Meters) -> KnPerM {
        KnPerM(self.0 * width.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(Newtons);
impl_arithmetic!(KiloNewtonMeters);
impl_arithmetic!(NewtonMillimeters);
impl_arithmetic!(KnPerM2);
impl_arithmetic!(KnPerM);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_millimeters() {
        let m = Meters(4.25);
        let mm: Millimeters = m.into();
        assert_eq!(mm.0, 4250.0);
        let back: Meters = mm.into();
        assert_eq!(back, m);
    }

    #[test]
    fn test_moment_conversion() {
        let nmm: NewtonMillimeters = KiloNewtonMeters(20.0).into();
        assert_eq!(nmm.0, 20.0e6);
        let knm: KiloNewtonMeters = NewtonMillimeters(1.5e6).into();
        assert_eq!(knm.0, 1.5);
    }

    #[test]
    fn test_force_conversion() {
        let n: Newtons = KiloNewtons(27.375).into();
        assert_eq!(n.0, 27_375.0);
    }

    #[test]
    fn test_strip_load() {
        let w = KnPerM2(9.125).over_strip(Meters(1.0));
        assert_eq!(w, KnPerM(9.125));
    }

    #[test]
    fn test_arithmetic() {
        let a = KnPerM2(5.0);
        let b = KnPerM2(3.0);
        assert_eq!((a + b).0, 8.0);
        assert_eq!((a - b).0, 2.0);
        assert_eq!((a * 1.5).0, 7.5);
        assert_eq!((a / 2.0).0, 2.5);
    }

    #[test]
    fn test_serialization() {
        let mm = Millimeters(225.0);
        let json = serde_json::to_string(&mm).unwrap();
        assert_eq!(json, "225.0");

        let roundtrip: Millimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(mm, roundtrip);
    }
}
