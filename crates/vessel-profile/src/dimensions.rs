//! Coupled vessel dimensions.
//!
//! Volume, height and diameter are linked through the cylinder formula
//! `V = π (d/2)² h`. Lengths are in millimetres and volume in millilitres,
//! which puts the unit conversions at `d / 20` (mm diameter to cm radius)
//! and `h / 10` (mm to cm). Derived values are rounded to 0.1.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

/// Scalar dimensions of a vessel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselDimensions {
    /// Target volume in millilitres.
    pub volume: f64,
    /// Height in millimetres.
    pub height: f64,
    /// Outer diameter in millimetres.
    pub diameter: f64,
    /// Wall thickness in millimetres.
    pub thickness: f64,
}

impl Default for VesselDimensions {
    fn default() -> Self {
        Self {
            volume: 1000.0,
            height: 100.0,
            diameter: 112.8,
            thickness: 1.0,
        }
    }
}

impl VesselDimensions {
    /// Volume of a cylinder with the current height and diameter, in millilitres.
    pub fn cylinder_volume(&self) -> f64 {
        PI * (self.diameter / 20.0).powi(2) * self.height / 10.0
    }

    /// Set the volume, scaling height and diameter by the same factor.
    ///
    /// The factor is the cube root of the ratio between the new volume and
    /// the current cylinder volume.
    pub fn with_volume(&self, volume: f64) -> Result<Self> {
        check_positive("volume", volume)?;
        let ratio = volume / self.cylinder_volume();
        check_positive("volume ratio", ratio)?;
        let k = ratio.cbrt();
        Ok(Self {
            volume,
            height: round_tenth(self.height * k),
            diameter: round_tenth(self.diameter * k),
            ..*self
        })
    }

    /// Set the height, deriving the diameter that keeps the volume.
    pub fn with_height(&self, height: f64) -> Result<Self> {
        check_positive("height", height)?;
        let diameter = ((4.0 * self.volume) / (PI * height / 10.0)).sqrt() * 10.0;
        Ok(Self {
            height,
            diameter: round_tenth(diameter),
            ..*self
        })
    }

    /// Set the diameter, deriving the height that keeps the volume.
    pub fn with_diameter(&self, diameter: f64) -> Result<Self> {
        check_positive("diameter", diameter)?;
        let height = ((4.0 * self.volume) / (PI * (diameter / 10.0).powi(2))) * 10.0;
        Ok(Self {
            diameter,
            height: round_tenth(height),
            ..*self
        })
    }

    /// Set the wall thickness.
    pub fn with_thickness(&self, thickness: f64) -> Result<Self> {
        check_positive("thickness", thickness)?;
        Ok(Self { thickness, ..*self })
    }
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ProfileError::InvalidDimension(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_defaults_are_consistent() {
        let dims = VesselDimensions::default();
        assert_relative_eq!(dims.cylinder_volume(), dims.volume, max_relative = 1e-3);
    }

    #[test]
    fn test_with_volume_scales_both() {
        let dims = VesselDimensions::default().with_volume(8000.0).unwrap();
        assert_eq!(dims.volume, 8000.0);
        assert_abs_diff_eq!(dims.height, 200.0, epsilon = 1e-9);
        assert_relative_eq!(dims.cylinder_volume(), 8000.0, max_relative = 2e-3);
    }

    #[test]
    fn test_with_height_keeps_volume() {
        let dims = VesselDimensions::default().with_height(50.0).unwrap();
        assert_eq!(dims.height, 50.0);
        assert_abs_diff_eq!(dims.diameter, 159.6, epsilon = 1e-9);
        assert_eq!(dims.volume, 1000.0);
    }

    #[test]
    fn test_with_diameter_keeps_volume() {
        let dims = VesselDimensions::default().with_diameter(100.0).unwrap();
        assert_eq!(dims.diameter, 100.0);
        assert_abs_diff_eq!(dims.height, 127.3, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_invalid() {
        let dims = VesselDimensions::default();
        assert!(matches!(
            dims.with_height(0.0),
            Err(ProfileError::InvalidDimension(_))
        ));
        assert!(dims.with_diameter(-5.0).is_err());
        assert!(dims.with_volume(f64::NAN).is_err());
        assert!(dims.with_thickness(f64::INFINITY).is_err());
        assert_eq!(dims.with_thickness(2.5).unwrap().thickness, 2.5);
    }
}
