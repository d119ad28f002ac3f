//! Sampling and point-budget configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};

/// Estimated arc length covered by one arc sample.
pub const ARC_LENGTH_PER_SAMPLE: f64 = 10.0;

/// Bounds on the number of samples used to expand one curve segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleBounds {
    /// Fewest samples for a nearly straight segment.
    pub min: usize,
    /// Most samples for a strongly curved segment.
    pub max: usize,
}

impl SampleBounds {
    /// Bounds used for imported documents.
    pub const IMPORTED: Self = Self { min: 4, max: 40 };

    /// Bounds used for imported documents in safe mode.
    pub const IMPORTED_SAFE: Self = Self { min: 4, max: 16 };

    /// Bounds used for paths drawn in the curve editor.
    pub const DRAWN: Self = Self { min: 10, max: 120 };

    /// Sample count for a segment of the given complexity in `[0, 1]`.
    ///
    /// `n = round(min + complexity * (max - min))`, clamped to the bounds.
    pub fn count_for(&self, complexity: f64) -> usize {
        let c = if complexity.is_finite() {
            complexity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let span = self.max.saturating_sub(self.min) as f64;
        let n = (self.min as f64 + c * span).round() as usize;
        n.clamp(self.min, self.max.max(self.min))
    }
}

/// Point budgets and sampling bounds for the acquisition pipeline.
///
/// Constructed by the caller and passed in explicitly; there is no global
/// mode switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Point count above which a cleaned profile is decimated.
    pub point_cap: usize,
    /// Point count that decimation and uniform resampling aim for.
    pub target_points: usize,
    /// Minimum samples per curve segment.
    pub min_curve_samples: usize,
    /// Maximum samples per curve segment.
    pub max_curve_samples: usize,
    /// Wall-clock budget for interpreting a single path, if any.
    pub time_budget: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            point_cap: 400,
            target_points: 220,
            min_curve_samples: SampleBounds::IMPORTED.min,
            max_curve_samples: SampleBounds::IMPORTED.max,
            time_budget: Some(Duration::from_millis(30)),
        }
    }
}

impl PipelineConfig {
    /// Reduced budgets for hosts that cannot afford long parses.
    pub fn safe() -> Self {
        Self {
            point_cap: 300,
            target_points: 180,
            min_curve_samples: SampleBounds::IMPORTED_SAFE.min,
            max_curve_samples: SampleBounds::IMPORTED_SAFE.max,
            time_budget: Some(Duration::from_millis(12)),
        }
    }

    /// Settings for paths serialized by the curve editor.
    pub fn drawn() -> Self {
        Self {
            point_cap: 4000,
            target_points: 400,
            min_curve_samples: SampleBounds::DRAWN.min,
            max_curve_samples: SampleBounds::DRAWN.max,
            time_budget: None,
        }
    }

    /// Curve sample bounds.
    pub fn sample_bounds(&self) -> SampleBounds {
        SampleBounds {
            min: self.min_curve_samples,
            max: self.max_curve_samples,
        }
    }

    /// Hard vertex ceiling for the interpreter.
    pub fn vertex_ceiling(&self) -> usize {
        self.point_cap.saturating_mul(3)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.min_curve_samples == 0 {
            return Err(PathError::InvalidConfig(
                "min_curve_samples must be at least 1".into(),
            ));
        }
        if self.min_curve_samples > self.max_curve_samples {
            return Err(PathError::InvalidConfig(
                "min_curve_samples must not exceed max_curve_samples".into(),
            ));
        }
        if self.target_points < 3 {
            return Err(PathError::InvalidConfig(
                "target_points must be at least 3".into(),
            ));
        }
        if self.point_cap < self.target_points {
            return Err(PathError::InvalidConfig(
                "point_cap must be at least target_points".into(),
            ));
        }
        Ok(())
    }
}
