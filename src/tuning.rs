//! Data-driven game balance
//!
//! Every number that shapes how a run plays lives here so it can be tweaked
//! from JSON without touching the simulation. Fixed world geometry lives in
//! [`crate::consts`] instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("tuning value `{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("tuning value `{field}` must lie in [0, 1], got {value}")]
    NotProbability { field: &'static str, value: f32 },
    #[error("spawn gap floor `{floor}` ({floor_value}) exceeds its start value ({start_value})")]
    GapFloorAboveStart {
        floor: &'static str,
        floor_value: f32,
        start_value: f32,
    },
    #[error("minimum spawn gap ({min}) exceeds maximum spawn gap ({max})")]
    GapBoundsInverted { min: f32, max: f32 },
}

/// Balance constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Vertical velocity set by a grounded jump (negative is up)
    pub jump_velocity: f32,
    /// Fraction of `jump_velocity` used by the mid-air jump
    pub double_jump_factor: f32,
    /// Rotation added per airborne tick (radians)
    pub air_spin: f32,

    // === Scrolling and score ===
    /// Scroll speed at the start of a run (pixels per tick)
    pub start_speed: f32,
    /// Speed added at every ramp step
    pub speed_step: f32,
    /// Frames between ramp steps
    pub speed_step_interval: u64,
    /// Score added per active tick
    pub score_per_tick: f64,

    // === Spawn cadence ===
    /// Minimum gap (frames) at frame 0
    pub gap_min_start: f32,
    /// Frames needed to shave one frame off the minimum gap
    pub gap_min_decay_frames: f32,
    /// Lowest the minimum gap can go
    pub gap_min_floor: f32,
    /// Maximum gap (frames) at frame 0
    pub gap_max_start: f32,
    /// Frames needed to shave one frame off the maximum gap
    pub gap_max_decay_frames: f32,
    /// Lowest the maximum gap can go
    pub gap_max_floor: f32,

    // === Obstacle mix ===
    /// Frame count at which the difficulty factor reaches 1
    pub difficulty_cap_frames: f32,
    /// Blade probability at difficulty 0
    pub blade_chance_base: f32,
    /// Blade probability at difficulty 1
    pub blade_chance_max: f32,
    /// Probability that a blade hovers instead of sitting on the ground
    pub blade_raised_chance: f32,
    /// Probability that a block floats above the ground
    pub block_float_chance: f32,
    /// Blade rotation per tick (radians)
    pub blade_spin: f32,

    // === Collision ===
    /// Pixels of overlap still accepted as landing on top of a block
    pub landing_tolerance: f32,

    // === Effects ===
    /// Secondary gravity applied to particles
    pub particle_gravity: f32,
    /// Particles emitted per jump
    pub jump_particles: usize,
    /// Particles emitted by the crash explosion
    pub explosion_particles: usize,
    /// Screen shake magnitude set by the crash
    pub crash_shake: f32,
    /// Multiplicative shake decay per tick
    pub shake_decay: f32,
    /// Shake below this snaps to zero
    pub shake_cutoff: f32,
    /// Ticks between the crash and the results reveal
    pub results_delay_ticks: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_velocity: -10.0,
            double_jump_factor: 0.8,
            air_spin: 0.15,

            start_speed: 5.0,
            speed_step: 0.2,
            speed_step_interval: 200,
            score_per_tick: 0.1,

            gap_min_start: 90.0,
            gap_min_decay_frames: 50.0,
            gap_min_floor: 40.0,
            gap_max_start: 150.0,
            gap_max_decay_frames: 40.0,
            gap_max_floor: 70.0,

            difficulty_cap_frames: 5000.0,
            blade_chance_base: 0.1,
            blade_chance_max: 0.5,
            blade_raised_chance: 0.5,
            block_float_chance: 0.3,
            blade_spin: 0.2,

            landing_tolerance: 15.0,

            particle_gravity: 0.15,
            jump_particles: 10,
            explosion_particles: 200,
            crash_shake: 15.0,
            shake_decay: 0.9,
            shake_cutoff: 0.5,
            // 1.2 seconds at 60 Hz
            results_delay_ticks: 72,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Parse tuning, falling back to defaults when the JSON is rejected
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Self::default()
            }
        }
    }

    /// Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("double_jump_factor", self.double_jump_factor),
            ("air_spin", self.air_spin),
            ("start_speed", self.start_speed),
            ("speed_step", self.speed_step),
            ("gap_min_start", self.gap_min_start),
            ("gap_min_decay_frames", self.gap_min_decay_frames),
            ("gap_min_floor", self.gap_min_floor),
            ("gap_max_start", self.gap_max_start),
            ("gap_max_decay_frames", self.gap_max_decay_frames),
            ("gap_max_floor", self.gap_max_floor),
            ("difficulty_cap_frames", self.difficulty_cap_frames),
            ("blade_chance_base", self.blade_chance_base),
            ("blade_chance_max", self.blade_chance_max),
            ("blade_raised_chance", self.blade_raised_chance),
            ("block_float_chance", self.block_float_chance),
            ("blade_spin", self.blade_spin),
            ("landing_tolerance", self.landing_tolerance),
            ("particle_gravity", self.particle_gravity),
            ("crash_shake", self.crash_shake),
            ("shake_decay", self.shake_decay),
            ("shake_cutoff", self.shake_cutoff),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { field, value });
            }
        }
        if !self.score_per_tick.is_finite() {
            return Err(TuningError::NonFinite {
                field: "score_per_tick",
                value: self.score_per_tick as f32,
            });
        }

        let positive = [
            ("gravity", self.gravity),
            ("start_speed", self.start_speed),
            ("gap_min_decay_frames", self.gap_min_decay_frames),
            ("gap_min_floor", self.gap_min_floor),
            ("gap_max_decay_frames", self.gap_max_decay_frames),
            ("gap_max_floor", self.gap_max_floor),
            ("difficulty_cap_frames", self.difficulty_cap_frames),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        if self.speed_step_interval == 0 {
            return Err(TuningError::NotPositive {
                field: "speed_step_interval",
                value: 0.0,
            });
        }
        if self.speed_step < 0.0 {
            // A negative step would slow the world down mid-run
            return Err(TuningError::NotPositive {
                field: "speed_step",
                value: self.speed_step,
            });
        }

        let probabilities = [
            ("blade_chance_base", self.blade_chance_base),
            ("blade_chance_max", self.blade_chance_max),
            ("blade_raised_chance", self.blade_raised_chance),
            ("block_float_chance", self.block_float_chance),
            ("shake_decay", self.shake_decay),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::NotProbability { field, value });
            }
        }

        if self.gap_min_floor > self.gap_min_start {
            return Err(TuningError::GapFloorAboveStart {
                floor: "gap_min_floor",
                floor_value: self.gap_min_floor,
                start_value: self.gap_min_start,
            });
        }
        if self.gap_max_floor > self.gap_max_start {
            return Err(TuningError::GapFloorAboveStart {
                floor: "gap_max_floor",
                floor_value: self.gap_max_floor,
                start_value: self.gap_max_start,
            });
        }
        if self.gap_min_start > self.gap_max_start || self.gap_min_floor > self.gap_max_floor {
            return Err(TuningError::GapBoundsInverted {
                min: self.gap_min_start.max(self.gap_min_floor),
                max: self.gap_max_start.min(self.gap_max_floor),
            });
        }

        Ok(())
    }

    /// Frame after which both spawn gap bounds sit on their floors
    pub fn gap_saturation_frame(&self) -> u64 {
        let min_frames = (self.gap_min_start - self.gap_min_floor) * self.gap_min_decay_frames;
        let max_frames = (self.gap_max_start - self.gap_max_floor) * self.gap_max_decay_frames;
        min_frames.max(max_frames).ceil() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_saturation_frame_defaults() {
        // min gap hits 40 at frame 2500, max gap hits 70 at frame 3200
        assert_eq!(Tuning::default().gap_saturation_frame(), 3200);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.6, "start_speed": 6.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.6);
        assert_eq!(tuning.start_speed, 6.0);
        assert_eq!(tuning.landing_tolerance, 15.0);
        assert_eq!(tuning.results_delay_ticks, 72);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_floor_above_start() {
        let tuning = Tuning {
            gap_min_floor: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GapFloorAboveStart { floor: "gap_min_floor", .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite() {
        let tuning = Tuning {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonFinite { field: "gravity", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let tuning = Tuning {
            blade_chance_max: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotProbability { .. })
        ));
    }

    #[test]
    fn test_fallback_to_default() {
        let tuning = Tuning::from_json_or_default(r#"{ "speed_step_interval": 0 }"#);
        assert_eq!(tuning, Tuning::default());
    }
}
