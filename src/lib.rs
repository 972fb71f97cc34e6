//! Neon Dash - an endless side-scrolling runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run lifecycle)
//! - `platform`: Raw input to game command mapping
//! - `settings`: Presentation preferences
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

use std::f32::consts::FRAC_PI_2;

/// World geometry constants (pixels, top-left origin, y grows downward)
pub mod consts {
    /// Nominal display refresh the simulation is tuned for
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Visible world dimensions
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 450.0;
    /// Top edge of the ground strip
    pub const GROUND_Y: f32 = GAME_HEIGHT - 50.0;

    /// Player box, fixed horizontal position
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 35.0;
    pub const PLAYER_HEIGHT: f32 = 35.0;

    /// Obstacle footprints
    pub const SPIKE_SIZE: f32 = 40.0;
    pub const BLADE_SIZE: f32 = 40.0;
    pub const BLOCK_WIDTH: f32 = 60.0;
    pub const BLOCK_HEIGHT: f32 = 40.0;
    /// Height above the ground for raised blades and floating blocks
    pub const ELEVATION_OFFSET: f32 = 50.0;

    /// Grid cell size of the scrolling floor pattern
    pub const GRID_SPACING: f32 = 50.0;
}

/// Snap an angle to the nearest multiple of 90°
#[inline]
pub fn snap_quarter_turn(angle: f32) -> f32 {
    (angle / FRAC_PI_2).round() * FRAC_PI_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_snap_quarter_turn() {
        assert_eq!(snap_quarter_turn(0.0), 0.0);
        assert!((snap_quarter_turn(1.0) - FRAC_PI_2).abs() < 1e-6);
        assert!(snap_quarter_turn(0.6).abs() < 1e-6);
        assert!((snap_quarter_turn(-1.0) + FRAC_PI_2).abs() < 1e-6);
        assert!((snap_quarter_turn(3.0) - PI).abs() < 1e-6);
    }
}
