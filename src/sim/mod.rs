//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, no wall-clock time
//! - Seeded RNG only (gameplay and cosmetics on separate streams)
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod physics;
pub mod scenery;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{ClockStep, RunClock};
pub use collision::{Aabb, CollisionOutcome, resolve};
pub use scenery::Scenery;
pub use snapshot::{PlayerPose, Snapshot};
pub use spawn::{GapBounds, difficulty_factor, gap_bounds};
pub use state::{
    GameEvent, GamePhase, GameState, JumpKind, Obstacle, ObstacleKind, Particle, ParticleTint,
    Player, ScheduledReveal,
};
pub use tick::{TickInput, tick};
