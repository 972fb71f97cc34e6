//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; there are no globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::RunClock;
use super::scenery::Scenery;
use crate::consts::*;
use crate::tuning::Tuning;

/// Whether a run is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first run or after a crash
    Idle,
    /// Run in progress
    Active,
}

/// Trail point for player rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub angle: f32,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 10;

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    /// Rotation (radians)
    pub angle: f32,
    pub grounded: bool,
    pub can_double_jump: bool,
    pub width: f32,
    pub height: f32,
    /// Trail history for rendering (newest first)
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_HEIGHT),
            vy: 0.0,
            angle: 0.0,
            grounded: true,
            can_double_jump: true,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }
}

impl Player {
    /// Resting y when standing on the ground
    #[inline]
    pub fn ground_rest_y(&self) -> f32 {
        GROUND_Y - self.height
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }

    /// Bottom-centre point, where jump dust comes from
    #[inline]
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.width / 2.0, self.bottom())
    }

    /// Record current pose to trail (call each tick)
    pub fn record_trail(&mut self) {
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.pos,
                angle: self.angle,
            },
        );
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop();
        }
    }
}

/// Obstacle kinds, with per-kind state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ground spikes, lethal on any contact
    Spike,
    /// Spinning saw blade, lethal on any contact
    Blade {
        /// Current rotation (radians)
        angle: f32,
        /// Hovering above the ground instead of rolling on it
        raised: bool,
    },
    /// Solid block, safe to land on from above
    Block {
        /// Floating above the ground instead of standing on it
        floating: bool,
    },
}

impl ObstacleKind {
    /// True for kinds that end the run on any contact
    pub fn is_lethal(&self) -> bool {
        match self {
            ObstacleKind::Spike | ObstacleKind::Blade { .. } => true,
            ObstacleKind::Block { .. } => false,
        }
    }

    /// Rotation to draw with
    pub fn rotation(&self) -> f32 {
        match self {
            ObstacleKind::Blade { angle, .. } => *angle,
            ObstacleKind::Spike | ObstacleKind::Block { .. } => 0.0,
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub marked_for_removal: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }
}

/// Particle colours, resolved to real colours by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTint {
    /// Same colour as the player
    Player,
    Cyan,
    White,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 when spawned, removed at 0
    pub life: f32,
    /// Life lost per tick
    pub decay: f32,
    pub size: f32,
    pub angle: f32,
    /// Rotation per tick
    pub spin: f32,
    pub tint: ParticleTint,
}

/// Which jump was performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpKind {
    Ground,
    Air,
}

/// Events for the presentation layer, drained after each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began: hide overlays, show the HUD
    Started { run_id: u32 },
    Jumped { kind: JumpKind },
    /// The player came to rest on a block
    Landed { obstacle_id: u32 },
    /// The run ended; the explosion is playing
    GameOver { run_id: u32, score: u64 },
    /// Whole-number score changed
    ScoreChanged { score: u64 },
    /// Explosion finished: show the results screen
    ResultsShown { run_id: u32, score: u64 },
}

/// A results reveal waiting for its tick, valid only for the run it names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledReveal {
    pub run_id: u32,
    pub due_tick: u64,
    pub score: u64,
}

/// Salt mixed into the seed for the cosmetic RNG stream
const FX_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Default particle budget when no settings are applied
pub const MAX_PARTICLES: usize = 512;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Incremented on every start; 0 before the first run
    pub run_id: u32,
    /// Frame, score, speed and spawn schedule of the current run
    pub clock: RunClock,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Decorative background (not gameplay-affecting)
    pub scenery: Scenery,
    /// Screen shake magnitude
    pub screen_shake: f32,
    /// Ticks since creation, advancing in every phase
    pub world_ticks: u64,
    pub pending_reveal: Option<ScheduledReveal>,
    /// Block the player stood on last tick
    pub standing_on: Option<u32>,
    /// Particle cap
    pub max_particles: usize,
    /// Gameplay RNG (spawning)
    pub(crate) rng: Pcg32,
    /// Cosmetic RNG (particles, scenery)
    pub(crate) fx_rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle game with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut fx_rng = Pcg32::seed_from_u64(seed ^ FX_SEED_SALT);
        let scenery = Scenery::new(&mut fx_rng);
        Self {
            seed,
            clock: RunClock::new(&tuning),
            tuning,
            phase: GamePhase::Idle,
            run_id: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            scenery,
            screen_shake: 0.0,
            world_ticks: 0,
            pending_reveal: None,
            standing_on: None,
            max_particles: MAX_PARTICLES,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a run. Ignored while a run is already active.
    pub fn start(&mut self) {
        if self.is_active() {
            return;
        }

        self.phase = GamePhase::Active;
        self.run_id += 1;
        self.clock.reset(&self.tuning);
        self.obstacles.clear();
        self.particles.clear();
        self.player = Player::default();
        self.standing_on = None;

        log::info!("Run {} started (seed {})", self.run_id, self.seed);
        self.emit(GameEvent::Started {
            run_id: self.run_id,
        });
    }

    /// Jump if the player is allowed to; no-op otherwise
    pub fn request_jump(&mut self) {
        if !self.is_active() {
            return;
        }
        if let Some(kind) = self.player.jump(&self.tuning) {
            let feet = self.player.feet();
            self.burst_particles(feet, self.tuning.jump_particles);
            self.emit(GameEvent::Jumped { kind });
        }
    }

    /// End the current run. Ignored while idle.
    pub fn game_over(&mut self) {
        if !self.is_active() {
            return;
        }

        self.phase = GamePhase::Idle;
        let score = self.clock.whole_score();

        let center = self.player.center();
        self.burst_particles(center, self.tuning.explosion_particles);
        self.screen_shake = self.tuning.crash_shake;

        self.pending_reveal = Some(ScheduledReveal {
            run_id: self.run_id,
            due_tick: self.world_ticks + self.tuning.results_delay_ticks,
            score,
        });

        log::info!(
            "Run {} over at frame {} with score {}",
            self.run_id,
            self.clock.frame,
            score
        );
        self.emit(GameEvent::GameOver {
            run_id: self.run_id,
            score,
        });
    }

    /// Fire the results reveal once due, if it still belongs to the current idle run
    pub(crate) fn fire_due_reveal(&mut self) {
        let Some(reveal) = self.pending_reveal else {
            return;
        };
        if self.world_ticks < reveal.due_tick {
            return;
        }
        self.pending_reveal = None;

        if self.phase == GamePhase::Idle && self.run_id == reveal.run_id {
            self.emit(GameEvent::ResultsShown {
                run_id: reveal.run_id,
                score: reveal.score,
            });
        } else {
            log::debug!(
                "Dropped stale results reveal for run {} (current run {})",
                reveal.run_id,
                self.run_id
            );
        }
    }

    /// Emit a burst of particles at `origin`, dropping the oldest beyond the cap
    pub fn burst_particles(&mut self, origin: Vec2, count: usize) {
        for _ in 0..count {
            let tint = match self.fx_rng.random_range(0..3) {
                0 => ParticleTint::Player,
                1 => ParticleTint::Cyan,
                _ => ParticleTint::White,
            };
            self.particles
                .push(Particle::spawn(&mut self.fx_rng, origin, tint));
        }
        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }

    /// Difficulty progress in [0, 1] for the HUD progress bar
    pub fn progress(&self) -> f32 {
        super::spawn::difficulty_factor(self.clock.frame, &self.tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.run_id, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.player.grounded);
        assert_eq!(state.player.pos.y, GROUND_Y - PLAYER_HEIGHT);
    }

    #[test]
    fn test_kind_lethality() {
        assert!(ObstacleKind::Spike.is_lethal());
        assert!(
            ObstacleKind::Blade {
                angle: 0.0,
                raised: true
            }
            .is_lethal()
        );
        assert!(!ObstacleKind::Block { floating: false }.is_lethal());
    }

    #[test]
    fn test_jump_ignored_while_idle() {
        let mut state = GameState::new(7, Tuning::default());
        state.request_jump();
        assert_eq!(state.player.vy, 0.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_particle_cap_drops_oldest() {
        let mut state = GameState::new(7, Tuning::default());
        state.max_particles = 16;
        state.burst_particles(Vec2::new(1.0, 1.0), 10);
        state.burst_particles(Vec2::new(500.0, 500.0), 10);
        assert_eq!(state.particles.len(), 16);
        // The four oldest (from the first burst) were dropped
        let first_burst = state
            .particles
            .iter()
            .filter(|p| p.pos == Vec2::new(1.0, 1.0))
            .count();
        assert_eq!(first_burst, 6);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut player = Player::default();
        for _ in 0..(TRAIL_LENGTH * 3) {
            player.record_trail();
        }
        assert_eq!(player.trail.len(), TRAIL_LENGTH);
    }
}
