//! Per-frame simulation tick
//!
//! Cosmetics (particles, scenery, screen shake, the delayed results reveal)
//! advance in every phase. Gameplay only advances while a run is active, in
//! this order: player physics, spawning, obstacle scroll and sweep,
//! collisions, then the run clock.

use super::collision::{CollisionOutcome, resolve};
use super::physics::step_particles;
use super::spawn::{roll_gap, spawn, sweep};
use super::state::{GameEvent, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (key press or pointer down)
    pub jump: bool,
    /// Start a run (start/restart button)
    pub start: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.start {
        state.start();
    }
    if input.jump {
        state.request_jump();
    }

    state.world_ticks += 1;

    step_particles(&mut state.particles, state.tuning.particle_gravity);
    let scroll = state.is_active().then_some(state.clock.speed);
    state.scenery.update(&mut state.fx_rng, scroll);
    decay_screen_shake(state);
    state.fire_due_reveal();

    if !state.is_active() {
        return;
    }

    state.player.integrate(&state.tuning);

    if state.clock.spawn_due() {
        let id = state.next_entity_id();
        let obstacle = spawn(
            &mut state.rng,
            id,
            state.clock.frame,
            state.clock.speed,
            &state.tuning,
        );
        state.obstacles.push(obstacle);
        let gap = roll_gap(&mut state.rng, state.clock.frame, &state.tuning);
        state.clock.schedule_spawn(gap);
    }

    for obstacle in &mut state.obstacles {
        obstacle.advance(state.clock.speed, state.tuning.blade_spin);
    }
    sweep(&mut state.obstacles);

    match resolve(
        &mut state.player,
        &state.obstacles,
        state.tuning.landing_tolerance,
    ) {
        CollisionOutcome::Crashed { obstacle_id } => {
            log::info!(
                "Crashed into obstacle #{} at frame {}",
                obstacle_id,
                state.clock.frame
            );
            state.standing_on = None;
            state.game_over();
            return;
        }
        CollisionOutcome::Landed { obstacle_id } => {
            if state.standing_on != Some(obstacle_id) {
                state.emit(GameEvent::Landed { obstacle_id });
            }
            state.standing_on = Some(obstacle_id);
        }
        CollisionOutcome::None => {
            state.standing_on = None;
        }
    }

    let step = state.clock.advance(&state.tuning);
    if let Some(score) = step.score_changed {
        state.emit(GameEvent::ScoreChanged { score });
    }
}

fn decay_screen_shake(state: &mut GameState) {
    if state.screen_shake > 0.0 {
        state.screen_shake *= state.tuning.shake_decay;
        if state.screen_shake < state.tuning.shake_cutoff {
            state.screen_shake = 0.0;
        }
    }
}
