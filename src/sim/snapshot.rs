//! Read-only view of a tick for the presentation layer

use glam::Vec2;
use serde::Serialize;

use super::scenery::Scenery;
use super::state::{GamePhase, GameState, Obstacle, Particle, TrailPoint};

/// Where and how to draw the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerPose {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub angle: f32,
    pub grounded: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub active: bool,
    pub run_id: u32,
    pub frame: u64,
    pub score: u64,
    pub speed: f32,
    pub screen_shake: f32,
    /// Difficulty progress in [0, 1]
    pub progress: f32,
    pub player: PlayerPose,
    pub trail: &'a [TrailPoint],
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
    pub scenery: &'a Scenery,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            active: self.is_active(),
            run_id: self.run_id,
            frame: self.clock.frame,
            score: self.clock.whole_score(),
            speed: self.clock.speed,
            screen_shake: self.screen_shake,
            progress: self.progress(),
            player: PlayerPose {
                pos: self.player.pos,
                width: self.player.width,
                height: self.player.height,
                angle: self.player.angle,
                grounded: self.player.grounded,
            },
            trail: &self.player.trail,
            obstacles: &self.obstacles,
            particles: &self.particles,
            scenery: &self.scenery,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::{GameState, TickInput, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(11, Tuning::default());
        let snap = state.snapshot();
        assert!(!snap.active);
        assert_eq!(snap.score, 0);
        assert!(snap.obstacles.is_empty());

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        let snap = state.snapshot();
        assert!(snap.active);
        assert_eq!(snap.run_id, 1);
        assert_eq!(snap.frame, 1);
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.player.pos, state.player.pos);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let state = GameState::new(11, Tuning::default());
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Idle\""));
        assert!(json.contains("\"scenery\""));
    }
}
