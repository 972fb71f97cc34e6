//! Collision detection and response between the player and obstacles
//!
//! Spikes and blades end the run on any contact. Blocks are platforms: touching
//! one from above lands the player on it, touching it from the side or from
//! below is as fatal as a spike.

use glam::Vec2;

use super::state::{Obstacle, ObstacleKind, Player};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap: boxes that only share an edge do not touch
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

impl Player {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::new(self.width, self.height))
    }
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// Result of a collision sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// No obstacle touched
    None,
    /// Fatal contact with the given obstacle
    Crashed { obstacle_id: u32 },
    /// Came to rest on top of the given block
    Landed { obstacle_id: u32 },
}

/// True if the player is coming down onto `top` rather than hitting it from
/// the side or from below.
///
/// The bottom edge is taken from before this tick's movement (`bottom - vy`).
#[inline]
pub fn approaching_from_above(player: &Player, top: f32, tolerance: f32) -> bool {
    player.bottom() - player.vy <= top + tolerance && player.vy >= 0.0
}

/// Sweep `obstacles` in order against the player.
///
/// The first fatal contact ends the sweep. Landings snap the player onto the
/// block and the sweep carries on with the corrected position, so when two
/// obstacles overlap at once, their order in the slice decides the outcome.
pub fn resolve(player: &mut Player, obstacles: &[Obstacle], tolerance: f32) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::None;

    for obstacle in obstacles {
        if !player.aabb().overlaps(&obstacle.aabb()) {
            continue;
        }

        match obstacle.kind {
            ObstacleKind::Spike | ObstacleKind::Blade { .. } => {
                return CollisionOutcome::Crashed {
                    obstacle_id: obstacle.id,
                };
            }
            ObstacleKind::Block { .. } => {
                let top = obstacle.top();
                if approaching_from_above(player, top, tolerance) {
                    player.settle_at(top - player.height);
                    log::debug!("Landed on block #{}", obstacle.id);
                    outcome = CollisionOutcome::Landed {
                        obstacle_id: obstacle.id,
                    };
                } else {
                    return CollisionOutcome::Crashed {
                        obstacle_id: obstacle.id,
                    };
                }
            }
        }
    }

    outcome
}
