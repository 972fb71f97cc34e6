//! Gravity and motion integration for the player and particles

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{JumpKind, Particle, ParticleTint, Player};
use crate::snap_quarter_turn;
use crate::tuning::Tuning;

impl Player {
    /// Jump from the ground, or spend the double jump in mid-air.
    ///
    /// Returns `None` when neither is available.
    pub fn jump(&mut self, tuning: &Tuning) -> Option<JumpKind> {
        if self.grounded {
            self.vy = tuning.jump_velocity;
            self.grounded = false;
            self.can_double_jump = true;
            Some(JumpKind::Ground)
        } else if self.can_double_jump {
            self.vy = tuning.jump_velocity * tuning.double_jump_factor;
            self.can_double_jump = false;
            Some(JumpKind::Air)
        } else {
            None
        }
    }

    /// Apply gravity for one tick and settle on the ground
    pub fn integrate(&mut self, tuning: &Tuning) {
        self.vy += tuning.gravity;
        self.pos.y += self.vy;

        let rest_y = self.ground_rest_y();
        if self.pos.y >= rest_y {
            self.settle_at(rest_y);
        } else {
            // Continuous flip while airborne
            self.angle += tuning.air_spin;
            self.grounded = false;
        }

        self.record_trail();
    }

    /// Come to rest with the top-left corner at `rest_y`
    pub fn settle_at(&mut self, rest_y: f32) {
        self.pos.y = rest_y;
        self.vy = 0.0;
        self.grounded = true;
        self.can_double_jump = true;
        self.angle = snap_quarter_turn(self.angle);
    }
}

impl Particle {
    /// A particle flying out of `origin` in a random direction
    pub fn spawn(rng: &mut impl Rng, origin: Vec2, tint: ParticleTint) -> Self {
        let heading = rng.random::<f32>() * TAU;
        let speed = rng.random::<f32>() * 8.0 + 2.0;
        Self {
            pos: origin,
            vel: Vec2::new(heading.cos(), heading.sin()) * speed,
            life: 1.0,
            decay: rng.random::<f32>() * 0.02 + 0.01,
            size: rng.random::<f32>() * 6.0 + 2.0,
            angle: rng.random::<f32>() * TAU,
            spin: (rng.random::<f32>() - 0.5) * 0.2,
            tint,
        }
    }

    /// Advance one tick
    pub fn integrate(&mut self, gravity: f32) {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.life -= self.decay;
        self.angle += self.spin;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Advance every particle and drop the dead ones
pub fn step_particles(particles: &mut Vec<Particle>, gravity: f32) {
    for particle in particles.iter_mut() {
        particle.integrate(gravity);
    }
    particles.retain(|p| !p.is_dead());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_grounded_player_stays_put() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.integrate(&tuning);
        assert_eq!(player.pos.y, GROUND_Y - PLAYER_HEIGHT);
        assert_eq!(player.vy, 0.0);
        assert!(player.grounded);
    }

    #[test]
    fn test_two_air_jumps_change_velocity_once() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.jump(&tuning);
        player.integrate(&tuning);
        assert!(!player.grounded);

        let before = player.vy;
        assert_eq!(player.jump(&tuning), Some(JumpKind::Air));
        let after_first = player.vy;
        assert_ne!(before, after_first);

        assert_eq!(player.jump(&tuning), None);
        assert_eq!(player.vy, after_first);
    }

    #[test]
    fn test_ground_then_air_jump_changes_velocity_twice() {
        let tuning = Tuning::default();
        let mut player = Player::default();

        assert_eq!(player.jump(&tuning), Some(JumpKind::Ground));
        assert_eq!(player.vy, -10.0);
        assert!(!player.grounded);
        assert!(player.can_double_jump);

        player.integrate(&tuning);
        assert_eq!(player.jump(&tuning), Some(JumpKind::Air));
        assert_eq!(player.vy, -8.0);
        assert!(!player.can_double_jump);
    }

    #[test]
    fn test_landing_restores_double_jump_and_snaps_upright() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.jump(&tuning);
        player.integrate(&tuning);
        player.jump(&tuning);

        let mut ticks = 0;
        while !player.grounded {
            player.integrate(&tuning);
            ticks += 1;
            assert!(ticks < 200, "player never landed");
        }

        assert_eq!(player.pos.y, GROUND_Y - PLAYER_HEIGHT);
        assert_eq!(player.vy, 0.0);
        assert!(player.can_double_jump);
        let quarter_turns = player.angle / FRAC_PI_2;
        assert!((quarter_turns - quarter_turns.round()).abs() < 1e-4);
    }

    #[test]
    fn test_airborne_player_spins() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.jump(&tuning);
        player.integrate(&tuning);
        player.integrate(&tuning);
        assert!((player.angle - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_particles_decay_and_are_removed() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles: Vec<Particle> = (0..20)
            .map(|_| Particle::spawn(&mut rng, Vec2::new(100.0, 100.0), ParticleTint::White))
            .collect();

        for p in &particles {
            assert!((0.01..=0.03).contains(&p.decay));
            assert!((2.0..=8.0).contains(&p.size));
            assert!(p.spin.abs() <= 0.1);
        }

        // Slowest decay is 0.01 per tick, so 101 ticks clears everything
        for _ in 0..101 {
            step_particles(&mut particles, 0.15);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_particle_gravity_pulls_down() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut particle = Particle::spawn(&mut rng, Vec2::ZERO, ParticleTint::Cyan);
        let vy = particle.vel.y;
        particle.integrate(0.15);
        assert!((particle.vel.y - (vy + 0.15)).abs() < 1e-6);
    }
}
