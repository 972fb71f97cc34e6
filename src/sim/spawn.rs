//! Obstacle generation and the difficulty curve
//!
//! Spawning is random but bounded: the gap between obstacles is redrawn after
//! every spawn from a window that shrinks with elapsed frames, and the share
//! of blades grows with the difficulty factor.

use glam::Vec2;
use rand::Rng;

use super::state::{Obstacle, ObstacleKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Spawn gap window in frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapBounds {
    pub min: f32,
    pub max: f32,
}

/// Gap window at `frame`: both edges shrink linearly down to their floors
pub fn gap_bounds(frame: u64, tuning: &Tuning) -> GapBounds {
    let frame = frame as f32;
    GapBounds {
        min: (tuning.gap_min_start - frame / tuning.gap_min_decay_frames).max(tuning.gap_min_floor),
        max: (tuning.gap_max_start - frame / tuning.gap_max_decay_frames).max(tuning.gap_max_floor),
    }
}

/// Elapsed frames normalized to [0, 1]
pub fn difficulty_factor(frame: u64, tuning: &Tuning) -> f32 {
    (frame as f32 / tuning.difficulty_cap_frames).clamp(0.0, 1.0)
}

/// Probability that the next obstacle is a blade
pub fn blade_chance(frame: u64, tuning: &Tuning) -> f32 {
    let t = difficulty_factor(frame, tuning);
    tuning.blade_chance_base + t * (tuning.blade_chance_max - tuning.blade_chance_base)
}

/// Draw the number of frames until the next spawn (at least one)
pub fn roll_gap(rng: &mut impl Rng, frame: u64, tuning: &Tuning) -> u64 {
    let bounds = gap_bounds(frame, tuning);
    let gap = bounds.min + rng.random::<f32>() * (bounds.max - bounds.min);
    (gap.floor() as u64).max(1)
}

/// Pick a kind and placement for a new obstacle entering at the right edge
pub fn spawn(rng: &mut impl Rng, id: u32, frame: u64, speed: f32, tuning: &Tuning) -> Obstacle {
    let blade_p = blade_chance(frame, tuning) as f64;

    let (kind, size, lift) = if rng.random_bool(blade_p) {
        let raised = rng.random_bool(tuning.blade_raised_chance as f64);
        let lift = if raised { ELEVATION_OFFSET } else { 0.0 };
        (
            ObstacleKind::Blade { angle: 0.0, raised },
            Vec2::splat(BLADE_SIZE),
            lift,
        )
    } else if rng.random_bool(0.5) {
        (ObstacleKind::Spike, Vec2::splat(SPIKE_SIZE), 0.0)
    } else {
        let floating = rng.random_bool(tuning.block_float_chance as f64);
        let lift = if floating { ELEVATION_OFFSET } else { 0.0 };
        (
            ObstacleKind::Block { floating },
            Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT),
            lift,
        )
    };

    log::debug!(
        "Spawn #{} {:?} at frame {} (speed {:.1})",
        id,
        kind,
        frame,
        speed
    );

    Obstacle {
        id,
        kind,
        pos: Vec2::new(GAME_WIDTH, GROUND_Y - size.y - lift),
        size,
        marked_for_removal: false,
    }
}

impl Obstacle {
    /// Scroll left by `speed`, spin blades, and mark once fully off screen
    pub fn advance(&mut self, speed: f32, blade_spin: f32) {
        self.pos.x -= speed;
        match &mut self.kind {
            ObstacleKind::Blade { angle, .. } => *angle += blade_spin,
            ObstacleKind::Spike | ObstacleKind::Block { .. } => {}
        }
        if self.right() < 0.0 {
            self.marked_for_removal = true;
        }
    }
}

/// Drop obstacles marked for removal
pub fn sweep(obstacles: &mut Vec<Obstacle>) {
    obstacles.retain(|o| !o.marked_for_removal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_gap_bounds_at_frame_zero() {
        let tuning = Tuning::default();
        let bounds = gap_bounds(0, &tuning);
        assert_eq!(bounds.min, tuning.gap_min_start);
        assert_eq!(bounds.max, tuning.gap_max_start);
    }

    #[test]
    fn test_gap_bounds_at_saturation() {
        let tuning = Tuning::default();
        let saturation = tuning.gap_saturation_frame();
        for frame in [saturation, saturation + 1, saturation * 10] {
            let bounds = gap_bounds(frame, &tuning);
            assert_eq!(bounds.min, tuning.gap_min_floor);
            assert_eq!(bounds.max, tuning.gap_max_floor);
        }
    }

    #[test]
    fn test_gap_bounds_mid_curve() {
        let tuning = Tuning::default();
        let bounds = gap_bounds(1000, &tuning);
        assert_eq!(bounds.min, 70.0);
        assert_eq!(bounds.max, 125.0);
    }

    #[test]
    fn test_difficulty_factor_clamped() {
        let tuning = Tuning::default();
        assert_eq!(difficulty_factor(0, &tuning), 0.0);
        assert_eq!(difficulty_factor(2500, &tuning), 0.5);
        assert_eq!(difficulty_factor(5000, &tuning), 1.0);
        assert_eq!(difficulty_factor(u64::MAX / 2, &tuning), 1.0);
    }

    #[test]
    fn test_blade_chance_ramps_from_base_to_max() {
        let tuning = Tuning::default();
        assert!((blade_chance(0, &tuning) - 0.1).abs() < 1e-6);
        assert!((blade_chance(2500, &tuning) - 0.3).abs() < 1e-6);
        assert!((blade_chance(9000, &tuning) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_placement_rules() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let (mut spikes, mut blades, mut blocks) = (0, 0, 0);

        for id in 0..2000 {
            let o = spawn(&mut rng, id, 3000, 5.0, &tuning);
            assert_eq!(o.pos.x, GAME_WIDTH);
            assert!(!o.marked_for_removal);
            match o.kind {
                ObstacleKind::Spike => {
                    spikes += 1;
                    assert_eq!(o.pos.y + o.size.y, GROUND_Y);
                }
                ObstacleKind::Blade { angle, raised } => {
                    blades += 1;
                    assert_eq!(angle, 0.0);
                    let lift = if raised { ELEVATION_OFFSET } else { 0.0 };
                    assert_eq!(o.pos.y, GROUND_Y - BLADE_SIZE - lift);
                }
                ObstacleKind::Block { floating } => {
                    blocks += 1;
                    assert_eq!(o.size.x, BLOCK_WIDTH);
                    let lift = if floating { ELEVATION_OFFSET } else { 0.0 };
                    assert_eq!(o.pos.y, GROUND_Y - BLOCK_HEIGHT - lift);
                }
            }
        }

        assert!(spikes > 0 && blades > 0 && blocks > 0);
    }

    #[test]
    fn test_late_game_has_more_blades() {
        let tuning = Tuning::default();
        let count_blades = |frame: u64| {
            let mut rng = Pcg32::seed_from_u64(1);
            (0..4000)
                .filter(|&id| {
                    matches!(
                        spawn(&mut rng, id, frame, 5.0, &tuning).kind,
                        ObstacleKind::Blade { .. }
                    )
                })
                .count()
        };
        // Expected ~400 early versus ~2000 late
        assert!(count_blades(0) < 700);
        assert!(count_blades(10_000) > 1600);
    }

    #[test]
    fn test_spike_reaches_x40_after_152_ticks() {
        let tuning = Tuning::default();
        let mut spike = Obstacle {
            id: 1,
            kind: ObstacleKind::Spike,
            pos: Vec2::new(800.0, GROUND_Y - SPIKE_SIZE),
            size: Vec2::splat(SPIKE_SIZE),
            marked_for_removal: false,
        };

        for _ in 0..152 {
            spike.advance(5.0, tuning.blade_spin);
        }
        assert_eq!(spike.pos.x, 40.0);
        assert!(!spike.marked_for_removal);

        // Right edge reaches exactly 0 after 16 more ticks; one more pushes it past
        for _ in 0..16 {
            spike.advance(5.0, tuning.blade_spin);
        }
        assert_eq!(spike.right(), 0.0);
        assert!(!spike.marked_for_removal);
        spike.advance(5.0, tuning.blade_spin);
        assert!(spike.marked_for_removal);

        let mut obstacles = vec![spike];
        sweep(&mut obstacles);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_blades_spin_others_do_not() {
        let mut blade = Obstacle {
            id: 1,
            kind: ObstacleKind::Blade {
                angle: 0.0,
                raised: false,
            },
            pos: Vec2::new(400.0, 0.0),
            size: Vec2::splat(BLADE_SIZE),
            marked_for_removal: false,
        };
        blade.advance(5.0, 0.2);
        blade.advance(5.0, 0.2);
        assert!((blade.kind.rotation() - 0.4).abs() < 1e-6);
        assert_eq!(ObstacleKind::Spike.rotation(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_gap_bounds_never_below_floors(frame in 0u64..1_000_000) {
            let tuning = Tuning::default();
            let bounds = gap_bounds(frame, &tuning);
            prop_assert!(bounds.min >= tuning.gap_min_floor);
            prop_assert!(bounds.max >= tuning.gap_max_floor);
            prop_assert!(bounds.min <= tuning.gap_min_start);
            prop_assert!(bounds.max <= tuning.gap_max_start);
            prop_assert!(bounds.min <= bounds.max);
        }

        #[test]
        fn prop_gap_bounds_shrink_with_time(a in 0u64..10_000, b in 0u64..10_000) {
            let tuning = Tuning::default();
            let (early, late) = (a.min(b), a.max(b));
            let early = gap_bounds(early, &tuning);
            let late = gap_bounds(late, &tuning);
            prop_assert!(late.min <= early.min);
            prop_assert!(late.max <= early.max);
        }

        #[test]
        fn prop_rolled_gap_within_bounds(frame in 0u64..10_000, seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let bounds = gap_bounds(frame, &tuning);
            let gap = roll_gap(&mut rng, frame, &tuning) as f32;
            prop_assert!(gap >= bounds.min.floor());
            prop_assert!(gap <= bounds.max);
        }
    }
}
