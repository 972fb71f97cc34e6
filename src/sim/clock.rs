//! Run clock: frame count, score, scroll speed and spawn schedule

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// What changed during one clock advance
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClockStep {
    /// New whole-number score, if it ticked over
    pub score_changed: Option<u64>,
    /// Scroll speed went up this tick
    pub speed_ramped: bool,
}

/// Per-run counters, reset on every start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunClock {
    /// Frames survived in this run
    pub frame: u64,
    /// Accumulated score (fractional; shown floored)
    pub score: f64,
    /// Scroll speed in pixels per tick; never decreases during a run
    pub speed: f32,
    /// Frame at which the next obstacle spawns
    pub next_spawn_frame: u64,
}

impl RunClock {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            frame: 0,
            score: 0.0,
            speed: tuning.start_speed,
            next_spawn_frame: 0,
        }
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Score as shown to the player
    #[inline]
    pub fn whole_score(&self) -> u64 {
        self.score.floor() as u64
    }

    #[inline]
    pub fn spawn_due(&self) -> bool {
        self.frame >= self.next_spawn_frame
    }

    /// Schedule the next spawn `gap` frames from now
    pub fn schedule_spawn(&mut self, gap: u64) {
        self.next_spawn_frame = self.frame + gap.max(1);
    }

    /// Count one survived frame: score, then the periodic speed ramp
    pub fn advance(&mut self, tuning: &Tuning) -> ClockStep {
        let before = self.whole_score();
        self.frame += 1;
        self.score += tuning.score_per_tick;

        let mut step = ClockStep::default();
        let after = self.whole_score();
        if after != before {
            step.score_changed = Some(after);
        }

        if self.frame % tuning.speed_step_interval == 0 {
            self.speed += tuning.speed_step;
            step.speed_ramped = true;
            log::debug!("Speed up to {:.1} at frame {}", self.speed, self.frame);
        }

        step
    }
}
