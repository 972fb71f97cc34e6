//! Platform input mapping
//!
//! Turns raw device input into the two commands the simulation understands.
//! Which one a key press means depends on what the player can see, so the
//! mapper follows overlay visibility from the simulation's events instead of
//! asking the simulation about UI state.

use crate::sim::{GameEvent, TickInput};

/// Raw input as delivered by the windowing/browser layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// Space bar pressed
    Space,
    /// Mouse button or touch down on the play field
    PointerDown,
    /// Start or restart button clicked
    StartButton,
}

/// Which full-screen overlay is up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    /// Title screen before the first run
    #[default]
    Start,
    /// Playing, or watching the crash explosion
    Hidden,
    /// Results after a run
    Results,
}

/// Accumulates input for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    overlay: Overlay,
    run_active: bool,
    pending: TickInput,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// Map one raw input event
    pub fn handle(&mut self, input: RawInput) {
        match input {
            RawInput::StartButton => self.pending.start = true,
            RawInput::Space => {
                if self.run_active {
                    self.pending.jump = true;
                } else if self.overlay != Overlay::Hidden {
                    // Space during the crash explosion does nothing
                    self.pending.start = true;
                }
            }
            RawInput::PointerDown => {
                if self.run_active {
                    self.pending.jump = true;
                }
            }
        }
    }

    /// Follow overlay visibility from simulation events
    pub fn observe(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Started { .. } => {
                self.overlay = Overlay::Hidden;
                self.run_active = true;
            }
            GameEvent::GameOver { .. } => {
                self.run_active = false;
            }
            GameEvent::ResultsShown { .. } => {
                self.overlay = Overlay::Results;
            }
            GameEvent::Jumped { .. }
            | GameEvent::Landed { .. }
            | GameEvent::ScoreChanged { .. } => {}
        }
    }

    /// Input for the next tick; clears the one-shot commands
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }
}
