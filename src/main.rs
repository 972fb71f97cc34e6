//! Neon Dash headless runner
//!
//! Drives the simulation without a renderer: an autopilot presses Space, the
//! results screen is answered with a restart, and every run is logged.
//!
//! Usage: `neon-dash [seed] [ticks] [quality]`
//! Set `NEON_DASH_TUNING` to a JSON file to override balance values.

use serde::Serialize;

use neon_dash::consts::TICKS_PER_SECOND;
use neon_dash::platform::{InputMapper, RawInput};
use neon_dash::sim::{GameEvent, GameState, ObstacleKind, tick};
use neon_dash::{QualityPreset, Settings, Tuning};

/// Result of one finished run
#[derive(Debug, Serialize)]
struct RunSummary {
    run_id: u32,
    score: u64,
    seconds: f32,
}

#[derive(Debug, Serialize)]
struct Report {
    seed: u64,
    ticks: u64,
    quality: &'static str,
    runs: Vec<RunSummary>,
    best: Option<u64>,
}

fn load_tuning() -> Tuning {
    match std::env::var("NEON_DASH_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    }
}

/// Press Space when something lethal is about to reach the player
fn autopilot_wants_jump(state: &GameState) -> bool {
    if !state.player.grounded {
        return false;
    }
    let player = &state.player;
    let lookahead = state.clock.speed * 14.0;

    state.obstacles.iter().any(|o| {
        let ahead = o.pos.x - (player.pos.x + player.width);
        if !(0.0..=lookahead).contains(&ahead) {
            return false;
        }
        match o.kind {
            // Raised blades pass overhead
            ObstacleKind::Blade { raised: true, .. } => false,
            ObstacleKind::Blade { raised: false, .. } | ObstacleKind::Spike => true,
            ObstacleKind::Block { floating } => !floating,
        }
    })
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED_u64);
    let ticks = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60 * u64::from(TICKS_PER_SECOND));
    let quality = args
        .next()
        .and_then(|s| QualityPreset::from_str(&s))
        .unwrap_or_default();

    let settings = Settings::from_preset(quality);
    let mut state = GameState::new(seed, load_tuning());
    state.max_particles = settings.max_particles();
    let mut mapper = InputMapper::new();

    log::info!(
        "Neon Dash (headless) seed={} ticks={} quality={}",
        seed,
        ticks,
        quality.as_str()
    );

    let mut runs = Vec::new();
    let mut run_started_at = 0u64;
    mapper.handle(RawInput::StartButton);

    for _ in 0..ticks {
        if state.is_active() && autopilot_wants_jump(&state) {
            mapper.handle(RawInput::Space);
        }

        let input = mapper.take();
        tick(&mut state, &input);

        for event in state.drain_events() {
            mapper.observe(&event);
            match event {
                GameEvent::Started { run_id } => {
                    run_started_at = state.world_ticks;
                    log::info!("Run {} started", run_id);
                }
                GameEvent::GameOver { run_id, score } => {
                    let seconds =
                        (state.world_ticks - run_started_at) as f32 / TICKS_PER_SECOND as f32;
                    log::info!("Run {} ended: score {} after {:.1}s", run_id, score, seconds);
                    runs.push(RunSummary {
                        run_id,
                        score,
                        seconds,
                    });
                }
                GameEvent::ResultsShown { .. } => {
                    mapper.handle(RawInput::Space);
                }
                GameEvent::Landed { obstacle_id } => {
                    log::debug!("Standing on block #{}", obstacle_id);
                }
                GameEvent::Jumped { .. } | GameEvent::ScoreChanged { .. } => {}
            }
        }
    }

    let snapshot = state.snapshot();
    log::info!(
        "Finished: {} runs, current score {}, speed {:.1}, shake {:.1}",
        runs.len(),
        snapshot.score,
        snapshot.speed,
        settings.effective_shake(snapshot.screen_shake)
    );

    let report = Report {
        seed,
        ticks,
        quality: quality.as_str(),
        best: runs.iter().map(|r| r.score).max(),
        runs,
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize report: {}", e),
    }
}
