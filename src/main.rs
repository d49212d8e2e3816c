//! Burst Arena headless driver
//!
//! Runs the simulation in idle (demo) mode and prints the final frame
//! snapshot as JSON.
//!
//! Usage: `burst-arena [seed] [ticks] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    use burst_arena::Tuning;
    use burst_arena::consts::TICK_RATE;
    use burst_arena::sim::{GameEvent, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Burst Arena (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(42);
    let ticks = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(10 * TICK_RATE as u64);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Failed to read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut state = GameState::new(seed, tuning);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    for _ in 0..ticks {
        tick(&mut state, &input);
        for event in &state.events {
            if let GameEvent::Hit { target, remaining, .. } = event {
                log::debug!("tick {}: {:?} hit, {} left", state.time_ticks, target, remaining);
            }
        }
        if state.is_game_over() {
            break;
        }
    }

    log::info!(
        "Stopped at tick {} ({} enemies defeated, player health {})",
        state.time_ticks,
        state.enemies_defeated,
        state.player.health.current
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The platform layer drives the library directly on the web
}
