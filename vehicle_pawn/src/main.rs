//! Headless driver binary.
//!
//! Usage:
//!   cargo run -p vehicle_pawn --bin drive -- [--config pawn.json] [--ticks 640]
//!       [--tick-hz 64] [--seed 1] [--hmd]
//!
//! Spawns a vehicle pawn with in-memory collaborators, drives it with the
//! autopilot at a fixed tick rate, and logs the in-car readouts once a second.
//!
//! Console commands (`toggle`, `resetvr`, `status`, `quit`) are read from
//! stdin; see [`vehicle_pawn::console`].

use std::env;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::info;
use vehicle_pawn::{
    autopilot::Autopilot,
    console::{self, ConsoleOutcome},
    PawnCollaborators, VehiclePawn,
};
use vehicle_shared::{
    config::PawnConfig,
    controller::LocalPlayerController,
    xr::{HmdStatus, SimulatedHmd},
};

/// Seconds between autopilot camera toggles.
const TOGGLE_SECS: u64 = 5;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    ticks: Option<u64>,
    tick_hz: Option<u32>,
    seed: u64,
    hmd: bool,
}

/// Parses `args`, where `args[0]` is the program name. Unknown flags and
/// unparsable values are ignored.
fn parse_args(args: &[String]) -> Args {
    let mut out = Args::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                out.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--ticks" if i + 1 < args.len() => {
                out.ticks = args[i + 1].parse().ok();
                i += 2;
            }
            "--tick-hz" if i + 1 < args.len() => {
                out.tick_hz = args[i + 1].parse().ok();
                i += 2;
            }
            "--seed" if i + 1 < args.len() => {
                out.seed = args[i + 1].parse().unwrap_or(0);
                i += 2;
            }
            "--hmd" => {
                out.hmd = true;
                i += 1;
            }
            _ => i += 1,
        }
    }
    out
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args(&env::args().collect::<Vec<_>>());
    let mut cfg = match &args.config {
        Some(path) => PawnConfig::load(path)?,
        None => PawnConfig::default(),
    };
    if let Some(hz) = args.tick_hz {
        cfg.tick_hz = hz;
    }
    cfg.validate().context("config")?;
    info!(tick_hz = cfg.tick_hz, ticks = ?args.ticks, hmd = args.hmd, "Starting drive");

    let mut parts = PawnCollaborators::headless(&cfg);
    if args.hmd {
        parts = parts.with_hmd(Box::new(SimulatedHmd::new(
            HmdStatus::ENABLED | HmdStatus::HEAD_TRACKING,
        )));
    }
    let mut pawn = VehiclePawn::new(&cfg, parts).context("create pawn")?;
    pawn.possess(Box::new(LocalPlayerController::new("Player")));
    pawn.setup_player_input();
    pawn.begin_play();

    // Set up console input channel.
    let (console_tx, mut console_rx) = mpsc::channel::<String>(32);

    // Spawn stdin reader thread.
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            print!("] ");
            let _ = stdout.flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim().to_string();
            if !line.is_empty() && console_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    let tick_hz = u64::from(cfg.tick_hz);
    let mut autopilot = Autopilot::new(args.seed, cfg.tick_hz, tick_hz * TOGGLE_SECS);
    let dt = 1.0 / cfg.tick_hz as f32;
    let tick_interval = Duration::from_secs_f32(dt);
    let mut next_tick = tokio::time::Instant::now();

    loop {
        // Process console commands.
        while let Ok(line) = console_rx.try_recv() {
            match console::exec(&mut pawn, &line) {
                ConsoleOutcome::Lines(lines) => {
                    for line in lines {
                        println!("{}", line);
                    }
                }
                ConsoleOutcome::Quit => return Ok(()),
            }
        }

        let frame = autopilot.next_frame();
        pawn.handle_input(&frame);
        pawn.movement_mut().step(dt);
        pawn.tick(dt);

        if pawn.frame() % tick_hz == 0 {
            let strings = pawn.display_strings();
            info!(
                frame = pawn.frame(),
                speed = %strings.speed,
                gear = %strings.gear,
                camera = ?pawn.camera_mode(),
                "In-car readout"
            );
        }

        if args.ticks.is_some_and(|limit| pawn.frame() >= limit) {
            info!(frames = pawn.frame(), "Tick limit reached");
            break;
        }

        // Wait for next tick.
        next_tick += tick_interval;
        tokio::time::sleep_until(next_tick).await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        std::iter::once("drive")
            .chain(line.split_whitespace())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_without_flags() {
        let a = parse_args(&args(""));
        assert!(a.config.is_none());
        assert!(a.ticks.is_none());
        assert!(a.tick_hz.is_none());
        assert_eq!(a.seed, 0);
        assert!(!a.hmd);
    }

    #[test]
    fn reads_every_flag() {
        let a = parse_args(&args(
            "--config pawn.json --ticks 640 --tick-hz 30 --seed 9 --hmd",
        ));
        assert_eq!(a.config, Some(PathBuf::from("pawn.json")));
        assert_eq!(a.ticks, Some(640));
        assert_eq!(a.tick_hz, Some(30));
        assert_eq!(a.seed, 9);
        assert!(a.hmd);
    }

    #[test]
    fn skips_unknown_and_bad_values() {
        let a = parse_args(&args("--verbose --ticks many --seed x --tick-hz"));
        assert!(a.ticks.is_none());
        assert_eq!(a.seed, 0);
        assert!(a.tick_hz.is_none());
    }
}
