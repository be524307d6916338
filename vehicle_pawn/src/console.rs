//! Console commands for a running pawn.
//!
//! Lines are split on whitespace; the first token names the command and the
//! rest are ignored. Commands:
//!   toggle   - Switch between chase and in-car camera
//!   resetvr  - Recentre the headset
//!   status   - Show pawn status
//!   quit     - Stop the host loop (alias: exit)

use tracing::debug;

use crate::pawn::VehiclePawn;

/// Result of one console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOutcome {
    /// Lines to print back.
    Lines(Vec<String>),
    /// The host loop should stop.
    Quit,
}

pub fn status_lines(pawn: &VehiclePawn) -> Vec<String> {
    let strings = pawn.display_strings();
    vec![
        format!("Frame: {}", pawn.frame()),
        format!("Camera: {:?}", pawn.camera_mode()),
        format!("Speed: {}", strings.speed),
        format!("Gear: {}", strings.gear),
        format!("Low friction: {}", pawn.is_low_friction()),
        format!("Engine: {:.0} rpm", pawn.movement().engine_rotation_speed()),
    ]
}

/// Runs one console line against the pawn.
pub fn exec(pawn: &mut VehiclePawn, line: &str) -> ConsoleOutcome {
    let Some(cmd) = line.split_whitespace().next() else {
        return ConsoleOutcome::Lines(Vec::new());
    };
    debug!(cmd, "console command");
    match cmd {
        "toggle" => {
            pawn.on_toggle_camera();
            ConsoleOutcome::Lines(vec![format!("Camera: {:?}", pawn.camera_mode())])
        }
        "resetvr" => {
            pawn.on_reset_vr();
            ConsoleOutcome::Lines(vec!["VR reset".to_string()])
        }
        "status" => ConsoleOutcome::Lines(status_lines(pawn)),
        "quit" | "exit" => ConsoleOutcome::Quit,
        other => ConsoleOutcome::Lines(vec![format!("Unknown command: {}", other)]),
    }
}
