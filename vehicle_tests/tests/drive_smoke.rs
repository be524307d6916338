//! Headless runs with the in-memory collaborators and the autopilot.

use std::time::Duration;

use tokio::sync::mpsc;
use vehicle_pawn::autopilot::Autopilot;
use vehicle_pawn::camera::CameraMode;
use vehicle_pawn::console::{self, ConsoleOutcome};
use vehicle_pawn::{PawnCollaborators, VehiclePawn};
use vehicle_shared::config::PawnConfig;
use vehicle_shared::controller::LocalPlayerController;
use vehicle_shared::math::Rotator;
use vehicle_shared::physics::KinematicVehicle;
use vehicle_tests::{init_tracing, MeshLog, MockMesh, Shared};

fn headless_pawn(cfg: &PawnConfig) -> anyhow::Result<VehiclePawn> {
    spawn(cfg, PawnCollaborators::headless(cfg))
}

fn spawn(cfg: &PawnConfig, parts: PawnCollaborators) -> anyhow::Result<VehiclePawn> {
    let mut pawn = VehiclePawn::new(cfg, parts)?;
    pawn.possess(Box::new(LocalPlayerController::new("Smoke")));
    pawn.setup_player_input();
    pawn.begin_play();
    Ok(pawn)
}

fn step(pawn: &mut VehiclePawn, autopilot: &mut Autopilot, dt: f32) {
    let frame = autopilot.next_frame();
    pawn.handle_input(&frame);
    pawn.movement_mut().step(dt);
    pawn.tick(dt);
}

/// Smoke test: one autopilot lap shows forward gears, reverse and camera flips.
#[test]
fn autopilot_lap_exercises_readouts() -> anyhow::Result<()> {
    init_tracing();
    let cfg = PawnConfig::default();
    let mut pawn = headless_pawn(&cfg)?;
    let hz = cfg.tick_hz;
    let mut autopilot = Autopilot::new(42, hz, u64::from(hz) * 5);
    let dt = 1.0 / hz as f32;

    let mut gears = Vec::new();
    let mut modes = Vec::new();
    for _ in 0..(hz * 12) {
        step(&mut pawn, &mut autopilot, dt);
        gears.push(pawn.display_strings().gear.clone());
        modes.push(pawn.camera_mode());
    }

    assert_eq!(pawn.frame(), u64::from(hz) * 12);
    assert!(gears.iter().any(|g| g == "1"), "never in first gear");
    assert!(gears.iter().any(|g| g == "R"), "never reversed");
    assert!(modes.contains(&CameraMode::InCar));
    assert!(pawn.display_strings().speed.ends_with(" km/h"));
    assert!(!pawn.is_low_friction());
    Ok(())
}

/// The pawn runs on its own task and takes console commands over a channel.
#[tokio::test]
async fn pawn_task_accepts_console_commands() -> anyhow::Result<()> {
    init_tracing();
    let cfg = PawnConfig::default();
    let (tx, mut rx) = mpsc::channel::<String>(8);

    let handle = tokio::spawn(async move {
        let mut pawn = headless_pawn(&cfg)?;
        let mut autopilot = Autopilot::new(3, cfg.tick_hz, 0);
        let dt = 1.0 / cfg.tick_hz as f32;
        let mut printed = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(line) => match console::exec(&mut pawn, &line) {
                    ConsoleOutcome::Lines(lines) => printed.extend(lines),
                    ConsoleOutcome::Quit => break,
                },
                Err(mpsc::error::TryRecvError::Empty) => {}
                Err(mpsc::error::TryRecvError::Disconnected) => break,
            }
            step(&mut pawn, &mut autopilot, dt);
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        Ok::<_, anyhow::Error>((pawn.camera_mode(), pawn.frame(), printed))
    });

    tx.send("toggle".to_string()).await?;
    tx.send("status".to_string()).await?;
    tx.send("quit".to_string()).await?;

    let (mode, frames, printed) = handle.await??;
    assert_eq!(mode, CameraMode::InCar);
    assert!(frames > 0);
    assert_eq!(printed[0], "Camera: InCar");
    assert!(printed.iter().any(|l| l.starts_with("Gear: ")));
    Ok(())
}

/// An overturned vehicle flips the mesh material every tick while it stays
/// upside down.
#[test]
fn overturned_vehicle_swaps_mesh_material() -> anyhow::Result<()> {
    init_tracing();
    let cfg = PawnConfig::default();
    let mut vehicle = KinematicVehicle::default();
    vehicle.set_orientation(Rotator::new(0.0, 0.0, 180.0));
    let mesh = Shared::new(MeshLog::default());

    let mut parts = PawnCollaborators::headless(&cfg);
    parts.movement = Box::new(vehicle);
    parts.mesh = Box::new(MockMesh(mesh.clone()));
    let mut pawn = spawn(&cfg, parts)?;

    let dt = 1.0 / cfg.tick_hz as f32;
    for _ in 0..3 {
        pawn.movement_mut().step(dt);
        pawn.tick(dt);
    }
    assert!(pawn.movement().up_vector().z < 0.0);
    assert_eq!(mesh.lock().overrides, ["Slippery", "NonSlippery", "Slippery"]);
    assert!(pawn.is_low_friction());
    Ok(())
}

/// A NaN throttle reaching the headless vehicle reads as released.
#[test]
fn nan_throttle_keeps_headless_vehicle_finite() -> anyhow::Result<()> {
    let cfg = PawnConfig::default();
    let mut pawn = headless_pawn(&cfg)?;
    let dt = 1.0 / cfg.tick_hz as f32;

    pawn.move_forward(f32::NAN);
    pawn.move_right(f32::NAN);
    for _ in 0..8 {
        pawn.movement_mut().step(dt);
        pawn.tick(dt);
    }
    assert!(pawn.movement().forward_speed().is_finite());
    assert!(pawn.movement().engine_rotation_speed().is_finite());
    assert_eq!(pawn.display_strings().speed, "0 km/h");
    assert_eq!(pawn.display_strings().gear, "N");
    Ok(())
}
