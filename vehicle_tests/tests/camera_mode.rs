//! Camera mode transitions and their side effects on cameras, overlays and
//! the headset.

use vehicle_pawn::camera::CameraMode;
use vehicle_pawn::input::{InputFrame, RESET_VR, SWITCH_CAMERA};
use vehicle_shared::config::PawnConfig;
use vehicle_shared::math::{Rotator, Vec3};
use vehicle_shared::xr::HmdStatus;
use vehicle_tests::{init_tracing, spawn_pawn, SpawnOptions};

#[test]
fn begin_play_hides_overlays_and_starts_engine() -> anyhow::Result<()> {
    init_tracing();
    let (mut pawn, probe) = spawn_pawn(&PawnConfig::default(), &SpawnOptions::player())?;
    pawn.begin_play();

    assert_eq!(pawn.camera_mode(), CameraMode::Chase);
    assert!(pawn.camera().chase.is_active());
    assert!(!pawn.camera().in_car.is_active());
    assert_eq!(probe.speed_text.lock().visible, Some(false));
    assert_eq!(probe.gear_text.lock().visible, Some(false));
    assert_eq!(probe.audio.lock().plays, 1);
    Ok(())
}

#[test]
fn toggling_twice_restores_everything() -> anyhow::Result<()> {
    init_tracing();
    let (mut pawn, probe) = spawn_pawn(&PawnConfig::default(), &SpawnOptions::player())?;
    pawn.begin_play();

    let before = (
        pawn.camera().chase.is_active(),
        pawn.camera().in_car.is_active(),
        probe.speed_text.lock().visible,
        probe.gear_text.lock().visible,
    );

    pawn.on_toggle_camera();
    assert_eq!(pawn.camera_mode(), CameraMode::InCar);
    assert!(!pawn.camera().chase.is_active());
    assert!(pawn.camera().in_car.is_active());
    assert_eq!(probe.speed_text.lock().visible, Some(true));
    assert_eq!(probe.gear_text.lock().visible, Some(true));

    pawn.on_toggle_camera();
    let after = (
        pawn.camera().chase.is_active(),
        pawn.camera().in_car.is_active(),
        probe.speed_text.lock().visible,
        probe.gear_text.lock().visible,
    );
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn setting_the_same_mode_has_no_side_effects() -> anyhow::Result<()> {
    init_tracing();
    let opts = SpawnOptions {
        hmd: Some(HmdStatus::HEAD_TRACKING),
        ..SpawnOptions::player()
    };
    let (mut pawn, probe) = spawn_pawn(&PawnConfig::default(), &opts)?;
    pawn.begin_play();

    pawn.enable_incar_view(true);
    let resets = probe.hmd.lock().resets;
    let vis_sets = probe.speed_text.lock().visibility_sets;

    pawn.enable_incar_view(true);
    assert_eq!(probe.hmd.lock().resets, resets);
    assert_eq!(probe.speed_text.lock().visibility_sets, vis_sets);

    pawn.enable_incar_view(false);
    let vis_sets = probe.speed_text.lock().visibility_sets;
    pawn.enable_incar_view(false);
    assert_eq!(probe.speed_text.lock().visibility_sets, vis_sets);
    assert_eq!(probe.hmd.lock().resets, resets);
    Ok(())
}

#[test]
fn present_headset_starts_in_car_and_recentres() -> anyhow::Result<()> {
    init_tracing();
    let opts = SpawnOptions {
        hmd: Some(HmdStatus::ENABLED | HmdStatus::HEAD_TRACKING),
        ..SpawnOptions::player()
    };
    let cfg = PawnConfig::default();
    let (mut pawn, probe) = spawn_pawn(&cfg, &opts)?;
    probe.controller.lock().rotation = Rotator::new(5.0, 40.0, 0.0);

    assert_eq!(pawn.camera().in_car.relative.location, Vec3::ZERO);
    pawn.begin_play();

    assert_eq!(pawn.camera_mode(), CameraMode::InCar);
    assert_eq!(probe.hmd.lock().resets, 1);
    assert_eq!(pawn.camera().in_car.relative.location, cfg.camera.in_car_origin);
    assert_eq!(probe.controller.lock().rotation, Rotator::ZERO);
    assert_eq!(probe.speed_text.lock().visible, Some(true));
    Ok(())
}

#[test]
fn attached_but_disabled_headset_starts_in_chase() -> anyhow::Result<()> {
    let opts = SpawnOptions {
        hmd: Some(HmdStatus::empty()),
        ..SpawnOptions::player()
    };
    let (mut pawn, probe) = spawn_pawn(&PawnConfig::default(), &opts)?;
    pawn.begin_play();
    assert_eq!(pawn.camera_mode(), CameraMode::Chase);
    assert_eq!(probe.hmd.lock().resets, 0);

    pawn.on_toggle_camera();
    assert_eq!(probe.hmd.lock().resets, 1, "entering in-car recentres any headset");
    Ok(())
}

#[test]
fn reset_vr_without_headset_changes_nothing() -> anyhow::Result<()> {
    let (mut pawn, probe) = spawn_pawn(&PawnConfig::default(), &SpawnOptions::player())?;
    pawn.begin_play();
    probe.controller.lock().rotation = Rotator::new(0.0, 90.0, 0.0);

    pawn.handle_input(&InputFrame::default().press(RESET_VR));
    assert_eq!(probe.controller.lock().sets, 0);
    assert_eq!(pawn.camera().in_car.relative.location, Vec3::ZERO);
    Ok(())
}

#[test]
fn reset_vr_action_recentres_headset() -> anyhow::Result<()> {
    let opts = SpawnOptions {
        hmd: Some(HmdStatus::HEAD_TRACKING),
        ..SpawnOptions::player()
    };
    let (mut pawn, probe) = spawn_pawn(&PawnConfig::default(), &opts)?;
    pawn.begin_play();

    pawn.handle_input(&InputFrame::default().press(RESET_VR));
    pawn.handle_input(&InputFrame::default().release(RESET_VR));
    assert_eq!(probe.hmd.lock().resets, 1);
    assert_eq!(probe.controller.lock().sets, 1);
    Ok(())
}

#[test]
fn unpossessed_headset_reset_skips_controller() -> anyhow::Result<()> {
    let opts = SpawnOptions {
        hmd: Some(HmdStatus::ENABLED),
        ..SpawnOptions::default()
    };
    let (mut pawn, probe) = spawn_pawn(&PawnConfig::default(), &opts)?;
    pawn.begin_play();
    assert_eq!(pawn.camera_mode(), CameraMode::InCar);
    assert_eq!(probe.hmd.lock().resets, 1);
    assert_eq!(probe.controller.lock().sets, 0);
    Ok(())
}

#[test]
fn switch_camera_binding_ignores_release() -> anyhow::Result<()> {
    let (mut pawn, _probe) = spawn_pawn(&PawnConfig::default(), &SpawnOptions::player())?;
    pawn.begin_play();
    pawn.handle_input(&InputFrame::default().press(SWITCH_CAMERA));
    pawn.handle_input(&InputFrame::default().release(SWITCH_CAMERA));
    assert_eq!(pawn.camera_mode(), CameraMode::InCar);
    pawn.handle_input(&InputFrame::default().press(SWITCH_CAMERA));
    assert_eq!(pawn.camera_mode(), CameraMode::Chase);
    Ok(())
}
