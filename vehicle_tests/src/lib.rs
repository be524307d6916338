//! Recording collaborators for pawn integration tests.
//!
//! Each mock writes into an `Arc<Mutex<_>>` log that the test keeps a clone
//! of, so assertions can look at what the pawn told its collaborators.

use std::sync::{Arc, Mutex, MutexGuard};

use vehicle_pawn::{PawnCollaborators, VehiclePawn};
use vehicle_shared::{
    audio::EngineAudio,
    config::PawnConfig,
    controller::PlayerController,
    math::{Color, Rotator, Vec3},
    physics::{MeshSurface, PhysMaterial, VehicleMovement},
    render::TextRender,
    tuning::VehicleTuning,
    xr::{HeadMountedDisplay, HmdStatus},
};

/// Shared mock state.
#[derive(Debug, Default)]
pub struct Shared<T>(Arc<Mutex<T>>);

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(Mutex::new(value)))
    }

    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.0.lock().expect("mock state poisoned")
    }
}

#[derive(Debug, Clone)]
pub struct MovementState {
    pub throttle: f32,
    pub steering: f32,
    pub handbrake: bool,
    pub forward_speed: f32,
    pub gear: i32,
    pub rpm: f32,
    pub max_rpm: f32,
    pub up: Vec3,
    pub tuning: Option<VehicleTuning>,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            throttle: 0.0,
            steering: 0.0,
            handbrake: false,
            forward_speed: 0.0,
            gear: 0,
            rpm: 0.0,
            max_rpm: 5700.0,
            up: Vec3::UP,
            tuning: None,
        }
    }
}

pub struct MockMovement(pub Shared<MovementState>);

impl VehicleMovement for MockMovement {
    fn apply_tuning(&mut self, tuning: &VehicleTuning) {
        self.0.lock().tuning = Some(tuning.clone());
    }

    fn set_throttle_input(&mut self, throttle: f32) {
        self.0.lock().throttle = throttle;
    }

    fn set_steering_input(&mut self, steering: f32) {
        self.0.lock().steering = steering;
    }

    fn set_handbrake_input(&mut self, engaged: bool) {
        self.0.lock().handbrake = engaged;
    }

    fn forward_speed(&self) -> f32 {
        self.0.lock().forward_speed
    }

    fn current_gear(&self) -> i32 {
        self.0.lock().gear
    }

    fn engine_rotation_speed(&self) -> f32 {
        self.0.lock().rpm
    }

    fn engine_max_rotation_speed(&self) -> f32 {
        self.0.lock().max_rpm
    }

    fn up_vector(&self) -> Vec3 {
        self.0.lock().up
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextLog {
    pub text: String,
    pub visible: Option<bool>,
    pub color: Option<Color>,
    pub text_sets: usize,
    pub visibility_sets: usize,
}

pub struct MockText(pub Shared<TextLog>);

impl TextRender for MockText {
    fn set_text(&mut self, text: &str) {
        let mut log = self.0.lock();
        log.text = text.to_string();
        log.text_sets += 1;
    }

    fn set_visibility(&mut self, visible: bool) {
        let mut log = self.0.lock();
        log.visible = Some(visible);
        log.visibility_sets += 1;
    }

    fn set_color(&mut self, color: Color) {
        self.0.lock().color = Some(color);
    }
}

#[derive(Debug, Clone, Default)]
pub struct AudioLog {
    pub plays: usize,
    pub params: Vec<(String, f32)>,
}

impl AudioLog {
    pub fn last(&self, name: &str) -> Option<f32> {
        self.params
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

pub struct MockAudio(pub Shared<AudioLog>);

impl EngineAudio for MockAudio {
    fn play(&mut self) {
        self.0.lock().plays += 1;
    }

    fn set_float_parameter(&mut self, name: &str, value: f32) {
        self.0.lock().params.push((name.to_string(), value));
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeshLog {
    pub overrides: Vec<String>,
}

pub struct MockMesh(pub Shared<MeshLog>);

impl MeshSurface for MockMesh {
    fn set_phys_material_override(&mut self, material: &PhysMaterial) {
        self.0.lock().overrides.push(material.name.clone());
    }
}

#[derive(Debug, Clone, Default)]
pub struct HmdLog {
    pub status: HmdStatus,
    pub resets: usize,
}

pub struct MockHmd(pub Shared<HmdLog>);

impl HeadMountedDisplay for MockHmd {
    fn status(&self) -> HmdStatus {
        self.0.lock().status
    }

    fn reset_orientation_and_position(&mut self) {
        self.0.lock().resets += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ControllerLog {
    pub rotation: Rotator,
    pub sets: usize,
}

pub struct MockController(pub Shared<ControllerLog>);

impl PlayerController for MockController {
    fn control_rotation(&self) -> Rotator {
        self.0.lock().rotation
    }

    fn set_control_rotation(&mut self, rotation: Rotator) {
        let mut log = self.0.lock();
        log.rotation = rotation;
        log.sets += 1;
    }
}

/// Handles onto every mock wired into a pawn.
#[derive(Clone, Default)]
pub struct Probe {
    pub movement: Shared<MovementState>,
    pub speed_text: Shared<TextLog>,
    pub gear_text: Shared<TextLog>,
    pub audio: Shared<AudioLog>,
    pub mesh: Shared<MeshLog>,
    pub hmd: Shared<HmdLog>,
    pub controller: Shared<ControllerLog>,
}

/// Options for [`spawn_pawn`].
#[derive(Debug, Clone, Default)]
pub struct SpawnOptions {
    /// Attach a headset with this status.
    pub hmd: Option<HmdStatus>,
    /// Possess with a controller.
    pub possessed: bool,
    /// Leave out the in-car text components.
    pub without_hud: bool,
    /// Call `setup_player_input`.
    pub with_input: bool,
}

impl SpawnOptions {
    /// Possessed, bound, full HUD, no headset.
    pub fn player() -> Self {
        Self {
            possessed: true,
            with_input: true,
            ..Self::default()
        }
    }
}

/// Builds a pawn around recording mocks. Does not call `begin_play`.
pub fn spawn_pawn(cfg: &PawnConfig, opts: &SpawnOptions) -> anyhow::Result<(VehiclePawn, Probe)> {
    let probe = Probe::default();

    let (speed, gear): (Option<Box<dyn TextRender>>, Option<Box<dyn TextRender>>) =
        if opts.without_hud {
            (None, None)
        } else {
            (
                Some(Box::new(MockText(probe.speed_text.clone()))),
                Some(Box::new(MockText(probe.gear_text.clone()))),
            )
        };

    let hmd = opts.hmd.map(|status| {
        probe.hmd.lock().status = status;
        Box::new(MockHmd(probe.hmd.clone())) as Box<dyn HeadMountedDisplay>
    });

    let parts = PawnCollaborators {
        movement: Box::new(MockMovement(probe.movement.clone())),
        mesh: Box::new(MockMesh(probe.mesh.clone())),
        engine_sound: Box::new(MockAudio(probe.audio.clone())),
        in_car_speed: speed,
        in_car_gear: gear,
        hmd,
    };
    let mut pawn = VehiclePawn::new(cfg, parts)?;

    if opts.possessed {
        pawn.possess(Box::new(MockController(probe.controller.clone())));
    }
    if opts.with_input {
        pawn.setup_player_input();
    }
    Ok((pawn, probe))
}

/// Installs a test log writer once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
