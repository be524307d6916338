//! Vehicle pawn.
//!
//! Glue between player input, the external vehicle solver, and the
//! presentation collaborators (cameras, in-car text, engine audio, headset).
//!
//! Lifecycle:
//! 1. [`VehiclePawn::new`] validates and applies tuning, builds the camera rig.
//! 2. [`VehiclePawn::possess`] / [`VehiclePawn::setup_player_input`] attach a
//!    controller and bindings.
//! 3. [`VehiclePawn::begin_play`] picks the initial camera and starts audio.
//! 4. [`VehiclePawn::tick`] once per frame.
//!
//! Missing optional collaborators never fail a frame; the step that needs
//! them is skipped.

use anyhow::Context;
use tracing::{debug, info, trace};
use vehicle_shared::{
    audio::{AudioComponent, EngineAudio},
    config::{AudioConfig, PawnConfig},
    controller::PlayerController,
    math::Rotator,
    physics::{KinematicVehicle, MeshSurface, VehicleMesh, VehicleMovement},
    render::{TextRender, TextRenderComponent},
    text::TextTable,
    xr::HeadMountedDisplay,
};

use crate::{
    camera::{CameraMode, CameraRig},
    friction::FrictionState,
    hud::{DisplayStrings, InCarHud},
    input::{
        ActionHandler, AxisHandler, InputComponent, InputEvent, InputFrame, PawnCommand,
        HANDBRAKE, LOOK_RIGHT, LOOK_UP, MOVE_FORWARD, MOVE_RIGHT, RESET_VR, SWITCH_CAMERA,
    },
};

/// Everything the pawn talks to but does not implement.
pub struct PawnCollaborators {
    pub movement: Box<dyn VehicleMovement>,
    pub mesh: Box<dyn MeshSurface>,
    pub engine_sound: Box<dyn EngineAudio>,
    pub in_car_speed: Option<Box<dyn TextRender>>,
    pub in_car_gear: Option<Box<dyn TextRender>>,
    pub hmd: Option<Box<dyn HeadMountedDisplay>>,
}

impl PawnCollaborators {
    /// In-memory collaborators for running without an engine.
    pub fn headless(cfg: &PawnConfig) -> Self {
        Self {
            movement: Box::new(KinematicVehicle::default()),
            mesh: Box::new(VehicleMesh::default()),
            engine_sound: Box::new(AudioComponent::new(cfg.audio.sound_cue.clone())),
            in_car_speed: Some(Box::new(TextRenderComponent::new(
                "IncarSpeed",
                cfg.hud.speed_text,
            ))),
            in_car_gear: Some(Box::new(TextRenderComponent::new(
                "IncarGear",
                cfg.hud.gear_text,
            ))),
            hmd: None,
        }
    }

    pub fn with_hmd(mut self, hmd: Box<dyn HeadMountedDisplay>) -> Self {
        self.hmd = Some(hmd);
        self
    }
}

pub struct VehiclePawn {
    movement: Box<dyn VehicleMovement>,
    mesh: Box<dyn MeshSurface>,
    engine_sound: Box<dyn EngineAudio>,
    hud: InCarHud,
    hmd: Option<Box<dyn HeadMountedDisplay>>,
    controller: Option<Box<dyn PlayerController>>,
    input: Option<InputComponent>,

    camera: CameraRig,
    friction: FrictionState,
    text: TextTable,
    audio: AudioConfig,
    speed_unit_scale: f32,

    display: DisplayStrings,
    in_reverse_gear: bool,
    frame: u64,
}

impl VehiclePawn {
    /// Validates the tuning and pushes it into the movement collaborator.
    pub fn new(cfg: &PawnConfig, parts: PawnCollaborators) -> anyhow::Result<Self> {
        cfg.tuning.validate().context("vehicle tuning")?;

        let PawnCollaborators {
            mut movement,
            mesh,
            engine_sound,
            in_car_speed,
            in_car_gear,
            hmd,
        } = parts;
        movement.apply_tuning(&cfg.tuning);

        debug!(
            wheels = cfg.tuning.wheels.len(),
            max_rpm = cfg.tuning.engine.max_rpm,
            "vehicle tuning applied"
        );

        Ok(Self {
            movement,
            mesh,
            engine_sound,
            hud: InCarHud::new(
                in_car_speed,
                in_car_gear,
                cfg.hud.gear_color,
                cfg.hud.gear_reverse_color,
            ),
            hmd,
            controller: None,
            input: None,
            camera: CameraRig::new(&cfg.camera),
            friction: FrictionState::new(&cfg.friction),
            text: cfg.hud.text.clone(),
            audio: cfg.audio.clone(),
            speed_unit_scale: cfg.speed_unit_scale,
            display: DisplayStrings::default(),
            in_reverse_gear: false,
            frame: 0,
        })
    }

    pub fn possess(&mut self, controller: Box<dyn PlayerController>) {
        self.controller = Some(controller);
    }

    pub fn unpossess(&mut self) -> Option<Box<dyn PlayerController>> {
        self.input = None;
        self.controller.take()
    }

    /// Creates the input component and binds the pawn's axes and actions.
    pub fn setup_player_input(&mut self) {
        let mut input = InputComponent::default();
        input.bind_axis(MOVE_FORWARD, Some(AxisHandler::Throttle));
        input.bind_axis(MOVE_RIGHT, Some(AxisHandler::Steering));
        input.bind_axis(LOOK_UP, None);
        input.bind_axis(LOOK_RIGHT, None);

        input.bind_action(HANDBRAKE, InputEvent::Pressed, ActionHandler::HandbrakePressed);
        input.bind_action(HANDBRAKE, InputEvent::Released, ActionHandler::HandbrakeReleased);
        input.bind_action(SWITCH_CAMERA, InputEvent::Pressed, ActionHandler::ToggleCamera);
        input.bind_action(RESET_VR, InputEvent::Pressed, ActionHandler::ResetVr);

        self.input = Some(input);
    }

    /// Samples a frame of raw input and dispatches bound commands.
    pub fn handle_input(&mut self, frame: &InputFrame) {
        let Some(input) = self.input.as_mut() else {
            trace!("no input component, dropping input frame");
            return;
        };
        for cmd in input.process(frame) {
            self.dispatch(cmd);
        }
    }

    pub fn dispatch(&mut self, cmd: PawnCommand) {
        match cmd {
            PawnCommand::Axis(AxisHandler::Throttle, v) => self.move_forward(v),
            PawnCommand::Axis(AxisHandler::Steering, v) => self.move_right(v),
            PawnCommand::Action(ActionHandler::HandbrakePressed) => self.on_handbrake_pressed(),
            PawnCommand::Action(ActionHandler::HandbrakeReleased) => self.on_handbrake_released(),
            PawnCommand::Action(ActionHandler::ToggleCamera) => self.on_toggle_camera(),
            PawnCommand::Action(ActionHandler::ResetVr) => self.on_reset_vr(),
        }
    }

    pub fn move_forward(&mut self, value: f32) {
        self.movement.set_throttle_input(value);
    }

    pub fn move_right(&mut self, value: f32) {
        self.movement.set_steering_input(value);
    }

    pub fn on_handbrake_pressed(&mut self) {
        self.movement.set_handbrake_input(true);
    }

    pub fn on_handbrake_released(&mut self) {
        self.movement.set_handbrake_input(false);
    }

    pub fn on_toggle_camera(&mut self) {
        self.enable_incar_view(self.camera.mode().toggled().is_in_car());
    }

    /// Switches between the in-car and chase views. No-op when already there.
    pub fn enable_incar_view(&mut self, in_car: bool) {
        let mode = if in_car {
            CameraMode::InCar
        } else {
            CameraMode::Chase
        };
        if mode == self.camera.mode() {
            return;
        }

        if in_car {
            self.on_reset_vr();
        }
        self.camera.set_mode(mode);
        self.hud.set_visibility(in_car);
    }

    /// Recentres the headset and the cockpit camera. Does nothing without a
    /// headset.
    pub fn on_reset_vr(&mut self) {
        let Some(hmd) = self.hmd.as_mut() else {
            return;
        };
        hmd.reset_orientation_and_position();
        self.camera.reset_in_car_location();
        if let Some(controller) = self.controller.as_mut() {
            controller.set_control_rotation(Rotator::ZERO);
        }
    }

    /// Hides the overlays, selects the starting view and starts the engine loop.
    pub fn begin_play(&mut self) {
        self.camera.reset_mode();
        self.hud.set_visibility(false);

        let want_in_car = self.hmd.as_ref().is_some_and(|h| h.is_present());
        self.enable_incar_view(want_in_car);

        self.engine_sound.play();
        info!(
            camera = ?self.camera.mode(),
            hmd = self.hmd.is_some(),
            possessed = self.controller.is_some(),
            "vehicle pawn began play"
        );
    }

    /// Runs one frame of the update pipeline.
    pub fn tick(&mut self, delta_sec: f32) {
        self.frame += 1;
        trace!(frame = self.frame, delta_sec, "pawn tick");

        self.in_reverse_gear = self.movement.current_gear() < 0;
        self.update_physics_material();
        self.update_hud_strings();
        self.setup_in_car_hud();
        self.apply_look_input();
        self.update_engine_sound();
    }

    fn update_physics_material(&mut self) {
        if let Some(material) = self.friction.update(self.movement.up_vector()) {
            self.mesh.set_phys_material_override(material);
        }
    }

    fn update_hud_strings(&mut self) {
        self.display = DisplayStrings::derive(
            self.movement.forward_speed(),
            self.movement.current_gear(),
            self.in_reverse_gear,
            self.speed_unit_scale,
            &self.text,
        );
    }

    fn setup_in_car_hud(&mut self) {
        if self.controller.is_none() {
            trace!("no player controller, skipping in-car HUD");
            return;
        }
        self.hud.push(&self.display, self.in_reverse_gear);
    }

    fn apply_look_input(&mut self) {
        let hmd_active = self.hmd.as_ref().is_some_and(|h| h.is_active());
        if hmd_active || !self.camera.mode().is_in_car() {
            return;
        }
        let Some(input) = self.input.as_ref() else {
            return;
        };
        let pitch = input.axis_value(LOOK_UP);
        let yaw = input.axis_value(LOOK_RIGHT);
        self.camera.add_head_rotation(pitch, yaw);
    }

    fn update_engine_sound(&mut self) {
        let max = self.movement.engine_max_rotation_speed();
        if !max.is_finite() || max <= 0.0 {
            trace!(max, "engine max rotation speed unusable, skipping audio");
            return;
        }
        let value = self.movement.engine_rotation_speed() * (self.audio.reference_rpm / max);
        self.engine_sound.set_float_parameter(&self.audio.rpm_parameter, value);
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera.mode()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn display_strings(&self) -> &DisplayStrings {
        &self.display
    }

    pub fn is_in_reverse_gear(&self) -> bool {
        self.in_reverse_gear
    }

    pub fn is_low_friction(&self) -> bool {
        self.friction.is_low_friction()
    }

    pub fn controller(&self) -> Option<&dyn PlayerController> {
        self.controller.as_deref()
    }

    pub fn movement(&self) -> &dyn VehicleMovement {
        self.movement.as_ref()
    }

    pub fn movement_mut(&mut self) -> &mut dyn VehicleMovement {
        self.movement.as_mut()
    }

    pub fn has_complete_hud(&self) -> bool {
        self.hud.is_complete()
    }

    /// Frames ticked since construction.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
