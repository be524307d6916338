//! Chase and in-car camera rig.
//!
//! The rig owns both cameras and the two-state mode machine. Exactly one
//! camera is active at a time and it always matches [`CameraRig::mode`].

use tracing::debug;
use vehicle_shared::{
    config::{CameraConfig, CameraRigConfig, SpringArmConfig},
    math::{Rotator, Transform, Vec3},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Third-person view trailing on the spring arm.
    #[default]
    Chase,
    /// Cockpit view.
    InCar,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Chase => CameraMode::InCar,
            CameraMode::InCar => CameraMode::Chase,
        }
    }

    pub fn is_in_car(self) -> bool {
        self == CameraMode::InCar
    }
}

#[derive(Debug, Clone)]
pub struct CameraComponent {
    pub name: &'static str,
    pub relative: Transform,
    pub field_of_view: f32,
    pub use_pawn_control_rotation: bool,
    active: bool,
}

impl CameraComponent {
    fn new(name: &'static str, cfg: &CameraConfig, active: bool) -> Self {
        Self {
            name,
            relative: cfg.relative,
            field_of_view: cfg.field_of_view,
            use_pawn_control_rotation: cfg.use_pawn_control_rotation,
            active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self) {
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Boom holding the chase camera behind the vehicle.
#[derive(Debug, Clone, Copy)]
pub struct SpringArm {
    pub relative_location: Vec3,
    pub world_rotation: Rotator,
    pub target_arm_length: f32,
    pub enable_camera_lag: bool,
    pub enable_camera_rotation_lag: bool,
    pub inherit_pitch: bool,
    pub inherit_yaw: bool,
    pub inherit_roll: bool,
}

impl From<&SpringArmConfig> for SpringArm {
    fn from(cfg: &SpringArmConfig) -> Self {
        Self {
            relative_location: cfg.location,
            world_rotation: cfg.world_rotation,
            target_arm_length: cfg.target_arm_length,
            enable_camera_lag: cfg.enable_camera_lag,
            enable_camera_rotation_lag: cfg.enable_camera_rotation_lag,
            inherit_pitch: cfg.inherit_pitch,
            inherit_yaw: cfg.inherit_yaw,
            inherit_roll: cfg.inherit_roll,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    pub spring_arm: SpringArm,
    pub chase: CameraComponent,
    pub in_car: CameraComponent,
    in_car_origin: Vec3,
    mode: CameraMode,
}

impl CameraRig {
    pub fn new(cfg: &CameraRigConfig) -> Self {
        Self {
            spring_arm: SpringArm::from(&cfg.spring_arm),
            chase: CameraComponent::new("ChaseCamera", &cfg.chase, true),
            in_car: CameraComponent::new("InternalCamera", &cfg.in_car, false),
            in_car_origin: cfg.in_car_origin,
            mode: CameraMode::Chase,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn in_car_origin(&self) -> Vec3 {
        self.in_car_origin
    }

    pub fn active_camera(&self) -> &CameraComponent {
        match self.mode {
            CameraMode::Chase => &self.chase,
            CameraMode::InCar => &self.in_car,
        }
    }

    /// Switches cameras. Returns `false` without touching anything when the
    /// rig is already in `mode`.
    pub fn set_mode(&mut self, mode: CameraMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        match mode {
            CameraMode::InCar => {
                self.chase.deactivate();
                self.in_car.activate();
            }
            CameraMode::Chase => {
                self.in_car.deactivate();
                self.chase.activate();
            }
        }
        debug!(camera = self.active_camera().name, "camera switched");
        true
    }

    /// Forces the mode flag back to chase without a transition, as at spawn.
    pub fn reset_mode(&mut self) {
        self.mode = CameraMode::Chase;
        self.in_car.deactivate();
        self.chase.activate();
    }

    /// Adds look deltas (degrees) to the in-car camera's head rotation.
    pub fn add_head_rotation(&mut self, pitch: f32, yaw: f32) {
        self.in_car.relative.rotation =
            self.in_car.relative.rotation + Rotator::new(pitch, yaw, 0.0);
    }

    /// Puts the in-car camera back at the stored origin offset.
    pub fn reset_in_car_location(&mut self) {
        self.in_car.relative.location = self.in_car_origin;
    }
}
