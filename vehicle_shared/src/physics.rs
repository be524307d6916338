//! Physics abstraction.
//!
//! The vehicle solver is external. The pawn talks to it through
//! [`VehicleMovement`] and swaps surface friction through [`MeshSurface`].
//! [`KinematicVehicle`] is a placeholder model for headless runs, not a
//! tire/suspension simulation.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    math::{Rotator, Vec3},
    tuning::VehicleTuning,
};

/// Vehicle movement collaborator.
pub trait VehicleMovement: Send + Sync {
    /// Pushes tuning constants into the solver. Called once at construction.
    fn apply_tuning(&mut self, tuning: &VehicleTuning);

    fn set_throttle_input(&mut self, throttle: f32);
    fn set_steering_input(&mut self, steering: f32);
    fn set_handbrake_input(&mut self, engaged: bool);

    /// Signed speed along the body's forward axis, cm/s.
    fn forward_speed(&self) -> f32;
    /// Negative is reverse, zero is neutral.
    fn current_gear(&self) -> i32;
    fn engine_rotation_speed(&self) -> f32;
    fn engine_max_rotation_speed(&self) -> f32;
    /// World-space up axis of the vehicle body.
    fn up_vector(&self) -> Vec3;

    /// Advances the solver. Hosts that step their own solver keep the no-op.
    fn step(&mut self, _dt_sec: f32) {}
}

/// Physical material handle applied as a surface override.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysMaterial {
    pub name: String,
}

impl PhysMaterial {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Mesh surface collaborator.
pub trait MeshSurface: Send + Sync {
    fn set_phys_material_override(&mut self, material: &PhysMaterial);
}

/// Mesh that remembers its current override.
#[derive(Debug, Default)]
pub struct VehicleMesh {
    material: Option<PhysMaterial>,
    swaps: u64,
}

impl VehicleMesh {
    pub fn material(&self) -> Option<&PhysMaterial> {
        self.material.as_ref()
    }

    /// Number of overrides applied so far.
    pub fn swaps(&self) -> u64 {
        self.swaps
    }
}

impl MeshSurface for VehicleMesh {
    fn set_phys_material_override(&mut self, material: &PhysMaterial) {
        self.material = Some(material.clone());
        self.swaps += 1;
    }
}

const IDLE_RPM: f32 = 900.0;
/// Peak acceleration at full throttle and peak torque, cm/s^2.
const PEAK_ACCEL: f32 = 900.0;
const REVERSE_ACCEL_SCALE: f32 = 0.5;
const ROLLING_DRAG: f32 = 0.25;
const HANDBRAKE_DECEL: f32 = 1800.0;
/// Yaw rate at full lock and a steering multiplier of 1, deg/s.
const MAX_YAW_RATE: f32 = 60.0;
/// Speed span covered by each forward gear, km/h.
const GEAR_BAND_KPH: f32 = 30.0;
const TOP_GEAR: i32 = 5;
/// Below this speed the box may drop to neutral or reverse, cm/s.
const CREEP_SPEED: f32 = 10.0;
const CMS_TO_KPH: f32 = 0.036;

/// Clamps an axis to [-1, 1]. Non-finite input reads as released.
fn axis_input(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Placeholder movement model: first-order speed response shaped by the
/// torque curve, speed-banded automatic gears, and yaw from the steering curve.
#[derive(Debug)]
pub struct KinematicVehicle {
    tuning: VehicleTuning,
    throttle: f32,
    steering: f32,
    handbrake: bool,
    speed: f32,
    gear: i32,
    rpm: f32,
    orientation: Rotator,
    shift_cooldown: f32,
}

impl Default for KinematicVehicle {
    fn default() -> Self {
        Self {
            tuning: VehicleTuning::default(),
            throttle: 0.0,
            steering: 0.0,
            handbrake: false,
            speed: 0.0,
            gear: 0,
            rpm: IDLE_RPM,
            orientation: Rotator::ZERO,
            shift_cooldown: 0.0,
        }
    }
}

impl KinematicVehicle {
    pub fn orientation(&self) -> Rotator {
        self.orientation
    }

    /// Places the body at an orientation, e.g. upside down after a crash.
    pub fn set_orientation(&mut self, orientation: Rotator) {
        self.orientation = orientation;
    }

    /// Forces speed (cm/s), gear and engine speed; for scripted scenarios.
    pub fn set_state(&mut self, forward_speed: f32, gear: i32, rpm: f32) {
        self.speed = forward_speed;
        self.gear = gear;
        self.rpm = rpm;
    }

    fn max_torque(&self) -> f32 {
        self.tuning.engine.torque_curve.max_value().max(f32::EPSILON)
    }

    fn select_gear(&self) -> i32 {
        if self.speed < -CREEP_SPEED || (self.speed.abs() <= CREEP_SPEED && self.throttle < 0.0) {
            return -1;
        }
        if self.speed.abs() <= CREEP_SPEED && self.throttle == 0.0 {
            return 0;
        }
        let kph = self.speed.abs() * CMS_TO_KPH;
        (1 + (kph / GEAR_BAND_KPH) as i32).min(TOP_GEAR)
    }

    fn update_rpm(&mut self) {
        let max_rpm = self.tuning.engine.max_rpm;
        let span = (max_rpm - IDLE_RPM).max(0.0);
        let band_pos = match self.gear {
            0 => self.throttle.abs(),
            g if g < 0 => (self.speed.abs() * CMS_TO_KPH / GEAR_BAND_KPH).min(1.0),
            g => {
                let kph = self.speed.abs() * CMS_TO_KPH;
                ((kph - GEAR_BAND_KPH * (g - 1) as f32) / GEAR_BAND_KPH).clamp(0.0, 1.0)
            }
        };
        self.rpm = IDLE_RPM + span * band_pos;
    }
}

impl VehicleMovement for KinematicVehicle {
    fn apply_tuning(&mut self, tuning: &VehicleTuning) {
        self.tuning = tuning.clone();
        self.rpm = IDLE_RPM.min(tuning.engine.max_rpm);
    }

    fn set_throttle_input(&mut self, throttle: f32) {
        self.throttle = axis_input(throttle);
    }

    fn set_steering_input(&mut self, steering: f32) {
        self.steering = axis_input(steering);
    }

    fn set_handbrake_input(&mut self, engaged: bool) {
        self.handbrake = engaged;
    }

    fn forward_speed(&self) -> f32 {
        self.speed
    }

    fn current_gear(&self) -> i32 {
        self.gear
    }

    fn engine_rotation_speed(&self) -> f32 {
        self.rpm
    }

    fn engine_max_rotation_speed(&self) -> f32 {
        self.tuning.engine.max_rpm
    }

    fn up_vector(&self) -> Vec3 {
        self.orientation.up_vector()
    }

    fn step(&mut self, dt_sec: f32) {
        if dt_sec <= 0.0 {
            return;
        }

        let torque_scale = self.tuning.engine.torque_curve.eval(self.rpm) / self.max_torque();
        let mut accel = self.throttle * torque_scale * PEAK_ACCEL;
        if self.throttle < 0.0 {
            accel *= REVERSE_ACCEL_SCALE;
        }
        accel -= self.speed * ROLLING_DRAG;
        self.speed += accel * dt_sec;

        if self.handbrake {
            let brake = HANDBRAKE_DECEL * dt_sec;
            self.speed = if self.speed.abs() <= brake {
                0.0
            } else {
                self.speed - brake * self.speed.signum()
            };
        }

        self.shift_cooldown = (self.shift_cooldown - dt_sec).max(0.0);
        let wanted = self.select_gear();
        let can_shift = !self.tuning.transmission.automatic
            || self.shift_cooldown == 0.0
            || wanted <= 0
            || self.gear <= 0;
        if wanted != self.gear && can_shift {
            trace!(from = self.gear, to = wanted, "gear change");
            self.gear = wanted;
            self.shift_cooldown =
                self.tuning.transmission.auto_box_latency + self.tuning.transmission.gear_switch_time;
        }
        self.update_rpm();

        let kph = self.speed * CMS_TO_KPH;
        if kph.abs() > 1.0 {
            let yaw_rate = self.steering * self.tuning.steering_curve.eval(kph.abs()) * MAX_YAW_RATE;
            self.orientation.yaw = (self.orientation.yaw + yaw_rate * dt_sec * kph.signum()) % 360.0;
        }
    }
}
