//! Vehicle tuning.
//!
//! Constants the pawn pushes into the movement collaborator at construction:
//! wheel setups, tire load, engine torque, steering, differential,
//! transmission and body inertia. Defaults are the buggy from the vehicle
//! template.

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::{curve::Curve, math::Vec3};

/// Number of wheels a 4W vehicle must declare.
pub const WHEEL_COUNT: usize = 4;

/// Wheel class, selecting the per-axle tire/suspension data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelClass {
    Front,
    Rear,
}

/// One wheel attached to a physics bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSetup {
    pub class: WheelClass,
    pub bone_name: String,
    #[serde(default)]
    pub additional_offset: Vec3,
}

impl WheelSetup {
    pub fn new(class: WheelClass, bone_name: &str, additional_offset: Vec3) -> Self {
        Self {
            class,
            bone_name: bone_name.to_string(),
            additional_offset,
        }
    }
}

/// Normalized tire load limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TireLoad {
    pub min: f32,
    pub min_filtered: f32,
    pub max: f32,
    pub max_filtered: f32,
}

impl Default for TireLoad {
    fn default() -> Self {
        Self {
            min: 0.0,
            min_filtered: 0.2,
            max: 2.0,
            max_filtered: 2.0,
        }
    }
}

/// Engine setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSetup {
    pub max_rpm: f32,
    /// Torque (Nm) keyed by RPM.
    pub torque_curve: Curve,
}

impl Default for EngineSetup {
    fn default() -> Self {
        Self {
            max_rpm: 5700.0,
            torque_curve: Curve::from_keys(&[(0.0, 400.0), (1890.0, 500.0), (5730.0, 400.0)]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferentialType {
    #[serde(rename = "limited_slip_4w")]
    LimitedSlip4W,
    LimitedSlipFrontDrive,
    LimitedSlipRearDrive,
    #[serde(rename = "open_4w")]
    Open4W,
    OpenFrontDrive,
    OpenRearDrive,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifferentialSetup {
    pub kind: DifferentialType,
    /// Share of drive torque sent to the front axle.
    pub front_rear_split: f32,
}

impl Default for DifferentialSetup {
    fn default() -> Self {
        Self {
            kind: DifferentialType::LimitedSlip4W,
            front_rear_split: 0.65,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransmissionSetup {
    pub automatic: bool,
    /// Seconds spent switching gears.
    pub gear_switch_time: f32,
    /// Minimum seconds between automatic shifts.
    pub auto_box_latency: f32,
}

impl Default for TransmissionSetup {
    fn default() -> Self {
        Self {
            automatic: true,
            gear_switch_time: 0.15,
            auto_box_latency: 1.0,
        }
    }
}

/// Full tuning for a 4-wheel vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    pub wheels: Vec<WheelSetup>,
    pub tire_load: TireLoad,
    pub engine: EngineSetup,
    /// Steering multiplier keyed by forward speed (km/h).
    pub steering_curve: Curve,
    pub differential: DifferentialSetup,
    pub transmission: TransmissionSetup,
    /// Offset applied to the body's centre of mass. The buggy sits low.
    pub com_nudge: Vec3,
    /// Distribution of mass around the body axes.
    pub inertia_tensor_scale: Vec3,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            wheels: vec![
                WheelSetup::new(WheelClass::Front, "PhysWheel_FL", Vec3::new(0.0, -8.0, 0.0)),
                WheelSetup::new(WheelClass::Front, "PhysWheel_FR", Vec3::new(0.0, 8.0, 0.0)),
                WheelSetup::new(WheelClass::Rear, "PhysWheel_BL", Vec3::new(0.0, -8.0, 0.0)),
                WheelSetup::new(WheelClass::Rear, "PhysWheel_BR", Vec3::new(0.0, 8.0, 0.0)),
            ],
            tire_load: TireLoad::default(),
            engine: EngineSetup::default(),
            steering_curve: Curve::from_keys(&[(0.0, 1.0), (40.0, 0.7), (120.0, 0.6)]),
            differential: DifferentialSetup::default(),
            transmission: TransmissionSetup::default(),
            com_nudge: Vec3::new(8.0, 0.0, 0.0),
            inertia_tensor_scale: Vec3::new(1.0, 1.333, 1.2),
        }
    }
}

impl VehicleTuning {
    /// Rejects tuning the movement collaborator cannot accept.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.wheels.len() != WHEEL_COUNT {
            bail!(
                "expected {} wheel setups, got {}",
                WHEEL_COUNT,
                self.wheels.len()
            );
        }
        if let Some(w) = self.wheels.iter().find(|w| w.bone_name.is_empty()) {
            bail!("{:?} wheel has an empty bone name", w.class);
        }
        if self.engine.max_rpm.is_nan() || self.engine.max_rpm <= 0.0 {
            bail!("engine max_rpm must be positive, got {}", self.engine.max_rpm);
        }
        self.engine.torque_curve.validate("torque")?;
        self.steering_curve.validate("steering")?;
        if !(0.0..=1.0).contains(&self.differential.front_rear_split) {
            bail!(
                "front_rear_split must be within [0, 1], got {}",
                self.differential.front_rear_split
            );
        }
        let tl = &self.tire_load;
        if tl.min > tl.max || tl.min_filtered > tl.max_filtered {
            bail!("tire load minimum exceeds maximum");
        }
        if self.transmission.gear_switch_time < 0.0 || self.transmission.auto_box_latency < 0.0 {
            bail!("transmission timings must be non-negative");
        }
        Ok(())
    }
}
