//! Configuration system.
//!
//! Loads pawn configuration from JSON strings/files. Every field is optional
//! and falls back to the vehicle template's constants.

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::{
    math::{Color, Rotator, Transform, Vec3},
    text::TextTable,
    tuning::VehicleTuning,
};

/// Root configuration for a vehicle pawn and its headless driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PawnConfig {
    /// Fixed simulation tick rate.
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,
    /// Forward speed (cm/s) to km/h.
    #[serde(default = "default_speed_unit_scale")]
    pub speed_unit_scale: f32,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub hud: HudConfig,
    #[serde(default)]
    pub camera: CameraRigConfig,
    #[serde(default)]
    pub friction: FrictionConfig,
    #[serde(default)]
    pub tuning: VehicleTuning,
}

fn default_tick_hz() -> u32 {
    64
}

fn default_speed_unit_scale() -> f32 {
    0.036
}

impl Default for PawnConfig {
    fn default() -> Self {
        Self {
            tick_hz: default_tick_hz(),
            speed_unit_scale: default_speed_unit_scale(),
            audio: AudioConfig::default(),
            hud: HudConfig::default(),
            camera: CameraRigConfig::default(),
            friction: FrictionConfig::default(),
            tuning: VehicleTuning::default(),
        }
    }
}

impl PawnConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg = Self::from_json_str(&raw)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tick_hz == 0 {
            bail!("tick_hz must be positive");
        }
        if !self.speed_unit_scale.is_finite() {
            bail!("speed_unit_scale must be finite");
        }
        if !self.audio.reference_rpm.is_finite() {
            bail!("audio.reference_rpm must be finite");
        }
        if self.audio.rpm_parameter.is_empty() {
            bail!("audio.rpm_parameter must not be empty");
        }
        self.tuning.validate().context("tuning")
    }
}

/// Engine sound settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Sound asset looped by the engine audio component.
    pub sound_cue: String,
    /// Float parameter receiving the scaled engine speed.
    pub rpm_parameter: String,
    /// Engine speed the sound cue was authored against at max RPM.
    pub reference_rpm: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sound_cue: "Engine_Loop_Cue".to_string(),
            rpm_parameter: "RPM".to_string(),
            reference_rpm: 2500.0,
        }
    }
}

/// In-car HUD text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub gear_color: Color,
    pub gear_reverse_color: Color,
    /// Placement of the speed readout relative to the mesh.
    pub speed_text: Transform,
    /// Placement of the gear readout relative to the mesh.
    pub gear_text: Transform,
    pub text: TextTable,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            gear_color: Color::WHITE,
            gear_reverse_color: Color::RED,
            speed_text: hud_text_at(Vec3::new(35.0, -6.0, 20.0)),
            gear_text: hud_text_at(Vec3::new(35.0, 5.0, 20.0)),
            text: TextTable::default(),
        }
    }
}

fn hud_text_at(location: Vec3) -> Transform {
    Transform {
        location,
        rotation: Rotator::new(0.0, 180.0, 0.0),
        scale: Vec3::splat(0.1),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringArmConfig {
    pub location: Vec3,
    pub world_rotation: Rotator,
    pub target_arm_length: f32,
    pub enable_camera_lag: bool,
    pub enable_camera_rotation_lag: bool,
    pub inherit_pitch: bool,
    pub inherit_yaw: bool,
    pub inherit_roll: bool,
}

impl Default for SpringArmConfig {
    fn default() -> Self {
        Self {
            location: Vec3::new(0.0, 0.0, 34.0),
            world_rotation: Rotator::new(-20.0, 0.0, 0.0),
            target_arm_length: 125.0,
            enable_camera_lag: false,
            enable_camera_rotation_lag: false,
            inherit_pitch: true,
            inherit_yaw: true,
            inherit_roll: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub relative: Transform,
    pub field_of_view: f32,
    pub use_pawn_control_rotation: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            relative: Transform::default(),
            field_of_view: 90.0,
            use_pawn_control_rotation: false,
        }
    }
}

/// Chase and in-car camera placement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRigConfig {
    pub spring_arm: SpringArmConfig,
    /// Chase camera, relative to the end of the spring arm.
    pub chase: CameraConfig,
    /// Cockpit eye position relative to the mesh. Reset-VR returns here.
    pub in_car_origin: Vec3,
    pub in_car: CameraConfig,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            spring_arm: SpringArmConfig::default(),
            chase: CameraConfig {
                relative: Transform::at(Vec3::new(-125.0, 0.0, 0.0), Rotator::new(10.0, 0.0, 0.0)),
                ..CameraConfig::default()
            },
            in_car_origin: Vec3::new(-34.0, -10.0, 50.0),
            in_car: CameraConfig::default(),
        }
    }
}

/// When the low-friction flag flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionPolicy {
    /// Flip on every tick the body is upside down.
    #[default]
    EveryTick,
    /// Flip once when the body turns upside down.
    OnEnterInverted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrictionConfig {
    pub slippery: String,
    pub non_slippery: String,
    pub policy: FrictionPolicy,
}

impl Default for FrictionConfig {
    fn default() -> Self {
        Self {
            slippery: "Slippery".to_string(),
            non_slippery: "NonSlippery".to_string(),
            policy: FrictionPolicy::EveryTick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_template_defaults() {
        let cfg = PawnConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg.tick_hz, 64);
        assert_eq!(cfg.speed_unit_scale, 0.036);
        assert_eq!(cfg.audio.rpm_parameter, "RPM");
        assert_eq!(cfg.audio.reference_rpm, 2500.0);
        assert_eq!(cfg.camera.in_car_origin, Vec3::new(-34.0, -10.0, 50.0));
        assert_eq!(cfg.friction.policy, FrictionPolicy::EveryTick);
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let cfg = PawnConfig::from_json_str(
            r#"{
                "tick_hz": 30,
                "audio": { "reference_rpm": 3000.0 },
                "friction": { "policy": "on_enter_inverted" },
                "hud": { "gear_color": { "r": 0, "g": 255, "b": 0, "a": 255 } }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.tick_hz, 30);
        assert_eq!(cfg.audio.reference_rpm, 3000.0);
        assert_eq!(cfg.audio.rpm_parameter, "RPM");
        assert_eq!(cfg.friction.policy, FrictionPolicy::OnEnterInverted);
        assert_eq!(cfg.friction.slippery, "Slippery");
        assert_eq!(cfg.hud.gear_color, Color::rgba(0, 255, 0, 255));
        assert_eq!(cfg.hud.gear_reverse_color, Color::RED);
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let cfg = PawnConfig {
            tick_hz: 0,
            ..PawnConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_reads_and_validates_file() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!("pawn_cfg_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "tuning": { "wheels": [] } }"#)?;
        let err = PawnConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("expected 4 wheel setups"));

        std::fs::write(&path, r#"{ "tick_hz": 120 }"#)?;
        let cfg = PawnConfig::load(&path)?;
        assert_eq!(cfg.tick_hz, 120);

        std::fs::remove_file(&path)?;
        assert!(PawnConfig::load(&path).is_err());
        Ok(())
    }
}
