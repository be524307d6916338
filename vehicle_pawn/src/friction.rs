//! Surface friction swap for an overturned vehicle.
//!
//! While the body's up axis points below the horizon the low-friction flag
//! flips and the matching material override is applied, letting a stuck
//! vehicle slide back onto its wheels.

use tracing::debug;
use vehicle_shared::{
    config::{FrictionConfig, FrictionPolicy},
    math::Vec3,
    physics::PhysMaterial,
};

#[derive(Debug, Clone)]
pub struct FrictionState {
    low_friction: bool,
    was_inverted: bool,
    policy: FrictionPolicy,
    slippery: PhysMaterial,
    non_slippery: PhysMaterial,
}

impl FrictionState {
    pub fn new(cfg: &FrictionConfig) -> Self {
        Self {
            low_friction: false,
            was_inverted: false,
            policy: cfg.policy,
            slippery: PhysMaterial::new(cfg.slippery.clone()),
            non_slippery: PhysMaterial::new(cfg.non_slippery.clone()),
        }
    }

    pub fn is_low_friction(&self) -> bool {
        self.low_friction
    }

    /// Evaluates one tick. Returns the material to apply when the flag flipped.
    pub fn update(&mut self, up: Vec3) -> Option<&PhysMaterial> {
        let inverted = up.z < 0.0;
        let entering = inverted && !self.was_inverted;
        self.was_inverted = inverted;

        let flip = match self.policy {
            FrictionPolicy::EveryTick => inverted,
            FrictionPolicy::OnEnterInverted => entering,
        };
        if !flip {
            return None;
        }

        self.low_friction = !self.low_friction;
        let material = if self.low_friction {
            &self.slippery
        } else {
            &self.non_slippery
        };
        debug!(low_friction = self.low_friction, material = %material.name, "friction swapped");
        Some(material)
    }
}
