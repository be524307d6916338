//! Math types.
//!
//! This module intentionally stays small and deterministic.
//! Units follow the vehicle template: centimetres, degrees, Z-up.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub const UP: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn len_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.len_sq().sqrt()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Euler rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Up axis of a body with this orientation.
    ///
    /// Rotation order is roll (X), then pitch (Y), then yaw (Z). Yaw never
    /// changes the vertical component.
    pub fn up_vector(self) -> Vec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sr, cr) = self.roll.to_radians().sin_cos();
        Vec3::new(
            -(cr * sp * cy + sr * sy),
            cy * sr - cr * sp * sy,
            cr * cp,
        )
    }
}

impl Add for Rotator {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.pitch + rhs.pitch, self.yaw + rhs.yaw, self.roll + rhs.roll)
    }
}

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const RED: Self = Self::rgba(255, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Relative placement of a scene component under its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default)]
    pub location: Vec3,
    #[serde(default)]
    pub rotation: Rotator,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation: Rotator::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub const fn at(location: Vec3, rotation: Rotator) -> Self {
        Self {
            location,
            rotation,
            scale: Vec3::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn upright_body_points_up() {
        let up = Rotator::ZERO.up_vector();
        assert!(close(up.x, 0.0) && close(up.y, 0.0) && close(up.z, 1.0));
    }

    #[test]
    fn rolled_over_body_points_down() {
        assert!(Rotator::new(0.0, 0.0, 180.0).up_vector().z < 0.0);
        assert!(Rotator::new(0.0, 45.0, 120.0).up_vector().z < 0.0);
        assert!(Rotator::new(0.0, 90.0, 60.0).up_vector().z > 0.0);
    }

    #[test]
    fn yaw_keeps_up_vector_vertical() {
        let up = Rotator::new(0.0, 73.0, 0.0).up_vector();
        assert!(close(up.z, 1.0));
        assert!(close(up.length(), 1.0));
    }

    #[test]
    fn rotator_add_accumulates() {
        let r = Rotator::new(1.0, 2.0, 0.0) + Rotator::new(0.5, -1.0, 0.0);
        assert_eq!(r, Rotator::new(1.5, 1.0, 0.0));
    }
}
