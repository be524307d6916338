//! Player controller abstraction.

use crate::math::Rotator;

/// The controller possessing a pawn.
pub trait PlayerController: Send + Sync {
    fn control_rotation(&self) -> Rotator;
    fn set_control_rotation(&mut self, rotation: Rotator);
}

/// Local player with no view smoothing.
#[derive(Debug, Default)]
pub struct LocalPlayerController {
    pub name: String,
    rotation: Rotator,
}

impl LocalPlayerController {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rotation: Rotator::ZERO,
        }
    }
}

impl PlayerController for LocalPlayerController {
    fn control_rotation(&self) -> Rotator {
        self.rotation
    }

    fn set_control_rotation(&mut self, rotation: Rotator) {
        self.rotation = rotation;
    }
}
