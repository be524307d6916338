//! Head-mounted display abstraction.
//!
//! Tracking runs outside this crate and is polled once per frame.

use tracing::debug;

bitflags::bitflags! {
    /// Headset capabilities reported by the XR runtime.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct HmdStatus: u32 {
        const ENABLED = 1 << 0;        // Headset connected and rendering enabled
        const HEAD_TRACKING = 1 << 1;  // Head pose drives the view
        const STEREO = 1 << 2;         // Stereoscopic 3D output
    }
}

/// Head-mounted display collaborator.
pub trait HeadMountedDisplay: Send + Sync {
    fn status(&self) -> HmdStatus;

    /// Recentres tracking on the current head pose.
    fn reset_orientation_and_position(&mut self);

    fn is_present(&self) -> bool {
        self.status().contains(HmdStatus::ENABLED)
    }

    fn is_head_tracking_allowed(&self) -> bool {
        self.status().contains(HmdStatus::HEAD_TRACKING)
    }

    fn is_stereoscopic(&self) -> bool {
        self.status().contains(HmdStatus::STEREO)
    }

    /// True when the headset owns the view, so mouse-look must stay off.
    fn is_active(&self) -> bool {
        self.is_head_tracking_allowed() || self.is_stereoscopic()
    }
}

/// Headset stand-in with a fixed status.
#[derive(Debug, Default)]
pub struct SimulatedHmd {
    pub status: HmdStatus,
    resets: u32,
}

impl SimulatedHmd {
    pub fn new(status: HmdStatus) -> Self {
        Self { status, resets: 0 }
    }

    pub fn resets(&self) -> u32 {
        self.resets
    }
}

impl HeadMountedDisplay for SimulatedHmd {
    fn status(&self) -> HmdStatus {
        self.status
    }

    fn reset_orientation_and_position(&mut self) {
        self.resets += 1;
        debug!(resets = self.resets, "HMD orientation reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_requires_tracking_or_stereo() {
        let hmd = SimulatedHmd::new(HmdStatus::ENABLED);
        assert!(hmd.is_present());
        assert!(!hmd.is_active());

        let hmd = SimulatedHmd::new(HmdStatus::ENABLED | HmdStatus::STEREO);
        assert!(hmd.is_active());

        let hmd = SimulatedHmd::new(HmdStatus::HEAD_TRACKING);
        assert!(!hmd.is_present());
        assert!(hmd.is_active());
    }

    #[test]
    fn reset_is_counted() {
        let mut hmd = SimulatedHmd::default();
        hmd.reset_orientation_and_position();
        hmd.reset_orientation_and_position();
        assert_eq!(hmd.resets(), 2);
    }
}
