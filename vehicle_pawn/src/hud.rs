//! In-car HUD.
//!
//! Speed and gear readouts rendered as world-space text inside the cockpit.

use tracing::trace;
use vehicle_shared::{math::Color, render::TextRender, text::TextTable};

/// Localization namespace for every HUD string.
pub const TEXT_NAMESPACE: &str = "VehiclePawn";

/// Strings shown on the in-car readouts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayStrings {
    pub speed: String,
    pub gear: String,
}

/// Whole km/h shown for a forward speed in cm/s.
pub fn speed_kph(forward_speed: f32, unit_scale: f32) -> i64 {
    (forward_speed.abs() * unit_scale).floor() as i64
}

impl DisplayStrings {
    pub fn derive(
        forward_speed: f32,
        gear: i32,
        in_reverse: bool,
        unit_scale: f32,
        text: &TextTable,
    ) -> Self {
        let kph = text.as_number(speed_kph(forward_speed, unit_scale));
        let speed = text.format(TEXT_NAMESPACE, "SpeedFormat", "{0} km/h", &[kph]);

        let gear = if in_reverse {
            text.get(TEXT_NAMESPACE, "ReverseGear", "R").to_string()
        } else if gear == 0 {
            text.get(TEXT_NAMESPACE, "N", "N").to_string()
        } else {
            text.as_number(i64::from(gear))
        };

        Self { speed, gear }
    }
}

/// The pair of in-car text components. Either may be missing.
pub struct InCarHud {
    speed: Option<Box<dyn TextRender>>,
    gear: Option<Box<dyn TextRender>>,
    gear_color: Color,
    gear_reverse_color: Color,
}

impl InCarHud {
    pub fn new(
        speed: Option<Box<dyn TextRender>>,
        gear: Option<Box<dyn TextRender>>,
        gear_color: Color,
        gear_reverse_color: Color,
    ) -> Self {
        Self {
            speed,
            gear,
            gear_color,
            gear_reverse_color,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.speed.is_some() && self.gear.is_some()
    }

    pub fn set_visibility(&mut self, visible: bool) {
        for text in [self.speed.as_mut(), self.gear.as_mut()].into_iter().flatten() {
            text.set_visibility(visible);
        }
    }

    /// Pushes both strings and the gear colour. Does nothing when a
    /// component is missing.
    pub fn push(&mut self, strings: &DisplayStrings, in_reverse: bool) {
        let (Some(speed), Some(gear)) = (self.speed.as_mut(), self.gear.as_mut()) else {
            trace!("in-car HUD incomplete, skipping");
            return;
        };
        speed.set_text(&strings.speed);
        gear.set_text(&strings.gear);
        gear.set_color(if in_reverse {
            self.gear_reverse_color
        } else {
            self.gear_color
        });
    }
}
