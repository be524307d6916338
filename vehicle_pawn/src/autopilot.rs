//! Scripted input for headless runs.
//!
//! Replays a fixed lap: accelerate with a gentle weave, pull the handbrake,
//! back up, coast. The camera flips on a fixed period and look input gets a
//! little seeded jitter so the in-car view moves.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::input::{
    InputFrame, HANDBRAKE, LOOK_RIGHT, LOOK_UP, MOVE_FORWARD, MOVE_RIGHT, SWITCH_CAMERA,
};

/// Lap phases in seconds from the start of each lap.
const DRIVE_END: f32 = 7.0;
const BRAKE_END: f32 = 8.0;
const REVERSE_END: f32 = 11.0;
const LAP_SECS: f32 = 12.0;

/// Weave period, seconds.
const WEAVE_SECS: f32 = 4.0;
const LOOK_JITTER: f32 = 0.5;

pub struct Autopilot {
    rng: StdRng,
    tick_hz: u32,
    tick: u64,
    /// Ticks between camera toggles; zero disables toggling.
    toggle_every: u64,
    handbrake_held: bool,
}

impl Autopilot {
    pub fn new(seed: u64, tick_hz: u32, toggle_every: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            tick_hz: tick_hz.max(1),
            tick: 0,
            toggle_every,
            handbrake_held: false,
        }
    }

    /// Produces the input frame for the next tick.
    pub fn next_frame(&mut self) -> InputFrame {
        let t = self.tick as f32 / self.tick_hz as f32;
        let lap_t = t % LAP_SECS;
        self.tick += 1;

        let throttle = if lap_t < DRIVE_END {
            1.0
        } else if (BRAKE_END..REVERSE_END).contains(&lap_t) {
            -1.0
        } else {
            0.0
        };
        let steering = if lap_t < DRIVE_END {
            (t * std::f32::consts::TAU / WEAVE_SECS).sin() * 0.4
        } else {
            0.0
        };

        let mut frame = InputFrame::default()
            .axis(MOVE_FORWARD, throttle)
            .axis(MOVE_RIGHT, steering)
            .axis(LOOK_UP, self.rng.gen_range(-LOOK_JITTER..LOOK_JITTER))
            .axis(LOOK_RIGHT, self.rng.gen_range(-LOOK_JITTER..LOOK_JITTER));

        let want_handbrake = (DRIVE_END..BRAKE_END).contains(&lap_t);
        if want_handbrake != self.handbrake_held {
            self.handbrake_held = want_handbrake;
            frame = if want_handbrake {
                frame.press(HANDBRAKE)
            } else {
                frame.release(HANDBRAKE)
            };
        }

        if self.toggle_every > 0 && self.tick % self.toggle_every == 0 {
            frame = frame.press(SWITCH_CAMERA);
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;

    fn axis(frame: &InputFrame, name: &str) -> f32 {
        frame
            .axes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .unwrap()
    }

    #[test]
    fn same_seed_same_frames() {
        let mut a = Autopilot::new(7, 64, 0);
        let mut b = Autopilot::new(7, 64, 0);
        for _ in 0..100 {
            assert_eq!(a.next_frame(), b.next_frame());
        }
    }

    #[test]
    fn lap_drives_brakes_and_reverses() {
        let mut ap = Autopilot::new(1, 10, 0);
        let frames: Vec<InputFrame> = (0..120).map(|_| ap.next_frame()).collect();

        assert_eq!(axis(&frames[0], MOVE_FORWARD), 1.0);
        assert_eq!(axis(&frames[90], MOVE_FORWARD), -1.0);
        assert_eq!(axis(&frames[115], MOVE_FORWARD), 0.0);

        let edges: Vec<(usize, InputEvent)> = frames
            .iter()
            .enumerate()
            .flat_map(|(i, f)| {
                f.actions
                    .iter()
                    .filter(|(n, _)| n == HANDBRAKE)
                    .map(move |(_, e)| (i, *e))
            })
            .collect();
        assert_eq!(edges, vec![(70, InputEvent::Pressed), (80, InputEvent::Released)]);
    }

    #[test]
    fn camera_toggle_fires_on_period() {
        let mut ap = Autopilot::new(1, 64, 5);
        let toggles = (0..20)
            .filter(|_| {
                ap.next_frame()
                    .actions
                    .iter()
                    .any(|(n, _)| n == SWITCH_CAMERA)
            })
            .count();
        assert_eq!(toggles, 4);
    }
}
