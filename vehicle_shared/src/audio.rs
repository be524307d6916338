//! Audio abstraction.
//!
//! The mixer and DSP live outside this crate; the pawn starts a looping cue
//! and drives named float parameters on it.

use std::collections::HashMap;

use tracing::trace;

/// Audio component collaborator.
pub trait EngineAudio: Send + Sync {
    fn play(&mut self);
    fn set_float_parameter(&mut self, name: &str, value: f32);
}

/// Audio component that records what it was told, for headless runs.
#[derive(Debug, Default)]
pub struct AudioComponent {
    pub sound: String,
    playing: bool,
    params: HashMap<String, f32>,
}

impl AudioComponent {
    pub fn new(sound: impl Into<String>) -> Self {
        Self {
            sound: sound.into(),
            ..Self::default()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn float_parameter(&self, name: &str) -> Option<f32> {
        self.params.get(name).copied()
    }
}

impl EngineAudio for AudioComponent {
    fn play(&mut self) {
        trace!(sound = %self.sound, "play");
        self.playing = true;
    }

    fn set_float_parameter(&mut self, name: &str, value: f32) {
        match self.params.get_mut(name) {
            Some(v) => *v = value,
            None => {
                self.params.insert(name.to_string(), value);
            }
        }
    }
}
