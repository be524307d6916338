//! Input handling.
//!
//! Raw input arrives once per frame as an [`InputFrame`] of named axis values
//! and named action edges. The [`InputComponent`] holds the pawn's bindings and
//! turns a frame into [`PawnCommand`]s. Axes without a handler are still
//! sampled so the tick can poll them (look input).

use std::collections::HashMap;

pub const MOVE_FORWARD: &str = "MoveForward";
pub const MOVE_RIGHT: &str = "MoveRight";
pub const LOOK_UP: &str = "LookUp";
pub const LOOK_RIGHT: &str = "LookRight";
pub const HANDBRAKE: &str = "Handbrake";
pub const SWITCH_CAMERA: &str = "SwitchCamera";
pub const RESET_VR: &str = "ResetVR";

/// Edge of a digital action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Pressed,
    Released,
}

/// Continuous pawn inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisHandler {
    Throttle,
    Steering,
}

/// Edge-triggered pawn inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionHandler {
    HandbrakePressed,
    HandbrakeReleased,
    ToggleCamera,
    ResetVr,
}

/// A bound input resolved for dispatch to the pawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PawnCommand {
    Axis(AxisHandler, f32),
    Action(ActionHandler),
}

#[derive(Debug, Clone)]
struct AxisBinding {
    name: String,
    handler: Option<AxisHandler>,
}

#[derive(Debug, Clone)]
struct ActionBinding {
    name: String,
    event: InputEvent,
    handler: ActionHandler,
}

/// Raw input sampled for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub axes: Vec<(String, f32)>,
    pub actions: Vec<(String, InputEvent)>,
}

impl InputFrame {
    pub fn axis(mut self, name: &str, value: f32) -> Self {
        self.axes.push((name.to_string(), value));
        self
    }

    pub fn press(mut self, name: &str) -> Self {
        self.actions.push((name.to_string(), InputEvent::Pressed));
        self
    }

    pub fn release(mut self, name: &str) -> Self {
        self.actions.push((name.to_string(), InputEvent::Released));
        self
    }

    fn axis_value(&self, name: &str) -> f32 {
        self.axes
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }
}

/// Binding table plus the latest sampled axis values.
#[derive(Debug, Default)]
pub struct InputComponent {
    axes: Vec<AxisBinding>,
    actions: Vec<ActionBinding>,
    axis_values: HashMap<String, f32>,
}

impl InputComponent {
    /// Binds an axis; `None` only samples it for polling.
    pub fn bind_axis(&mut self, name: &str, handler: Option<AxisHandler>) {
        self.axes.push(AxisBinding {
            name: name.to_string(),
            handler,
        });
        self.axis_values.entry(name.to_string()).or_insert(0.0);
    }

    pub fn bind_action(&mut self, name: &str, event: InputEvent, handler: ActionHandler) {
        self.actions.push(ActionBinding {
            name: name.to_string(),
            event,
            handler,
        });
    }

    /// Last sampled value of a bound axis, zero when unbound.
    pub fn axis_value(&self, name: &str) -> f32 {
        self.axis_values.get(name).copied().unwrap_or(0.0)
    }

    /// Samples a frame and returns commands in dispatch order: action edges in
    /// the order they arrived, then every handled axis in binding order.
    /// Axes missing from the frame read as zero.
    pub fn process(&mut self, frame: &InputFrame) -> Vec<PawnCommand> {
        let mut out = Vec::new();

        for (name, event) in &frame.actions {
            out.extend(
                self.actions
                    .iter()
                    .filter(|b| &b.name == name && b.event == *event)
                    .map(|b| PawnCommand::Action(b.handler)),
            );
        }

        for binding in &self.axes {
            let value = frame.axis_value(&binding.name);
            self.axis_values.insert(binding.name.clone(), value);
            if let Some(handler) = binding.handler {
                out.push(PawnCommand::Axis(handler, value));
            }
        }

        out
    }
}
