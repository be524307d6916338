//! `vehicle_pawn`
//!
//! Player-controlled vehicle:
//! - Input bindings and per-frame command dispatch
//! - Chase / in-car camera mode control
//! - In-car speed and gear readouts
//! - Friction swap when overturned
//! - Engine sound parameter feed
//! - Console commands and a scripted autopilot for headless runs

pub mod autopilot;
pub mod camera;
pub mod console;
pub mod friction;
pub mod hud;
pub mod input;
pub mod pawn;

pub use pawn::{PawnCollaborators, VehiclePawn};
