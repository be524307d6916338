//! `vehicle_shared`
//!
//! Shared libraries for the vehicle pawn and its hosts.
//!
//! Design goals:
//! - Deterministic and modular where practical.
//! - Every engine subsystem the pawn touches (movement, mesh, text, audio,
//!   headset, controller) is a trait so hosts and tests can inject it.
//! - No `unsafe`.

pub mod audio;
pub mod config;
pub mod controller;
pub mod curve;
pub mod math;
pub mod physics;
pub mod render;
pub mod text;
pub mod tuning;
pub mod xr;
