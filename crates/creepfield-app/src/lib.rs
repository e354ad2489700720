//! Headless CREEPFIELD driver.
//!
//! Wires the simulation to scripted input, a fixed-step loop and
//! log/JSON renderers. No windowing or browser dependency.

pub mod error;
pub mod game_loop;
pub mod logging;
pub mod render;
pub mod script;

pub use creepfield_core as core;
pub use error::AppError;
