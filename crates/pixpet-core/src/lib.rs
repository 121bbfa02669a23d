//! Core plumbing shared by the pixpet crates.
//!
//! Provides the event bus driven by the main loop, the fixed-size sprite
//! grid handed to the renderer, the tick-rate counter, and the logging
//! subsystem.

pub mod bus;
pub mod event;
pub mod fps;
pub mod grid;
pub mod logging;
pub mod state;
