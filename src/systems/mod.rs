//! Per-tick systems.
//!
//! Submodules overview
//! - [`audio`] – forward queued audio commands to the host
//! - [`input`] – drain the input queue
//! - [`orbit`] – step the orbit and move the host camera
//! - [`render`] – clear the screen and draw every sprite
//! - [`time`] – update tick count and elapsed time

pub mod audio;
pub mod input;
pub mod orbit;
pub mod render;
pub mod time;
