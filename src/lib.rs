//! Orbit sprite demo library.
//!
//! A small sprite scene drawn through a host-provided native API, with a
//! camera that orbits the origin. Exposes the ECS components, resources and
//! systems for integration tests and embedding.

pub mod components;
pub mod game;
pub mod resources;
pub mod systems;
