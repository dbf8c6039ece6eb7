//! ECS components for scene entities.
//!
//! Submodules overview:
//! - [`mapposition`] – world-space position of a sprite
//! - [`sprite`] – texture label a sprite is drawn with
//! - [`zindex`] – draw order

pub mod mapposition;
pub mod sprite;
pub mod zindex;
