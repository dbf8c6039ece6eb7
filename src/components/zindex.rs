//! Draw-order component.
//!
//! Sprites are spawned with increasing [`ZIndex`] values so the render system
//! can issue draw calls in registration order regardless of query order.

use bevy_ecs::prelude::Component;

/// Lower values are drawn first.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
