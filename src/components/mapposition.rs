use bevy_ecs::prelude::Component;

/// World-space position of a sprite.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl MapPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}
