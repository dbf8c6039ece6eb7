//! Last camera position sent to the host.
//!
//! Written by the orbit system each tick and by init when the camera is first
//! placed. The camera always looks at the origin.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}
