//! Camera orbit system.
//!
//! Steps the [`OrbitState`] once per tick and moves the host camera to the
//! resulting position.
use bevy_ecs::prelude::*;

use crate::resources::camera::CameraPosition;
use crate::resources::nativehost::NativeHostRes;
use crate::resources::orbit::OrbitState;

pub fn orbit_camera_system(
    mut orbit: ResMut<OrbitState>,
    mut camera: ResMut<CameraPosition>,
    mut host: NonSendMut<NativeHostRes>,
) {
    let (x, y, z) = orbit.advance();
    host.0.set_camera(x, y, z);
    *camera = CameraPosition { x, y, z };
}
