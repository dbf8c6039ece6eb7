//! Input system.
//!
//! [`process_input_system`] drains the [`InputQueue`] once per tick.
use bevy_ecs::prelude::*;

use crate::resources::inputqueue::InputQueue;
use crate::resources::nativehost::NativeHostRes;

/// Log and clear buffered input, unprojecting every non-release event.
pub fn process_input_system(queue: Res<InputQueue>, mut host: NonSendMut<NativeHostRes>) {
    queue.process_input(host.0.as_mut());
}
