//! Audio system.
//!
//! [`forward_audio_cmds`] hands queued [`AudioCmd`](crate::resources::audio::AudioCmd)s
//! to the host once per tick.
use bevy_ecs::prelude::*;

use crate::resources::audio::AudioBridge;
use crate::resources::nativehost::NativeHostRes;

pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut host: NonSendMut<NativeHostRes>) {
    bridge.forward(host.0.as_mut());
}
