//! Screen size resource.
//!
//! Filled from the host's screen dimensions during init.

use bevy_ecs::prelude::Resource;

use crate::resources::nativehost::ScreenDimensions;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl From<ScreenDimensions> for ScreenSize {
    fn from(d: ScreenDimensions) -> Self {
        Self {
            w: d.width,
            h: d.height,
        }
    }
}
