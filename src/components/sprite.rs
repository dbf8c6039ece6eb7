use bevy_ecs::prelude::Component;

/// Sprite drawn with the texture cached under `tex_key`.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub tex_key: String,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>) -> Self {
        Self {
            tex_key: tex_key.into(),
        }
    }
}
