use bevy_ecs::prelude::*;
use log::warn;

use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::democonfig::DemoConfig;
use crate::resources::nativehost::NativeHostRes;
use crate::resources::texturestore::TextureStore;

/// Clear the screen and issue one draw call per sprite.
///
/// Sprites are drawn in [`ZIndex`] order. A sprite whose texture was never
/// cached is skipped with a warning.
pub fn render_system(
    config: Res<DemoConfig>,
    textures: Res<TextureStore>,
    sprites: Query<(&Sprite, &MapPosition, &ZIndex)>,
    mut host: NonSendMut<NativeHostRes>,
) {
    let (r, g, b) = config.clear_color;
    host.0.clear_screen(r, g, b);

    let mut to_draw: Vec<(&Sprite, &MapPosition, &ZIndex)> = sprites.iter().collect();
    to_draw.sort_by_key(|(_, _, z)| **z);

    for (sprite, pos, _z) in to_draw {
        if !textures.contains(&sprite.tex_key) {
            warn!("Texture '{}' not cached, skipping sprite", sprite.tex_key);
            continue;
        }
        host.0.render(&sprite.tex_key, pos.x, pos.y, pos.z);
    }
}
