//! Registry of cached textures.
//!
//! Maps a texture label to the asset path it was loaded from. Registering a
//! label also forwards the request to the host's texture cache.

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;

use crate::resources::nativehost::NativeHost;

#[derive(Resource, Debug, Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, String>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache `path` under `label` through the host. An existing label is
    /// replaced and the host is asked to load it again.
    pub fn cache(&mut self, host: &mut dyn NativeHost, label: &str, path: &str) {
        host.cache_texture(label, path);
        if let Some(old) = self.map.insert(label.to_string(), path.to_string()) {
            info!("Texture '{}' replaced: {} -> {}", label, old, path);
        } else {
            info!("Texture '{}' cached from {}", label, path);
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.map.contains_key(label)
    }

    pub fn path(&self, label: &str) -> Option<&str> {
        self.map.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
