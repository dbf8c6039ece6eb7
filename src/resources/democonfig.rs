//! Demo configuration resource.
//!
//! Settings are read from an INI file. Anything missing keeps its default, so
//! the demo runs the same way with no file at all.
//!
//! # Configuration File Format
//!
//! ```ini
//! [screen]
//! clear_r = 0.1
//! clear_g = 0.2
//! clear_b = 0.3
//! width = 1280
//! height = 720
//!
//! [orbit]
//! radius = 0.0
//! angle = 0.0
//! step = 0.005
//! sign = 1
//! camera_z = 5.0
//! flip_angle = 400
//! reset_angle = 40
//!
//! [textures]
//! explosion = images/fireball.png
//!
//! [sounds]
//! background = sounds/background.ogg
//! action = sounds/explosion.ogg
//!
//! [sprites]
//! a = explosion, -1.0, -1.0, 0.0
//! b = explosion, 1.0, 1.0, 0.0
//!
//! [script]
//! path = assets/scripts/init.lua
//! ```
//!
//! `[textures]`, `[sounds]` and `[sprites]` replace the defaults when present.
//! Sprites are drawn in the order of their names. The `[orbit]` values must
//! pass [`OrbitState::validate`]. A file with any invalid value is rejected
//! as a whole.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::audio::SoundTag;
use crate::resources::orbit::OrbitState;

const DEFAULT_CLEAR_COLOR: (f32, f32, f32) = (0.1, 0.2, 0.3);
const DEFAULT_SCREEN_WIDTH: u32 = 1280;
const DEFAULT_SCREEN_HEIGHT: u32 = 720;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_TEXTURES: &[(&str, &str)] = &[("explosion", "images/fireball.png")];
const DEFAULT_SPRITES: &[(&str, f32, f32, f32)] =
    &[("explosion", -1.0, -1.0, 0.0), ("explosion", 1.0, 1.0, 0.0)];

/// A sprite placed in the scene at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSpec {
    pub tex_key: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SpriteSpec {
    pub fn new(tex_key: impl Into<String>, x: f32, y: f32, z: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            x,
            y,
            z,
        }
    }

    /// Parse `texture, x, y, z`.
    pub fn parse(value: &str) -> Result<Self, String> {
        let fields: Vec<&str> = value.split(',').map(str::trim).collect();
        let [tex_key, x, y, z] = fields.as_slice() else {
            return Err(format!(
                "Sprite entry '{}' must be 'texture, x, y, z'",
                value
            ));
        };
        if tex_key.is_empty() {
            return Err(format!("Sprite entry '{}' has an empty texture", value));
        }
        let coord = |s: &str| {
            s.parse::<f32>()
                .map_err(|e| format!("Sprite entry '{}': bad coordinate '{}': {}", value, s, e))
        };
        Ok(Self::new(*tex_key, coord(*x)?, coord(*y)?, coord(*z)?))
    }
}

#[derive(Resource, Debug, Clone)]
pub struct DemoConfig {
    /// Colour passed to `clear_screen` every tick.
    pub clear_color: (f32, f32, f32),
    /// Framebuffer width reported by the headless host.
    pub screen_width: u32,
    /// Framebuffer height reported by the headless host.
    pub screen_height: u32,
    /// Initial orbit state.
    pub orbit: OrbitState,
    /// Textures cached during init, as `(label, path)`.
    pub textures: Vec<(String, String)>,
    /// Sounds cached during init, as `(slot, path)`. Empty by default.
    pub sounds: Vec<(SoundTag, String)>,
    /// Sprites spawned during init, in draw order.
    pub sprites: Vec<SpriteSpec>,
    /// Lua init script, if any.
    pub script_path: Option<PathBuf>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoConfig {
    pub fn new() -> Self {
        Self {
            clear_color: DEFAULT_CLEAR_COLOR,
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            orbit: OrbitState::new(),
            textures: DEFAULT_TEXTURES
                .iter()
                .map(|(l, p)| (l.to_string(), p.to_string()))
                .collect(),
            sounds: Vec::new(),
            sprites: DEFAULT_SPRITES
                .iter()
                .map(|(t, x, y, z)| SpriteSpec::new(*t, *x, *y, *z))
                .collect(),
            script_path: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Returns an error if the file cannot be read or a value is invalid. On
    /// error `self` is left untouched.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config)?;
        info!("Loaded config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text. On error `self` is left untouched.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config)
    }

    /// Read every section into a copy and replace `self` only if the whole
    /// file is valid.
    fn apply(&mut self, config: &Ini) -> Result<(), String> {
        let mut next = self.clone();
        next.read_values(config)?;
        next.orbit
            .validate()
            .map_err(|e| format!("[orbit] {}", e))?;
        *self = next;
        Ok(())
    }

    fn read_values(&mut self, config: &Ini) -> Result<(), String> {
        let float = |section: &str, key: &str| -> Result<Option<f32>, String> {
            config
                .getfloat(section, key)
                .map(|v| v.map(|f| f as f32))
                .map_err(|e| format!("[{}] {}: {}", section, key, e))
        };
        let uint = |section: &str, key: &str| -> Result<Option<u32>, String> {
            config
                .getuint(section, key)
                .map(|v| v.map(|u| u as u32))
                .map_err(|e| format!("[{}] {}: {}", section, key, e))
        };

        // [screen] section
        if let Some(r) = float("screen", "clear_r")? {
            self.clear_color.0 = r;
        }
        if let Some(g) = float("screen", "clear_g")? {
            self.clear_color.1 = g;
        }
        if let Some(b) = float("screen", "clear_b")? {
            self.clear_color.2 = b;
        }
        if let Some(width) = uint("screen", "width")? {
            self.screen_width = width;
        }
        if let Some(height) = uint("screen", "height")? {
            self.screen_height = height;
        }

        // [orbit] section, checked as a whole by `OrbitState::validate`
        let orbit = &mut self.orbit;
        if let Some(radius) = float("orbit", "radius")? {
            orbit.radius = radius;
        }
        if let Some(angle) = float("orbit", "angle")? {
            orbit.angle = angle;
        }
        if let Some(step) = float("orbit", "step")? {
            orbit.step = step;
        }
        if let Some(sign) = float("orbit", "sign")? {
            orbit.sign = sign;
        }
        if let Some(z) = float("orbit", "camera_z")? {
            orbit.camera_z = z;
        }
        if let Some(flip) = float("orbit", "flip_angle")? {
            orbit.flip_angle = flip;
        }
        if let Some(reset) = float("orbit", "reset_angle")? {
            orbit.reset_angle = reset;
        }

        if let Some(section) = config.get_map_ref().get("textures") {
            let mut textures: Vec<(String, String)> = section
                .iter()
                .filter_map(|(label, path)| {
                    path.as_ref().map(|p| (label.clone(), p.trim().to_string()))
                })
                .collect();
            textures.sort();
            self.textures = textures;
        }

        if let Some(section) = config.get_map_ref().get("sounds") {
            let mut sounds = section
                .iter()
                .map(|(tag, path)| {
                    let tag: SoundTag = tag.parse().map_err(|e| format!("[sounds] {}", e))?;
                    match path {
                        Some(p) => Ok((tag, p.trim().to_string())),
                        None => Err(format!("[sounds] {} has no path", tag)),
                    }
                })
                .collect::<Result<Vec<_>, String>>()?;
            sounds.sort();
            self.sounds = sounds;
        }

        if let Some(section) = config.get_map_ref().get("sprites") {
            let mut entries: Vec<(&String, &Option<String>)> = section.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            self.sprites = entries
                .into_iter()
                .map(|(name, value)| match value {
                    Some(v) => SpriteSpec::parse(v),
                    None => Err(format!("Sprite entry '{}' has no value", name)),
                })
                .collect::<Result<_, _>>()?;
        }

        if let Some(path) = config.get("script", "path") {
            self.script_path = Some(PathBuf::from(path));
        }

        Ok(())
    }
}
