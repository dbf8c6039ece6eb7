//! Demo setup and tick loop.
//!
//! [`Demo`] owns the ECS world and the per-tick schedule. The caller builds
//! it with a host and a configuration, calls [`Demo::init`] once, then calls
//! [`Demo::tick`] once per frame.
//!
//! When the display goes away (focus lost, app paused) call [`Demo::pause`];
//! ticks then do nothing until [`Demo::resume`]. After the host recreates its
//! drawing surface, [`Demo::reload_textures`] caches every known texture again.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::audio::{AudioBridge, AudioCmd, AudioSender, SoundTag};
use crate::resources::camera::CameraPosition;
use crate::resources::democonfig::{DemoConfig, SpriteSpec};
use crate::resources::inputqueue::{InputEvent, InputQueue, InputSender};
use crate::resources::nativehost::{NativeHost, NativeHostRes};
use crate::resources::orbit::OrbitState;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::forward_audio_cmds;
use crate::systems::input::process_input_system;
use crate::systems::orbit::orbit_camera_system;
use crate::systems::render::render_system;
use crate::systems::time::update_world_time;

pub struct Demo {
    world: World,
    schedule: Schedule,
    next_zindex: i32,
    initialized: bool,
    paused: bool,
    background_cached: bool,
}

impl Demo {
    /// Build the world with every resource the tick needs. Nothing is sent to
    /// the host until [`Demo::init`].
    pub fn new(host: impl NativeHost + 'static, config: DemoConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(config.orbit);
        world.insert_resource(config);
        world.insert_resource(TextureStore::new());
        world.insert_resource(InputQueue::new());
        world.insert_resource(AudioBridge::new());
        world.insert_resource(CameraPosition::default());
        world.insert_resource(ScreenSize::default());
        world.insert_resource(WorldTime::default());
        world.insert_non_send_resource(NativeHostRes::new(host));

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                process_input_system,
                forward_audio_cmds,
                orbit_camera_system,
                render_system,
            )
                .chain(),
        );

        Self {
            world,
            schedule,
            next_zindex: 0,
            initialized: false,
            paused: false,
            background_cached: false,
        }
    }

    /// Query the screen, place the camera, cache textures and sounds, run the
    /// init script, spawn the scene and start the background track.
    ///
    /// Stops at the first failure and returns it; whatever was set up before
    /// the failure stays in place. A second call does nothing.
    pub fn init(&mut self) -> Result<(), String> {
        if self.initialized {
            warn!("Demo already initialized");
            return Ok(());
        }
        self.initialized = true;

        let dims = self.host_mut().0.get_screen_dimensions();
        info!(
            "Screen dimensions: {}",
            serde_json::to_string(&dims).map_err(|e| e.to_string())?
        );
        self.world.insert_resource(ScreenSize::from(dims));

        let camera_z = self.world.resource::<OrbitState>().camera_z;
        self.host_mut().0.set_camera(0.0, 0.0, camera_z);
        *self.world.resource_mut::<CameraPosition>() = CameraPosition {
            x: 0.0,
            y: 0.0,
            z: camera_z,
        };

        let config = self.world.resource::<DemoConfig>().clone();
        for (label, path) in &config.textures {
            self.cache_texture(label, path);
        }

        for (tag, path) in &config.sounds {
            self.cache_sound(*tag, path);
        }

        if let Some(path) = &config.script_path {
            self.run_init_script(&path.to_string_lossy())?;
        }

        for spec in &config.sprites {
            self.add_sprite(spec);
        }

        if self.background_cached {
            self.host_mut().0.set_background_playing(true);
        }

        info!(
            "Demo initialized: {} textures, {} sprites",
            self.world.resource::<TextureStore>().len(),
            self.next_zindex
        );
        Ok(())
    }

    /// Run one frame: drain input, forward audio, move the camera, clear and
    /// draw. While paused this does nothing; queued input and audio wait for
    /// the next running tick.
    pub fn tick(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
    }

    /// Stop drawing and stop the background track.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.host_mut().0.set_background_playing(false);
        info!("Demo paused at tick {}", self.frame_count());
    }

    /// Resume drawing and restart the background track.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.host_mut().0.set_background_playing(true);
        info!("Demo resumed at tick {}", self.frame_count());
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Cache every stored texture again, in label order. Used after the host
    /// lost its textures with its drawing surface.
    pub fn reload_textures(&mut self) {
        let mut textures: Vec<(String, String)> = self
            .textures()
            .map
            .iter()
            .map(|(l, p)| (l.clone(), p.clone()))
            .collect();
        textures.sort();
        for (label, path) in &textures {
            self.cache_texture(label, path);
        }
        info!("Reloaded {} textures", textures.len());
    }

    /// Load a sound into a slot right away.
    pub fn cache_sound(&mut self, tag: SoundTag, path: &str) {
        info!("Sound '{}' cached from {}", tag, path);
        self.host_mut().0.cache_sound(tag, path);
        if tag == SoundTag::Background {
            self.background_cached = true;
        }
    }

    /// Queue the `action` clip; it plays on the next running tick.
    pub fn play_sound(&self) {
        self.world.resource::<AudioBridge>().send(AudioCmd::PlaySound);
    }

    /// Sender for queueing audio from other threads.
    pub fn audio_sender(&self) -> AudioSender {
        self.world.resource::<AudioBridge>().sender()
    }

    /// Cache a texture through the host and remember it.
    pub fn cache_texture(&mut self, label: &str, path: &str) {
        self.world
            .resource_scope(|world, mut store: Mut<TextureStore>| {
                let mut host = world.non_send_resource_mut::<NativeHostRes>();
                store.cache(host.0.as_mut(), label, path);
            });
    }

    /// Spawn a sprite drawn after every sprite spawned before it.
    pub fn add_sprite(&mut self, spec: &SpriteSpec) -> Entity {
        let zindex = ZIndex(self.next_zindex);
        self.next_zindex += 1;
        self.world
            .spawn((
                Sprite::new(spec.tex_key.clone()),
                MapPosition::new(spec.x, spec.y, spec.z),
                zindex,
            ))
            .id()
    }

    /// Queue an input event from the demo thread.
    pub fn add_input(&self, event: InputEvent) {
        self.world.resource::<InputQueue>().add_input(event);
    }

    /// Sender for pushing input from other threads.
    pub fn input_sender(&self) -> InputSender {
        self.world.resource::<InputQueue>().sender()
    }

    pub fn orbit(&self) -> OrbitState {
        *self.world.resource::<OrbitState>()
    }

    pub fn camera(&self) -> CameraPosition {
        *self.world.resource::<CameraPosition>()
    }

    pub fn screen_size(&self) -> ScreenSize {
        *self.world.resource::<ScreenSize>()
    }

    pub fn frame_count(&self) -> u64 {
        self.world.resource::<WorldTime>().frame_count
    }

    pub fn textures(&self) -> &TextureStore {
        self.world.resource::<TextureStore>()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn host_mut(&mut self) -> Mut<'_, NativeHostRes> {
        self.world.non_send_resource_mut::<NativeHostRes>()
    }

    #[cfg(feature = "lua")]
    fn run_init_script(&mut self, path: &str) -> Result<(), String> {
        use crate::resources::lua_runtime::{LuaRuntime, ScriptCmd};

        let runtime =
            LuaRuntime::new().map_err(|e| format!("Failed to create Lua runtime: {}", e))?;
        let result = runtime.run_script(path).and_then(|()| {
            if runtime.has_function("on_init") {
                runtime.call_function::<_, ()>("on_init", ())
            } else {
                Ok(())
            }
        });

        // Commands queued before a failure are still applied.
        for cmd in runtime.drain_commands() {
            match cmd {
                ScriptCmd::CacheTexture { label, path } => self.cache_texture(&label, &path),
                ScriptCmd::AddSprite { tex_key, x, y, z } => {
                    self.add_sprite(&SpriteSpec::new(tex_key, x, y, z));
                }
                ScriptCmd::CacheSound { tag, path } => self.cache_sound(tag, &path),
                ScriptCmd::PlaySound => self.play_sound(),
            }
        }

        result.map_err(|e| format!("Init script {} failed: {}", path, e))
    }

    #[cfg(not(feature = "lua"))]
    fn run_init_script(&mut self, path: &str) -> Result<(), String> {
        warn!("Built without Lua support, ignoring init script {}", path);
        Ok(())
    }
}
