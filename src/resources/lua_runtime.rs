//! Lua scripting runtime.
//!
//! Runs the demo's init script. The script talks to the demo through the
//! global `engine` table; calls that touch demo state are queued as
//! [`ScriptCmd`]s and applied by Rust once the script returns.
//!
//! # Example
//!
//! ```lua
//! engine.log("init script loaded")
//!
//! function on_init()
//!     engine.cache_texture("ship", "images/ship.png")
//!     engine.add_sprite("ship", 0.0, 0.0, 0.0)
//!     engine.cache_sound("action", "sounds/boom.ogg")
//!     engine.play_sound()
//! end
//! ```

use log::{error, info, warn};
use mlua::prelude::*;
use std::cell::RefCell;

use crate::resources::audio::SoundTag;

/// Commands a script can queue for the demo.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCmd {
    /// Cache a texture through the host.
    CacheTexture { label: String, path: String },
    /// Place a sprite in the scene.
    AddSprite { tex_key: String, x: f32, y: f32, z: f32 },
    /// Load a sound into the `background` or `action` slot.
    CacheSound { tag: SoundTag, path: String },
    /// Play the `action` clip.
    PlaySound,
}

/// Shared state reachable from Lua closures through Lua's app data.
struct LuaAppData {
    commands: RefCell<Vec<ScriptCmd>>,
}

macro_rules! register_cmd {
    ($engine:expr, $lua:expr, $name:expr,
     |$args:pat_param| $arg_ty:ty, $cmd:expr) => {
        $engine.set(
            $name,
            $lua.create_function(|lua, $args: $arg_ty| {
                lua.app_data_ref::<LuaAppData>()
                    .ok_or_else(|| LuaError::runtime("LuaAppData not found"))?
                    .commands
                    .borrow_mut()
                    .push($cmd);
                Ok(())
            })?,
        )?;
    };
}

/// Holds the Lua interpreter. Not thread-safe; keep it on the demo thread.
pub struct LuaRuntime {
    lua: Lua,
}

impl LuaRuntime {
    /// Creates a new Lua runtime and registers the `engine` table.
    ///
    /// # Errors
    ///
    /// Returns an error if Lua initialization or API registration fails.
    pub fn new() -> LuaResult<Self> {
        let lua = Lua::new();
        lua.set_app_data(LuaAppData {
            commands: RefCell::new(Vec::new()),
        });

        let runtime = Self { lua };
        runtime.register_base_api()?;
        runtime.register_scene_api()?;
        Ok(runtime)
    }

    fn register_base_api(&self) -> LuaResult<()> {
        let engine = self.lua.create_table()?;

        engine.set(
            "log",
            self.lua.create_function(|_, msg: String| {
                info!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;
        engine.set(
            "log_warn",
            self.lua.create_function(|_, msg: String| {
                warn!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;
        engine.set(
            "log_error",
            self.lua.create_function(|_, msg: String| {
                error!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        self.lua.globals().set("engine", engine)?;
        Ok(())
    }

    fn register_scene_api(&self) -> LuaResult<()> {
        let engine: LuaTable = self.lua.globals().get("engine")?;
        register_cmd!(engine, self.lua, "cache_texture",
            |(label, path)| (String, String), ScriptCmd::CacheTexture { label, path });
        register_cmd!(engine, self.lua, "add_sprite",
            |(tex_key, x, y, z)| (String, f32, f32, f32),
            ScriptCmd::AddSprite { tex_key, x, y, z });
        register_cmd!(engine, self.lua, "play_sound", |()| (), ScriptCmd::PlaySound);

        // engine.cache_sound(tag, path) - tag is checked before queueing
        engine.set(
            "cache_sound",
            self.lua.create_function(|lua, (tag, path): (String, String)| {
                let tag: SoundTag = tag.parse().map_err(LuaError::runtime)?;
                lua.app_data_ref::<LuaAppData>()
                    .ok_or_else(|| LuaError::runtime("LuaAppData not found"))?
                    .commands
                    .borrow_mut()
                    .push(ScriptCmd::CacheSound { tag, path });
                Ok(())
            })?,
        )?;
        Ok(())
    }

    /// Loads and executes a Lua script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the script fails.
    pub fn run_script(&self, path: &str) -> LuaResult<()> {
        let script = std::fs::read_to_string(path)
            .map_err(|e| LuaError::ExternalError(std::sync::Arc::new(e)))?;
        self.run_source(path, &script)
    }

    /// Executes Lua source under the given chunk name.
    pub fn run_source(&self, name: &str, source: &str) -> LuaResult<()> {
        self.lua.load(source).set_name(name).exec()
    }

    /// Calls a global Lua function by name.
    pub fn call_function<A, R>(&self, name: &str, args: A) -> LuaResult<R>
    where
        A: IntoLuaMulti,
        R: FromLuaMulti,
    {
        let func: LuaFunction = self.lua.globals().get(name)?;
        func.call(args)
    }

    /// Checks if a global function exists.
    pub fn has_function(&self, name: &str) -> bool {
        self.lua.globals().get::<LuaFunction>(name).is_ok()
    }

    /// Drains all queued script commands in the order they were issued.
    pub fn drain_commands(&self) -> Vec<ScriptCmd> {
        self.lua
            .app_data_ref::<LuaAppData>()
            .map(|data| data.commands.borrow_mut().drain(..).collect())
            .unwrap_or_default()
    }
}
