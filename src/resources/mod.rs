//! ECS resources made available to systems.
//!
//! Overview
//! - `audio` – sound slots and the audio command bridge
//! - `camera` – last camera position sent to the host
//! - `democonfig` – settings loaded from the INI file
//! - `inputqueue` – buffered pointer events and their cross-thread sender
//! - `lua_runtime` – Lua interpreter for the init script (`lua` feature)
//! - `nativehost` – the host API trait and the headless implementation
//! - `orbit` – orbiting camera state
//! - `screensize` – framebuffer dimensions reported by the host
//! - `texturestore` – cached textures keyed by label
//! - `worldtime` – tick count and elapsed time
pub mod audio;
pub mod camera;
pub mod democonfig;
pub mod inputqueue;
#[cfg(feature = "lua")]
pub mod lua_runtime;
pub mod nativehost;
pub mod orbit;
pub mod screensize;
pub mod texturestore;
pub mod worldtime;
