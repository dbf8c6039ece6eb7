//! Native host API.
//!
//! Every texture, camera and draw operation the demo performs is a call into
//! a [`NativeHost`]. The host lives in the ECS world as a `NonSend` resource
//! ([`NativeHostRes`]) because real implementations wrap thread-affine
//! graphics handles.
//!
//! [`HeadlessHost`] is the implementation used without a display: it logs
//! each call and appends it to a shared [`CallLog`].

use log::debug;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use crate::resources::audio::SoundTag;

/// Framebuffer size reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenDimensions {
    pub width: u32,
    pub height: u32,
}

/// Operations provided by the host runtime.
///
/// Calls are assumed to succeed; there is no error channel.
pub trait NativeHost {
    /// Load the asset at `path` and make it available under `label`.
    fn cache_texture(&mut self, label: &str, path: &str);
    /// Move the camera. The camera always looks at the origin.
    fn set_camera(&mut self, x: f32, y: f32, z: f32);
    /// Clear the framebuffer with an RGB colour in `0.0..=1.0`.
    fn clear_screen(&mut self, r: f32, g: f32, b: f32);
    /// Draw the texture cached under `sprite_id` at a world position.
    fn render(&mut self, sprite_id: &str, x: f32, y: f32, z: f32);
    /// Current framebuffer size.
    fn get_screen_dimensions(&mut self) -> ScreenDimensions;
    /// Convert a screen coordinate to a world coordinate on the z=0 plane.
    fn unproject(&mut self, x: f32, y: f32) -> (f32, f32);
    /// Load the asset at `path` into the `tag` sound slot.
    fn cache_sound(&mut self, tag: SoundTag, path: &str);
    /// Play the `action` clip once.
    fn play_sound(&mut self);
    /// Start or stop the looping `background` track.
    fn set_background_playing(&mut self, playing: bool);
}

/// `NonSend` wrapper storing the active host in the world.
pub struct NativeHostRes(pub Box<dyn NativeHost>);

impl NativeHostRes {
    pub fn new(host: impl NativeHost + 'static) -> Self {
        Self(Box::new(host))
    }
}

/// One recorded native call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CacheTexture { label: String, path: String },
    SetCamera { x: f32, y: f32, z: f32 },
    ClearScreen { r: f32, g: f32, b: f32 },
    Render { sprite_id: String, x: f32, y: f32, z: f32 },
    GetScreenDimensions,
    Unproject { x: f32, y: f32 },
    CacheSound { tag: SoundTag, path: String },
    PlaySound,
    SetBackgroundPlaying(bool),
}

impl HostCall {
    /// Short name of the call, used for summaries.
    pub fn name(&self) -> &'static str {
        match self {
            HostCall::CacheTexture { .. } => "cache_texture",
            HostCall::SetCamera { .. } => "set_camera",
            HostCall::ClearScreen { .. } => "clear_screen",
            HostCall::Render { .. } => "render",
            HostCall::GetScreenDimensions => "get_screen_dimensions",
            HostCall::Unproject { .. } => "unproject",
            HostCall::CacheSound { .. } => "cache_sound",
            HostCall::PlaySound => "play_sound",
            HostCall::SetBackgroundPlaying(_) => "set_background_playing",
        }
    }
}

/// Shared, cloneable view of the calls a [`HeadlessHost`] has received.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<HostCall>>>);

impl CallLog {
    fn push(&self, call: HostCall) {
        self.0.borrow_mut().push(call);
    }

    /// Copy of every call recorded so far.
    pub fn calls(&self) -> Vec<HostCall> {
        self.0.borrow().clone()
    }

    /// Remove and return every recorded call.
    pub fn take(&self) -> Vec<HostCall> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Number of recorded calls with the given [`HostCall::name`].
    pub fn count(&self, name: &str) -> usize {
        self.0.borrow().iter().filter(|c| c.name() == name).count()
    }
}

/// Display-less host that logs and records every call.
#[derive(Debug)]
pub struct HeadlessHost {
    screen: ScreenDimensions,
    camera: (f32, f32, f32),
    log: CallLog,
}

impl HeadlessHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen: ScreenDimensions { width, height },
            camera: (0.0, 0.0, 1.0),
            log: CallLog::default(),
        }
    }

    /// Handle to the call log. Stays valid after the host is moved into the world.
    pub fn call_log(&self) -> CallLog {
        self.log.clone()
    }
}

impl NativeHost for HeadlessHost {
    fn cache_texture(&mut self, label: &str, path: &str) {
        debug!("native cache_texture({}, {})", label, path);
        self.log.push(HostCall::CacheTexture {
            label: label.to_string(),
            path: path.to_string(),
        });
    }

    fn set_camera(&mut self, x: f32, y: f32, z: f32) {
        debug!("native set_camera({}, {}, {})", x, y, z);
        self.camera = (x, y, z);
        self.log.push(HostCall::SetCamera { x, y, z });
    }

    fn clear_screen(&mut self, r: f32, g: f32, b: f32) {
        debug!("native clear_screen({}, {}, {})", r, g, b);
        self.log.push(HostCall::ClearScreen { r, g, b });
    }

    fn render(&mut self, sprite_id: &str, x: f32, y: f32, z: f32) {
        debug!("native render({}, {}, {}, {})", sprite_id, x, y, z);
        self.log.push(HostCall::Render {
            sprite_id: sprite_id.to_string(),
            x,
            y,
            z,
        });
    }

    fn get_screen_dimensions(&mut self) -> ScreenDimensions {
        self.log.push(HostCall::GetScreenDimensions);
        self.screen
    }

    /// Orthographic unproject: the visible half-height equals the camera
    /// height, centred on the camera's x/y.
    fn unproject(&mut self, x: f32, y: f32) -> (f32, f32) {
        self.log.push(HostCall::Unproject { x, y });
        let w = self.screen.width.max(1) as f32;
        let h = self.screen.height.max(1) as f32;
        let aspect = w / h;
        let ndc_x = 2.0 * x / w - 1.0;
        let ndc_y = 1.0 - 2.0 * y / h;
        let (cx, cy, cz) = self.camera;
        (cx + ndc_x * aspect * cz, cy + ndc_y * cz)
    }

    fn cache_sound(&mut self, tag: SoundTag, path: &str) {
        debug!("native cache_sound({}, {})", tag, path);
        self.log.push(HostCall::CacheSound {
            tag,
            path: path.to_string(),
        });
    }

    fn play_sound(&mut self) {
        debug!("native play_sound()");
        self.log.push(HostCall::PlaySound);
    }

    fn set_background_playing(&mut self, playing: bool) {
        debug!("native set_background_playing({})", playing);
        self.log.push(HostCall::SetBackgroundPlaying(playing));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_records_calls_in_order() {
        let mut host = HeadlessHost::new(800, 600);
        let log = host.call_log();
        host.cache_texture("explosion", "images/fireball.png");
        host.set_camera(0.0, 0.0, 5.0);
        host.clear_screen(0.1, 0.2, 0.3);
        host.render("explosion", 1.0, 1.0, 0.0);

        let names: Vec<_> = log.calls().iter().map(HostCall::name).collect();
        assert_eq!(
            names,
            vec!["cache_texture", "set_camera", "clear_screen", "render"]
        );
    }

    #[test]
    fn test_headless_screen_dimensions() {
        let mut host = HeadlessHost::new(1280, 720);
        let dims = host.get_screen_dimensions();
        assert_eq!(
            dims,
            ScreenDimensions {
                width: 1280,
                height: 720
            }
        );
        assert_eq!(
            serde_json::to_string(&dims).unwrap(),
            r#"{"width":1280,"height":720}"#
        );
    }

    #[test]
    fn test_unproject_centre_is_camera_xy() {
        let mut host = HeadlessHost::new(800, 600);
        host.set_camera(1.5, -2.0, 5.0);
        let (x, y) = host.unproject(400.0, 300.0);
        assert!((x - 1.5).abs() < 1e-6);
        assert!((y + 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_unproject_top_left_corner() {
        let mut host = HeadlessHost::new(800, 400);
        host.set_camera(0.0, 0.0, 5.0);
        let (x, y) = host.unproject(0.0, 0.0);
        assert!((x + 10.0).abs() < 1e-5);
        assert!((y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_call_log_take_and_count() {
        let mut host = HeadlessHost::new(10, 10);
        let log = host.call_log();
        host.render("a", 0.0, 0.0, 0.0);
        host.render("b", 0.0, 0.0, 0.0);
        host.clear_screen(0.0, 0.0, 0.0);
        assert_eq!(log.count("render"), 2);
        assert_eq!(log.len(), 3);
        let taken = log.take();
        assert_eq!(taken.len(), 3);
        assert!(log.is_empty());
    }
}
