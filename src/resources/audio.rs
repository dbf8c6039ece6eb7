//! Audio command bridge.
//!
//! The host owns two sound slots: a looping `background` track and a
//! one-shot `action` clip. Anything that wants sound sends an [`AudioCmd`]
//! through an [`AudioSender`]; the tick forwards queued commands to the host
//! with [`AudioBridge::forward`]. Senders can be cloned and moved to other
//! threads.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;
use std::fmt;
use std::str::FromStr;

use crate::resources::nativehost::NativeHost;

/// Which sound slot an asset is loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SoundTag {
    /// Looping track, started on resume and stopped on pause.
    Background,
    /// Short clip played by [`AudioCmd::PlaySound`].
    Action,
}

impl FromStr for SoundTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "background" => Ok(SoundTag::Background),
            "action" => Ok(SoundTag::Action),
            other => Err(format!(
                "Unknown sound tag '{}', expected 'background' or 'action'",
                other
            )),
        }
    }
}

impl fmt::Display for SoundTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoundTag::Background => write!(f, "background"),
            SoundTag::Action => write!(f, "action"),
        }
    }
}

/// Commands forwarded to the host's audio calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    CacheSound { tag: SoundTag, path: String },
    PlaySound,
    SetBackgroundPlaying(bool),
}

/// Producer side of the bridge.
#[derive(Debug, Clone)]
pub struct AudioSender(Sender<AudioCmd>);

impl AudioSender {
    /// Queue a command. Returns `false` once the bridge has been dropped.
    pub fn send(&self, cmd: AudioCmd) -> bool {
        self.0.send(cmd).is_ok()
    }
}

#[derive(Resource, Debug)]
pub struct AudioBridge {
    tx_cmd: Sender<AudioCmd>,
    rx_cmd: Receiver<AudioCmd>,
}

impl Default for AudioBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBridge {
    pub fn new() -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
        Self { tx_cmd, rx_cmd }
    }

    pub fn sender(&self) -> AudioSender {
        AudioSender(self.tx_cmd.clone())
    }

    pub fn send(&self, cmd: AudioCmd) {
        // The bridge holds its own receiver, so this cannot fail.
        let _ = self.tx_cmd.send(cmd);
    }

    pub fn pending(&self) -> usize {
        self.rx_cmd.len()
    }

    /// Forward every queued command to the host, in order. Returns how many
    /// were forwarded.
    pub fn forward(&self, host: &mut dyn NativeHost) -> usize {
        let mut count = 0;
        for cmd in self.rx_cmd.try_iter() {
            debug!("audio command {:?}", cmd);
            apply_audio_cmd(host, cmd);
            count += 1;
        }
        count
    }
}

/// Run one audio command against the host.
pub fn apply_audio_cmd(host: &mut dyn NativeHost, cmd: AudioCmd) {
    match cmd {
        AudioCmd::CacheSound { tag, path } => host.cache_sound(tag, &path),
        AudioCmd::PlaySound => host.play_sound(),
        AudioCmd::SetBackgroundPlaying(playing) => host.set_background_playing(playing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::nativehost::{HeadlessHost, HostCall};

    #[test]
    fn test_sound_tag_parse() {
        assert_eq!("background".parse::<SoundTag>(), Ok(SoundTag::Background));
        assert_eq!(" action ".parse::<SoundTag>(), Ok(SoundTag::Action));
        assert!("music".parse::<SoundTag>().is_err());
        assert_eq!(SoundTag::Background.to_string(), "background");
    }

    #[test]
    fn test_forward_in_order() {
        let mut host = HeadlessHost::new(10, 10);
        let log = host.call_log();
        let bridge = AudioBridge::new();
        bridge.send(AudioCmd::CacheSound {
            tag: SoundTag::Action,
            path: "sounds/boom.ogg".into(),
        });
        bridge.send(AudioCmd::PlaySound);

        assert_eq!(bridge.pending(), 2);
        assert_eq!(bridge.forward(&mut host), 2);
        assert_eq!(bridge.pending(), 0);
        assert_eq!(
            log.calls(),
            vec![
                HostCall::CacheSound {
                    tag: SoundTag::Action,
                    path: "sounds/boom.ogg".into()
                },
                HostCall::PlaySound,
            ]
        );
    }

    #[test]
    fn test_sender_from_other_thread() {
        let bridge = AudioBridge::new();
        let sender = bridge.sender();
        std::thread::spawn(move || {
            sender.send(AudioCmd::SetBackgroundPlaying(false));
        })
        .join()
        .unwrap();

        let mut host = HeadlessHost::new(10, 10);
        let log = host.call_log();
        bridge.forward(&mut host);
        assert_eq!(log.calls(), vec![HostCall::SetBackgroundPlaying(false)]);
    }
}
