//! Buffered input events.
//!
//! Native input callbacks push [`InputEvent`]s through an [`InputSender`],
//! which is cheap to clone and may be moved to another thread. The tick
//! drains the [`InputQueue`] once per frame with [`InputQueue::process_input`].
//! Events follow the touch stream: `pressed` and `move` carry a position,
//! `release` only the pointer id.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::resources::nativehost::NativeHost;

/// Kind tag of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Pressed,
    Move,
    Release,
}

/// One pointer event. `pointer_id` tells fingers apart on multi-touch
/// screens. Releases carry no coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub kind: InputKind,
    pub pointer_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

impl InputEvent {
    pub fn pressed(pointer_id: i32, x: f32, y: f32) -> Self {
        Self {
            kind: InputKind::Pressed,
            pointer_id,
            x: Some(x),
            y: Some(y),
        }
    }

    pub fn moved(pointer_id: i32, x: f32, y: f32) -> Self {
        Self {
            kind: InputKind::Move,
            pointer_id,
            x: Some(x),
            y: Some(y),
        }
    }

    pub fn released(pointer_id: i32) -> Self {
        Self {
            kind: InputKind::Release,
            pointer_id,
            x: None,
            y: None,
        }
    }

    /// Screen position, if the event has one.
    pub fn position(&self) -> Option<(f32, f32)> {
        self.x.zip(self.y)
    }

    fn to_log_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

/// Result of one drain: the events in arrival order and the exact lines
/// written to the log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputDrain {
    pub events: Vec<InputEvent>,
    pub lines: Vec<String>,
}

impl InputDrain {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Producer side of the queue.
#[derive(Debug, Clone)]
pub struct InputSender(Sender<InputEvent>);

impl InputSender {
    /// Append an event. Returns `false` once the queue has been dropped.
    pub fn add_input(&self, event: InputEvent) -> bool {
        self.0.send(event).is_ok()
    }
}

/// Queue resource owned by the demo world.
#[derive(Resource, Debug)]
pub struct InputQueue {
    tx: Sender<InputEvent>,
    rx: Receiver<InputEvent>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded::<InputEvent>();
        Self { tx, rx }
    }

    pub fn sender(&self) -> InputSender {
        InputSender(self.tx.clone())
    }

    /// Append an event from the owning thread.
    pub fn add_input(&self, event: InputEvent) {
        // The queue holds its own receiver, so this cannot fail.
        let _ = self.tx.send(event);
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Drain the queue, logging a header and one JSON line per event, and
    /// unprojecting every event that is not a release.
    ///
    /// An empty queue logs nothing and makes no host calls.
    pub fn process_input(&self, host: &mut dyn NativeHost) -> InputDrain {
        let events: Vec<InputEvent> = self.rx.try_iter().collect();
        if events.is_empty() {
            return InputDrain::default();
        }

        let mut lines = Vec::with_capacity(events.len() + 1);
        lines.push(format!("input queue length = {}, content:", events.len()));
        lines.extend(events.iter().map(InputEvent::to_log_line));
        for line in &lines {
            info!("{}", line);
        }

        for event in &events {
            if event.kind == InputKind::Release {
                continue;
            }
            if let Some((x, y)) = event.position() {
                let (wx, wy) = host.unproject(x, y);
                debug!(
                    "pointer {} unprojected ({}, {}) -> ({}, {})",
                    event.pointer_id, x, y, wx, wy
                );
            }
        }

        InputDrain { events, lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::nativehost::{HeadlessHost, HostCall};

    #[test]
    fn test_drain_logs_every_entry_and_skips_release() {
        let mut host = HeadlessHost::new(800, 600);
        let log = host.call_log();
        let queue = InputQueue::new();
        queue.add_input(InputEvent::moved(0, 10.0, 20.0));
        queue.add_input(InputEvent::moved(1, 30.0, 40.0));
        queue.add_input(InputEvent::released(1));

        let drain = queue.process_input(&mut host);
        assert_eq!(drain.events.len(), 3);
        assert_eq!(
            drain.lines,
            vec![
                "input queue length = 3, content:".to_string(),
                r#"{"kind":"move","pointer_id":0,"x":10.0,"y":20.0}"#.to_string(),
                r#"{"kind":"move","pointer_id":1,"x":30.0,"y":40.0}"#.to_string(),
                r#"{"kind":"release","pointer_id":1}"#.to_string(),
            ]
        );
        assert_eq!(
            log.calls(),
            vec![
                HostCall::Unproject { x: 10.0, y: 20.0 },
                HostCall::Unproject { x: 30.0, y: 40.0 },
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_empty_queue_makes_no_calls() {
        let mut host = HeadlessHost::new(800, 600);
        let log = host.call_log();
        let queue = InputQueue::new();
        let drain = queue.process_input(&mut host);
        assert!(drain.is_empty());
        assert!(drain.lines.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_multi_touch_keeps_pointer_ids() {
        let mut host = HeadlessHost::new(800, 600);
        let queue = InputQueue::new();
        queue.add_input(InputEvent::pressed(0, 1.0, 1.0));
        queue.add_input(InputEvent::pressed(1, 2.0, 2.0));
        queue.add_input(InputEvent::released(0));

        let drain = queue.process_input(&mut host);
        let ids: Vec<i32> = drain.events.iter().map(|e| e.pointer_id).collect();
        assert_eq!(ids, vec![0, 1, 0]);
        assert_eq!(drain.events[2].position(), None);
    }

    #[test]
    fn test_sender_from_other_thread() {
        let queue = InputQueue::new();
        let sender = queue.sender();
        let handle = std::thread::spawn(move || {
            sender.add_input(InputEvent::pressed(0, 1.0, 2.0));
            sender.add_input(InputEvent::released(0));
        });
        handle.join().unwrap();
        assert_eq!(queue.len(), 2);

        let mut host = HeadlessHost::new(10, 10);
        let drain = queue.process_input(&mut host);
        assert_eq!(drain.events[0].kind, InputKind::Pressed);
        assert_eq!(drain.events[1].kind, InputKind::Release);
    }

    #[test]
    fn test_sender_after_queue_dropped() {
        let queue = InputQueue::new();
        let sender = queue.sender();
        drop(queue);
        assert!(!sender.add_input(InputEvent::moved(0, 0.0, 0.0)));
    }

    #[test]
    fn test_event_json_matches_wire_tags() {
        assert_eq!(
            InputEvent::pressed(2, 10.0, 20.5).to_log_line(),
            r#"{"kind":"pressed","pointer_id":2,"x":10.0,"y":20.5}"#
        );
        assert_eq!(
            InputEvent::released(2).to_log_line(),
            r#"{"kind":"release","pointer_id":2}"#
        );
        let parsed: InputEvent = serde_json::from_str(r#"{"kind":"release","pointer_id":3}"#).unwrap();
        assert_eq!(parsed, InputEvent::released(3));
    }
}
