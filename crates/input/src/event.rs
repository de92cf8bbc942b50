use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Keys the controller reacts to, named after their physical key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
}

impl Key {
    /// Parse a physical key code such as `KeyW` or `Space`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::W),
            "KeyA" => Some(Self::A),
            "KeyS" => Some(Self::S),
            "KeyD" => Some(Self::D),
            "Space" => Some(Self::Space),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::W => "KeyW",
            Self::A => "KeyA",
            Self::S => "KeyS",
            Self::D => "KeyD",
            Self::Space => "Space",
        }
    }
}

/// A raw input event from the host. Pointer coordinates are in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
}

/// Events collected between frames.
///
/// Hosts push as events arrive; the frame driver drains the whole queue
/// before stepping the camera, so a frame never sees half an update.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending event in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.pending.drain(..)
    }
}

/// Snapshot of a polled gamepad: four analog axes in `[-1, 1]` and the
/// primary face button.
///
/// Axes follow the browser layout: `[left x, left y, right x, right y]`,
/// with +y pointing down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadSnapshot {
    pub axes: [f32; 4],
    pub primary_pressed: bool,
}

impl GamepadSnapshot {
    pub fn left_stick(&self) -> (f32, f32) {
        (self.axes[0], self.axes[1])
    }

    pub fn right_stick(&self) -> (f32, f32) {
        (self.axes[2], self.axes[3])
    }
}
