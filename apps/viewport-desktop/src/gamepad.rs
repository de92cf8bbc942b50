use gilrs::{Axis, Button, Gilrs};
use viewport_input::GamepadSnapshot;

/// Polls the first connected gamepad once per frame.
///
/// If gilrs cannot start, or nothing is plugged in, every poll returns `None`
/// and the camera simply gets no gamepad contribution.
pub struct GamepadPoller {
    gilrs: Option<Gilrs>,
}

impl GamepadPoller {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                tracing::warn!("gamepad support unavailable: {e}");
                None
            }
        };
        Self { gilrs }
    }

    /// Drain pending gamepad events and snapshot the first pad.
    pub fn poll(&mut self) -> Option<GamepadSnapshot> {
        let gilrs = self.gilrs.as_mut()?;
        while let Some(event) = gilrs.next_event() {
            tracing::trace!(?event, "gamepad event");
        }
        let (_, pad) = gilrs.gamepads().next()?;
        // gilrs reports +Y as up; the controller expects +Y down.
        Some(GamepadSnapshot {
            axes: [
                pad.value(Axis::LeftStickX),
                -pad.value(Axis::LeftStickY),
                pad.value(Axis::RightStickX),
                -pad.value(Axis::RightStickY),
            ],
            primary_pressed: pad.is_pressed(Button::South),
        })
    }
}
