use std::collections::HashSet;

use glam::Vec3;
use viewport_common::{Camera, LookConfig, MovementConfig, ViewportConfig, to_radians};

use crate::event::{GamepadSnapshot, InputEvent, Key};

/// What happened to the camera during one [`CameraController::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// The jump impulse fired this frame.
    pub jumped: bool,
    /// The camera hit the floor and was clamped this frame.
    pub landed: bool,
}

/// First-person camera driven by held keys, pointer drags and a gamepad.
///
/// Look input from pointer drags is applied as events arrive; everything
/// else (gamepad look, locomotion, gravity, jumping) is applied once per
/// frame by [`update`](Self::update). All rates are per frame.
#[derive(Debug, Clone)]
pub struct CameraController {
    camera: Camera,
    movement: MovementConfig,
    look: LookConfig,
    keys_held: HashSet<Key>,
    /// Last pointer position while a drag is active.
    drag_anchor: Option<(f32, f32)>,
}

impl CameraController {
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            camera: config.spawn,
            movement: config.movement.clone(),
            look: config.look.clone(),
            keys_held: HashSet::new(),
            drag_anchor: None,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Direct pose access for hosts that teleport the camera.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Whether the camera is close enough to the floor to jump.
    pub fn on_floor(&self) -> bool {
        self.camera.position.y <= self.movement.floor_y + self.movement.jump_epsilon
    }

    /// Apply one host input event.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.keys_held.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.keys_held.remove(&key);
            }
            InputEvent::PointerDown { x, y } => {
                self.drag_anchor = Some((x, y));
            }
            InputEvent::PointerMove { x, y } => {
                let Some((last_x, last_y)) = self.drag_anchor else {
                    return;
                };
                self.rotate(
                    -(x - last_x) * self.look.pointer_sensitivity_x,
                    (y - last_y) * self.look.pointer_sensitivity_y,
                );
                self.drag_anchor = Some((x, y));
            }
            InputEvent::PointerUp => {
                self.drag_anchor = None;
            }
        }
    }

    /// Add yaw and pitch deltas (degrees), clamping pitch.
    fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.camera.yaw += d_yaw;
        self.camera.pitch = (self.camera.pitch + d_pitch)
            .clamp(-self.look.pitch_limit, self.look.pitch_limit);
    }

    /// Camera-local move intent `(x, z)` from held keys: W/S on z, A/D on x.
    fn key_intent(&self) -> (f32, f32) {
        let mut mx = 0.0;
        let mut mz = 0.0;
        if self.is_held(Key::W) {
            mz -= 1.0;
        }
        if self.is_held(Key::S) {
            mz += 1.0;
        }
        if self.is_held(Key::A) {
            mx -= 1.0;
        }
        if self.is_held(Key::D) {
            mx += 1.0;
        }
        (mx, mz)
    }

    /// Advance one frame. A missing gamepad contributes nothing.
    pub fn update(&mut self, gamepad: Option<&GamepadSnapshot>) -> StepReport {
        let mut report = StepReport::default();
        let pad = gamepad.copied().unwrap_or_default();

        let (key_x, key_z) = self.key_intent();
        let (stick_x, stick_z) = pad.left_stick();
        let mx = key_x + stick_x;
        let mz = key_z + stick_z;

        let (look_x, look_y) = pad.right_stick();
        self.rotate(-look_x * self.look.gamepad_gain, look_y * self.look.gamepad_gain);

        let jump_input = self.is_held(Key::Space) || pad.primary_pressed;
        if jump_input && self.on_floor() {
            self.camera.vertical_velocity = self.movement.jump_power;
            report.jumped = true;
            tracing::trace!(y = self.camera.position.y, "jump");
        }

        self.camera.vertical_velocity += self.movement.gravity;
        self.camera.position.y += self.camera.vertical_velocity;
        if self.camera.position.y < self.movement.floor_y {
            self.camera.position.y = self.movement.floor_y;
            self.camera.vertical_velocity = 0.0;
            report.landed = true;
        }

        let (sin_yaw, cos_yaw) = to_radians(self.camera.yaw).sin_cos();
        let world = Vec3::new(
            sin_yaw * mz + cos_yaw * mx,
            0.0,
            cos_yaw * mz - sin_yaw * mx,
        );
        self.camera.position += world * self.movement.move_speed;

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn grounded() -> CameraController {
        let mut config = ViewportConfig::default();
        config.spawn.position = Vec3::ZERO;
        CameraController::new(&config)
    }

    #[test]
    fn starts_at_spawn_pose() {
        let ctl = CameraController::new(&ViewportConfig::default());
        assert_eq!(*ctl.camera(), Camera::default());
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn pointer_drag_turns_camera() {
        let mut ctl = grounded();
        ctl.handle(InputEvent::PointerDown { x: 100.0, y: 100.0 });
        ctl.handle(InputEvent::PointerMove { x: 110.0, y: 90.0 });
        assert!((ctl.camera().yaw - -2.5).abs() < EPS);
        assert!((ctl.camera().pitch - -2.5).abs() < EPS);

        // Deltas are relative to the last move, not the press.
        ctl.handle(InputEvent::PointerMove { x: 110.0, y: 94.0 });
        assert!((ctl.camera().pitch - -1.5).abs() < EPS);
    }

    #[test]
    fn pointer_move_without_drag_is_ignored() {
        let mut ctl = grounded();
        ctl.handle(InputEvent::PointerMove { x: 500.0, y: 500.0 });
        assert_eq!(ctl.camera().yaw, 0.0);

        ctl.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        ctl.handle(InputEvent::PointerUp);
        ctl.handle(InputEvent::PointerMove { x: 40.0, y: 40.0 });
        assert_eq!(ctl.camera().yaw, 0.0);
        assert_eq!(ctl.camera().pitch, 0.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut ctl = grounded();
        ctl.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        ctl.handle(InputEvent::PointerMove { x: 0.0, y: 10_000.0 });
        assert_eq!(ctl.camera().pitch, 89.0);
        ctl.handle(InputEvent::PointerMove { x: 0.0, y: -10_000.0 });
        assert_eq!(ctl.camera().pitch, -89.0);
    }

    #[test]
    fn forward_key_moves_along_negative_z() {
        let mut ctl = grounded();
        ctl.handle(InputEvent::KeyDown(Key::W));
        ctl.update(None);
        let p = ctl.camera().position;
        assert!((p.z - -0.15).abs() < EPS);
        assert!(p.x.abs() < EPS);

        ctl.handle(InputEvent::KeyUp(Key::W));
        ctl.update(None);
        assert!((ctl.camera().position.z - -0.15).abs() < EPS);
    }

    #[test]
    fn strafe_key_moves_along_x() {
        let mut ctl = grounded();
        ctl.handle(InputEvent::KeyDown(Key::D));
        ctl.update(None);
        assert!((ctl.camera().position.x - 0.15).abs() < EPS);
    }

    #[test]
    fn movement_follows_yaw() {
        let mut ctl = grounded();
        ctl.camera_mut().yaw = 90.0;
        ctl.handle(InputEvent::KeyDown(Key::W));
        ctl.update(None);
        let p = ctl.camera().position;
        assert!((p.x - -0.15).abs() < EPS);
        assert!(p.z.abs() < EPS);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut ctl = grounded();
        ctl.handle(InputEvent::KeyDown(Key::A));
        ctl.handle(InputEvent::KeyDown(Key::D));
        ctl.update(None);
        assert_eq!(ctl.camera().position, Vec3::ZERO);
    }

    #[test]
    fn gamepad_sticks_move_and_look() {
        let mut ctl = grounded();
        let pad = GamepadSnapshot {
            axes: [0.5, 0.0, 1.0, -0.5],
            primary_pressed: false,
        };
        ctl.update(Some(&pad));
        let cam = ctl.camera();
        assert!((cam.yaw - -2.0).abs() < EPS);
        assert!((cam.pitch - -1.0).abs() < EPS);
        assert!(cam.position.length() > 0.0);
    }

    #[test]
    fn gamepad_look_adds_to_pointer_look() {
        let mut ctl = grounded();
        ctl.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        ctl.handle(InputEvent::PointerMove { x: 4.0, y: 0.0 });
        let pad = GamepadSnapshot {
            axes: [0.0, 0.0, 1.0, 0.0],
            primary_pressed: false,
        };
        ctl.update(Some(&pad));
        assert!((ctl.camera().yaw - -3.0).abs() < EPS);
    }

    #[test]
    fn gravity_pulls_camera_down() {
        let mut ctl = CameraController::new(&ViewportConfig::default());
        let report = ctl.update(None);
        assert!(!report.jumped);
        assert!(!report.landed);
        assert!((ctl.camera().vertical_velocity - -0.045).abs() < EPS);
        assert!((ctl.camera().position.y - 5.955).abs() < EPS);
    }

    #[test]
    fn floor_clamp_zeroes_velocity() {
        let mut ctl = grounded();
        ctl.camera_mut().position.y = 0.2;
        ctl.camera_mut().vertical_velocity = -1.0;
        let report = ctl.update(None);
        assert!(report.landed);
        assert_eq!(ctl.camera().position.y, 0.0);
        assert_eq!(ctl.camera().vertical_velocity, 0.0);
    }

    #[test]
    fn jump_from_floor() {
        let mut ctl = grounded();
        ctl.handle(InputEvent::KeyDown(Key::Space));
        let report = ctl.update(None);
        assert!(report.jumped);
        assert!((ctl.camera().vertical_velocity - 0.805).abs() < EPS);
        assert!((ctl.camera().position.y - 0.805).abs() < EPS);
    }

    #[test]
    fn jump_within_epsilon_of_floor() {
        let mut ctl = grounded();
        ctl.camera_mut().position.y = 0.005;
        let pad = GamepadSnapshot {
            primary_pressed: true,
            ..Default::default()
        };
        assert!(ctl.update(Some(&pad)).jumped);
    }

    #[test]
    fn no_jump_while_airborne() {
        let mut ctl = grounded();
        ctl.camera_mut().position.y = 2.0;
        ctl.handle(InputEvent::KeyDown(Key::Space));
        let report = ctl.update(None);
        assert!(!report.jumped);
        assert!((ctl.camera().vertical_velocity - -0.045).abs() < EPS);
    }

    #[test]
    fn held_jump_never_fires_in_the_air() {
        let mut ctl = CameraController::new(&ViewportConfig::default());
        ctl.handle(InputEvent::KeyDown(Key::Space));
        let mut jumps = 0;
        for _ in 0..300 {
            let y_before = ctl.camera().position.y;
            let report = ctl.update(None);
            if report.jumped {
                jumps += 1;
                assert!(y_before <= 0.01);
            }
            assert!(ctl.camera().position.y >= 0.0);
            if report.landed {
                assert_eq!(ctl.camera().vertical_velocity, 0.0);
            }
        }
        assert!(jumps > 1);
    }
}
