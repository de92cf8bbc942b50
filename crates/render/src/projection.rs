use glam::{Vec2, Vec3};
use viewport_common::{Camera, SurfaceSize, rotate, to_radians};

/// Move a world-space point into camera space.
///
/// Translates by the camera position, then rotates by the camera's pitch and
/// yaw using the same [`rotate`] as part orientation. The camera looks down -Z.
pub fn world_to_camera(point: Vec3, camera: &Camera) -> Vec3 {
    rotate(
        point - camera.position,
        to_radians(camera.pitch),
        to_radians(camera.yaw),
    )
}

/// A projected vertex: screen position plus its camera-space depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub position: Vec2,
    /// Camera-space z. Always strictly negative.
    pub depth: f32,
}

/// Pinhole projection onto a surface of a given size and vertical FOV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    center: Vec2,
    scale: f32,
}

impl Projector {
    pub fn new(surface: &SurfaceSize, fov_degrees: f32) -> Self {
        let (cx, cy) = surface.center();
        Self {
            center: Vec2::new(cx, cy),
            scale: cy / (to_radians(fov_degrees) / 2.0).tan(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Pixels per unit of `offset / distance`.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Project a camera-space point. Points with depth `>= 0` (or NaN) are
    /// behind the camera and yield `None`; only strictly negative depths
    /// reach the division.
    pub fn project(&self, p: Vec3) -> Option<ScreenPoint> {
        if !(p.z < 0.0) {
            return None;
        }
        let distance = -p.z;
        Some(ScreenPoint {
            position: Vec2::new(
                self.center.x + (p.x / distance) * self.scale,
                self.center.y - (p.y / distance) * self.scale,
            ),
            depth: p.z,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector() -> Projector {
        Projector::new(&SurfaceSize::new(800.0, 600.0, 1.0), 90.0)
    }

    #[test]
    fn scale_from_fov() {
        let p = projector();
        assert_eq!(p.center(), Vec2::new(400.0, 300.0));
        // tan(45deg) == 1
        assert!((p.scale() - 300.0).abs() < 1e-3);
    }

    #[test]
    fn cull_is_exact_at_zero_depth() {
        let p = projector();
        assert!(p.project(Vec3::new(1.0, 1.0, 0.0)).is_none());
        assert!(p.project(Vec3::new(1.0, 1.0, -0.0)).is_none());
        assert!(p.project(Vec3::new(1.0, 1.0, 3.0)).is_none());
        assert!(p.project(Vec3::new(1.0, 1.0, f32::NAN)).is_none());
        assert!(p.project(Vec3::new(0.0, 0.0, -f32::MIN_POSITIVE)).is_some());
    }

    #[test]
    fn point_on_axis_lands_at_center() {
        let sp = projector().project(Vec3::new(0.0, 0.0, -5.0)).unwrap();
        assert_eq!(sp.position, Vec2::new(400.0, 300.0));
        assert_eq!(sp.depth, -5.0);
    }

    #[test]
    fn up_is_negative_screen_y() {
        let sp = projector().project(Vec3::new(1.0, 1.0, -1.0)).unwrap();
        assert!((sp.position.x - 700.0).abs() < 1e-3);
        assert!((sp.position.y - 0.0).abs() < 1e-3);
    }

    #[test]
    fn offsets_move_monotonically_away_from_center() {
        let p = projector();
        let mut last_x = 0.0;
        let mut last_y = 0.0;
        for i in 1..20 {
            let off = i as f32 * 0.5;
            let sp = p.project(Vec3::new(off, -off, -4.0)).unwrap();
            let dx = (sp.position.x - 400.0).abs();
            let dy = (sp.position.y - 300.0).abs();
            assert!(dx > last_x);
            assert!(dy > last_y);
            last_x = dx;
            last_y = dy;
        }
    }

    #[test]
    fn camera_transform_translates_then_rotates() {
        let cam = Camera {
            position: Vec3::new(0.0, 6.0, 14.0),
            ..Camera::default()
        };
        let c = world_to_camera(Vec3::new(0.0, 0.0, -10.0), &cam);
        assert_eq!(c, Vec3::new(0.0, -6.0, -24.0));

        let turned = Camera {
            position: Vec3::ZERO,
            yaw: 90.0,
            ..Camera::default()
        };
        let c = world_to_camera(Vec3::new(1.0, 0.0, 0.0), &turned);
        assert!((c - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }
}
