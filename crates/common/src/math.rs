use glam::Vec3;

/// Degrees to radians.
pub fn to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Rotate `v` about the X axis by `pitch`, then about the Y axis by `yaw`.
///
/// Angles are in radians. There is no roll. The composition order is fixed:
/// swapping it changes the result whenever both angles are non-zero. Parts
/// (object to world) and the camera (world to camera) both go through this
/// function with the same angle signs.
pub fn rotate(v: Vec3, pitch: f32, yaw: f32) -> Vec3 {
    let (sx, cx) = pitch.sin_cos();
    let (sy, cy) = yaw.sin_cos();

    let y1 = v.y * cx - v.z * sx;
    let z1 = v.y * sx + v.z * cx;

    let x2 = v.x * cy - z1 * sy;
    let z2 = v.x * sy + z1 * cy;

    Vec3::new(x2, y1, z2)
}
