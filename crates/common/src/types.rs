use glam::Vec3;
use serde::{Deserialize, Serialize};

/// First-person camera pose.
///
/// Angles are in degrees: `pitch` about X, `yaw` about Y. `vertical_velocity`
/// is in world units per frame and is integrated by the camera controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub vertical_velocity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 6.0, 14.0),
            pitch: 0.0,
            yaw: 0.0,
            vertical_velocity: 0.0,
        }
    }
}

/// Logical drawing-surface size plus the device pixel ratio.
///
/// Projection works in logical units; the device-sized backing store is
/// `logical * pixel_ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Backing-store width in device pixels.
    pub fn device_width(&self) -> u32 {
        (self.width * self.pixel_ratio).round().max(0.0) as u32
    }

    /// Backing-store height in device pixels.
    pub fn device_height(&self) -> u32 {
        (self.height * self.pixel_ratio).round().max(0.0) as u32
    }

    /// Centre of the surface in logical units.
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

/// A flat fill colour, kept as the string the host supplied.
///
/// Values are not validated on the way in; sinks that need channels call
/// [`Color::to_rgb`] and decide what to do with garbage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse `#rrggbb` (or the short `#rgb`) into channels.
    pub fn to_rgb(&self) -> Option<[u8; 3]> {
        let hex = self.0.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some([r, g, b])
            }
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    out[i] = v * 17;
                }
                Some(out)
            }
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("#ffffff")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_default_pose() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 6.0, 14.0));
        assert_eq!(cam.pitch, 0.0);
        assert_eq!(cam.yaw, 0.0);
        assert_eq!(cam.vertical_velocity, 0.0);
    }

    #[test]
    fn surface_device_dimensions() {
        let size = SurfaceSize::new(800.0, 600.0, 2.0);
        assert_eq!(size.device_width(), 1600);
        assert_eq!(size.device_height(), 1200);
        assert_eq!(size.center(), (400.0, 300.0));
    }

    #[test]
    fn color_parses_long_and_short_hex() {
        assert_eq!(Color::new("#ff8000").to_rgb(), Some([255, 128, 0]));
        assert_eq!(Color::new("#0f0").to_rgb(), Some([0, 255, 0]));
        assert_eq!(Color::default().to_rgb(), Some([255, 255, 255]));
    }

    #[test]
    fn color_rejects_garbage() {
        assert_eq!(Color::new("red").to_rgb(), None);
        assert_eq!(Color::new("#12345").to_rgb(), None);
        assert_eq!(Color::new("#gg0000").to_rgb(), None);
    }

    #[test]
    fn color_serializes_as_plain_string() {
        let json = serde_json::to_string(&Color::new("#123456")).unwrap();
        assert_eq!(json, "\"#123456\"");
    }
}
