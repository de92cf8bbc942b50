use std::fmt::Write;

use viewport_common::{Camera, SurfaceSize, ViewportConfig};
use viewport_kernel::Scene;

use crate::pipeline::{FaceList, collect_faces};
use crate::projection::Projector;

/// Camera and surface configuration for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub camera: Camera,
    pub surface: SurfaceSize,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl RenderView {
    pub fn projector(&self) -> Projector {
        Projector::new(&self.surface, self.fov_degrees)
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            surface: SurfaceSize::default(),
            fov_degrees: ViewportConfig::default().fov_degrees,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a view, then produces output. It never
/// mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Produces the depth-sorted faces for [`paint`](crate::paint).
#[derive(Debug, Default)]
pub struct FaceRenderer;

impl FaceRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for FaceRenderer {
    type Output = FaceList;

    fn render(&self, scene: &Scene, view: &RenderView) -> FaceList {
        collect_faces(scene, &view.camera, &view.projector())
    }
}

/// Human-readable frame summary, for the CLI and logs.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let list = FaceRenderer.render(scene, view);
        let cam = &view.camera;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame (parts={}, faces={}, culled={}) ===",
            list.parts,
            list.faces.len(),
            list.culled
        );
        let _ = writeln!(
            out,
            "Camera: pos=({:.2}, {:.2}, {:.2}) pitch={:.1} yaw={:.1} vy={:.3}",
            cam.position.x, cam.position.y, cam.position.z, cam.pitch, cam.yaw, cam.vertical_velocity
        );
        let _ = writeln!(
            out,
            "Surface: {}x{} @{}x fov={:.0}",
            view.surface.width, view.surface.height, view.surface.pixel_ratio, view.fov_degrees
        );
        for face in &list.faces {
            let c = face.points.iter().sum::<glam::Vec2>() / 4.0;
            let _ = writeln!(
                out,
                "  [{} face {}] depth={:.2} center=({:.1}, {:.1}) color={} alpha={:.2}",
                face.node, face.face, face.depth, c.x, c.y, face.color, face.alpha
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use viewport_kernel::PartOverrides;

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = Scene::new();
        let output = DebugTextRenderer::new().render(&scene, &RenderView::default());
        assert!(output.contains("parts=0"));
        assert!(output.contains("faces=0"));
        assert!(output.contains("pos=(0.00, 6.00, 14.00)"));
    }

    #[test]
    fn debug_renderer_lists_faces() {
        let mut scene = Scene::new();
        let ws = scene.workspace();
        scene
            .create_instance(
                "Part",
                PartOverrides {
                    position: Some(Vec3::new(0.0, 0.0, -10.0)),
                    ..Default::default()
                },
                Some(ws),
            )
            .unwrap();
        let output = DebugTextRenderer::new().render(&scene, &RenderView::default());
        assert!(output.contains("parts=1, faces=6, culled=0"));
        assert_eq!(output.matches("color=#ffffff").count(), 6);
    }

    #[test]
    fn face_renderer_uses_view_camera() {
        let mut scene = Scene::new();
        let ws = scene.workspace();
        scene
            .create_instance(
                "Part",
                PartOverrides {
                    position: Some(Vec3::new(0.0, 0.0, -10.0)),
                    ..Default::default()
                },
                Some(ws),
            )
            .unwrap();
        let mut view = RenderView::default();
        assert_eq!(FaceRenderer::new().render(&scene, &view).faces.len(), 6);

        // Turned around, the part is behind the camera.
        view.camera.yaw = 180.0;
        assert!(FaceRenderer::new().render(&scene, &view).faces.is_empty());
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 38.0);
        assert_eq!(view.camera, Camera::default());
    }
}
