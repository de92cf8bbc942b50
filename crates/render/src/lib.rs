//! Rendering: painter's-algorithm projection of scene parts onto a 2D sink.
//!
//! # Invariants
//! - Renderer cannot mutate the scene.
//! - Vertices at or behind the camera plane are never projected.
//! - A face is drawn only if all four of its corners project.
//! - Faces are painted far to near.
//!
//! # Pipeline
//! For every `Part` under the workspace: build the eight box corners, rotate
//! and translate them into the world, move them into camera space, project,
//! assemble faces, sort all faces globally by mean depth and fill them in
//! that order through a [`DrawSink`].

mod frame;
mod pipeline;
mod projection;
mod renderer;
mod sink;
mod svg;

pub use frame::{FrameDriver, FrameStats, StopHandle};
pub use pipeline::{
    BOX_FACES, Face, FaceList, assemble_faces, box_corners, collect_faces, paint, part_faces,
    part_vertices, sort_faces,
};
pub use projection::{Projector, ScreenPoint, world_to_camera};
pub use renderer::{DebugTextRenderer, FaceRenderer, RenderView, Renderer};
pub use sink::{DrawCommand, DrawSink, RecordingSink, Rect};
pub use svg::SvgSink;

pub fn crate_info() -> &'static str {
    "viewport-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
