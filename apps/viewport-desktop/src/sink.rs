use std::collections::HashSet;

use egui::{Color32, Pos2, Rect as EguiRect, Shape, Stroke, Vec2};
use viewport_common::{Color, SurfaceSize};
use viewport_render::{DrawSink, Rect};

/// Draw sink that turns fills into egui shapes inside a screen region.
///
/// Logical viewport units map 1:1 to egui points; egui applies the device
/// pixel ratio when it tessellates.
pub struct EguiSink {
    origin: Pos2,
    size: SurfaceSize,
    background: Color32,
    shapes: Vec<Shape>,
    path: Vec<Pos2>,
    fill: [u8; 3],
    alpha: f32,
    warned: HashSet<String>,
}

impl EguiSink {
    pub fn new(background: Color32) -> Self {
        Self {
            origin: Pos2::ZERO,
            size: SurfaceSize::default(),
            background,
            shapes: Vec::new(),
            path: Vec::new(),
            fill: [255, 255, 255],
            alpha: 1.0,
            warned: HashSet::new(),
        }
    }

    /// Screen position of the viewport's top-left corner.
    pub fn set_origin(&mut self, origin: Pos2) {
        self.origin = origin;
    }

    /// Shapes produced since the last call.
    pub fn take_shapes(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.shapes)
    }

    fn point(&self, x: f32, y: f32) -> Pos2 {
        self.origin + Vec2::new(x, y)
    }
}

impl DrawSink for EguiSink {
    fn clear(&mut self, region: Rect) {
        if region == Rect::covering(&self.size) {
            self.shapes.clear();
        }
        let min = self.point(region.x, region.y);
        let rect = EguiRect::from_min_size(min, Vec2::new(region.width, region.height));
        self.shapes.push(Shape::rect_filled(rect, 0.0, self.background));
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.clear();
        self.path.push(self.point(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.push(self.point(x, y));
    }

    fn close_path(&mut self) {}

    fn set_fill_color(&mut self, color: &Color) {
        match color.to_rgb() {
            Some(rgb) => self.fill = rgb,
            None => {
                if self.warned.insert(color.as_str().to_string()) {
                    tracing::warn!(color = %color, "unparseable fill colour, using white");
                }
                self.fill = [255, 255, 255];
            }
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn fill(&mut self) {
        if self.path.len() < 3 {
            return;
        }
        let [r, g, b] = self.fill;
        let a = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        let color = Color32::from_rgba_unmultiplied(r, g, b, a);
        self.shapes
            .push(Shape::convex_polygon(self.path.clone(), color, Stroke::NONE));
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(sink: &mut EguiSink) {
        sink.begin_path();
        sink.move_to(0.0, 0.0);
        sink.line_to(10.0, 0.0);
        sink.line_to(10.0, 10.0);
        sink.line_to(0.0, 10.0);
        sink.close_path();
        sink.fill();
    }

    #[test]
    fn fills_become_polygons_offset_by_origin() {
        let mut sink = EguiSink::new(Color32::BLACK);
        sink.set_origin(Pos2::new(100.0, 50.0));
        sink.set_fill_color(&Color::new("#ff0000"));
        quad(&mut sink);
        let shapes = sink.take_shapes();
        assert_eq!(shapes.len(), 1);
        let Shape::Path(path) = &shapes[0] else {
            panic!("expected a path shape");
        };
        assert_eq!(path.points[0], Pos2::new(100.0, 50.0));
        assert_eq!(path.points[2], Pos2::new(110.0, 60.0));
        assert!(path.closed);
        assert_eq!(path.fill, Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn alpha_is_clamped_for_egui() {
        let mut sink = EguiSink::new(Color32::BLACK);
        sink.set_global_alpha(1.5);
        quad(&mut sink);
        sink.set_global_alpha(-1.0);
        quad(&mut sink);
        let shapes = sink.take_shapes();
        let alphas: Vec<u8> = shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Path(p) => Some(p.fill.a()),
                _ => None,
            })
            .collect();
        assert_eq!(alphas, vec![255, 0]);
    }

    #[test]
    fn full_clear_drops_previous_frame() {
        let mut sink = EguiSink::new(Color32::BLACK);
        let size = SurfaceSize::new(50.0, 50.0, 1.0);
        sink.resize(size);
        quad(&mut sink);
        sink.clear(Rect::covering(&size));
        let shapes = sink.take_shapes();
        assert_eq!(shapes.len(), 1);
        assert!(matches!(shapes[0], Shape::Rect(_)));
    }

    #[test]
    fn bad_colour_falls_back_to_white() {
        let mut sink = EguiSink::new(Color32::BLACK);
        sink.set_fill_color(&Color::new("chartreuse"));
        quad(&mut sink);
        let shapes = sink.take_shapes();
        let Shape::Path(path) = &shapes[0] else {
            panic!("expected a path shape");
        };
        assert_eq!(path.fill, Color32::WHITE);
    }
}
