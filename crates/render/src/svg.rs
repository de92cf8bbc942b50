use std::fmt::Write;

use viewport_common::{Color, SurfaceSize};

use crate::sink::{DrawSink, Rect};

/// Draw sink that renders a frame as an SVG document.
///
/// The document is sized in device pixels with a logical `viewBox`, which is
/// the SVG form of the device-pixel-ratio transform.
#[derive(Debug, Clone)]
pub struct SvgSink {
    size: SurfaceSize,
    background: Color,
    body: String,
    path: String,
    fill_color: Color,
    alpha: f32,
}

impl SvgSink {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            background: Color::new("#000000"),
            body: String::new(),
            path: String::new(),
            fill_color: Color::new("#000000"),
            alpha: 1.0,
        }
    }

    /// Colour painted by `clear`.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Number of filled paths in the current frame.
    pub fn path_count(&self) -> usize {
        self.body.matches("<path ").count()
    }

    /// The finished document.
    pub fn document(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n{}</svg>\n",
            self.size.device_width(),
            self.size.device_height(),
            self.size.width,
            self.size.height,
            self.body
        )
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

impl DrawSink for SvgSink {
    fn clear(&mut self, region: Rect) {
        let full = Rect::covering(&self.size);
        if region == full {
            self.body.clear();
        }
        let _ = writeln!(
            self.body,
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            region.x,
            region.y,
            region.width,
            region.height,
            escape_attr(self.background.as_str())
        );
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let _ = write!(self.path, "M{x:.2} {y:.2} ");
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let _ = write!(self.path, "L{x:.2} {y:.2} ");
    }

    fn close_path(&mut self) {
        self.path.push('Z');
    }

    fn set_fill_color(&mut self, color: &Color) {
        self.fill_color = color.clone();
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn fill(&mut self) {
        let _ = writeln!(
            self.body,
            "  <path d=\"{}\" fill=\"{}\" fill-opacity=\"{:.3}\"/>",
            self.path.trim_end(),
            escape_attr(self.fill_color.as_str()),
            self.alpha
        );
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }
}
