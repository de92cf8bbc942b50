use viewport_common::{Color, SurfaceSize};

/// Axis-aligned region in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// The whole surface.
    pub fn covering(size: &SurfaceSize) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }
}

/// A canvas-like 2D target for path fills.
///
/// Coordinates are logical; implementations apply the device pixel ratio they
/// were last given through [`resize`](Self::resize).
pub trait DrawSink {
    fn clear(&mut self, region: Rect);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn close_path(&mut self);
    fn set_fill_color(&mut self, color: &Color);
    fn set_global_alpha(&mut self, alpha: f32);
    fn fill(&mut self);

    /// The surface changed size: recompute the backing store and reset the
    /// logical-to-device transform.
    fn resize(&mut self, _size: SurfaceSize) {}
}

/// One call made on a [`DrawSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    ClosePath,
    SetFillColor(Color),
    SetGlobalAlpha(f32),
    Fill,
    Resize(SurfaceSize),
}

/// Sink that records every call, for tests and replay.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `fill` calls recorded.
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill))
            .count()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl DrawSink for RecordingSink {
    fn clear(&mut self, region: Rect) {
        self.commands.push(DrawCommand::Clear(region));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn set_fill_color(&mut self, color: &Color) {
        self.commands.push(DrawCommand::SetFillColor(color.clone()));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::SetGlobalAlpha(alpha));
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.commands.push(DrawCommand::Resize(size));
    }
}
