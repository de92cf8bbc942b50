use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use viewport_common::{Camera, SurfaceSize, ViewportConfig};
use viewport_input::{CameraController, GamepadSnapshot, InputEvent, InputQueue, StepReport};
use viewport_kernel::Scene;

use crate::pipeline::paint;
use crate::renderer::{FaceRenderer, RenderView, Renderer};
use crate::sink::{DrawSink, Rect};

/// Cloneable flag that ends a [`FrameDriver`]'s loop.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Per-frame statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frames drawn so far, including this one.
    pub frame: u64,
    pub parts: usize,
    pub faces_drawn: usize,
    pub faces_culled: usize,
    /// Result of the most recent camera step.
    pub step: StepReport,
}

/// Owns everything one viewport touches per frame: scene, camera controller,
/// pending input and surface size.
///
/// A frame is [`advance`](Self::advance) (drain input, step the camera)
/// followed by [`draw`](Self::draw) (apply any resize, clear, project, paint).
/// [`tick`](Self::tick) does both. Hosts call it once per display refresh.
#[derive(Debug)]
pub struct FrameDriver {
    scene: Scene,
    controller: CameraController,
    input: InputQueue,
    surface: SurfaceSize,
    pending_resize: Option<SurfaceSize>,
    fov_degrees: f32,
    frame: u64,
    last_step: StepReport,
    stop: StopHandle,
}

impl FrameDriver {
    pub fn new(scene: Scene, config: &ViewportConfig, surface: SurfaceSize) -> Self {
        Self {
            scene,
            controller: CameraController::new(config),
            input: InputQueue::new(),
            surface,
            // The sink learns its size on the first draw.
            pending_resize: Some(surface),
            fov_degrees: config.fov_degrees,
            frame: 0,
            last_step: StepReport::default(),
            stop: StopHandle::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn camera(&self) -> &Camera {
        self.controller.camera()
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Queue a host input event for the next [`advance`](Self::advance).
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Queue a surface resize; it is applied before the next projection.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.pending_resize = Some(size);
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.stop.is_stopped()
    }

    /// The view the next draw would use.
    pub fn view(&self) -> RenderView {
        RenderView {
            camera: *self.controller.camera(),
            surface: self.pending_resize.unwrap_or(self.surface),
            fov_degrees: self.fov_degrees,
        }
    }

    /// Apply all queued input, then step the camera once.
    pub fn advance(&mut self, gamepad: Option<&GamepadSnapshot>) -> Option<StepReport> {
        if self.stop.is_stopped() {
            return None;
        }
        for event in self.input.drain() {
            self.controller.handle(event);
        }
        self.last_step = self.controller.update(gamepad);
        Some(self.last_step)
    }

    /// Draw the current state into `sink`.
    pub fn draw<S: DrawSink + ?Sized>(&mut self, sink: &mut S) -> Option<FrameStats> {
        if self.stop.is_stopped() {
            return None;
        }
        self.frame += 1;
        let _span = tracing::info_span!("render_frame", frame = self.frame).entered();

        if let Some(size) = self.pending_resize.take() {
            tracing::debug!(width = size.width, height = size.height, ratio = size.pixel_ratio, "resize");
            self.surface = size;
            sink.resize(size);
        }

        sink.clear(Rect::covering(&self.surface));
        let list = FaceRenderer.render(&self.scene, &self.view());
        paint(&list.faces, sink);

        Some(FrameStats {
            frame: self.frame,
            parts: list.parts,
            faces_drawn: list.faces.len(),
            faces_culled: list.culled,
            step: self.last_step,
        })
    }

    /// One full frame: [`advance`](Self::advance) then [`draw`](Self::draw).
    /// Returns `None` once stopped.
    pub fn tick<S: DrawSink + ?Sized>(
        &mut self,
        sink: &mut S,
        gamepad: Option<&GamepadSnapshot>,
    ) -> Option<FrameStats> {
        self.advance(gamepad)?;
        self.draw(sink)
    }
}
