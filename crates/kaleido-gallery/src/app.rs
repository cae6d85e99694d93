//! The gallery shell: keyboard selection plus the per-frame drive of the
//! active sample session.

use kaleido_engine::core::{App, AppControl, FrameCtx};
use kaleido_engine::render::RenderCtx;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::samples::{SampleKind, SampleSession};
use crate::selector::SelectorState;

pub struct GalleryApp {
    selector: SelectorState<SampleSession>,

    /// Cleared once the window is going away; frames after that must not
    /// touch the surface.
    mounted: bool,

    warned_no_gpu: bool,
}

impl GalleryApp {
    pub fn new() -> Self {
        Self {
            selector: SelectorState::new(),
            mounted: true,
            warned_no_gpu: false,
        }
    }

    fn request(&mut self, kind: SampleKind) {
        if let Some(previous) = self.selector.select(kind) {
            // Dropping the session releases its device resources and, since
            // the selector no longer holds it, stops its frames for good.
            drop(previous);
            log::debug!("previous sample session torn down");
        }

        if self.selector.pending().is_some() {
            log::info!("sample selected: {kind}");
        }
    }
}

impl Default for GalleryApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for GalleryApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.mounted = false;
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        match code {
                            KeyCode::Digit1 => self.request(SampleKind::Triangle),
                            KeyCode::Digit2 => self.request(SampleKind::RotatingCube),
                            KeyCode::Digit3 => self.request(SampleKind::TwoCube),
                            KeyCode::Escape => return AppControl::Exit,
                            _ => {}
                        }
                    }
                }
            }

            _ => {}
        }

        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(gpu) = ctx.gpu.as_deref_mut() else {
            // No device: every selection resolves to the no-op and the
            // surface stays blank.
            if self.selector.pending().is_some() {
                self.selector.abort();
                if !self.warned_no_gpu {
                    log::warn!("no GPU device available; samples are disabled");
                    self.warned_no_gpu = true;
                }
            }
            return AppControl::Continue;
        };

        if let Some(kind) = self.selector.pending() {
            let rctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), gpu.size());
            let session = SampleSession::init(kind, &rctx);
            self.selector.activate(session);
            log::info!("sample active: {kind}");
        }

        if let Some((_, session)) = self.selector.active_mut() {
            session.render(gpu, self.mounted);
        }

        if ctx.time.frame_index % 600 == 0 {
            log::debug!(
                "frame {} ({:.1} ms)",
                ctx.time.frame_index,
                ctx.time.dt * 1000.0
            );
        }

        AppControl::Continue
    }
}
