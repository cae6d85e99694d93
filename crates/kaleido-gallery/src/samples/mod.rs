//! The three rendering samples.
//!
//! Each sample owns a session type (pipeline + buffers + attachments built
//! once at init) and a frame-state type whose `plan_frame` is pure. The
//! variants are dispatched by exhaustive matching; adding a sample means the
//! compiler walks you through every seam.

pub mod cube;
pub mod triangle;
pub mod two_cube;

use std::fmt;

use kaleido_engine::device::{Gpu, SurfaceErrorAction};
use kaleido_engine::render::{RenderCtx, RenderTarget};

use crate::plan::{self, FramePlan, PassResources};

pub use cube::{CubeSession, CubeState};
pub use triangle::TriangleSession;
pub use two_cube::{TwoCubeSession, TwoCubeState};

/// Depth attachment format shared by the cube samples.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Fixed per-frame rotation increment shared by both rotating samples.
pub const ROTATION_STEP: f32 = std::f32::consts::PI / 90.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SampleKind {
    Triangle,
    RotatingCube,
    TwoCube,
}

impl SampleKind {
    pub const ALL: [SampleKind; 3] = [
        SampleKind::Triangle,
        SampleKind::RotatingCube,
        SampleKind::TwoCube,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SampleKind::Triangle => "TRIANGLE",
            SampleKind::RotatingCube => "ROTATING CUBE",
            SampleKind::TwoCube => "TWO CUBE",
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Live resources of the selected sample.
pub enum SampleSession {
    Triangle(TriangleSession),
    Cube(CubeSession),
    TwoCube(TwoCubeSession),
}

impl SampleSession {
    /// Builds the session for `kind` against an already-acquired device.
    ///
    /// Pipeline or shader validation failures surface as wgpu errors; the
    /// only degradable failure is device acquisition, which callers handle
    /// before ever reaching this point.
    pub fn init(kind: SampleKind, ctx: &RenderCtx<'_>) -> Self {
        match kind {
            SampleKind::Triangle => Self::Triangle(TriangleSession::init(ctx)),
            SampleKind::RotatingCube => Self::Cube(CubeSession::init(ctx)),
            SampleKind::TwoCube => Self::TwoCube(TwoCubeSession::init(ctx)),
        }
    }

    /// Advances per-frame state and describes the frame.
    ///
    /// `None` means this frame must not touch the device at all (the
    /// two-cube sample bails out once the surface is unmounted).
    pub fn plan_frame(&mut self, mounted: bool) -> Option<FramePlan> {
        match self {
            Self::Triangle(_) => Some(triangle::frame_plan()),
            Self::Cube(session) => Some(session.state.plan_frame()),
            Self::TwoCube(session) => session.state.plan_frame(mounted),
        }
    }

    /// Borrowed GPU resources backing this session's render pass.
    pub fn resources(&self) -> PassResources<'_> {
        match self {
            Self::Triangle(session) => session.resources(),
            Self::Cube(session) => session.resources(),
            Self::TwoCube(session) => session.resources(),
        }
    }

    fn fallback_view(&self) -> &wgpu::TextureView {
        match self {
            Self::Triangle(session) => &session.fallback_view,
            Self::Cube(session) => &session.fallback_view,
            Self::TwoCube(session) => &session.fallback_view,
        }
    }

    /// Renders one frame: plan, acquire the surface texture, encode, submit.
    ///
    /// When the surface has nothing to hand out, the pass runs against the
    /// session's pre-allocated offscreen target instead, so frame state and
    /// uniform contents keep advancing.
    pub fn render(&mut self, gpu: &mut Gpu<'_>, mounted: bool) {
        let Some(plan) = self.plan_frame(mounted) else {
            return;
        };

        match gpu.begin_frame() {
            Ok(mut frame) => {
                {
                    let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
                    plan::encode(gpu.queue(), &mut target, &self.resources(), &plan);
                }
                gpu.submit(frame);
            }
            Err(err) => {
                if gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                    log::error!("fatal surface error; frame dropped");
                    return;
                }

                let mut encoder =
                    gpu.device()
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("kaleido offscreen encoder"),
                        });
                {
                    let mut target = RenderTarget::new(&mut encoder, self.fallback_view());
                    plan::encode(gpu.queue(), &mut target, &self.resources(), &plan);
                }
                gpu.queue().submit(std::iter::once(encoder.finish()));
            }
        }
    }
}

/// Offscreen color target used when the surface has no texture to hand out.
pub(crate) fn fallback_color_target(ctx: &RenderCtx<'_>, label: &str) -> wgpu::TextureView {
    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: ctx.size.width.max(1),
            height: ctx.size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: ctx.surface_format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Depth attachment sized to the drawable area.
pub(crate) fn depth_target(ctx: &RenderCtx<'_>, label: &str) -> wgpu::TextureView {
    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: ctx.size.width.max(1),
            height: ctx.size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
