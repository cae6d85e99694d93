//! Two-cube sample.
//!
//! Same mesh as the rotating cube, but the pipeline reads position + uv and
//! the fragment color comes from the interpolated corner position. Two model
//! matrices share one uniform buffer at device-aligned offsets; each draw
//! binds its own sub-range through a dedicated bind group.

use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;
use std::num::NonZeroU64;
use wgpu::util::DeviceExt;

use kaleido_engine::render::RenderCtx;

use crate::geometry;
use crate::plan::{self, DrawCall, FramePlan, PassResources, UniformWrite};

use super::{DEPTH_FORMAT, ROTATION_STEP};

const SHADER: &str = include_str!("shaders/two_cube.wgsl");

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.5,
    g: 0.5,
    b: 0.5,
    a: 1.0,
};

const ROTATION_AXIS: Vec3 = Vec3::new(1.0, -1.0, 0.0);
const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -7.0);

/// World-space x offset separating the two instances.
const INSTANCE_SPACING: f32 = 4.0;

/// Frame state for both cube instances.
///
/// The two angles advance by the same fixed step but are stored and applied
/// independently; nothing ever copies one onto the other.
#[derive(Debug, Clone)]
pub struct TwoCubeState {
    angle_a: f32,
    angle_b: f32,
    projection: Mat4,
    uniform_stride: u64,
}

impl TwoCubeState {
    pub fn new(aspect: f32, min_uniform_alignment: u32) -> Self {
        let projection = Mat4::perspective_rh(FRAC_PI_2, aspect, 1.0, 100.0)
            * Mat4::from_translation(CAMERA_OFFSET);
        Self {
            angle_a: 0.0,
            angle_b: 0.0,
            projection,
            uniform_stride: plan::uniform_stride(min_uniform_alignment),
        }
    }

    pub fn angles(&self) -> (f32, f32) {
        (self.angle_a, self.angle_b)
    }

    /// Byte offset of the second instance's matrix in the shared buffer.
    pub fn uniform_stride(&self) -> u64 {
        self.uniform_stride
    }

    /// Model matrix of the instance offset toward +x.
    pub fn model_a(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(INSTANCE_SPACING, 0.0, 0.0))
            * Mat4::from_axis_angle(ROTATION_AXIS.normalize(), self.angle_a)
    }

    /// Model matrix of the instance offset toward -x.
    pub fn model_b(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(-INSTANCE_SPACING, 0.0, 0.0))
            * Mat4::from_axis_angle(ROTATION_AXIS.normalize(), self.angle_b)
    }

    fn advance(&mut self) {
        self.angle_a += ROTATION_STEP;
        self.angle_b += ROTATION_STEP;
    }

    /// Advances both instances and describes the frame.
    ///
    /// Returns `None` once the surface is unmounted: no state change, no
    /// uploads, no draws.
    pub fn plan_frame(&mut self, mounted: bool) -> Option<FramePlan> {
        if !mounted {
            return None;
        }

        self.advance();

        let transform_a = self.projection * self.model_a();
        let transform_b = self.projection * self.model_b();

        Some(FramePlan {
            clear_color: CLEAR,
            uniform_writes: vec![
                UniformWrite {
                    offset: 0,
                    data: transform_a.to_cols_array(),
                },
                UniformWrite {
                    offset: self.uniform_stride,
                    data: transform_b.to_cols_array(),
                },
            ],
            draws: vec![
                DrawCall {
                    vertex_count: geometry::CUBE_VERTEX_COUNT,
                    instance_count: 1,
                    first_vertex: 0,
                    first_instance: 0,
                    bind_group: Some(0),
                },
                DrawCall {
                    vertex_count: geometry::CUBE_VERTEX_COUNT,
                    instance_count: 1,
                    first_vertex: 0,
                    first_instance: 0,
                    bind_group: Some(1),
                },
            ],
        })
    }
}

pub struct TwoCubeSession {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_groups: [wgpu::BindGroup; 2],
    depth_view: wgpu::TextureView,
    pub(crate) fallback_view: wgpu::TextureView,
    pub(crate) state: TwoCubeState,
}

impl TwoCubeSession {
    pub fn init(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kaleido two-cube shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("kaleido two-cube vbo"),
                contents: bytemuck::cast_slice(&geometry::CUBE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("kaleido two-cube bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: NonZeroU64::new(plan::MATRIX_BYTES),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("kaleido two-cube pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("kaleido two-cube pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[geometry::position_uv_layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),

                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        let state = TwoCubeState::new(
            ctx.aspect_ratio(),
            ctx.device.limits().min_uniform_buffer_offset_alignment,
        );

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kaleido two-cube ubo"),
            size: state.uniform_stride() + plan::MATRIX_BYTES,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_groups = [
            bind_group_for(ctx, &bind_group_layout, &uniform_buffer, 0, "a"),
            bind_group_for(
                ctx,
                &bind_group_layout,
                &uniform_buffer,
                state.uniform_stride(),
                "b",
            ),
        ];

        let depth_view = super::depth_target(ctx, "kaleido two-cube depth");
        let fallback_view = super::fallback_color_target(ctx, "kaleido two-cube fallback");

        Self {
            pipeline,
            vertex_buffer,
            uniform_buffer,
            bind_groups,
            depth_view,
            fallback_view,
            state,
        }
    }

    pub(crate) fn resources(&self) -> PassResources<'_> {
        PassResources {
            pipeline: &self.pipeline,
            vertex_buffer: Some(&self.vertex_buffer),
            uniform_buffer: Some(&self.uniform_buffer),
            bind_groups: self.bind_groups.iter().collect(),
            depth_view: Some(&self.depth_view),
        }
    }
}

/// Bind group exposing one matrix-sized sub-range of the shared buffer.
fn bind_group_for(
    ctx: &RenderCtx<'_>,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    offset: u64,
    which: &str,
) -> wgpu::BindGroup {
    ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("kaleido two-cube bind group {which}")),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer,
                offset,
                size: NonZeroU64::new(plan::MATRIX_BYTES),
            }),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const ASPECT: f32 = 800.0 / 600.0;
    const ALIGN: u32 = 256;

    #[test]
    fn instances_stay_apart_by_their_x_offsets() {
        let mut state = TwoCubeState::new(ASPECT, ALIGN);
        for _ in 0..25 {
            let _ = state.plan_frame(true);
        }

        // T * R keeps the translation column intact.
        assert_eq!(state.model_a().w_axis.x, INSTANCE_SPACING);
        assert_eq!(state.model_b().w_axis.x, -INSTANCE_SPACING);
    }

    #[test]
    fn angles_accumulate_independently_per_instance() {
        let mut state = TwoCubeState::new(ASPECT, ALIGN);
        let frames = 45;
        for _ in 0..frames {
            let _ = state.plan_frame(true);
        }

        let (a, b) = state.angles();
        let expected = frames as f32 * ROTATION_STEP;
        assert!((a - expected).abs() < 1e-5);
        assert!((b - expected).abs() < 1e-5);
        assert!((expected - PI / 4.0).abs() < 1e-5);
    }

    #[test]
    fn uniform_writes_land_at_disjoint_aligned_offsets() {
        let mut state = TwoCubeState::new(ASPECT, ALIGN);
        let plan = state.plan_frame(true).expect("mounted");

        assert_eq!(plan.uniform_writes.len(), 2);
        assert_eq!(plan.uniform_writes[0].offset, 0);
        assert_eq!(plan.uniform_writes[1].offset, 256);
        assert!(
            plan.uniform_writes[0].range().end <= plan.uniform_writes[1].range().start,
            "matrix writes must not alias"
        );
    }

    #[test]
    fn both_draws_issue_in_one_pass_with_their_own_bind_groups() {
        let mut state = TwoCubeState::new(ASPECT, ALIGN);
        let plan = state.plan_frame(true).expect("mounted");

        assert_eq!(plan.draws.len(), 2);
        assert_eq!(plan.draws[0].bind_group, Some(0));
        assert_eq!(plan.draws[1].bind_group, Some(1));
        for draw in &plan.draws {
            assert_eq!(draw.vertex_count, geometry::CUBE_VERTEX_COUNT);
            assert_eq!(draw.instance_count, 1);
        }
    }

    #[test]
    fn unmounted_surface_skips_the_frame_entirely() {
        let mut state = TwoCubeState::new(ASPECT, ALIGN);
        let _ = state.plan_frame(true);
        let before = state.angles();

        assert!(state.plan_frame(false).is_none());
        assert_eq!(state.angles(), before);
    }

    #[test]
    fn transforms_compose_projection_with_each_model() {
        let mut state = TwoCubeState::new(ASPECT, ALIGN);
        let plan = state.plan_frame(true).expect("mounted");

        let projection = Mat4::perspective_rh(FRAC_PI_2, ASPECT, 1.0, 100.0)
            * Mat4::from_translation(CAMERA_OFFSET);
        let expected_a = projection * state.model_a();
        let expected_b = projection * state.model_b();

        for (written, expected) in plan
            .uniform_writes
            .iter()
            .zip([expected_a, expected_b])
        {
            for (w, e) in written.data.iter().zip(expected.to_cols_array().iter()) {
                assert!((w - e).abs() < 1e-5);
            }
        }
    }
}
