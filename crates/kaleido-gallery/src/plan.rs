//! Per-frame plan: what a sample wants drawn, described as data.
//!
//! Sample state produces a [`FramePlan`]; [`encode`] replays it onto a wgpu
//! encoder. Keeping the two apart means frame behavior (uniform offsets,
//! draw parameters, early-return guards) is checkable without a device.

use kaleido_engine::render::RenderTarget;

/// Bytes in one column-major 4x4 f32 matrix.
pub const MATRIX_BYTES: u64 = 64;

/// One `draw` call, mirroring the underlying
/// `draw(vertex_count, instance_count, first_vertex, first_instance)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub vertex_count: u32,
    pub instance_count: u32,
    pub first_vertex: u32,
    pub first_instance: u32,

    /// Index into the session's bind groups, if the pipeline needs one.
    pub bind_group: Option<usize>,
}

/// One uniform-buffer upload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UniformWrite {
    pub offset: u64,
    pub data: [f32; 16],
}

impl UniformWrite {
    /// Byte range this write covers.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.offset + MATRIX_BYTES
    }
}

/// Everything one frame of a sample does: uploads, then a single render
/// pass issuing `draws` in order.
#[derive(Debug, Clone)]
pub struct FramePlan {
    pub clear_color: wgpu::Color,
    pub uniform_writes: Vec<UniformWrite>,
    pub draws: Vec<DrawCall>,
}

/// Rounds the per-instance uniform block up to the device's binding
/// alignment. With the common 256-byte alignment two 64-byte matrices land
/// at offsets 0 and 256.
pub fn uniform_stride(min_alignment: u32) -> u64 {
    MATRIX_BYTES.next_multiple_of(u64::from(min_alignment.max(1)))
}

/// Borrowed GPU resources backing a session's render pass.
pub struct PassResources<'a> {
    pub pipeline: &'a wgpu::RenderPipeline,
    pub vertex_buffer: Option<&'a wgpu::Buffer>,
    pub uniform_buffer: Option<&'a wgpu::Buffer>,
    pub bind_groups: Vec<&'a wgpu::BindGroup>,
    pub depth_view: Option<&'a wgpu::TextureView>,
}

/// Replays `plan` onto `target`: uniform uploads first, then one render
/// pass over all draws.
pub fn encode(
    queue: &wgpu::Queue,
    target: &mut RenderTarget<'_>,
    resources: &PassResources<'_>,
    plan: &FramePlan,
) {
    if let Some(ubo) = resources.uniform_buffer {
        for write in &plan.uniform_writes {
            queue.write_buffer(ubo, write.offset, bytemuck::cast_slice(&write.data));
        }
    }

    let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("kaleido sample pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(plan.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: resources.depth_view.map(|view| {
            wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    rpass.set_pipeline(resources.pipeline);

    if let Some(vbo) = resources.vertex_buffer {
        rpass.set_vertex_buffer(0, vbo.slice(..));
    }

    for draw in &plan.draws {
        if let Some(index) = draw.bind_group {
            let Some(group) = resources.bind_groups.get(index) else {
                continue;
            };
            rpass.set_bind_group(0, *group, &[]);
        }

        rpass.draw(
            draw.first_vertex..draw.first_vertex + draw.vertex_count,
            draw.first_instance..draw.first_instance + draw.instance_count,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_rounds_up_to_alignment() {
        assert_eq!(uniform_stride(256), 256);
        assert_eq!(uniform_stride(64), 64);
        assert_eq!(uniform_stride(32), 64);
        assert_eq!(uniform_stride(1), 64);
    }

    #[test]
    fn aligned_writes_do_not_overlap() {
        let stride = uniform_stride(256);
        let first = UniformWrite {
            offset: 0,
            data: [0.0; 16],
        };
        let second = UniformWrite {
            offset: stride,
            data: [0.0; 16],
        };
        assert!(first.range().end <= second.range().start);
    }
}
