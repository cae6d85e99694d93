//! Integration tests for the gallery: selection flow end to end at the plan
//! level, plus a device smoke test that only runs where an adapter exists.

use winit::dpi::PhysicalSize;

use kaleido_engine::render::{RenderCtx, RenderTarget};
use kaleido_gallery::plan::{self, DrawCall};
use kaleido_gallery::samples::{triangle, SampleKind, SampleSession};
use kaleido_gallery::selector::SelectorState;

// ==================== Selection Flow ====================

#[test]
fn selecting_triangle_yields_one_three_vertex_draw_on_black() {
    let mut selector: SelectorState<&'static str> = SelectorState::new();

    assert!(selector.select(SampleKind::Triangle).is_none());
    assert_eq!(selector.pending(), Some(SampleKind::Triangle));

    // Device acquisition succeeded; the session goes live.
    selector.activate("triangle session");
    assert!(selector.active_mut().is_some());

    // One simulated frame.
    let plan = triangle::frame_plan();
    assert_eq!(
        plan.draws,
        vec![DrawCall {
            vertex_count: 3,
            instance_count: 1,
            first_vertex: 0,
            first_instance: 0,
            bind_group: None,
        }]
    );
    assert!(plan.uniform_writes.is_empty());
    assert_eq!(
        (plan.clear_color.r, plan.clear_color.g, plan.clear_color.b, plan.clear_color.a),
        (0.0, 0.0, 0.0, 1.0)
    );
}

#[test]
fn failed_device_acquisition_resolves_to_the_noop_for_every_sample() {
    for kind in SampleKind::ALL {
        let mut selector: SelectorState<u32> = SelectorState::new();
        selector.select(kind);

        // No adapter: the selection aborts instead of erroring.
        selector.abort();

        assert!(selector.pending().is_none());
        assert!(selector.active_mut().is_none());
    }
}

#[test]
fn switching_samples_tears_down_before_loading() {
    let mut selector: SelectorState<&'static str> = SelectorState::new();
    selector.select(SampleKind::RotatingCube);
    selector.activate("cube");

    let previous = selector.select(SampleKind::TwoCube);
    assert_eq!(previous, Some("cube"));

    // The old session is gone before the new one exists.
    assert!(selector.active_mut().is_none());
    assert_eq!(selector.pending(), Some(SampleKind::TwoCube));
}

// ==================== Device Smoke Test ====================

fn headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .ok()?;

    pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: Some("kaleido gallery tests"),
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::default(),
        experimental_features: wgpu::ExperimentalFeatures::disabled(),
        memory_hints: wgpu::MemoryHints::Performance,
        trace: wgpu::Trace::Off,
    }))
    .ok()
}

#[test]
fn every_sample_encodes_one_frame_offscreen() {
    // No GPU on this machine (common on CI): nothing to verify.
    let Some((device, queue)) = headless_device() else {
        return;
    };

    let size = PhysicalSize::new(800, 600);
    let format = wgpu::TextureFormat::Bgra8Unorm;

    for kind in SampleKind::ALL {
        let ctx = RenderCtx::new(&device, &queue, format, size);
        let mut session = SampleSession::init(kind, &ctx);

        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen color"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());

        let plan = session
            .plan_frame(true)
            .expect("mounted sessions always produce a plan");

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("offscreen encoder"),
        });
        {
            let mut target = RenderTarget::new(&mut encoder, &color_view);
            plan::encode(&queue, &mut target, &session.resources(), &plan);
        }
        queue.submit(std::iter::once(encoder.finish()));
    }
}
