use anyhow::Result;
use winit::dpi::LogicalSize;

use kaleido_engine::device::GpuInit;
use kaleido_engine::logging::init_logging;
use kaleido_engine::window::{Runtime, RuntimeConfig};
use kaleido_gallery::app::GalleryApp;
use kaleido_gallery::samples::SampleKind;

fn main() -> Result<()> {
    init_logging(None);

    for (key, kind) in [1, 2, 3].into_iter().zip(SampleKind::ALL) {
        log::info!("press {key} for {kind}");
    }
    log::info!("press esc to quit");

    Runtime::run(
        RuntimeConfig {
            title: "kaleido gallery".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        },
        GpuInit::default(),
        GalleryApp::new(),
    )
}
