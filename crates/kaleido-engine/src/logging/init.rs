use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "kaleido_gallery=debug,wgpu=warn"). When `None`, `RUST_LOG` applies,
/// falling back to info-level output.
///
/// This function is idempotent; subsequent calls are ignored. Intended usage
/// is early in `main`.
pub fn init_logging(env_filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
