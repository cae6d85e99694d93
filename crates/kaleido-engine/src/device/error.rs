/// Errors raised while bringing up the GPU context.
///
/// Everything here degrades to "run without a device": the window stays open
/// and the application decides what a GPU-less frame means.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("window has zero size")]
    ZeroSize,

    #[error("failed to create surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    AdapterUnavailable,

    #[error("failed to request device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}
