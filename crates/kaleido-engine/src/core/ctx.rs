use winit::window::{Window, WindowId};

use crate::device::Gpu;
use crate::time::FrameTime;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
///
/// `gpu` is `None` when device acquisition failed at window creation; the
/// loop keeps running so the application can degrade instead of exiting.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: Option<&'a mut Gpu<'w>>,
    pub time: FrameTime,
}
