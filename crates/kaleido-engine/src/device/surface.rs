use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// Picks the first preferred format the surface supports.
///
/// Falls back to the surface's first reported format so that an exotic
/// backend still renders, just not in the requested format.
pub(crate) fn choose_surface_format(
    supported: &[wgpu::TextureFormat],
    preference: &[wgpu::TextureFormat],
) -> Option<wgpu::TextureFormat> {
    if supported.is_empty() {
        return None;
    }

    preference
        .iter()
        .copied()
        .find(|f| supported.contains(f))
        .or_else(|| supported.first().copied())
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    if new_size.width == 0 || new_size.height == 0 {
        *size = new_size;
        return;
    }

    *size = new_size;
    config.width = new_size.width;
    config.height = new_size.height;

    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat::{Bgra8Unorm, Bgra8UnormSrgb, Rgba8Unorm, Rgba8UnormSrgb};

    #[test]
    fn preferred_format_wins_when_supported() {
        let supported = [Rgba8UnormSrgb, Bgra8Unorm];
        let preference = [Bgra8Unorm, Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&supported, &preference),
            Some(Bgra8Unorm)
        );
    }

    #[test]
    fn preference_order_is_respected() {
        let supported = [Bgra8UnormSrgb, Bgra8Unorm];
        let preference = [Bgra8Unorm, Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&supported, &preference),
            Some(Bgra8Unorm)
        );
    }

    #[test]
    fn falls_back_to_first_supported_format() {
        let supported = [Rgba8Unorm];
        let preference = [Bgra8Unorm];
        assert_eq!(choose_surface_format(&supported, &preference), Some(Rgba8Unorm));
    }

    #[test]
    fn no_supported_formats_yields_none() {
        assert_eq!(choose_surface_format(&[], &[Bgra8Unorm]), None);
    }

    #[test]
    fn unsupported_alpha_mode_request_falls_back() {
        let supported = [wgpu::CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&supported, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
        assert_eq!(
            choose_alpha_mode(&[], None),
            wgpu::CompositeAlphaMode::Auto
        );
    }
}
