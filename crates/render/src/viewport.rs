/// Highest device pixel ratio the surface renders at.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Window size in logical pixels plus the display scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scale_factor: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// From the physical size winit reports.
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self::new(width as f64 / scale, height as f64 / scale, scale)
    }

    /// Scale factor capped so very dense displays do not render 3x or 4x.
    pub fn pixel_ratio(&self) -> f64 {
        self.scale_factor.min(MAX_PIXEL_RATIO)
    }

    /// Render target size in pixels, never zero.
    pub fn surface_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        (
            ((self.width * ratio).round() as u32).max(1),
            ((self.height * ratio).round() as u32).max(1),
        )
    }

    pub fn aspect(&self) -> f32 {
        if self.height <= 0.0 {
            return 1.0;
        }
        (self.width / self.height) as f32
    }

    pub fn is_minimized(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        assert_eq!(Viewport::new(800.0, 600.0, 1.0).pixel_ratio(), 1.0);
        assert_eq!(Viewport::new(800.0, 600.0, 1.5).pixel_ratio(), 1.5);
        assert_eq!(Viewport::new(800.0, 600.0, 3.0).pixel_ratio(), 2.0);
    }

    #[test]
    fn surface_size_uses_capped_ratio() {
        let vp = Viewport::from_physical(2400, 1800, 3.0);
        assert_eq!((vp.width, vp.height), (800.0, 600.0));
        assert_eq!(vp.surface_size(), (1600, 1200));
        assert!((vp.aspect() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_is_safe() {
        let vp = Viewport::from_physical(0, 0, 1.0);
        assert!(vp.is_minimized());
        assert_eq!(vp.aspect(), 1.0);
        assert_eq!(vp.surface_size(), (1, 1));
    }
}
