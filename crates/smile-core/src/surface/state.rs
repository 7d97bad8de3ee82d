/// Validity and dimensions of the current drawing surface, in physical pixels.
///
/// When `valid` is false the stored dimensions are stale: they describe a
/// surface that no longer exists and must not be used for viewport or
/// framebuffer sizing.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SurfaceState {
    width: u32,
    height: u32,
    valid: bool,
}

impl SurfaceState {
    /// An invalid `0x0` surface.
    pub const fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            valid: false,
        }
    }

    /// Records new dimensions and marks the surface valid.
    pub fn update_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.valid = true;
    }

    /// Marks the surface invalid. Dimensions are kept but become stale.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns `(width, height)` only while the surface is valid.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.valid.then_some((self.width, self.height))
    }

    /// Width over height, or `None` for an invalid or zero-height surface.
    ///
    /// Hosts use this to keep content square on non-square surfaces.
    pub fn aspect(&self) -> Option<f32> {
        match self.size() {
            Some((w, h)) if h > 0 => Some(w as f32 / h as f32),
            _ => None,
        }
    }
}

/// Clamps a host-reported extent to a non-negative pixel count.
///
/// Hosts may deliver transient negative sizes during rotation.
pub fn clamp_extent(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
