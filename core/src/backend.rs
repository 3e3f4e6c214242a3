use crate::error::MediaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSource {
    Image,
    Video,
}

/// The drawing surface and media element a player drives.
///
/// Mirrors the 2D canvas context closely enough that the browser shell is a
/// thin forwarding layer. Everything here is synchronous; the only async step
/// (starting playback) is handed back to the caller as a `PlayRequest`.
pub trait PlayerBackend {
    fn size(&self) -> SurfaceSize;
    fn resize(&mut self, size: SurfaceSize);

    fn save(&mut self);
    fn restore(&mut self);
    fn clear(&mut self);
    fn set_opacity(&mut self, opacity: f64);
    fn translate(&mut self, x: f64, y: f64);
    fn scale(&mut self, x: f64, y: f64);
    fn draw(
        &mut self,
        source: FrameSource,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), MediaError>;

    fn seek(&mut self, seconds: f64) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn is_muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);
    fn release(&mut self);
}
