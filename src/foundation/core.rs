use std::sync::Arc;

use crate::foundation::error::{FlipbookError, FlipbookResult};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameSize {
    pub width: u32,  // must be > 0
    pub height: u32, // must be > 0
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> FlipbookResult<Self> {
        if width == 0 || height == 0 {
            return Err(FlipbookError::validation(
                "FrameSize width and height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One decoded frame in premultiplied RGBA8 form.
///
/// Cloning a frame is cheap: pixel data is shared and never mutated after
/// construction.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Frame {
    /// Pixel at `(x, y)` as premultiplied RGBA8, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba8_premul[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_rejects_zero_dimensions() {
        assert!(FrameSize::new(0, 32).is_err());
        assert!(FrameSize::new(32, 0).is_err());
        assert!(FrameSize::new(32, 32).is_ok());
    }

    #[test]
    fn frame_pixel_bounds() {
        let f = Frame {
            width: 2,
            height: 1,
            rgba8_premul: Arc::new(vec![1, 2, 3, 4, 5, 6, 7, 8]),
        };
        assert_eq!(f.pixel(0, 0), Some([1, 2, 3, 4]));
        assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(f.pixel(2, 0), None);
        assert_eq!(f.pixel(0, 1), None);
    }
}
