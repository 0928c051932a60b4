use kurbo::{Affine, Point, Vec2};

use crate::foundation::core::{Frame, Position};
use crate::render::surface::RenderSurface;

/// Reference software render surface: a fixed-size premultiplied RGBA8
/// canvas.
///
/// Axis-aligned draws are a clipped source-over blit; rotated draws sample
/// the frame through the inverse transform (nearest neighbor). Intended for
/// tests and headless use; a real renderer supplies its own
/// [`RenderSurface`].
#[derive(Clone, Debug)]
pub struct CpuSurface {
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
}

impl CpuSurface {
    /// Create a fully transparent canvas of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba8_premul: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.rgba8_premul.fill(0);
    }

    /// Pixel at `(x, y)` as premultiplied RGBA8, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let px = &self.rgba8_premul[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Raw canvas bytes, row-major premultiplied RGBA8.
    pub fn data(&self) -> &[u8] {
        &self.rgba8_premul
    }

    fn blend_pixel(&mut self, x: i64, y: i64, src: [u8; 4]) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let dst = &mut self.rgba8_premul[idx..idx + 4];
        let out = over([dst[0], dst[1], dst[2], dst[3]], src);
        dst.copy_from_slice(&out);
    }
}

impl RenderSurface for CpuSurface {
    fn draw_frame(&mut self, frame: &Frame, pos: Position) {
        for fy in 0..frame.height {
            for fx in 0..frame.width {
                let idx = (fy as usize * frame.width as usize + fx as usize) * 4;
                let src = &frame.rgba8_premul[idx..idx + 4];
                if src[3] == 0 {
                    continue;
                }
                self.blend_pixel(
                    i64::from(pos.x) + i64::from(fx),
                    i64::from(pos.y) + i64::from(fy),
                    [src[0], src[1], src[2], src[3]],
                );
            }
        }
    }

    fn draw_frame_rotated(&mut self, frame: &Frame, pos: Position, angle_deg: f64) {
        if angle_deg == 0.0 {
            return self.draw_frame(frame, pos);
        }
        let w = f64::from(frame.width);
        let h = f64::from(frame.height);
        let center = Vec2::new(w / 2.0, h / 2.0);
        // T(pos) * T(center) * R(angle) * T(-center); positive angles read
        // clockwise in y-down screen coordinates.
        let transform = Affine::translate(Vec2::new(f64::from(pos.x), f64::from(pos.y)) + center)
            * Affine::rotate(angle_deg.to_radians())
            * Affine::translate(-center);
        let inverse = transform.inverse();

        let corners = [
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(0.0, h),
            Point::new(w, h),
        ]
        .map(|p| transform * p);
        let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = corners
            .iter()
            .map(|p| p.x)
            .fold(f64::NEG_INFINITY, f64::max);
        let max_y = corners
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);

        let x0 = (min_x.floor() as i64).max(0);
        let y0 = (min_y.floor() as i64).max(0);
        let x1 = (max_x.ceil() as i64).min(i64::from(self.width));
        let y1 = (max_y.ceil() as i64).min(i64::from(self.height));

        for dy in y0..y1 {
            for dx in x0..x1 {
                let src_pt = inverse * Point::new(dx as f64 + 0.5, dy as f64 + 0.5);
                if src_pt.x < 0.0 || src_pt.x >= w || src_pt.y < 0.0 || src_pt.y >= h {
                    continue;
                }
                let Some(src) = frame.pixel(src_pt.x as u32, src_pt.y as u32) else {
                    continue;
                };
                if src[3] == 0 {
                    continue;
                }
                self.blend_pixel(dx, dy, src);
            }
        }
    }
}

fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_src_alpha_0_is_noop() {
        let dst = [10, 20, 30, 40];
        assert_eq!(over(dst, [255, 255, 255, 0]), dst);
    }

    #[test]
    fn over_src_opaque_replaces_dst() {
        let src = [255, 0, 0, 255];
        assert_eq!(over([0, 0, 0, 255], src), src);
    }

    #[test]
    fn over_dst_transparent_returns_src() {
        let src = [100, 110, 120, 200];
        assert_eq!(over([0, 0, 0, 0], src), src);
    }
}
