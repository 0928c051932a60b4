use crate::foundation::core::{Frame, Position};

/// Render-surface contract consumed by [`crate::AnimationManager::draw`].
///
/// The core issues exactly two kinds of calls: an axis-aligned frame draw at
/// a top-left position, and the same draw rotated about the frame's own
/// center by an angle in degrees (clockwise-positive, consistent with the
/// frame's native pixel orientation). Implementations must not assume the
/// angle is normalized into any fixed range.
pub trait RenderSurface {
    /// Draw `frame` with its top-left corner at `pos`.
    fn draw_frame(&mut self, frame: &Frame, pos: Position);

    /// Draw `frame` rotated about its own center by `angle_deg` degrees,
    /// then translated so its unrotated top-left corner would sit at `pos`.
    fn draw_frame_rotated(&mut self, frame: &Frame, pos: Position, angle_deg: f64);
}
