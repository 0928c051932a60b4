use std::sync::Arc;

use crate::foundation::core::{Frame, FrameSize};
use crate::foundation::error::{FlipbookError, FlipbookResult};

/// How frames are arranged inside a source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FrameLayout {
    /// All frames laid out left-to-right in a single row.
    Strip {
        /// Total number of frames.
        frame_count: u32,
    },
    /// Frames laid out in a grid, row-major (left-to-right, then
    /// top-to-bottom).
    Sheet {
        /// Total number of frames; may be smaller than the full grid.
        frame_count: u32,
        /// Number of frame columns in the source image.
        frames_across: u32,
    },
}

impl FrameLayout {
    /// Total number of frames described by this layout.
    pub fn frame_count(self) -> u32 {
        match self {
            Self::Strip { frame_count } => frame_count,
            Self::Sheet { frame_count, .. } => frame_count,
        }
    }

    /// Derive a layout from source image dimensions, assuming every grid
    /// cell holds a frame.
    ///
    /// A single-row source yields [`FrameLayout::Strip`]; anything taller
    /// yields [`FrameLayout::Sheet`]. Errors when `frame_size` does not
    /// evenly divide the source.
    pub fn infer(source_width: u32, source_height: u32, frame_size: FrameSize) -> FlipbookResult<Self> {
        if source_width % frame_size.width != 0 || source_height % frame_size.height != 0 {
            return Err(FlipbookError::decode(format!(
                "frame size {frame_size} does not evenly divide source {source_width}x{source_height}"
            )));
        }
        let frames_across = source_width / frame_size.width;
        let frames_down = source_height / frame_size.height;
        if frames_across == 0 || frames_down == 0 {
            return Err(FlipbookError::decode(format!(
                "source {source_width}x{source_height} is smaller than one {frame_size} frame"
            )));
        }
        Ok(if frames_down == 1 {
            Self::Strip {
                frame_count: frames_across,
            }
        } else {
            Self::Sheet {
                frame_count: frames_across * frames_down,
                frames_across,
            }
        })
    }
}

impl std::fmt::Display for FrameLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strip { frame_count } => write!(f, "strip of {frame_count}"),
            Self::Sheet {
                frame_count,
                frames_across,
            } => write!(f, "sheet of {frame_count} across {frames_across}"),
        }
    }
}

/// Decode encoded image bytes and convert to a premultiplied RGBA8 [`Frame`].
pub fn decode_image(bytes: &[u8]) -> FlipbookResult<Frame> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FlipbookError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(Frame {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Slice a decoded source image into `layout.frame_count()` frames of
/// `frame_size`, row-major (left-to-right, then top-to-bottom).
///
/// The slice is deterministic: frame `i` always comes from grid cell `i`.
/// Errors when `frame_size` does not evenly divide the source, when a strip
/// source is not exactly one frame tall, or when the layout names more
/// frames than the source holds.
pub fn slice_frames(
    source: &Frame,
    frame_size: FrameSize,
    layout: FrameLayout,
) -> FlipbookResult<Vec<Frame>> {
    if source.width % frame_size.width != 0 || source.height % frame_size.height != 0 {
        return Err(FlipbookError::decode(format!(
            "frame size {frame_size} does not evenly divide source {}x{}",
            source.width, source.height
        )));
    }
    let across = source.width / frame_size.width;
    let down = source.height / frame_size.height;
    let frame_count = layout.frame_count();
    if frame_count == 0 {
        return Err(FlipbookError::decode("layout names zero frames"));
    }

    match layout {
        FrameLayout::Strip { .. } => {
            if down != 1 {
                return Err(FlipbookError::decode(format!(
                    "strip source must be exactly one frame tall, got {down} rows"
                )));
            }
            if frame_count > across {
                return Err(FlipbookError::decode(format!(
                    "strip names {frame_count} frames but source holds {across}"
                )));
            }
        }
        FrameLayout::Sheet { frames_across, .. } => {
            if frames_across != across {
                return Err(FlipbookError::decode(format!(
                    "sheet declares {frames_across} frames across but source holds {across}"
                )));
            }
            if frame_count > across * down {
                return Err(FlipbookError::decode(format!(
                    "sheet names {frame_count} frames but source holds {}",
                    across * down
                )));
            }
        }
    }

    let mut frames = Vec::with_capacity(frame_count as usize);
    for i in 0..frame_count {
        let cell_x = (i % across) * frame_size.width;
        let cell_y = (i / across) * frame_size.height;
        frames.push(copy_cell(source, cell_x, cell_y, frame_size));
    }
    Ok(frames)
}

fn copy_cell(source: &Frame, x0: u32, y0: u32, frame_size: FrameSize) -> Frame {
    let row_bytes = (frame_size.width * 4) as usize;
    let mut out = Vec::with_capacity(row_bytes * frame_size.height as usize);
    for y in y0..y0 + frame_size.height {
        let start = (y as usize * source.width as usize + x0 as usize) * 4;
        out.extend_from_slice(&source.rgba8_premul[start..start + row_bytes]);
    }
    Frame {
        width: frame_size.width,
        height: frame_size.height,
        rgba8_premul: Arc::new(out),
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
