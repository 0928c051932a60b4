use std::sync::Arc;

use crate::assets::decode::{FrameLayout, decode_image, slice_frames};
use crate::foundation::core::{Frame, FrameSize};
use crate::foundation::error::FlipbookResult;

/// Immutable named animation definition: a frame sequence plus its frame size.
///
/// A template retains the encoded source bytes it was loaded from. The
/// decoded frames are transient: they are not part of the persisted catalog
/// blob and are rebuilt from the encoded bytes by [`Template::init`] (or
/// [`crate::TemplateRegistry::initialize_all`]) after a catalog load. Once
/// materialized, frame pixel data is never mutated.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Template {
    name: String,
    frame_size: FrameSize,
    layout: FrameLayout,
    encoded: Arc<Vec<u8>>,
    #[serde(skip)]
    frames: Vec<Frame>,
}

impl Template {
    /// Load a template from encoded image bytes.
    ///
    /// Decodes the bytes, premultiplies, and slices the result into
    /// `layout.frame_count()` frames of `frame_size`, row-major. The encoded
    /// bytes are retained for the persisted catalog. Fails with
    /// [`crate::FlipbookError::Decode`] on undecodable bytes or a layout
    /// that does not fit the source; never substitutes a placeholder frame.
    #[tracing::instrument(skip(bytes))]
    pub fn from_encoded(
        name: &str,
        bytes: Vec<u8>,
        frame_size: FrameSize,
        layout: FrameLayout,
    ) -> FlipbookResult<Self> {
        let source = decode_image(&bytes)?;
        let frames = slice_frames(&source, frame_size, layout)?;
        Ok(Self {
            name: name.to_string(),
            frame_size,
            layout,
            encoded: Arc::new(bytes),
            frames,
        })
    }

    /// Load a template whose layout is inferred from the source dimensions,
    /// assuming every grid cell holds a frame.
    pub fn from_encoded_auto(
        name: &str,
        bytes: Vec<u8>,
        frame_size: FrameSize,
    ) -> FlipbookResult<Self> {
        let source = decode_image(&bytes)?;
        let layout = FrameLayout::infer(source.width, source.height, frame_size)?;
        let frames = slice_frames(&source, frame_size, layout)?;
        Ok(Self {
            name: name.to_string(),
            frame_size,
            layout,
            encoded: Arc::new(bytes),
            frames,
        })
    }

    /// Template name as given at load time.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-frame pixel dimensions.
    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    /// Frame arrangement in the source image.
    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    /// Total number of frames.
    pub fn frame_count(&self) -> u32 {
        self.layout.frame_count()
    }

    /// Frame at `index`, or `None` when out of range or not yet
    /// materialized.
    pub fn frame(&self, index: u32) -> Option<&Frame> {
        self.frames.get(index as usize)
    }

    /// Whether the frame sequence is materialized and the template is ready
    /// for playback.
    pub fn is_initialized(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Rebuild the transient frame sequence from the retained encoded bytes.
    ///
    /// Idempotent: a no-op when frames are already materialized.
    pub fn init(&mut self) -> FlipbookResult<()> {
        if self.is_initialized() {
            return Ok(());
        }
        let source = decode_image(&self.encoded)?;
        self.frames = slice_frames(&source, self.frame_size, self.layout)?;
        Ok(())
    }
}
