use std::sync::Arc;

use crate::catalog::template::Template;
use crate::foundation::core::Position;

/// Process-unique identifier of one live animation instance.
///
/// Backed by a random 128-bit UUID, so collision probability is negligible
/// and ids are never reused: removal is final and re-spawning yields a fresh
/// id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct InstanceId(uuid::Uuid);

impl InstanceId {
    pub(crate) fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(self) -> uuid::Uuid {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-instance rotation state: accumulated angle plus a fixed per-tick step.
///
/// Degrees, clockwise-positive relative to the frame's native pixel
/// orientation. The angle accumulates without normalization; wrapping into a
/// fixed range is a display-time concern.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rotation {
    /// Current rotation angle in degrees.
    pub angle_deg: f64,
    /// Degrees added per tick, constant for the instance's lifetime.
    pub step_deg: f64,
}

/// Options applied when spawning an instance.
///
/// Defaults: play once (no looping), rotation disabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpawnOptions {
    /// Wrap to frame 0 after the last frame instead of terminating.
    pub loop_playback: bool,
    /// Rotation parameters, if the instance should rotate.
    pub rotation: Option<Rotation>,
}

impl SpawnOptions {
    /// Play the sequence once, then remove the instance.
    pub fn one_shot() -> Self {
        Self::default()
    }

    /// Loop the sequence until explicitly removed.
    pub fn looping() -> Self {
        Self {
            loop_playback: true,
            rotation: None,
        }
    }

    /// Enable rotation, starting at `angle_deg` and advancing by `step_deg`
    /// each tick.
    pub fn with_rotation(mut self, angle_deg: f64, step_deg: f64) -> Self {
        self.rotation = Some(Rotation {
            angle_deg,
            step_deg,
        });
        self
    }
}

/// Outcome of advancing an instance by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Advance {
    /// Instance stays live.
    Kept,
    /// One-shot instance moved past its final frame and must be removed.
    Completed,
}

/// One live, independently-progressing playback of a template.
///
/// Owns no pixel data; frame lookup goes through the shared template, which
/// outlives the instance.
#[derive(Clone, Debug)]
pub(crate) struct Instance {
    pub(crate) template: Arc<Template>,
    pub(crate) frame: u32,
    pub(crate) position: Position,
    pub(crate) loop_playback: bool,
    pub(crate) rotation: Option<Rotation>,
}

impl Instance {
    pub(crate) fn spawn(template: Arc<Template>, position: Position, options: SpawnOptions) -> Self {
        Self {
            template,
            frame: 0,
            position,
            loop_playback: options.loop_playback,
            rotation: options.rotation,
        }
    }

    /// Advance by exactly one frame and accumulate rotation.
    ///
    /// The angle accumulates every tick regardless of frame state. Invariant:
    /// `frame < template.frame_count()` holds on every [`Advance::Kept`]
    /// return.
    pub(crate) fn advance(&mut self) -> Advance {
        if let Some(rotation) = &mut self.rotation {
            rotation.angle_deg += rotation.step_deg;
        }
        let next = self.frame + 1;
        if next >= self.template.frame_count() {
            if self.loop_playback {
                self.frame = 0;
                Advance::Kept
            } else {
                Advance::Completed
            }
        } else {
            self.frame = next;
            Advance::Kept
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::decode::FrameLayout;
    use crate::foundation::core::FrameSize;

    fn template(frame_count: u32) -> Arc<Template> {
        let size = FrameSize::new(8, 8).unwrap();
        let img = image::RgbaImage::from_pixel(8 * frame_count, 8, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        Arc::new(
            Template::from_encoded("t", bytes, size, FrameLayout::Strip { frame_count }).unwrap(),
        )
    }

    #[test]
    fn looping_instance_wraps_with_period_frame_count() {
        let mut inst = Instance::spawn(template(3), Position::new(0, 0), SpawnOptions::looping());
        let observed: Vec<u32> = (0..6)
            .map(|_| {
                assert_eq!(inst.advance(), Advance::Kept);
                inst.frame
            })
            .collect();
        assert_eq!(observed, vec![1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn one_shot_instance_completes_after_final_frame() {
        let mut inst = Instance::spawn(template(3), Position::new(0, 0), SpawnOptions::one_shot());
        assert_eq!(inst.advance(), Advance::Kept);
        assert_eq!(inst.advance(), Advance::Kept);
        assert_eq!(inst.frame, 2);
        assert_eq!(inst.advance(), Advance::Completed);
    }

    #[test]
    fn rotation_accumulates_every_tick_without_normalization() {
        let mut inst = Instance::spawn(
            template(2),
            Position::new(0, 0),
            SpawnOptions::looping().with_rotation(170.0, 45.0),
        );
        for _ in 0..5 {
            inst.advance();
        }
        assert_eq!(inst.rotation.unwrap().angle_deg, 170.0 + 5.0 * 45.0);
    }
}
