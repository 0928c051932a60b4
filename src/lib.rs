//! Flipbook is a sprite-sheet animation playback core.
//!
//! It manages a catalog of named animation templates (each an ordered
//! sequence of equally sized frames sliced from a sprite sheet or strip) and
//! a live table of animation instances, each independently tracking its own
//! frame position, looping behavior, screen position, and optional rotation.
//!
//! # Pipeline overview
//!
//! 1. **Load**: encoded image bytes + frame layout -> [`Template`] (decode,
//!    premultiply, slice; see [`Template::from_encoded`])
//! 2. **Catalog**: templates live in a [`TemplateRegistry`], which also
//!    defines the persisted catalog blob (JSON; frames are transient and
//!    rebuilt by [`TemplateRegistry::initialize_all`])
//! 3. **Play**: an [`AnimationManager`] spawns instances and advances them
//!    one frame per [`AnimationManager::tick`]
//! 4. **Draw**: the manager walks the live table and issues
//!    `(frame, x, y[, degrees])` calls against a [`RenderSurface`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Templates are immutable once materialized**: instances share them by
//!   reference and never copy pixel data.
//! - **Tick and draw may race**: the instance table is guarded so a draw pass
//!   always sees a consistent table and never a torn per-instance update.
//! - **No IO, no timing**: the driving loop calls `tick()` at its own fixed
//!   cadence and `draw()` as often as it likes; the core makes no timing
//!   decisions and performs no IO of its own.
#![forbid(unsafe_code)]

mod assets;
mod catalog;
mod foundation;
mod playback;
mod render;

pub use assets::decode::{FrameLayout, decode_image, slice_frames};
pub use catalog::registry::TemplateRegistry;
pub use catalog::template::Template;
pub use foundation::core::{Frame, FrameSize, Position};
pub use foundation::error::{FlipbookError, FlipbookResult};
pub use playback::instance::{InstanceId, Rotation, SpawnOptions};
pub use playback::manager::AnimationManager;
pub use render::cpu::CpuSurface;
pub use render::surface::RenderSurface;
