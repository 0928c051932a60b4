use std::collections::HashMap;

use parking_lot::RwLock;

use crate::catalog::registry::TemplateRegistry;
use crate::foundation::core::Position;
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::playback::instance::{Advance, Instance, InstanceId, SpawnOptions};
use crate::render::surface::RenderSurface;

/// Composition root: owns the template registry and the table of live
/// instances.
///
/// All operations take `&self`; the instance table is guarded by a single
/// reader-writer lock, so the manager can be shared (e.g. behind an `Arc`)
/// between a tick actor, a draw actor, and ad-hoc callers on other threads.
/// Writers (`spawn`, `remove`, `set_position`, `tick`) take the lock
/// exclusively; `draw`, `size`, and the accessors take it shared. A draw
/// pass therefore always sees a consistent table and never a torn
/// per-instance update.
///
/// The registry lives for the manager's full lifetime, so instances hold
/// plain shared references to their templates and never copy pixel data.
#[derive(Debug)]
pub struct AnimationManager {
    registry: TemplateRegistry,
    instances: RwLock<HashMap<InstanceId, Instance>>,
}

impl AnimationManager {
    /// Create a manager over an already-populated registry.
    ///
    /// Registry templates must be materialized (see
    /// [`TemplateRegistry::initialize_all`]) before instances of them can be
    /// spawned.
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            registry,
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// The owned template registry.
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Snapshot of the registered template names.
    pub fn names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Spawn a new instance of template `name` at `position`.
    ///
    /// The instance starts at frame 0 and becomes visible to subsequent
    /// `tick`/`draw` calls immediately. Fails with
    /// [`FlipbookError::TemplateNotFound`] for an unregistered name and with
    /// [`FlipbookError::Validation`] when the template's frames are not yet
    /// materialized; no broken instance is created in either case.
    pub fn spawn(
        &self,
        name: &str,
        position: Position,
        options: SpawnOptions,
    ) -> FlipbookResult<InstanceId> {
        let template = self.registry.get(name)?;
        if !template.is_initialized() {
            return Err(FlipbookError::validation(format!(
                "template '{name}' has no materialized frames; call initialize_all() after loading a catalog"
            )));
        }
        let id = InstanceId::generate();
        self.instances
            .write()
            .insert(id, Instance::spawn(template, position, options));
        Ok(id)
    }

    /// Remove the instance if present; a no-op when `id` is unknown.
    ///
    /// Callers may race with auto-removal of a completed one-shot instance,
    /// so an already-gone id is not an error.
    pub fn remove(&self, id: InstanceId) {
        self.instances.write().remove(&id);
    }

    /// Current screen position of the instance.
    pub fn get_position(&self, id: InstanceId) -> FlipbookResult<Position> {
        self.instances
            .read()
            .get(&id)
            .map(|inst| inst.position)
            .ok_or(FlipbookError::InstanceNotFound(id))
    }

    /// Move the instance; a no-op when `id` is unknown.
    pub fn set_position(&self, id: InstanceId, position: Position) {
        if let Some(inst) = self.instances.write().get_mut(&id) {
            inst.position = position;
        }
    }

    /// Move the instance by coordinates; a no-op when `id` is unknown.
    pub fn set_position_xy(&self, id: InstanceId, x: i32, y: i32) {
        self.set_position(id, Position::new(x, y));
    }

    /// Current frame index of the instance. Diagnostics accessor, always in
    /// `[0, frame_count)` for a live instance.
    pub fn current_frame(&self, id: InstanceId) -> FlipbookResult<u32> {
        self.instances
            .read()
            .get(&id)
            .map(|inst| inst.frame)
            .ok_or(FlipbookError::InstanceNotFound(id))
    }

    /// Accumulated rotation angle of the instance in degrees, or `None` when
    /// rotation is disabled for it.
    pub fn rotation_angle(&self, id: InstanceId) -> FlipbookResult<Option<f64>> {
        self.instances
            .read()
            .get(&id)
            .map(|inst| inst.rotation.map(|r| r.angle_deg))
            .ok_or(FlipbookError::InstanceNotFound(id))
    }

    /// Advance every live instance by exactly one frame and every rotating
    /// instance's angle by its step.
    ///
    /// Looping instances wrap to frame 0 after their final frame; one-shot
    /// instances that would advance past their final frame are removed, and
    /// their ids are returned (each exactly once). The whole pass runs under
    /// the exclusive table lock, so each live instance is processed exactly
    /// once per call and a concurrent spawn lands either in this tick or the
    /// next.
    pub fn tick(&self) -> Vec<InstanceId> {
        let mut table = self.instances.write();
        let mut removed = Vec::new();
        table.retain(|id, inst| match inst.advance() {
            Advance::Kept => true,
            Advance::Completed => {
                removed.push(*id);
                false
            }
        });
        if !removed.is_empty() {
            tracing::debug!(completed = removed.len(), "one-shot instances finished");
        }
        removed
    }

    /// Draw every live instance's current frame to `surface`.
    ///
    /// A pure read pass: no instance state is mutated. Each frame is drawn
    /// at its instance's position; rotating instances are rotated about the
    /// frame's own center by the accumulated angle (clockwise-positive
    /// degrees) first.
    pub fn draw(&self, surface: &mut dyn RenderSurface) -> FlipbookResult<()> {
        let table = self.instances.read();
        for inst in table.values() {
            let frame = inst.template.frame(inst.frame).ok_or_else(|| {
                FlipbookError::validation(format!(
                    "instance frame {} out of range for template '{}'",
                    inst.frame,
                    inst.template.name()
                ))
            })?;
            match inst.rotation {
                Some(rotation) => {
                    surface.draw_frame_rotated(frame, inst.position, rotation.angle_deg)
                }
                None => surface.draw_frame(frame, inst.position),
            }
        }
        Ok(())
    }

    /// Count of live instances. Diagnostics accessor, not
    /// correctness-critical.
    pub fn size(&self) -> usize {
        self.instances.read().len()
    }
}
