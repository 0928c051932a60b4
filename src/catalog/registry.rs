use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::template::Template;
use crate::foundation::error::{FlipbookError, FlipbookResult};

/// Name-keyed collection of animation [`Template`]s.
///
/// The registry is also the persisted catalog format: serializing it yields a
/// single JSON blob holding every registered template's encoded source bytes.
/// A freshly deserialized registry has no materialized frames and must go
/// through [`TemplateRegistry::initialize_all`] before first use.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TemplateRegistry {
    templates: HashMap<String, Arc<Template>>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template under `name` only if the name is absent.
    ///
    /// Returns `false` and leaves the registry unchanged when the name is
    /// already registered; whether a duplicate is an error is the caller's
    /// decision.
    pub fn register(&mut self, name: impl Into<String>, template: Template) -> bool {
        let name = name.into();
        if self.templates.contains_key(&name) {
            tracing::debug!(%name, "template name already registered, keeping existing");
            return false;
        }
        self.templates.insert(name, Arc::new(template));
        true
    }

    /// Add or overwrite the template under `name` unconditionally.
    ///
    /// Use [`TemplateRegistry::register`] unless redefining a template is the
    /// intent.
    pub fn register_or_replace(&mut self, name: impl Into<String>, template: Template) {
        self.templates.insert(name.into(), Arc::new(template));
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> FlipbookResult<Arc<Template>> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| FlipbookError::TemplateNotFound(name.to_string()))
    }

    /// Snapshot of the currently registered names.
    ///
    /// Later registry mutation does not affect an already-returned snapshot.
    pub fn names(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Materialize the frame sequence of every template that needs it.
    ///
    /// Must be called once after loading a persisted catalog; idempotent and
    /// safe to retry. All-or-nothing: when any template fails to
    /// re-materialize, no template's visible state changes, so a failed load
    /// never leaves the registry partially initialized.
    #[tracing::instrument(skip(self), fields(templates = self.templates.len()))]
    pub fn initialize_all(&mut self) -> FlipbookResult<()> {
        let mut staged = Vec::new();
        for (name, template) in &self.templates {
            if template.is_initialized() {
                continue;
            }
            let mut fresh = (**template).clone();
            fresh.init()?;
            staged.push((name.clone(), Arc::new(fresh)));
        }
        for (name, template) in staged {
            self.templates.insert(name, template);
        }
        Ok(())
    }

    /// Serialize the whole registry into the persisted catalog blob.
    pub fn to_json(&self) -> FlipbookResult<String> {
        serde_json::to_string(self)
            .map_err(|e| FlipbookError::persistence(format!("serialize catalog: {e}")))
    }

    /// Deserialize a registry from a persisted catalog blob.
    ///
    /// The result has no materialized frames; call
    /// [`TemplateRegistry::initialize_all`] before first use.
    pub fn from_json(blob: &str) -> FlipbookResult<Self> {
        serde_json::from_str(blob)
            .map_err(|e| FlipbookError::persistence(format!("deserialize catalog: {e}")))
    }
}
