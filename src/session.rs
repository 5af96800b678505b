//! Session-scoped ownership of the store and registry

use tracing::debug;
use uuid::Uuid;

use crate::document::SectionName;
use crate::error::{FormError, Result};
use crate::store::FormStateStore;
use crate::validation::{rules, RuleReport, ValidationRegistry};

/// One wizard session: a fresh document plus the registry validating it.
///
/// Sessions are plain owned values, so concurrent sessions (parallel tests,
/// multiple wizards in one process) never share state.
#[derive(Debug)]
pub struct FormSession {
    id: Uuid,
    store: FormStateStore,
    registry: ValidationRegistry,
}

impl FormSession {
    /// New session with the built-in rule set pre-registered
    pub fn new() -> Self {
        let mut registry = ValidationRegistry::new();
        rules::register_default_rules(&mut registry);
        Self::with_registry(registry)
    }

    /// New session around a caller-assembled registry (e.g., custom rules
    /// only, or none at all)
    pub fn with_registry(registry: ValidationRegistry) -> Self {
        let id = Uuid::new_v4();
        debug!(%id, "session opened");
        Self {
            id,
            store: FormStateStore::new(),
            registry,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store(&self) -> &FormStateStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FormStateStore {
        &mut self.store
    }

    pub fn registry(&self) -> &ValidationRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ValidationRegistry {
        &mut self.registry
    }

    /// Validate one section against this session's own store
    pub fn validate_section(&mut self, name: SectionName) -> Vec<RuleReport> {
        self.registry.validate_section(name, &self.store)
    }

    /// Validate the whole document against this session's own store
    pub fn validate_all(&mut self) -> Vec<RuleReport> {
        self.registry.validate_all(&self.store)
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Holder the presentation layer owns for the wizard's lifetime.
///
/// Components acquire the active session through here; acquisition outside
/// an open session is a wiring bug and fails loudly rather than handing out
/// a default instance.
#[derive(Debug, Default)]
pub struct SessionSlot {
    active: Option<FormSession>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session, replacing any previous one
    pub fn open(&mut self) -> &mut FormSession {
        self.active.insert(FormSession::new())
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// The active session, or [`FormError::ContextMissing`] when the wizard
    /// is not running
    pub fn acquire(&mut self) -> Result<&mut FormSession> {
        self.active.as_mut().ok_or(FormError::ContextMissing)
    }

    /// End the session, dropping its document and cached outcomes
    pub fn close(&mut self) {
        if let Some(session) = self.active.take() {
            debug!(id = %session.id, "session closed");
        }
    }
}
