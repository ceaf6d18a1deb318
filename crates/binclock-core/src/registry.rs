//! Bounded registry of display renderers.
//!
//! A [`DisplayRegistry`] owns up to `capacity` renderers, each under a
//! unique [`RegistrationId`]. Ids are handed out from a per-registry
//! counter that only ever increases, so an id is never reused for the
//! lifetime of the registry.
//!
//! Registrations are kept in id order, which makes dispatch order equal to
//! registration order even after earlier registrations have been removed.
//!
//! The registry has no internal locking. To share one between threads,
//! wrap it in a `Mutex` so register, unregister, and dispatch are
//! serialised.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace, warn};

use crate::error::{RegistryError, RenderError};
use crate::render::Renderer;
use crate::state::ClockState;

/// Slot bound of [`DisplayRegistry::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Handle for one active registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegistrationId(u64);

impl RegistrationId {
    /// The numeric id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for RegistrationId {
    type Error = RegistryError;

    /// Accept a raw integer id; negative values are never valid.
    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        u64::try_from(raw)
            .map(Self)
            .map_err(|_err| RegistryError::InvalidId { raw })
    }
}

/// Outcome of one [`DisplayRegistry::dispatch_all`] pass.
#[derive(Debug, Default)]
pub struct DispatchSummary {
    /// Number of renderers that completed without error.
    pub rendered: usize,
    /// Renderers that failed, with their errors, in dispatch order.
    pub failures: Vec<(RegistrationId, RenderError)>,
}

impl DispatchSummary {
    /// Whether every renderer succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A bounded, ordered set of renderers.
pub struct DisplayRegistry {
    capacity: usize,
    next_id: u64,
    entries: BTreeMap<RegistrationId, Box<dyn Renderer>>,
}

impl DisplayRegistry {
    /// Create a registry with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a registry with room for `capacity` renderers.
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            next_id: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Maximum number of simultaneous registrations.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of active registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no renderer is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every slot is taken.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Whether `id` names an active registration.
    pub fn contains(&self, id: RegistrationId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Active ids in dispatch order.
    pub fn ids(&self) -> impl Iterator<Item = RegistrationId> + '_ {
        self.entries.keys().copied()
    }

    /// Register a renderer.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Full`] if no slot is free, or
    /// [`RegistryError::IdsExhausted`] if the id counter cannot advance.
    pub fn register<R: Renderer + 'static>(
        &mut self,
        renderer: R,
    ) -> Result<RegistrationId, RegistryError> {
        self.register_boxed(Box::new(renderer))
    }

    /// Register an already boxed renderer.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn register_boxed(
        &mut self,
        renderer: Box<dyn Renderer>,
    ) -> Result<RegistrationId, RegistryError> {
        if self.is_full() {
            return Err(RegistryError::Full {
                capacity: self.capacity,
            });
        }
        let id = RegistrationId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(RegistryError::IdsExhausted)?;
        self.entries.insert(id, renderer);
        debug!(id = id.get(), active = self.entries.len(), "display registered");
        Ok(id)
    }

    /// Remove a registration, freeing its slot.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `id` is not active. Nothing
    /// else changes in that case.
    pub fn unregister(&mut self, id: RegistrationId) -> Result<(), RegistryError> {
        if self.entries.remove(&id).is_none() {
            return Err(RegistryError::NotFound { id: id.get() });
        }
        debug!(id = id.get(), active = self.entries.len(), "display unregistered");
        Ok(())
    }

    /// Render `state` with every active renderer, in registration order.
    ///
    /// A failing renderer does not stop the pass; its error is logged and
    /// collected in the returned summary.
    pub fn dispatch_all(&mut self, state: &ClockState) -> DispatchSummary {
        let mut summary = DispatchSummary::default();
        for (&id, renderer) in &mut self.entries {
            match renderer.render(state) {
                Ok(()) => summary.rendered = summary.rendered.saturating_add(1),
                Err(err) => {
                    warn!(id = id.get(), error = %err, "display render failed");
                    summary.failures.push((id, err));
                }
            }
        }
        trace!(
            rendered = summary.rendered,
            failed = summary.failures.len(),
            timestamp = state.timestamp(),
            "dispatch complete"
        );
        summary
    }
}

impl Default for DisplayRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DisplayRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayRegistry")
            .field("capacity", &self.capacity)
            .field("next_id", &self.next_id)
            .field("ids", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
