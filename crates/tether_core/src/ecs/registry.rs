// registry.rs - Ordered registry of every spawned, not yet swept entity
//
// Consumers get read-only views; membership only changes through `spawn`
// and the sweep.

use crate::ecs::{Entity, EntityId, SnapshotIter, SnapshotSource};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

pub(crate) struct RegistryInner {
    entities: RefCell<Vec<Entity>>,
    next_entity_id: Cell<u64>,
}

/// Shared handle to an entity registry.
///
/// Each thread has a default registry ([`Registry::global`]), created on
/// first use and kept until the thread exits. Independent registries can be
/// created with [`Registry::new`].
#[derive(Clone)]
pub struct Registry(Rc<RegistryInner>);

thread_local! {
    static GLOBAL: Registry = Registry::new();
}

impl Registry {
    /// A fresh, empty registry independent of the thread default.
    pub fn new() -> Self {
        Self(Rc::new(RegistryInner {
            entities: RefCell::new(Vec::new()),
            next_entity_id: Cell::new(1),
        }))
    }

    /// This thread's default registry.
    pub fn global() -> Self {
        GLOBAL.with(Registry::clone)
    }

    pub(crate) fn from_inner(inner: Rc<RegistryInner>) -> Self {
        Self(inner)
    }

    /// Create and register a new, alive entity with no components.
    pub fn spawn(&self) -> Entity {
        let id = self.0.next_entity_id.get();
        self.0.next_entity_id.set(id + 1);

        let entity = Entity::new(EntityId::new(id), Rc::downgrade(&self.0));
        self.append(entity.clone());
        debug!(entity = id, "entity spawned");
        entity
    }

    pub(crate) fn append(&self, entity: Entity) {
        debug_assert!(!self.contains(&entity), "entity registered twice");
        self.0.entities.borrow_mut().push(entity);
    }

    /// Linear removal by identity. Returns whether the entity was present.
    pub(crate) fn remove(&self, entity: &Entity) -> bool {
        let mut entities = self.0.entities.borrow_mut();
        match entities.iter().position(|candidate| candidate.ptr_eq(entity)) {
            Some(index) => {
                entities.remove(index);
                true
            }
            None => false,
        }
    }

    /// Registered entities, including marked ones not yet swept.
    pub fn len(&self) -> usize {
        self.0.entities.borrow().len()
    }

    /// Whether no entity is registered.
    pub fn is_empty(&self) -> bool {
        self.0.entities.borrow().is_empty()
    }

    /// Entity at `index` in spawn order.
    pub fn get(&self, index: usize) -> Option<Entity> {
        self.0.entities.borrow().get(index).cloned()
    }

    /// Whether `entity` is still registered.
    pub fn contains(&self, entity: &Entity) -> bool {
        self.0
            .entities
            .borrow()
            .iter()
            .any(|candidate| candidate.ptr_eq(entity))
    }

    /// Point-in-time copy of the registered entities, in spawn order.
    pub fn entities(&self) -> Vec<Entity> {
        self.0.entities.borrow().clone()
    }

    /// Snapshot iteration over the registry in spawn order.
    pub fn iter(&self) -> SnapshotIter<'_, Registry> {
        SnapshotIter::new(self)
    }

    /// Sweep every entity marked for destruction: run its cleanup hooks,
    /// deregister it and drop the registry's handle to it. Returns the number
    /// of entities swept.
    ///
    /// Must not run while an update or draw pass over one of the swept
    /// entities is still in progress.
    pub fn collect_entities(&self) -> usize {
        let mut swept = 0;
        // Back to front: each cleanup removes its entity from this list.
        let mut index = self.len();

        while index > 0 {
            index -= 1;
            let Some(entity) = self.get(index) else {
                continue;
            };
            if entity.is_alive() || entity.is_swept() {
                continue;
            }
            entity.clean_up();
            swept += 1;
        }

        if swept > 0 {
            debug!(swept, remaining = self.len(), "registry sweep finished");
        }
        swept
    }

    /// Handle identity.
    #[inline]
    pub fn ptr_eq(&self, other: &Registry) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotSource for Registry {
    type Item = Entity;

    fn live_len(&self) -> usize {
        self.len()
    }

    fn fetch(&self, index: usize) -> Option<Entity> {
        self.get(index)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entities", &self.len())
            .field("next_entity_id", &self.0.next_entity_id.get())
            .finish()
    }
}
