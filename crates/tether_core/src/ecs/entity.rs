//! Entities: ordered component containers with mark-and-sweep destruction
//!
//! An entity is a shared handle. The registry keeps one strong handle per
//! entity until the sweep releases it; components only ever hold a weak
//! back-reference, so attaching a component never keeps its owner alive.

use crate::ecs::component::Hook;
use crate::ecs::registry::RegistryInner;
use crate::ecs::{Component, ComponentHandle, ContractViolation, Registry, SnapshotSource};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Registry-assigned entity identifier (for logging and diagnostics).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) struct EntityInner {
    id: EntityId,
    alive: Cell<bool>,
    swept: Cell<bool>,
    components: RefCell<Vec<ComponentHandle>>,
    registry: Weak<RegistryInner>,
}

/// Handle to a registered entity.
///
/// Entities are only obtained through [`Registry::spawn`] or
/// [`Entity::spawn`], so every `Entity` value has been registered.
#[derive(Clone)]
pub struct Entity(Rc<EntityInner>);

/// Non-owning entity handle, as stored by attached components.
#[derive(Clone)]
pub struct WeakEntity {
    id: EntityId,
    inner: Weak<EntityInner>,
}

impl WeakEntity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The entity, unless it has been dropped.
    pub fn upgrade(&self) -> Option<Entity> {
        self.inner.upgrade().map(Entity)
    }

    pub(crate) fn points_to(&self, entity: &Entity) -> bool {
        std::ptr::eq(self.inner.as_ptr(), Rc::as_ptr(&entity.0))
    }
}

impl fmt::Debug for WeakEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WeakEntity").field(&self.id).finish()
    }
}

impl Entity {
    pub(crate) fn new(id: EntityId, registry: Weak<RegistryInner>) -> Self {
        Self(Rc::new(EntityInner {
            id,
            alive: Cell::new(true),
            swept: Cell::new(false),
            components: RefCell::new(Vec::new()),
            registry,
        }))
    }

    /// Create an entity in this thread's global registry.
    pub fn spawn() -> Self {
        Registry::global().spawn()
    }

    /// Registry-assigned id.
    pub fn id(&self) -> EntityId {
        self.0.id
    }

    /// Non-owning handle to this entity.
    pub fn downgrade(&self) -> WeakEntity {
        WeakEntity {
            id: self.0.id,
            inner: Rc::downgrade(&self.0),
        }
    }

    /// The registry this entity was spawned in, if it still exists.
    pub fn registry(&self) -> Option<Registry> {
        self.0.registry.upgrade().map(Registry::from_inner)
    }

    /// Handle identity.
    #[inline]
    pub fn ptr_eq(&self, other: &Entity) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // ------------------------------------------------------------------
    // Component management
    // ------------------------------------------------------------------

    /// Attach `component` and fire its `on_add` hook.
    ///
    /// Fails if the component is already attached to any entity, in which
    /// case nothing changes. Returns `self` for chaining:
    ///
    /// ```ignore
    /// entity.add_component(&body)?.add_component(&sprite)?;
    /// ```
    pub fn add_component(&self, component: &ComponentHandle) -> Result<&Self, ContractViolation> {
        if let Some(owner) = component.owner_id() {
            return Err(ContractViolation::ComponentAlreadyAttached {
                component: component.type_name(),
                owner,
            });
        }
        self.push_component(component.clone());
        Ok(self)
    }

    /// Wrap `value` in a new component, attach it and return its handle.
    pub fn attach<C: Component>(&self, value: C) -> ComponentHandle {
        let handle = ComponentHandle::new(value);
        self.push_component(handle.clone());
        handle
    }

    fn push_component(&self, component: ComponentHandle) {
        self.0.components.borrow_mut().push(component.clone());
        component.set_owner(self.downgrade());
        trace!(entity = %self.id(), component = component.type_name(), "component added");
        component.run_hook(Hook::Add, self);
    }

    /// Detach `component`, firing `on_remove` before the back-reference is
    /// cleared.
    ///
    /// Fails if the component is not owned by this entity. A component may
    /// remove itself from inside one of its own hooks; it is detached
    /// immediately and its `on_remove` runs once that hook returns.
    pub fn remove_component(
        &self,
        component: &ComponentHandle,
    ) -> Result<&Self, ContractViolation> {
        if !component.is_owned_by(self) {
            return Err(ContractViolation::ComponentNotOwned {
                component: component.type_name(),
                entity: self.id(),
            });
        }
        let position = self
            .0
            .components
            .borrow()
            .iter()
            .position(|candidate| candidate.ptr_eq(component));
        if let Some(index) = position {
            self.0.components.borrow_mut().remove(index);
            self.detach(component);
        }
        Ok(self)
    }

    /// Remove up to `limit` components of type `C` (all of them when
    /// `None`), newest first. Returns how many were removed.
    ///
    /// A match that is running one of its own hooks is removed the same way
    /// [`remove_component`](Self::remove_component) removes it.
    pub fn remove_components_of_type<C: Component>(&self, limit: Option<usize>) -> usize {
        let limit = limit.unwrap_or(usize::MAX);
        let mut removed = 0;
        // Walk backwards so removals never shift indices still to be visited.
        let mut index = self.component_count();

        while index > 0 && removed < limit {
            index -= 1;
            let candidate = match self.0.components.borrow().get(index) {
                Some(component) if component.is::<C>() => component.clone(),
                _ => continue,
            };
            self.0.components.borrow_mut().remove(index);
            self.detach(&candidate);
            removed += 1;
        }

        removed
    }

    fn detach(&self, component: &ComponentHandle) {
        if component.is_busy() {
            component.defer_remove();
        } else {
            component.run_hook(Hook::Remove, self);
        }
        component.clear_owner();
        trace!(entity = %self.id(), component = component.type_name(), "component removed");
    }

    /// Whether `component` is in this entity's list.
    pub fn has_component(&self, component: &ComponentHandle) -> bool {
        self.0
            .components
            .borrow()
            .iter()
            .any(|candidate| candidate.ptr_eq(component))
    }

    /// Whether any attached component is a `C`.
    pub fn has_component_of_type<C: Component>(&self) -> bool {
        self.0.components.borrow().iter().any(ComponentHandle::is::<C>)
    }

    /// The most recently added component of type `C`.
    pub fn get_component_of_type<C: Component>(&self) -> Option<ComponentHandle> {
        self.0
            .components
            .borrow()
            .iter()
            .rev()
            .find(|component| component.is::<C>())
            .cloned()
    }

    /// Every component of type `C`, in insertion order.
    pub fn find_components_of_type<C: Component>(&self) -> Vec<ComponentHandle> {
        self.0
            .components
            .borrow()
            .iter()
            .filter(|component| component.is::<C>())
            .cloned()
            .collect()
    }

    /// Number of attached components.
    pub fn component_count(&self) -> usize {
        self.0.components.borrow().len()
    }

    /// Point-in-time copy of the component handles, in insertion order.
    pub fn components(&self) -> Vec<ComponentHandle> {
        self.0.components.borrow().clone()
    }

    // ------------------------------------------------------------------
    // Frame operations
    // ------------------------------------------------------------------

    /// Run `on_update` on every enabled component. No-op once destroyed.
    ///
    /// The component count is captured when the pass starts; see
    /// [`SnapshotIter`](crate::ecs::SnapshotIter) for what hooks that add or
    /// remove components during the pass will observe.
    pub fn update(&self) {
        self.run_frame_hook(Hook::Update);
    }

    /// Run `on_draw` on every enabled component. No-op once destroyed.
    pub fn draw(&self) {
        self.run_frame_hook(Hook::Draw);
    }

    fn run_frame_hook(&self, hook: Hook) {
        if !self.is_alive() {
            return;
        }
        crate::for_each_component!(self, |component| {
            if component.is_enabled() {
                component.run_hook(hook, self);
            }
        });
    }

    /// Mark the entity for destruction. Cleanup happens at the next sweep.
    pub fn destroy(&self) {
        if self.0.alive.replace(false) {
            debug!(entity = %self.id(), "entity marked for destruction");
        }
    }

    /// False once [`destroy`](Self::destroy) has been called.
    pub fn is_alive(&self) -> bool {
        self.0.alive.get()
    }

    /// Alive and not yet swept.
    pub fn exists(&self) -> bool {
        self.is_alive() && !self.is_swept()
    }

    /// Whether the sweep has cleaned this entity up.
    pub fn is_swept(&self) -> bool {
        self.0.swept.get()
    }

    /// Fire `on_cleanup` on every component in insertion order, detach them
    /// all, and deregister the entity.
    ///
    /// Normally called by [`Registry::collect_entities`]. Runs at most once;
    /// later calls do nothing.
    pub fn clean_up(&self) {
        if self.0.swept.replace(true) {
            return;
        }
        self.0.alive.set(false);

        crate::for_each_component!(self, |component| {
            component.run_hook(Hook::CleanUp, self);
        });

        let detached = std::mem::take(&mut *self.0.components.borrow_mut());
        for component in &detached {
            component.clear_owner();
        }

        if let Some(registry) = self.registry() {
            registry.remove(self);
        }
        debug!(entity = %self.id(), components = detached.len(), "entity swept");
    }
}

impl SnapshotSource for Entity {
    type Item = ComponentHandle;

    fn live_len(&self) -> usize {
        self.component_count()
    }

    fn fetch(&self, index: usize) -> Option<ComponentHandle> {
        self.0.components.borrow().get(index).cloned()
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Entity {}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0.id)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.0.id)
            .field("alive", &self.is_alive())
            .field("components", &self.component_count())
            .finish()
    }
}
