// component.rs - Component contract and shared component handles
//
// Components are identified by the `TypeId` recorded when their handle is
// created, so type queries never need to borrow the payload. That matters
// because a component's payload is mutably borrowed for the whole duration
// of each of its hooks.

use crate::ecs::{Entity, EntityId, WeakEntity};
use std::any::{type_name, Any, TypeId};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Upcast helper so `dyn Component` payloads can be downcast to their
/// concrete type. Implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behaviour attached to an entity.
///
/// Every hook is a no-op by default and is only ever called by the entity
/// that owns the component. Hooks receive that entity so they can query
/// siblings, add or remove components, or destroy the entity.
///
/// # Example
/// ```ignore
/// struct Lifetime { frames_left: u32 }
///
/// impl Component for Lifetime {
///     fn on_update(&mut self, owner: &Entity) {
///         self.frames_left = self.frames_left.saturating_sub(1);
///         if self.frames_left == 0 {
///             owner.destroy();
///         }
///     }
/// }
/// ```
pub trait Component: AsAny {
    /// Called once, right after the component was attached.
    fn on_add(&mut self, _owner: &Entity) {}

    /// Called once per explicit removal, right before the component is
    /// detached. A component that removes itself from inside one of its own
    /// hooks is detached at once and gets this call as soon as that hook
    /// returns. Not called when the owning entity is swept.
    fn on_remove(&mut self, _owner: &Entity) {}

    /// Called every frame while attached and enabled.
    fn on_update(&mut self, _owner: &Entity) {}

    /// Called every frame while attached and enabled, after all updates.
    fn on_draw(&mut self, _owner: &Entity) {}

    /// Called exactly once when the owning entity is swept, enabled or not.
    fn on_cleanup(&mut self, _owner: &Entity) {}
}

/// Runtime identity of a component type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ComponentKind {
    id: TypeId,
    name: &'static str,
}

impl ComponentKind {
    /// Kind of the component type `C`.
    pub fn of<C: Component>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Hook {
    Add,
    Remove,
    Update,
    Draw,
    CleanUp,
}

struct Slot<C: ?Sized> {
    kind: ComponentKind,
    owner: RefCell<Option<WeakEntity>>,
    enabled: Cell<bool>,
    remove_pending: Cell<bool>,
    value: RefCell<C>,
}

/// Shared handle to a component.
///
/// Cloning the handle does not clone the component: identity is the handle
/// itself, and two handles compare equal only if they point at the same
/// component.
#[derive(Clone)]
pub struct ComponentHandle(Rc<Slot<dyn Component>>);

impl ComponentHandle {
    /// Wrap a value into a new, detached, enabled component.
    pub fn new<C: Component>(value: C) -> Self {
        Self(Rc::new(Slot {
            kind: ComponentKind::of::<C>(),
            owner: RefCell::new(None),
            enabled: Cell::new(true),
            remove_pending: Cell::new(false),
            value: RefCell::new(value),
        }))
    }

    /// Runtime type of the payload.
    pub fn kind(&self) -> ComponentKind {
        self.0.kind
    }

    /// Type name of the payload, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.0.kind.name
    }

    /// Whether the payload is a `C`. Never borrows the payload.
    #[inline]
    pub fn is<C: Component>(&self) -> bool {
        self.0.kind.id == TypeId::of::<C>()
    }

    /// The entity this component is attached to, if any.
    pub fn owner(&self) -> Option<Entity> {
        self.0.owner.borrow().as_ref().and_then(WeakEntity::upgrade)
    }

    /// Id of the owning entity, if attached.
    pub fn owner_id(&self) -> Option<EntityId> {
        self.owner().map(|owner| owner.id())
    }

    /// Whether the component currently has an owner.
    pub fn is_attached(&self) -> bool {
        self.owner().is_some()
    }

    /// Whether update and draw reach this component.
    pub fn is_enabled(&self) -> bool {
        self.0.enabled.get()
    }

    /// Disabled components are skipped by update and draw but still get
    /// their cleanup hook.
    pub fn set_enabled(&self, enabled: bool) {
        self.0.enabled.set(enabled);
    }

    /// Borrow the payload as a `C`.
    ///
    /// Returns `None` if the payload is another type.
    ///
    /// # Panics
    /// Panics if the component is in the middle of one of its own hooks.
    pub fn borrow<C: Component>(&self) -> Option<Ref<'_, C>> {
        if !self.is::<C>() {
            return None;
        }
        Ref::filter_map(self.0.value.borrow(), |value| {
            value.as_any().downcast_ref::<C>()
        })
        .ok()
    }

    /// Mutably borrow the payload as a `C`.
    ///
    /// # Panics
    /// Panics if the payload is already borrowed.
    pub fn borrow_mut<C: Component>(&self) -> Option<RefMut<'_, C>> {
        if !self.is::<C>() {
            return None;
        }
        RefMut::filter_map(self.0.value.borrow_mut(), |value| {
            value.as_any_mut().downcast_mut::<C>()
        })
        .ok()
    }

    /// Handle identity.
    #[inline]
    pub fn ptr_eq(&self, other: &ComponentHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// True while one of this component's hooks is running.
    pub(crate) fn is_busy(&self) -> bool {
        self.0.value.try_borrow_mut().is_err()
    }

    pub(crate) fn is_owned_by(&self, entity: &Entity) -> bool {
        self.0
            .owner
            .borrow()
            .as_ref()
            .is_some_and(|owner| owner.points_to(entity))
    }

    pub(crate) fn set_owner(&self, owner: WeakEntity) {
        *self.0.owner.borrow_mut() = Some(owner);
    }

    pub(crate) fn clear_owner(&self) {
        self.0.owner.borrow_mut().take();
    }

    /// Queue `on_remove` for when the hook currently running on this
    /// component returns.
    pub(crate) fn defer_remove(&self) {
        self.0.remove_pending.set(true);
    }

    /// Run one hook. A component already inside a hook is not re-entered;
    /// the nested call is skipped and `false` is returned.
    ///
    /// A removal deferred while the hook ran fires `on_remove` right after
    /// it, with the same owner.
    pub(crate) fn run_hook(&self, hook: Hook, owner: &Entity) -> bool {
        let Ok(mut value) = self.0.value.try_borrow_mut() else {
            tracing::warn!(
                entity = %owner.id(),
                component = self.type_name(),
                ?hook,
                "component is busy, nested hook skipped"
            );
            return false;
        };

        match hook {
            Hook::Add => value.on_add(owner),
            Hook::Remove => value.on_remove(owner),
            Hook::Update => value.on_update(owner),
            Hook::Draw => value.on_draw(owner),
            Hook::CleanUp => value.on_cleanup(owner),
        }
        drop(value);

        if self.0.remove_pending.replace(false) {
            self.run_hook(Hook::Remove, owner);
        }
        true
    }
}

impl PartialEq for ComponentHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ComponentHandle {}

impl fmt::Debug for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentHandle")
            .field("kind", &self.type_name())
            .field("enabled", &self.is_enabled())
            .field("owner", &self.owner_id())
            .finish()
    }
}
