//! Entity/component lifecycle core.
//!
//! Entities own an ordered list of polymorphic components and are destroyed
//! in two phases: [`Entity::destroy`] marks them, and
//! [`Registry::collect_entities`] later runs their cleanup hooks and
//! deregisters them. Traversals over components and entities go through
//! [`SnapshotIter`], which tolerates the traversal body mutating the
//! collection being walked.

mod component;
mod entity;
mod error;
mod macros;
mod registry;
mod snapshot;
#[cfg(test)]
mod test_support;

pub use component::{AsAny, Component, ComponentHandle, ComponentKind};
pub use entity::{Entity, EntityId, WeakEntity};
pub use error::ContractViolation;
pub use registry::Registry;
pub use snapshot::{SnapshotIter, SnapshotSource};
