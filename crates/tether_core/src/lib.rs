//! Tether Core
//!
//! Entity/component lifecycle runtime:
//! - Components with attach, detach, update, draw and cleanup hooks
//! - Entities with mark-and-sweep destruction
//! - A registry of live entities with snapshot traversal
//! - A single-threaded frame driver

pub mod ecs;
pub mod frame;
pub mod time;

pub use ecs::{
    Component, ComponentHandle, ComponentKind, ContractViolation, Entity, EntityId, Registry,
    SnapshotIter, SnapshotSource, WeakEntity,
};
pub use frame::{FrameDriver, FrameOptions, FrameReport};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
