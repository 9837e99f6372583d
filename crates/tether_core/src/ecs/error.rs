use crate::ecs::EntityId;
use thiserror::Error;

/// Programmer errors reported by entity, component and iterator operations.
///
/// The operation that returns one of these has not touched any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("component '{component}' is already attached to entity {owner}")]
    ComponentAlreadyAttached {
        component: &'static str,
        owner: EntityId,
    },

    #[error("component '{component}' is not owned by entity {entity}")]
    ComponentNotOwned {
        component: &'static str,
        entity: EntityId,
    },

    #[error("snapshot iterator exhausted after {count} elements")]
    IteratorExhausted { count: usize },
}
