//! Traversal macros built on [`SnapshotIter`](crate::ecs::SnapshotIter)
//!
//! Both expand to a plain `while let` loop, so `break` and `continue` in the
//! body behave as they would in a `for` loop, and the body may freely add or
//! remove entries of the collection being walked.

/// Run `body` for every component of an entity, in insertion order.
///
/// # Example
/// ```ignore
/// for_each_component!(entity, |component| {
///     if !component.is_enabled() {
///         continue;
///     }
///     component.set_enabled(false);
/// });
/// ```
#[macro_export]
macro_rules! for_each_component {
    ($entity:expr, |$component:ident| $body:expr $(,)?) => {{
        let entity: &$crate::ecs::Entity = &$entity;
        let mut iter = $crate::ecs::SnapshotIter::new(entity);
        while let ::core::option::Option::Some($component) =
            ::core::iter::Iterator::next(&mut iter)
        {
            $body;
        }
    }};
}

/// Run `body` for every entity in a registry, in spawn order.
///
/// Entities marked for destruction are still visited until the sweep.
///
/// # Example
/// ```ignore
/// for_each_entity!(registry, |entity| {
///     entity.update();
/// });
/// ```
#[macro_export]
macro_rules! for_each_entity {
    ($registry:expr, |$entity:ident| $body:expr $(,)?) => {{
        let registry: &$crate::ecs::Registry = &$registry;
        let mut iter = $crate::ecs::SnapshotIter::new(registry);
        while let ::core::option::Option::Some($entity) =
            ::core::iter::Iterator::next(&mut iter)
        {
            $body;
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::ecs::{Component, Registry};

    struct Marker;
    impl Component for Marker {}

    #[test]
    fn for_each_entity_supports_break_and_continue() {
        let registry = Registry::new();
        let spawned: Vec<_> = (0..5).map(|_| registry.spawn()).collect();
        spawned[1].destroy();

        let mut visited = Vec::new();
        for_each_entity!(registry, |entity| {
            if !entity.is_alive() {
                continue;
            }
            if visited.len() == 3 {
                break;
            }
            visited.push(entity.id());
        });

        assert_eq!(visited, [spawned[0].id(), spawned[2].id(), spawned[3].id()]);
    }

    #[test]
    fn for_each_entity_tolerates_spawning_and_sweeping() {
        let registry = Registry::new();
        let first = registry.spawn();
        let second = registry.spawn();

        let mut visited = Vec::new();
        for_each_entity!(&registry, |entity| {
            visited.push(entity.id());
            registry.spawn();
            entity.destroy();
            registry.collect_entities();
        });

        // Sweeping `first` shifts `second` into the slot the cursor already
        // passed, so the entity spawned during the first step is visited
        // in its place.
        assert_eq!(visited.len(), 2);
        assert_eq!(visited[0], first.id());
        assert_ne!(visited[1], second.id());
        assert!(second.exists());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn for_each_component_walks_in_insertion_order() {
        let registry = Registry::new();
        let entity = registry.spawn();
        let first = entity.attach(Marker);
        let second = entity.attach(Marker);

        let mut seen = Vec::new();
        for_each_component!(entity, |component| {
            seen.push(component);
        });
        assert_eq!(seen, vec![first, second]);
    }
}
