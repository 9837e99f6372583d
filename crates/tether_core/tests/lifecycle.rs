//! End-to-end lifecycle scenarios: queries, self-destruction and sweeping.

use std::cell::RefCell;
use std::rc::Rc;
use tether_core::{
    for_each_entity, Component, ComponentHandle, ContractViolation, Entity, FrameDriver, Registry,
    SnapshotIter,
};

type Log = Rc<RefCell<Vec<String>>>;

struct Tracked {
    name: &'static str,
    log: Log,
}

impl Tracked {
    fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
        }
    }

    fn record(&self, hook: &str) {
        self.log.borrow_mut().push(format!("{}:{hook}", self.name));
    }
}

impl Component for Tracked {
    fn on_add(&mut self, _owner: &Entity) {
        self.record("add");
    }

    fn on_remove(&mut self, _owner: &Entity) {
        self.record("remove");
    }

    fn on_update(&mut self, _owner: &Entity) {
        self.record("update");
    }

    fn on_draw(&mut self, _owner: &Entity) {
        self.record("draw");
    }

    fn on_cleanup(&mut self, _owner: &Entity) {
        self.record("cleanup");
    }
}

struct KindX;
impl Component for KindX {}

struct KindY;
impl Component for KindY {}

struct DestroyOwner;
impl Component for DestroyOwner {
    fn on_update(&mut self, owner: &Entity) {
        owner.destroy();
    }
}

#[test]
fn type_queries_on_mixed_components() {
    let registry = Registry::new();
    let a = registry.spawn();
    let c1 = ComponentHandle::new(KindX);
    let c2 = ComponentHandle::new(KindY);
    let c3 = ComponentHandle::new(KindX);
    a.add_component(&c1)
        .and_then(|a| a.add_component(&c2))
        .and_then(|a| a.add_component(&c3))
        .unwrap();

    assert_eq!(a.find_components_of_type::<KindX>(), vec![c1.clone(), c3.clone()]);
    assert_eq!(a.get_component_of_type::<KindX>(), Some(c3.clone()));

    assert_eq!(a.remove_components_of_type::<KindX>(Some(1)), 1);
    assert_eq!(a.components(), vec![c1, c2]);
    assert!(!c3.is_attached());
}

#[test]
fn entity_destroying_itself_mid_update() {
    let log: Log = Rc::default();
    let registry = Registry::new();
    let b = registry.spawn();
    b.attach(Tracked::new("c1", &log));
    b.attach(DestroyOwner);
    b.attach(Tracked::new("c2", &log));
    b.attach(Tracked::new("c3", &log));
    log.borrow_mut().clear();

    b.update();
    assert_eq!(*log.borrow(), ["c1:update", "c2:update", "c3:update"]);
    assert!(registry.contains(&b));

    // Still visible to traversal until the sweep.
    let mut seen = 0;
    for_each_entity!(registry, |entity| {
        assert_eq!(entity, b);
        seen += 1;
    });
    assert_eq!(seen, 1);

    log.borrow_mut().clear();
    assert_eq!(registry.collect_entities(), 1);
    assert_eq!(*log.borrow(), ["c1:cleanup", "c2:cleanup", "c3:cleanup"]);
    assert!(!registry.contains(&b));
    assert!(!b.exists());

    assert_eq!(registry.collect_entities(), 0);
    b.destroy();
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn owned_component_cannot_move_between_entities() {
    let registry = Registry::new();
    let first = registry.spawn();
    let second = registry.spawn();
    let shared = first.attach(KindX);

    let err = second.add_component(&shared).unwrap_err();
    assert!(matches!(
        err,
        ContractViolation::ComponentAlreadyAttached { owner, .. } if owner == first.id()
    ));
    assert_eq!(second.component_count(), 0);

    // After an explicit removal it can be re-attached elsewhere.
    first.remove_component(&shared).unwrap();
    second.add_component(&shared).unwrap();
    assert_eq!(shared.owner(), Some(second));
}

#[test]
fn explicit_removal_then_sweep_fires_each_hook_once() {
    let log: Log = Rc::default();
    let registry = Registry::new();
    let entity = registry.spawn();
    let removed = entity.attach(Tracked::new("gone", &log));
    entity.attach(Tracked::new("kept", &log));

    entity.remove_component(&removed).unwrap();
    entity.destroy();
    registry.collect_entities();

    assert_eq!(
        *log.borrow(),
        ["gone:add", "kept:add", "gone:remove", "kept:cleanup"]
    );
}

#[test]
fn frame_driver_runs_update_then_draw() {
    let log: Log = Rc::default();
    let registry = Registry::new();
    let first = registry.spawn();
    first.attach(Tracked::new("a", &log));
    let second = registry.spawn();
    second.attach(Tracked::new("b", &log));
    log.borrow_mut().clear();

    let mut driver = FrameDriver::new(registry);
    driver.run_frame();

    assert_eq!(*log.borrow(), ["a:update", "b:update", "a:draw", "b:draw"]);
}

#[test]
fn registry_snapshot_survives_removal_during_fetch() {
    let registry = Registry::new();
    let entities: Vec<_> = (0..3).map(|_| registry.spawn()).collect();

    let mut iter = SnapshotIter::new(&registry);
    let first = iter.get_next().unwrap();
    assert_eq!(first.as_ref(), Some(&entities[0]));
    entities[0].destroy();
    registry.collect_entities();

    assert!(iter.get_next().is_ok());
    assert!(iter.get_next().is_ok());
    assert!(matches!(
        iter.get_next(),
        Err(ContractViolation::IteratorExhausted { count: 3 })
    ));
}

struct OneShot {
    log: Log,
    removed_self: Option<Result<(), ContractViolation>>,
    removed_by_type: usize,
}

impl Component for OneShot {
    fn on_update(&mut self, owner: &Entity) {
        if let Some(me) = owner.get_component_of_type::<OneShot>() {
            self.removed_self = Some(owner.remove_component(&me).map(|_| ()));
            self.removed_by_type = owner.remove_components_of_type::<OneShot>(None);
        }
    }

    fn on_remove(&mut self, _owner: &Entity) {
        self.log.borrow_mut().push("oneshot:remove".to_string());
    }
}

#[test]
fn component_removing_itself_mid_update_is_detached_once() {
    let log: Log = Rc::default();
    let registry = Registry::new();
    let entity = registry.spawn();
    let oneshot = entity.attach(OneShot {
        log: log.clone(),
        removed_self: None,
        removed_by_type: 0,
    });
    entity.attach(Tracked::new("sibling", &log));
    log.borrow_mut().clear();

    entity.update();

    {
        let state = oneshot.borrow::<OneShot>().unwrap();
        assert_eq!(state.removed_self, Some(Ok(())));
        assert_eq!(state.removed_by_type, 0);
    }
    assert!(!oneshot.is_attached());
    assert!(!entity.has_component_of_type::<OneShot>());
    // The sibling shifted into the slot the pass had already visited.
    assert_eq!(*log.borrow(), ["oneshot:remove"]);

    entity.update();
    assert_eq!(*log.borrow(), ["oneshot:remove", "sibling:update"]);
}
