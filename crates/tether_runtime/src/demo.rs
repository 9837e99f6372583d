//! Demo scene: spawner entities that periodically create short-lived
//! entities, which destroy themselves once their lifetime runs out.

use std::cell::Cell;
use std::rc::Rc;
use tether_core::{Component, Entity, Registry};
use tether_services::DemoSettings;
use tracing::{debug, trace};

/// Spawns a child entity every `interval` updates.
pub struct Spawner {
    interval: u64,
    lifetime: u64,
    updates: u64,
    spawned: Rc<Cell<usize>>,
}

impl Spawner {
    pub fn new(interval: u64, lifetime: u64, spawned: Rc<Cell<usize>>) -> Self {
        Self {
            interval: interval.max(1),
            lifetime,
            updates: 0,
            spawned,
        }
    }
}

impl Component for Spawner {
    fn on_add(&mut self, owner: &Entity) {
        debug!(entity = %owner.id(), interval = self.interval, "spawner attached");
    }

    fn on_update(&mut self, owner: &Entity) {
        self.updates += 1;
        if self.updates % self.interval != 0 {
            return;
        }
        let Some(registry) = owner.registry() else {
            return;
        };

        let child = registry.spawn();
        child.attach(Lifetime::new(self.lifetime));
        child.attach(Beacon::default());
        self.spawned.set(self.spawned.get() + 1);
    }
}

/// Destroys its owner after a fixed number of updates.
pub struct Lifetime {
    remaining: u64,
}

impl Lifetime {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl Component for Lifetime {
    fn on_update(&mut self, owner: &Entity) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            owner.destroy();
        }
    }
}

/// Stand-in for a renderable: counts the draws it receives.
#[derive(Default)]
pub struct Beacon {
    draws: u64,
}

impl Beacon {
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl Component for Beacon {
    fn on_draw(&mut self, _owner: &Entity) {
        self.draws += 1;
    }

    fn on_cleanup(&mut self, owner: &Entity) {
        trace!(entity = %owner.id(), draws = self.draws(), "beacon retired");
    }
}

/// Populate `registry` with the configured spawners. Returns the shared
/// counter of children spawned so far.
pub fn build_scene(registry: &Registry, settings: &DemoSettings) -> Rc<Cell<usize>> {
    let spawned = Rc::new(Cell::new(0));
    for _ in 0..settings.spawners {
        let entity = registry.spawn();
        entity.attach(Spawner::new(
            settings.spawn_interval,
            settings.lifetime_frames,
            spawned.clone(),
        ));
    }
    spawned
}
