// Shared fixtures for the ecs unit tests.

use crate::ecs::{Component, Entity};
use std::cell::RefCell;
use std::rc::Rc;

pub(crate) type EventLog = Rc<RefCell<Vec<String>>>;

pub(crate) fn events(log: &EventLog) -> Vec<String> {
    log.borrow().clone()
}

/// Records every hook it receives as `"<name>:<hook>"`.
pub(crate) struct Probe {
    name: &'static str,
    log: EventLog,
}

impl Probe {
    pub(crate) fn new(name: &'static str, log: &EventLog) -> Self {
        Self {
            name,
            log: log.clone(),
        }
    }

    fn record(&self, hook: &str) {
        self.log.borrow_mut().push(format!("{}:{hook}", self.name));
    }
}

impl Component for Probe {
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
