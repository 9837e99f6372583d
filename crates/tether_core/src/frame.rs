//! Frame driver
//!
//! One frame is: update every entity, draw every entity, sweep the entities
//! destroyed along the way. Hosts with their own loop can call
//! [`Entity::update`], [`Entity::draw`] and [`Registry::collect_entities`]
//! directly instead.

use crate::ecs::Registry;
use crate::for_each_entity;
use crate::time::FrameClock;
use tracing::trace;

/// How [`FrameDriver::run_frame`] treats the registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameOptions {
    /// Run `collect_entities` at the end of every frame.
    pub sweep_each_frame: bool,
    /// Do not even call `update`/`draw` on entities marked for destruction.
    pub skip_marked: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            sweep_each_frame: true,
            skip_marked: false,
        }
    }
}

/// What happened during one frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub tick: u64,
    /// Registry size when the frame started.
    pub entities: usize,
    /// Entities that were alive when their update was issued.
    pub updated: usize,
    /// Entities that were alive when their draw was issued.
    pub drawn: usize,
    pub swept: usize,
}

pub struct FrameDriver {
    registry: Registry,
    clock: FrameClock,
    options: FrameOptions,
}

impl FrameDriver {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            clock: FrameClock::default(),
            options: FrameOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FrameOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate_hz: u32) -> Self {
        self.clock = FrameClock::new(tick_rate_hz);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn options(&self) -> FrameOptions {
        self.options
    }

    /// Update pass over the registry. Returns how many live entities were
    /// updated.
    pub fn update_all(&self) -> usize {
        let mut updated = 0;
        for_each_entity!(self.registry, |entity| {
            if entity.is_alive() {
                updated += 1;
            } else if self.options.skip_marked {
                continue;
            }
            entity.update();
        });
        updated
    }

    /// Draw pass over the registry. Returns how many live entities were
    /// drawn.
    pub fn draw_all(&self) -> usize {
        let mut drawn = 0;
        for_each_entity!(self.registry, |entity| {
            if entity.is_alive() {
                drawn += 1;
            } else if self.options.skip_marked {
                continue;
            }
            entity.draw();
        });
        drawn
    }

    pub fn run_frame(&mut self) -> FrameReport {
        let entities = self.registry.len();
        let updated = self.update_all();
        let drawn = self.draw_all();
        let swept = if self.options.sweep_each_frame {
            self.registry.collect_entities()
        } else {
            0
        };

        let report = FrameReport {
            tick: self.clock.tick_count(),
            entities,
            updated,
            drawn,
            swept,
        };
        self.clock.advance_tick();

        trace!(
            tick = report.tick,
            entities,
            updated,
            drawn,
            swept,
            "frame finished"
        );
        report
    }
}
