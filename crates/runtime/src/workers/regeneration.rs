//! Periodic regeneration of every live actor.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use realm_core::RegenerationRule;

use super::RealmMetrics;
use crate::world::World;

/// Background task applying the interval regeneration rules on every tick.
pub(crate) struct RegenerationWorker {
    world: Arc<World>,
    rules: Vec<RegenerationRule>,
    interval: Duration,
    metrics: Arc<RealmMetrics>,
    shutdown: watch::Receiver<bool>,
}

impl RegenerationWorker {
    pub(crate) fn new(
        world: Arc<World>,
        rules: Vec<RegenerationRule>,
        interval: Duration,
        metrics: Arc<RealmMetrics>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            world,
            rules,
            interval,
            metrics,
            shutdown,
        }
    }

    /// Main worker loop. Returns once shutdown is signalled.
    pub(crate) async fn run(mut self) {
        info!(
            target: "realm::regeneration",
            interval_ms = self.interval.as_millis() as u64,
            rules = self.rules.len(),
            "regeneration worker started"
        );

        let mut ticker = time::interval_at(time::Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick().await,
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!(target: "realm::regeneration", "regeneration worker stopped");
    }

    /// One pass over every live actor. Each actor is locked on its own, so a
    /// slow or contended actor only delays itself.
    async fn tick(&self) {
        let mut visited = 0usize;
        let mut writes = 0usize;

        for handle in self.world.actors() {
            let mut actor = handle.lock().await;
            visited += 1;
            let written = actor.regenerate(&self.rules);
            if written > 0 {
                debug!(
                    target: "realm::regeneration",
                    actor = %actor.id,
                    written,
                    "regenerated"
                );
            }
            writes += written;
        }

        self.metrics.record_regeneration_tick(writes);
        debug!(target: "realm::regeneration", visited, writes, "tick complete");
    }
}
