use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use crate::fetch::Client;
use crate::render::Renderer;
use crate::view::assemble;

/// Issues monotonically increasing cycle ids and admits only the latest,
/// so a fetch that resolves after a newer cycle began is dropped instead
/// of rendered out of order.
#[derive(Debug, Default)]
pub struct CycleGate {
    issued: u64,
}

impl CycleGate {
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn admit(&self, cycle: u64) -> bool {
        cycle == self.issued
    }
}

/// Timer-driven fetch → assemble → render loop.
///
/// One cycle is in flight at a time: the next tick is not honored until
/// the current cycle resolves or fails, so two cycles never race to paint
/// the same frame. A failed cycle skips its render; the next one retries
/// from scratch with no backoff.
pub struct PollDriver {
    client: Client,
    interval: Duration,
    gate: CycleGate,
}

impl PollDriver {
    pub fn new(client: Client, interval: Duration) -> Self {
        PollDriver {
            client,
            interval,
            gate: CycleGate::default(),
        }
    }

    pub async fn run<R: Renderer>(mut self, renderer: &mut R) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.cycle(renderer).await;
        }
    }

    /// One complete poll cycle. The previous view is discarded wholesale:
    /// the payload handed off is rebuilt from fresh responses every time.
    pub async fn cycle<R: Renderer>(&mut self, renderer: &mut R) {
        let cycle = self.gate.begin();
        let view = match self.client.fetch_view().await {
            Ok(view) => view,
            Err(err) => {
                warn!(cycle, %err, "fetch failed, skipping render");
                return;
            }
        };
        if !self.gate.admit(cycle) {
            debug!(cycle, "superseded, dropping stale view");
            return;
        }
        match assemble(&view) {
            Ok(payload) => renderer.handoff(&payload),
            Err(err) => warn!(cycle, %err, "assemble failed, skipping render"),
        }
    }
}
