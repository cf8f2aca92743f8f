//! Round-robin service scheduler.
//!
//! Each tick advances at most one non-stopped service by one state step,
//! starting the search at the cursor and wrapping once around the table.
//! A permanently busy service therefore never starves its neighbours.

use super::context::Context;
use super::registry::Service;

/// Round-robin cursor over the service table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    cursor: usize,
    count: usize,
}

impl Scheduler {
    /// Scheduler with an empty table and the cursor at 0.
    pub const fn new() -> Self {
        Self { cursor: 0, count: 0 }
    }

    /// Cache the table length. Called once at engine initialization; the
    /// table is assumed not to change size afterwards.
    pub fn count_services(&mut self, services: &[Service<'_>]) {
        self.count = services.len();
        if self.cursor >= self.count {
            self.cursor = 0;
        }
    }

    /// Table length cached by [`count_services`](Self::count_services).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Index of the next service the scheduler will consider.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pick the next non-stopped service and move the cursor past it.
    ///
    /// Returns `None`, cursor untouched, when every service is stopped.
    pub fn select(&mut self, services: &[Service<'_>]) -> Option<usize> {
        let count = self.count.min(services.len());
        if count == 0 {
            return None;
        }

        let start = if self.cursor < count { self.cursor } else { 0 };
        let idx = (0..count)
            .map(|offset| (start + offset) % count)
            .find(|&idx| !services[idx].is_stopped())?;

        self.cursor = (idx + 1) % count;
        Some(idx)
    }

    /// Run one step of the next eligible service. Returns its index.
    pub fn tick(&mut self, services: &[Service<'_>], ctx: &mut Context<'_, '_>) -> Option<usize> {
        let idx = self.select(services)?;
        let service = &services[idx];
        if let Some(next) = service.step(ctx) {
            trace!("service {=str} -> {}", service.name, next);
            if next.is_stopped() {
                debug!("service {=str} stopped", service.name);
            }
        }
        Some(idx)
    }
}
