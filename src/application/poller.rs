use std::time::{Duration, Instant};

use serde_json::Value;

use crate::application::arbiter::poll_write_allowed;
use crate::application::resolver::{ResolvedViewport, WidthStrategy, resolve_viewport};
use crate::application::store::{CommitOutcome, ViewportStore};
use crate::domain::ViewportSignature;
use crate::infrastructure::config::SyncTuning;
use crate::infrastructure::event_log::{
    EVENT_CONTEXT_RESET, EVENT_RESOLVER_FALLBACK, EVENT_RESOLVER_UNRESOLVED,
    EVENT_VIEWPORT_COMMITTED, EVENT_VIEWPORT_SCHEDULED, EVENT_VIEWPORT_SUPPRESSED, Event,
    EventLogger,
};
use crate::infrastructure::surface::ViewportSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionOutcome {
    SurfaceUnavailable,
    Unresolved,
    Unchanged,
    SuppressedCooldown,
    Scheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    Committed,
    SuppressedLate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub flushed: Option<FlushOutcome>,
    pub detection: DetectionOutcome,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingCommit {
    due_at: Instant,
    resolved: ResolvedViewport,
}

/// Tick-driven poll/debounce state machine. The host calls `tick` every
/// `poll_interval`; the engine owns no threads or OS timers, so stopping the
/// cadence (or dropping the poller) is the full teardown.
pub struct ViewportPoller {
    tuning: SyncTuning,
    logger: Box<dyn EventLogger>,
    last_seen: Option<ViewportSignature>,
    pending: Option<PendingCommit>,
}

impl ViewportPoller {
    pub fn new(tuning: SyncTuning, logger: Box<dyn EventLogger>) -> Self {
        Self {
            tuning,
            logger,
            last_seen: None,
            pending: None,
        }
    }

    pub fn tuning(&self) -> &SyncTuning {
        &self.tuning
    }

    pub fn poll_interval(&self) -> Duration {
        self.tuning.poll_interval()
    }

    pub fn has_pending_commit(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub fn tick(
        &mut self,
        surface: &dyn ViewportSurface,
        store: &mut ViewportStore,
        now: Instant,
    ) -> TickReport {
        TickReport {
            flushed: self.flush_due(store, now),
            detection: self.detect(surface, store, now),
        }
    }

    /// Context change: new reference sequence / isolate selected. Clears the
    /// last-seen memo and any pending commit, resets the store, then forces
    /// an immediate resolve-and-commit that bypasses the cooldown, since
    /// stale cooldown state belongs to the old context. Returns whether the
    /// fresh commit happened (the surface may not be up yet).
    pub fn reset_context(
        &mut self,
        surface: &dyn ViewportSurface,
        store: &mut ViewportStore,
        now: Instant,
    ) -> bool {
        self.last_seen = None;
        self.pending = None;
        store.reset_for_context_change();
        self.logger.log(Event::new(EVENT_CONTEXT_RESET));

        let Some(resolved) = self.resolve(surface) else {
            return false;
        };

        self.last_seen = Some(resolved.signature.clone());
        let outcome = store.commit_from_visualization(&resolved);
        self.log_commit(&resolved, outcome, true);
        true
    }

    fn flush_due(&mut self, store: &mut ViewportStore, now: Instant) -> Option<FlushOutcome> {
        if !self.pending.as_ref().is_some_and(|pending| now >= pending.due_at) {
            return None;
        }
        let pending = self.pending.take()?;

        // Post-check: the store may have been navigated during the settle
        // wait, after the pre-check already passed.
        if !poll_write_allowed(
            store.change_source(),
            store.last_navigation_at(),
            now,
            self.tuning.navigation_cooldown(),
        ) {
            self.logger.log(
                Event::new(EVENT_VIEWPORT_SUPPRESSED)
                    .with_interval(&pending.resolved.interval)
                    .with_source(store.change_source())
                    .with_data("checkpoint", Value::from("post-debounce")),
            );
            return Some(FlushOutcome::SuppressedLate);
        }

        let outcome = store.commit_from_visualization(&pending.resolved);
        self.log_commit(&pending.resolved, outcome, false);
        Some(FlushOutcome::Committed)
    }

    fn detect(
        &mut self,
        surface: &dyn ViewportSurface,
        store: &mut ViewportStore,
        now: Instant,
    ) -> DetectionOutcome {
        // Expected during startup while the widget mounts; not an error.
        let Some(snapshot) = surface.snapshot() else {
            return DetectionOutcome::SurfaceUnavailable;
        };

        let Some(resolved) = resolve_viewport(surface, &snapshot, &self.tuning) else {
            self.logger.log(
                Event::new(EVENT_RESOLVER_UNRESOLVED)
                    .with_data("ref_name", Value::from(snapshot.region.ref_name.clone())),
            );
            return DetectionOutcome::Unresolved;
        };

        if self.last_seen.as_ref() == Some(&resolved.signature) {
            return DetectionOutcome::Unchanged;
        }

        // Memoize before arbitration so a suppressed change is not
        // re-detected on every subsequent tick.
        self.last_seen = Some(resolved.signature.clone());

        if resolved.width_strategy != WidthStrategy::Explicit {
            self.logger.log(
                Event::new(EVENT_RESOLVER_FALLBACK)
                    .with_data("strategy", Value::from(resolved.width_strategy.label())),
            );
        }

        if !poll_write_allowed(
            store.change_source(),
            store.last_navigation_at(),
            now,
            self.tuning.navigation_cooldown(),
        ) {
            self.logger.log(
                Event::new(EVENT_VIEWPORT_SUPPRESSED)
                    .with_interval(&resolved.interval)
                    .with_source(store.change_source())
                    .with_data("checkpoint", Value::from("detection")),
            );
            return DetectionOutcome::SuppressedCooldown;
        }

        self.logger.log(
            Event::new(EVENT_VIEWPORT_SCHEDULED)
                .with_interval(&resolved.interval)
                .with_data("settle_ms", Value::from(self.tuning.debounce_ms)),
        );
        self.pending = Some(PendingCommit {
            due_at: now + self.tuning.debounce(),
            resolved,
        });
        DetectionOutcome::Scheduled
    }

    fn resolve(&self, surface: &dyn ViewportSurface) -> Option<ResolvedViewport> {
        let snapshot = surface.snapshot()?;
        resolve_viewport(surface, &snapshot, &self.tuning)
    }

    fn log_commit(&self, resolved: &ResolvedViewport, outcome: CommitOutcome, forced: bool) {
        self.logger.log(
            Event::new(EVENT_VIEWPORT_COMMITTED)
                .with_interval(&resolved.interval)
                .with_data("initialized", Value::from(outcome == CommitOutcome::Initialized))
                .with_data("moved", Value::from(outcome == CommitOutcome::Updated))
                .with_data("forced", Value::from(forced)),
        );
    }
}
