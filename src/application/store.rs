use std::time::Instant;

use crate::application::resolver::ResolvedViewport;
use crate::domain::{ChangeSource, GenomicInterval, NavigationOrigin, ViewMeta, ViewportState};

/// Consumers that want a push when the synchronized viewport is written.
/// Readers must never mutate; the two sanctioned write paths are
/// `commit_from_visualization` and `record_navigation`.
pub trait ViewportListener {
    fn viewport_written(&self, state: &ViewportState, source: ChangeSource);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Initialized,
    Updated,
    Unchanged,
}

pub struct ViewportStore {
    state: ViewportState,
    listeners: Vec<Box<dyn ViewportListener>>,
}

impl ViewportStore {
    pub fn new() -> Self {
        Self {
            state: ViewportState::new(),
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn viewport(&self) -> Option<GenomicInterval> {
        self.state.interval()
    }

    pub fn view_meta(&self) -> &ViewMeta {
        &self.state.view_meta
    }

    pub fn change_source(&self) -> ChangeSource {
        self.state.change_source
    }

    pub fn last_navigation_at(&self) -> Option<Instant> {
        self.state.last_navigation_at
    }

    pub fn viewport_initialized(&self) -> bool {
        self.state.viewport_initialized
    }

    /// One-shot read of the "the visualization moved" flag. The designated
    /// consumer reads it once and this call clears it.
    pub fn take_viewport_changed(&mut self) -> bool {
        let changed = self.state.viewport_changed;
        self.state.viewport_changed = false;
        changed
    }

    pub fn subscribe(&mut self, listener: Box<dyn ViewportListener>) {
        self.listeners.push(listener);
    }

    /// The arbiter-gated poll path. First paint flips the initialization
    /// flag without signaling a change; later commits signal only when the
    /// interval actually moved.
    pub fn commit_from_visualization(&mut self, resolved: &ResolvedViewport) -> CommitOutcome {
        let differs = self.state.seq_id != resolved.interval.ref_name
            || self.state.start != resolved.interval.start
            || self.state.end != resolved.interval.end;

        self.state.seq_id = resolved.interval.ref_name.clone();
        self.state.start = resolved.interval.start;
        self.state.end = resolved.interval.end;
        self.state.view_meta = resolved.meta.clone();
        self.state.change_source = ChangeSource::Visualization;

        let outcome = if !self.state.viewport_initialized {
            self.state.viewport_initialized = true;
            self.state.viewport_changed = false;
            CommitOutcome::Initialized
        } else if differs {
            self.state.viewport_changed = true;
            CommitOutcome::Updated
        } else {
            CommitOutcome::Unchanged
        };

        self.publish(ChangeSource::Visualization);
        outcome
    }

    /// The navigation path. Called strictly before the collaborator
    /// reprograms the surface: the timestamp is stamped before the value so
    /// the poller's redundant detection of the same move lands inside the
    /// cooldown.
    pub fn record_navigation(
        &mut self,
        origin: NavigationOrigin,
        interval: GenomicInterval,
        meta: Option<ViewMeta>,
        now: Instant,
    ) {
        let source = origin.as_change_source();
        self.state.change_source = source;
        self.state.last_navigation_at = Some(now);

        self.state.seq_id = interval.ref_name;
        self.state.start = interval.start;
        self.state.end = interval.end;
        if let Some(meta) = meta {
            self.state.view_meta = meta;
        }

        self.publish(source);
    }

    /// Clears everything when the genomic context (reference sequence /
    /// isolate) changes; cooldown state belonging to the old context is
    /// meaningless in the new one.
    pub fn reset_for_context_change(&mut self) {
        self.state = ViewportState::new();
        self.publish(ChangeSource::None);
    }

    fn publish(&self, source: ChangeSource) {
        for listener in &self.listeners {
            listener.viewport_written(&self.state, source);
        }
    }
}

impl Default for ViewportStore {
    fn default() -> Self {
        Self::new()
    }
}
