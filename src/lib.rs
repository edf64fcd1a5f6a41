//! Viewport synchronization engine for a genome-browser embed: keeps one
//! logical "currently visible genomic interval" consistent between a
//! poll-only visualization surface and discrete navigation actions, without
//! the two writers feeding back into each other.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::arbiter::poll_write_allowed;
pub use application::poller::{DetectionOutcome, FlushOutcome, TickReport, ViewportPoller};
pub use application::resolver::{ResolvedViewport, WidthStrategy, resolve_viewport};
pub use application::store::{CommitOutcome, ViewportListener, ViewportStore};
pub use domain::{
    ChangeSource, DisplayedRegion, GenomicInterval, NavigationOrigin, ViewMeta, ViewportSignature,
    ViewportState,
};
pub use infrastructure::config::SyncTuning;
pub use infrastructure::event_log::{Event, EventLogger, FileEventLogger, NullEventLogger};
pub use infrastructure::surface::{SurfaceSnapshot, ViewportSurface};
