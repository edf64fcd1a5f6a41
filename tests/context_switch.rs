mod support;

use std::time::{Duration, Instant};

use locusync::{
    ChangeSource, DetectionOutcome, FlushOutcome, GenomicInterval, NavigationOrigin,
    NullEventLogger, SyncTuning, ViewportPoller, ViewportStore,
};
use support::ScriptedSurface;

fn interval(ref_name: &str, start: u64, end: u64) -> GenomicInterval {
    GenomicInterval::try_new(ref_name.to_string(), start, end).expect("interval should be valid")
}

fn poller() -> ViewportPoller {
    ViewportPoller::new(SyncTuning::default(), Box::new(NullEventLogger))
}

#[test]
fn switching_isolates_commits_the_new_contig_immediately() {
    let mut surface = ScriptedSurface::contig("chr1", 1_000_000);
    let mut store = ViewportStore::new();
    let mut poller = poller();
    let t0 = Instant::now();

    poller.tick(&surface, &mut store, t0);
    poller.tick(&surface, &mut store, t0 + Duration::from_millis(2_200));
    assert_eq!(store.viewport(), Some(interval("chr1", 0, 5_500)));

    // a different isolate is selected; the widget now shows another contig
    surface.ref_name = "chr2".to_string();
    surface.region_end = 800_000;
    assert!(poller.reset_context(&surface, &mut store, t0 + Duration::from_millis(3_000)));
    assert_eq!(store.viewport(), Some(interval("chr2", 0, 5_500)));
    assert_eq!(store.change_source(), ChangeSource::Visualization);
    // a fresh context repeats first-paint suppression
    assert!(!store.take_viewport_changed());
}

#[test]
fn reset_commits_even_a_previously_suppressed_signature() {
    let surface = ScriptedSurface::contig("chr1", 1_000_000);
    let mut store = ViewportStore::new();
    let mut poller = poller();
    let t0 = Instant::now();

    store.record_navigation(
        NavigationOrigin::FeatureTable,
        interval("chr1", 1_000, 2_000),
        None,
        t0,
    );
    assert_eq!(
        poller
            .tick(&surface, &mut store, t0 + Duration::from_millis(100))
            .detection,
        DetectionOutcome::SuppressedCooldown
    );

    // the raw surface signature is the one just suppressed; the context
    // reset invalidates the memo and the cooldown alike
    assert!(poller.reset_context(&surface, &mut store, t0 + Duration::from_millis(200)));
    assert_eq!(store.viewport(), Some(interval("chr1", 0, 5_500)));
    assert_eq!(store.last_navigation_at(), None);

    let report = poller.tick(&surface, &mut store, t0 + Duration::from_millis(400));
    assert_eq!(report.detection, DetectionOutcome::Unchanged);
}

#[test]
fn reset_cancels_an_in_flight_debounce() {
    let mut surface = ScriptedSurface::contig("chr1", 1_000_000);
    let mut store = ViewportStore::new();
    let mut poller = poller();
    let t0 = Instant::now();

    poller.tick(&surface, &mut store, t0);
    assert!(poller.has_pending_commit());

    surface.ref_name = "chr2".to_string();
    assert!(poller.reset_context(&surface, &mut store, t0 + Duration::from_millis(500)));
    assert!(!poller.has_pending_commit());
    assert_eq!(store.viewport(), Some(interval("chr2", 0, 5_500)));

    // the old chr1 commit must never land
    let report = poller.tick(&surface, &mut store, t0 + Duration::from_millis(2_500));
    assert_eq!(report.flushed, None);
    assert_eq!(store.viewport(), Some(interval("chr2", 0, 5_500)));
}

#[test]
fn reset_while_the_widget_is_remounting_recovers_on_a_later_tick() {
    let mut surface = ScriptedSurface::contig("chr1", 1_000_000);
    let mut store = ViewportStore::new();
    let mut poller = poller();
    let t0 = Instant::now();

    poller.tick(&surface, &mut store, t0);
    poller.tick(&surface, &mut store, t0 + Duration::from_millis(2_200));

    // context changes while the widget tears down and remounts
    surface.mounted = false;
    assert!(!poller.reset_context(&surface, &mut store, t0 + Duration::from_millis(3_000)));
    assert_eq!(store.viewport(), None);

    surface.mounted = true;
    surface.ref_name = "chr3".to_string();
    let report = poller.tick(&surface, &mut store, t0 + Duration::from_millis(3_200));
    assert_eq!(report.detection, DetectionOutcome::Scheduled);

    let report = poller.tick(&surface, &mut store, t0 + Duration::from_millis(5_400));
    assert_eq!(report.flushed, Some(FlushOutcome::Committed));
    assert_eq!(store.viewport(), Some(interval("chr3", 0, 5_500)));
    assert!(!store.take_viewport_changed());
}
