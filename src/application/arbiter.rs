use std::time::{Duration, Instant};

use crate::domain::ChangeSource;

/// Decides whether a poll-detected viewport may overwrite the store.
///
/// Consulted at two checkpoints: at detection time before a commit is
/// scheduled, and again inside the debounced flush, because a navigation
/// write can land during the settle wait. A navigation-sourced state blocks
/// poll writes until the cooldown has fully elapsed; reversion is purely an
/// elapsed-time comparison at read time, no timer drives it.
pub fn poll_write_allowed(
    change_source: ChangeSource,
    last_navigation_at: Option<Instant>,
    now: Instant,
    cooldown: Duration,
) -> bool {
    if !change_source.is_navigation() {
        return true;
    }

    let Some(stamped_at) = last_navigation_at else {
        return true;
    };

    now.saturating_duration_since(stamped_at) >= cooldown
}

#[cfg(test)]
mod tests {
    use super::poll_write_allowed;
    use crate::domain::ChangeSource;
    use std::time::{Duration, Instant};

    const COOLDOWN: Duration = Duration::from_millis(5_000);

    #[test]
    fn non_navigation_sources_always_pass() {
        let now = Instant::now();
        assert!(poll_write_allowed(ChangeSource::None, None, now, COOLDOWN));
        assert!(poll_write_allowed(
            ChangeSource::Visualization,
            Some(now),
            now,
            COOLDOWN
        ));
    }

    #[test]
    fn navigation_source_without_timestamp_passes() {
        let now = Instant::now();
        assert!(poll_write_allowed(
            ChangeSource::FeatureTable,
            None,
            now,
            COOLDOWN
        ));
    }

    #[test]
    fn navigation_source_blocks_inside_cooldown() {
        let stamped = Instant::now();
        assert!(!poll_write_allowed(
            ChangeSource::FeatureTable,
            Some(stamped),
            stamped + Duration::from_millis(100),
            COOLDOWN
        ));
        assert!(!poll_write_allowed(
            ChangeSource::SearchResults,
            Some(stamped),
            stamped + Duration::from_millis(4_999),
            COOLDOWN
        ));
    }

    #[test]
    fn navigation_source_passes_once_cooldown_elapses() {
        let stamped = Instant::now();
        assert!(poll_write_allowed(
            ChangeSource::FeatureTable,
            Some(stamped),
            stamped + COOLDOWN,
            COOLDOWN
        ));
        assert!(poll_write_allowed(
            ChangeSource::SearchResults,
            Some(stamped),
            stamped + COOLDOWN + Duration::from_millis(1),
            COOLDOWN
        ));
    }

    #[test]
    fn clock_going_backwards_stays_suppressed() {
        let stamped = Instant::now() + Duration::from_millis(500);
        let earlier = stamped - Duration::from_millis(500);
        assert!(!poll_write_allowed(
            ChangeSource::FeatureTable,
            Some(stamped),
            earlier,
            COOLDOWN
        ));
    }
}
