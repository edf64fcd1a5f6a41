use crate::domain::{DisplayedRegion, GenomicInterval, ViewMeta, ViewportSignature};
use crate::infrastructure::config::SyncTuning;
use crate::infrastructure::surface::{SurfaceSnapshot, ViewportSurface};

/// Which rung of the width fallback chain produced the pixel width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthStrategy {
    Explicit,
    Auxiliary,
    Probe,
    Default,
}

impl WidthStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Auxiliary => "auxiliary",
            Self::Probe => "probe",
            Self::Default => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedViewport {
    pub interval: GenomicInterval,
    pub meta: ViewMeta,
    pub signature: ViewportSignature,
    pub width_strategy: WidthStrategy,
}

/// Converts one surface observation into the synchronized viewport.
///
/// Every surface read may be absent; each absence falls through to the next
/// cheaper strategy, and the function never panics. `None` means the
/// observation was unusable (no region, non-positive scale) and the caller
/// keeps the previous state; the next poll tick is the retry.
pub fn resolve_viewport(
    surface: &dyn ViewportSurface,
    snapshot: &SurfaceSnapshot,
    tuning: &SyncTuning,
) -> Option<ResolvedViewport> {
    let region = &snapshot.region;
    let bp_per_px = snapshot.bp_per_px;
    if !bp_per_px.is_finite() || bp_per_px <= 0.0 {
        return None;
    }
    if region.end < region.start || region.ref_name.trim().is_empty() {
        return None;
    }

    let (width_px, width_strategy) = resolve_width(surface, region, tuning);
    let offset_px = surface
        .offset_px()
        .filter(|px| px.is_finite())
        .unwrap_or(0.0);

    let (raw_start, raw_end) = exact_bounds(surface, width_px)
        .unwrap_or_else(|| linear_bounds(region, bp_per_px, offset_px, width_px));

    let (start, end) = clamp_to_region(raw_start, raw_end, region);
    let (start, end) = apply_centering(start, end, region, tuning);
    let (start, end) = apply_buffer(start, end, region, tuning);
    let (start, end) = apply_minimum_span(start, end, region, tuning);

    let signature = ViewportSignature::new(&region.ref_name, start, end, bp_per_px, offset_px);

    Some(ResolvedViewport {
        interval: GenomicInterval {
            ref_name: region.ref_name.clone(),
            start,
            end,
        },
        meta: ViewMeta {
            assembly_name: region.assembly_name.clone(),
            bp_per_px,
            offset_px,
        },
        signature,
        width_strategy,
    })
}

fn resolve_width(
    surface: &dyn ViewportSurface,
    region: &DisplayedRegion,
    tuning: &SyncTuning,
) -> (f64, WidthStrategy) {
    if let Some(width) = positive_finite(surface.width_px()) {
        return (width, WidthStrategy::Explicit);
    }
    if let Some(width) = positive_finite(surface.interval_width_px()) {
        return (width, WidthStrategy::Auxiliary);
    }
    if let Some(width) = probe_width(surface, region, tuning) {
        return (width, WidthStrategy::Probe);
    }

    (tuning.default_width_px, WidthStrategy::Default)
}

// Back-solve pixels-per-bp from the pixel distance spanned by a fixed probe
// length, then scale to the displayed span. An oversized estimate is safe:
// bounds get clamped and the centering heuristic replaces whole-region
// viewports anyway.
fn probe_width(
    surface: &dyn ViewportSurface,
    region: &DisplayedRegion,
    tuning: &SyncTuning,
) -> Option<f64> {
    if tuning.width_probe_bp == 0 {
        return None;
    }

    let base_px = surface.bp_to_px(region.start as f64)?;
    let probe_px = surface.bp_to_px((region.start + tuning.width_probe_bp) as f64)?;
    if !base_px.is_finite() || !probe_px.is_finite() || probe_px <= base_px {
        return None;
    }

    let px_per_bp = (probe_px - base_px) / tuning.width_probe_bp as f64;
    positive_finite(Some(region.span() as f64 * px_per_bp))
}

fn positive_finite(value: Option<f64>) -> Option<f64> {
    value.filter(|candidate| candidate.is_finite() && *candidate > 0.0)
}

fn exact_bounds(surface: &dyn ViewportSurface, width_px: f64) -> Option<(f64, f64)> {
    let start_bp = surface.px_to_bp(0.0)?;
    let end_bp = surface.px_to_bp(width_px)?;
    (start_bp.is_finite() && end_bp.is_finite() && start_bp < end_bp).then_some((start_bp, end_bp))
}

fn linear_bounds(
    region: &DisplayedRegion,
    bp_per_px: f64,
    offset_px: f64,
    width_px: f64,
) -> (f64, f64) {
    let start_bp = region.start as f64 + offset_px * bp_per_px;
    (start_bp, start_bp + width_px * bp_per_px)
}

fn clamp_to_region(raw_start: f64, raw_end: f64, region: &DisplayedRegion) -> (u64, u64) {
    let (low, high) = if raw_start <= raw_end {
        (raw_start, raw_end)
    } else {
        (raw_end, raw_start)
    };

    let low = low.max(region.start as f64).min(region.end as f64);
    let high = high.max(region.start as f64).min(region.end as f64);
    (low.round() as u64, high.round() as u64)
}

// On first paint the surface typically shows the entire contig, which is
// useless as a "current focus" signal; replace it with a window centered on
// the region midpoint.
fn apply_centering(
    start: u64,
    end: u64,
    region: &DisplayedRegion,
    tuning: &SyncTuning,
) -> (u64, u64) {
    let region_span = region.span();
    if region_span < tuning.centering_min_region_bp {
        return (start, end);
    }
    if ((end - start) as f64) < region_span as f64 * tuning.large_region_fraction {
        return (start, end);
    }

    let window = ((region_span as f64 * tuning.centered_window_percent).round() as u64)
        .min(tuning.centered_window_cap_bp);
    centered_window(region.midpoint(), window, region)
}

fn apply_buffer(start: u64, end: u64, region: &DisplayedRegion, tuning: &SyncTuning) -> (u64, u64) {
    if tuning.buffer_percent <= 0.0 {
        return (start, end);
    }

    let pad = ((end - start) as f64 * tuning.buffer_percent).round() as u64;
    (
        start.saturating_sub(pad).max(region.start),
        end.saturating_add(pad).min(region.end),
    )
}

fn apply_minimum_span(
    start: u64,
    end: u64,
    region: &DisplayedRegion,
    tuning: &SyncTuning,
) -> (u64, u64) {
    let span = end - start;
    if span >= tuning.min_viewport_bp {
        return (start, end);
    }

    centered_window(start + span / 2, tuning.min_viewport_bp, region)
}

fn centered_window(midpoint: u64, span: u64, region: &DisplayedRegion) -> (u64, u64) {
    let mut start = midpoint.saturating_sub(span / 2);
    let mut end = start.saturating_add(span);

    if end > region.end {
        end = region.end;
        start = end.saturating_sub(span);
    }
    if start < region.start {
        start = region.start;
        end = start.saturating_add(span).min(region.end);
    }

    (start, end)
}
