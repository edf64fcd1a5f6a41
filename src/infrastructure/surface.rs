use crate::domain::DisplayedRegion;

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSnapshot {
    pub region: DisplayedRegion,
    pub bp_per_px: f64,
}

/// Poll-only view of the visualization collaborator. The widget exposes no
/// change events, so the engine reads it on a cadence; every accessor may
/// come back empty on any given read (widget still mounting, conversion
/// functions not yet installed) and the caller falls through to the next
/// strategy.
pub trait ViewportSurface {
    fn snapshot(&self) -> Option<SurfaceSnapshot>;

    fn width_px(&self) -> Option<f64> {
        None
    }

    /// Width derived from auxiliary surface properties (e.g. the widget's
    /// track container), consulted when the surface reports no explicit
    /// width.
    fn interval_width_px(&self) -> Option<f64> {
        None
    }

    fn offset_px(&self) -> Option<f64> {
        None
    }

    fn px_to_bp(&self, _px: f64) -> Option<f64> {
        None
    }

    fn bp_to_px(&self, _bp: f64) -> Option<f64> {
        None
    }
}
