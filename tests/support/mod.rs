use locusync::{DisplayedRegion, SurfaceSnapshot, ViewportSurface};

pub struct ScriptedSurface {
    pub mounted: bool,
    pub ref_name: String,
    pub region_start: u64,
    pub region_end: u64,
    pub bp_per_px: f64,
    pub width: f64,
    pub offset: f64,
}

impl ScriptedSurface {
    pub fn contig(ref_name: &str, region_end: u64) -> Self {
        Self {
            mounted: true,
            ref_name: ref_name.to_string(),
            region_start: 0,
            region_end,
            bp_per_px: 10.0,
            width: 500.0,
            offset: 0.0,
        }
    }
}

impl ViewportSurface for ScriptedSurface {
    fn snapshot(&self) -> Option<SurfaceSnapshot> {
        if !self.mounted {
            return None;
        }

        Some(SurfaceSnapshot {
            region: DisplayedRegion {
                ref_name: self.ref_name.clone(),
                start: self.region_start,
                end: self.region_end,
                assembly_name: Some("GRCh38".to_string()),
            },
            bp_per_px: self.bp_per_px,
        })
    }

    fn width_px(&self) -> Option<f64> {
        Some(self.width)
    }

    fn offset_px(&self) -> Option<f64> {
        Some(self.offset)
    }
}
