use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    None,
    Visualization,
    FeatureTable,
    SearchResults,
}

impl ChangeSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Visualization => "visualization",
            Self::FeatureTable => "feature-table",
            Self::SearchResults => "search-results",
        }
    }

    pub const fn is_navigation(self) -> bool {
        matches!(self, Self::FeatureTable | Self::SearchResults)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOrigin {
    FeatureTable,
    SearchResults,
}

impl NavigationOrigin {
    pub const fn as_change_source(self) -> ChangeSource {
        match self {
            Self::FeatureTable => ChangeSource::FeatureTable,
            Self::SearchResults => ChangeSource::SearchResults,
        }
    }

    pub const fn label(self) -> &'static str {
        self.as_change_source().label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalValidationError {
    EmptyRefName,
    InvertedBounds,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomicInterval {
    pub ref_name: String,
    pub start: u64,
    pub end: u64,
}

impl GenomicInterval {
    pub fn try_new(
        ref_name: String,
        start: u64,
        end: u64,
    ) -> Result<Self, IntervalValidationError> {
        if ref_name.trim().is_empty() {
            return Err(IntervalValidationError::EmptyRefName);
        }
        if start > end {
            return Err(IntervalValidationError::InvertedBounds);
        }

        Ok(Self {
            ref_name,
            start,
            end,
        })
    }

    pub fn span(&self) -> u64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> u64 {
        self.start + self.span() / 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedRegion {
    pub ref_name: String,
    pub start: u64,
    pub end: u64,
    pub assembly_name: Option<String>,
}

impl DisplayedRegion {
    pub fn span(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn midpoint(&self) -> u64 {
        self.start + self.span() / 2
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewMeta {
    pub assembly_name: Option<String>,
    pub bp_per_px: f64,
    pub offset_px: f64,
}

impl Default for ViewMeta {
    fn default() -> Self {
        Self {
            assembly_name: None,
            bp_per_px: 0.0,
            offset_px: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportSignature(String);

impl ViewportSignature {
    pub fn new(ref_name: &str, start: u64, end: u64, bp_per_px: f64, offset_px: f64) -> Self {
        Self(format!(
            "{ref_name}:{start}:{end}:{bp_per_px:.4}:{offset_px:.2}"
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    pub seq_id: String,
    pub start: u64,
    pub end: u64,
    pub change_source: ChangeSource,
    pub last_navigation_at: Option<Instant>,
    pub viewport_initialized: bool,
    pub viewport_changed: bool,
    pub view_meta: ViewMeta,
}

impl ViewportState {
    pub fn new() -> Self {
        Self {
            seq_id: String::new(),
            start: 0,
            end: 0,
            change_source: ChangeSource::None,
            last_navigation_at: None,
            viewport_initialized: false,
            viewport_changed: false,
            view_meta: ViewMeta::default(),
        }
    }

    pub fn interval(&self) -> Option<GenomicInterval> {
        if self.seq_id.is_empty() {
            return None;
        }

        Some(GenomicInterval {
            ref_name: self.seq_id.clone(),
            start: self.start,
            end: self.end,
        })
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new()
    }
}
