//! Work-item planning
//!
//! A [`BatchPlan`] is computed up front from the run settings and the
//! monthly schedule. Planning is pure: nothing touches the filesystem or
//! spawns a process until the plan is handed to the runner.

use crate::domain::{Band, DateWindow, Dimensions, MonthlySchedule};
use std::path::{Path, PathBuf};

/// Input file used when `-f` is not given
pub const DEFAULT_INPUT_FILE: &str = "coordinates/Coastal_VA.csv";

/// Dataset used when `-d` is not given
pub const DEFAULT_DATASET: &str = "sentinel";

/// Which batch layout to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Every band in [`Band::ALL`], each at its own resolution, with
    /// per-band output directories
    BandSweep,
    /// One implicit band at the requested size, with windows directly under
    /// the output root; `-b` is never passed, so the exporter uses its default
    SingleBand,
}

impl Variant {
    /// Bands iterated by this variant, in order
    ///
    /// `None` stands for the implicit band of [`Variant::SingleBand`].
    pub fn bands(&self) -> Vec<Option<Band>> {
        match self {
            Variant::BandSweep => Band::ALL.iter().copied().map(Some).collect(),
            Variant::SingleBand => vec![None],
        }
    }

    /// Tile size used when `-h`/`-w` are not given
    pub fn default_pixels(&self) -> u32 {
        match self {
            Variant::BandSweep => 2048,
            Variant::SingleBand => 1024,
        }
    }

    /// Whether the requested `-h`/`-w` reach the exporter
    ///
    /// The band sweep always replaces them with the band's resolution class.
    pub fn honors_requested_size(&self) -> bool {
        matches!(self, Variant::SingleBand)
    }

    /// Dimensions for one band of this variant
    pub fn dimensions_for(&self, band: Option<Band>, settings: &RunSettings) -> Dimensions {
        match (self, band) {
            (Variant::BandSweep, Some(band)) => band.resolution_class().dimensions(),
            _ => {
                let default = self.default_pixels().to_string();
                Dimensions::new(
                    settings.height.clone().unwrap_or_else(|| default.clone()),
                    settings.width.clone().unwrap_or(default),
                )
            }
        }
    }
}

/// Per-run values taken from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Coordinate file handed to the exporter, passed through byte for byte
    pub input_file: PathBuf,
    /// Requested height, unvalidated
    pub height: Option<String>,
    /// Requested width, unvalidated
    pub width: Option<String>,
    /// Dataset identifier (sentinel, landsat, naip, ...)
    pub dataset: String,
}

impl RunSettings {
    /// True when the user asked for a specific tile size
    pub fn has_requested_size(&self) -> bool {
        self.height.is_some() || self.width.is_some()
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            height: None,
            width: None,
            dataset: DEFAULT_DATASET.to_string(),
        }
    }
}

/// One (band, window) export: one directory, one exporter invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Band passed to the exporter; `None` for the single-band layout
    pub band: Option<Band>,
    pub window: DateWindow,
    pub dimensions: Dimensions,
    pub output_dir: PathBuf,
}

impl WorkItem {
    /// Builds the item and derives its output directory under `root`
    pub fn new(
        root: &Path,
        band: Option<Band>,
        window: DateWindow,
        dimensions: Dimensions,
    ) -> Self {
        Self {
            output_dir: output_dir(root, band, &window),
            band,
            window,
            dimensions,
        }
    }
}

/// `{root}/{band}/{start}_{end}`, or `{root}/{start}_{end}` without a band
pub fn output_dir(root: &Path, band: Option<Band>, window: &DateWindow) -> PathBuf {
    let mut path = root.to_path_buf();
    if let Some(band) = band {
        path.push(band.as_str());
    }
    path.push(window.compact_label());
    path
}

/// Ordered list of work items for one run
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub variant: Variant,
    pub items: Vec<WorkItem>,
}

impl BatchPlan {
    /// Plans every (band, window) pair, bands outermost
    pub fn build(
        variant: Variant,
        settings: &RunSettings,
        schedule: &MonthlySchedule,
        root: &Path,
    ) -> Self {
        let items = variant
            .bands()
            .into_iter()
            .flat_map(|band| {
                let dimensions = variant.dimensions_for(band, settings);
                schedule
                    .windows()
                    .map(move |window| WorkItem::new(root, band, window, dimensions.clone()))
            })
            .collect();

        Self { variant, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
