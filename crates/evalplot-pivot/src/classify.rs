use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use evalplot_core::errors::{ErrorInfo, PlotError};
use evalplot_core::PlotConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::extract::{base_name, pivot_labels, PivotSource};

/// Header of the synthetic dimension used once the naming convention is abandoned.
pub const FALLBACK_HEADER: &str = "File";

/// Header whose presence as the minor pivot flips facet orientation.
pub const ALGORITHM_HEADER: &str = "Algorithm";

/// One categorical dimension selected for visual encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotDimension {
    /// Position of the dimension in the header list, `None` when absent.
    pub index: Option<usize>,
    /// Column name injected into every loaded row.
    pub header: String,
    /// Distinct label count, forced to 1 once smoothed.
    pub cardinality: usize,
    /// Absorbed into statistical aggregation rather than drawn as a facet.
    pub smoothed: bool,
}

impl PivotDimension {
    /// Placeholder for a dimension that does not exist.
    pub fn absent() -> Self {
        Self {
            index: None,
            header: String::new(),
            cardinality: 0,
            smoothed: false,
        }
    }

    fn new(index: usize, header: &str, cardinality: usize) -> Self {
        Self {
            index: Some(index),
            header: header.to_string(),
            cardinality,
            smoothed: false,
        }
    }

    pub fn has_header(&self) -> bool {
        !self.header.is_empty()
    }

    /// Whether the dimension drives a discrete visual encoding.
    pub fn is_multi_valued(&self) -> bool {
        self.cardinality > 1
    }
}

/// Distinct labels observed for one dimension across all inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotLabelSet {
    pub header: String,
    pub labels: BTreeSet<String>,
}

impl PivotLabelSet {
    pub fn cardinality(&self) -> usize {
        self.labels.len()
    }
}

/// Whether the directory/file naming convention held for the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum NamingMode {
    Convention,
    /// The first input whose token count disagreed with the headers.
    Fallback { trigger: PathBuf },
}

/// An input file together with the label it contributes per header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledInput {
    pub path: PathBuf,
    pub labels: Vec<String>,
}

/// Knobs taken from the destination configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyOptions {
    pub smooth: Option<String>,
    /// Confidence in percent, within `[0, 100]`.
    pub confidence: f64,
    pub ncol: Option<usize>,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            smooth: None,
            confidence: 95.0,
            ncol: None,
        }
    }
}

impl ClassifyOptions {
    pub fn from_config(config: &PlotConfig) -> Self {
        Self {
            smooth: config.smooth().map(str::to_string),
            confidence: config.confidence,
            ncol: config.ncol,
        }
    }

    fn smooth(&self) -> Option<&str> {
        self.smooth.as_deref().filter(|name| !name.is_empty())
    }
}

/// Result of pivot inference, shared read-only by every statement builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub mode: NamingMode,
    /// Synthetic column names, one per dimension.
    pub headers: Vec<String>,
    pub dimensions: Vec<PivotLabelSet>,
    /// Inputs in lexicographic order.
    pub inputs: Vec<LabeledInput>,
    pub major: PivotDimension,
    pub minor: PivotDimension,
    /// Confidence as a fraction in `[0, 1]`.
    pub confidence: f64,
    /// Legend column count.
    pub ncol: usize,
    /// Facet orientation flag, set when the minor pivot is `Algorithm`.
    pub flip: bool,
}

impl Classification {
    pub fn is_smoothed(&self) -> bool {
        self.major.smoothed || self.minor.smoothed
    }

    /// Whether charts overlay confidence error bars.
    pub fn error_bars(&self) -> bool {
        self.is_smoothed() && self.confidence != 0.0
    }

    /// The active (non-collapsed) pivot header used for grouping.
    pub fn group_header(&self) -> &str {
        if self.major.is_multi_valued() || !self.minor.has_header() {
            &self.major.header
        } else {
            &self.minor.header
        }
    }

    pub fn input_paths(&self) -> impl Iterator<Item = &Path> {
        self.inputs.iter().map(|input| input.path.as_path())
    }
}

/// Sorts identifiers lexicographically by their raw bytes.
pub fn sort_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut sorted = inputs.to_vec();
    sorted.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    sorted
}

/// Infers pivot dimensions for a batch of result files.
pub fn classify(inputs: &[PathBuf], opts: &ClassifyOptions) -> Result<Classification, PlotError> {
    if inputs.is_empty() {
        return Err(PlotError::Input(
            ErrorInfo::new("pivot-empty-inputs", "empty file list")
                .with_hint("supply at least one evaluation result file"),
        ));
    }
    if !opts.confidence.is_finite() || !(0.0..=100.0).contains(&opts.confidence) {
        return Err(PlotError::Config(
            ErrorInfo::new("config-confidence", "confidence must lie within [0, 100]")
                .with_context("confidence", opts.confidence.to_string()),
        ));
    }

    let sorted = sort_inputs(inputs);
    let headers = pivot_labels(&sorted[0], PivotSource::Directory);
    let mismatch = sorted
        .iter()
        .find(|path| pivot_labels(path, PivotSource::BaseName).len() != headers.len());

    let (mode, headers, dimensions, labeled) = match mismatch {
        None => {
            let labeled: Vec<LabeledInput> = sorted
                .iter()
                .map(|path| LabeledInput {
                    path: path.clone(),
                    labels: pivot_labels(path, PivotSource::BaseName),
                })
                .collect();
            let dimensions = headers
                .iter()
                .enumerate()
                .map(|(idx, header)| PivotLabelSet {
                    header: header.clone(),
                    labels: labeled
                        .iter()
                        .map(|input| input.labels[idx].clone())
                        .collect(),
                })
                .collect();
            (NamingMode::Convention, headers, dimensions, labeled)
        }
        Some(trigger) => {
            warn!(
                path = %trigger.display(),
                expected = headers.len(),
                "pivot token count mismatch, labelling every file by name"
            );
            let labeled = sorted
                .iter()
                .map(|path| LabeledInput {
                    path: path.clone(),
                    labels: vec![base_name(path)],
                })
                .collect();
            let dimensions = vec![PivotLabelSet {
                header: FALLBACK_HEADER.to_string(),
                labels: BTreeSet::from([base_name(trigger)]),
            }];
            (
                NamingMode::Fallback {
                    trigger: trigger.clone(),
                },
                vec![FALLBACK_HEADER.to_string()],
                dimensions,
                labeled,
            )
        }
    };

    let (major, minor) = select_major_minor(&dimensions, opts.smooth());
    let ncol = opts.ncol.unwrap_or(if major.is_multi_valued() {
        major.cardinality
    } else if minor.has_header() {
        minor.cardinality
    } else {
        major.cardinality
    });
    let flip = minor.header == ALGORITHM_HEADER;
    debug!(
        major = %major.header,
        major_cardinality = major.cardinality,
        minor = %minor.header,
        minor_cardinality = minor.cardinality,
        ncol,
        flip,
        "classified pivots"
    );

    Ok(Classification {
        mode,
        headers,
        dimensions,
        inputs: labeled,
        major,
        minor,
        confidence: opts.confidence / 100.0,
        ncol,
        flip,
    })
}

fn select_major_minor(
    dimensions: &[PivotLabelSet],
    smooth: Option<&str>,
) -> (PivotDimension, PivotDimension) {
    let mut major = PivotDimension::absent();
    let mut minor = PivotDimension::absent();
    for (index, set) in dimensions.iter().enumerate() {
        let size = set.cardinality();
        if size > major.cardinality {
            minor = std::mem::replace(&mut major, PivotDimension::new(index, &set.header, size));
        } else if size > minor.cardinality {
            minor = PivotDimension::new(index, &set.header, size);
        }
    }

    if let Some(name) = smooth {
        for dim in [&mut major, &mut minor] {
            if dim.header == name && dim.cardinality > 1 {
                dim.smoothed = true;
                dim.cardinality = 1;
            }
        }
    }

    if major.cardinality < minor.cardinality {
        std::mem::swap(&mut major, &mut minor);
    }
    (major, minor)
}
