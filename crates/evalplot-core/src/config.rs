//! Destination descriptor and caller configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, PlotError};

/// Output format used when the destination path carries no extension.
pub const DEFAULT_SUFFIX: &str = "pdf";

/// Extension of the generated program written beside the rendered artifact.
pub const SCRIPT_EXTENSION: &str = "R";

/// Default installation root holding `share/evalplot/plot_utils.R`.
pub const DEFAULT_SDK_PATH: &str = "/usr/local";

/// Caller supplied options recognised by every report variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlotConfig {
    /// Pivot dimension to aggregate statistically instead of drawing discretely.
    pub smooth: Option<String>,
    /// Confidence interval in percent, within `[0, 100]`.
    pub confidence: f64,
    /// Explicit legend column count.
    pub ncol: Option<usize>,
    /// Emit the metadata summary and accuracy tables.
    pub metadata: bool,
    /// Raw CSV export mode; suppresses the spacer page after the metadata summary.
    pub csv: bool,
    /// Overrides for the ROC chart.
    pub roc_options: Vec<String>,
    /// Overrides for the DET chart.
    pub det_options: Vec<String>,
    /// Overrides for the identification error chart.
    pub iet_options: Vec<String>,
    /// Overrides for the rank retrieval chart.
    pub cmc_options: Vec<String>,
    /// Overrides for the detection precision/recall charts.
    pub pr_options: Vec<String>,
    /// Installation root of the shared R formatting library.
    pub sdk_path: PathBuf,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            smooth: None,
            confidence: 95.0,
            ncol: None,
            metadata: true,
            csv: false,
            roc_options: Vec::new(),
            det_options: Vec::new(),
            iet_options: Vec::new(),
            cmc_options: Vec::new(),
            pr_options: Vec::new(),
            sdk_path: PathBuf::from(DEFAULT_SDK_PATH),
        }
    }
}

impl PlotConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(raw: &str) -> Result<Self, PlotError> {
        let config: PlotConfig = serde_yaml::from_str(raw).map_err(|err| {
            PlotError::Serde(ErrorInfo::new("config-parse", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, PlotError> {
        let raw = fs::read_to_string(path).map_err(|err| {
            PlotError::Config(
                ErrorInfo::new("config-read", "failed to read configuration file")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), PlotError> {
        if !self.confidence.is_finite() || !(0.0..=100.0).contains(&self.confidence) {
            return Err(PlotError::Config(
                ErrorInfo::new("config-confidence", "confidence must lie within [0, 100]")
                    .with_context("confidence", self.confidence.to_string()),
            ));
        }
        if self.ncol == Some(0) {
            return Err(PlotError::Config(ErrorInfo::new(
                "config-ncol",
                "legend column count must be positive",
            )));
        }
        Ok(())
    }

    /// Smoothing dimension, treating an empty name as unset.
    pub fn smooth(&self) -> Option<&str> {
        self.smooth.as_deref().filter(|name| !name.is_empty())
    }

    /// Override list stored under a chart option key such as `rocOptions`.
    pub fn chart_overrides(&self, key: &str) -> &[String] {
        match key {
            "rocOptions" => &self.roc_options,
            "detOptions" => &self.det_options,
            "ietOptions" => &self.iet_options,
            "cmcOptions" => &self.cmc_options,
            "prOptions" => &self.pr_options,
            _ => &[],
        }
    }

    /// Location of the shared R formatting library.
    pub fn utils_script(&self) -> PathBuf {
        self.sdk_path
            .join("share")
            .join("evalplot")
            .join("plot_utils.R")
    }
}

/// Where the rendered artifact goes, plus the options steering the report.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    /// Requested artifact path; its extension selects the output format.
    pub path: PathBuf,
    /// Report options.
    pub config: PlotConfig,
}

impl Destination {
    /// Creates a destination for the given artifact path.
    pub fn new(path: impl Into<PathBuf>, config: PlotConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    /// Artifact path without its final extension, e.g. `out/report`.
    pub fn basename(&self) -> PathBuf {
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let stem = self.path.file_stem().unwrap_or_default();
        parent.join(stem)
    }

    /// Output format suffix, defaulting to [`DEFAULT_SUFFIX`].
    pub fn suffix(&self) -> String {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .unwrap_or(DEFAULT_SUFFIX)
            .to_string()
    }
}

/// Appends `.<suffix>` to `base` without replacing any dot already in its name.
pub fn sibling_path(base: &Path, suffix: &str) -> PathBuf {
    let mut raw = base.as_os_str().to_os_string();
    raw.push(".");
    raw.push(suffix);
    PathBuf::from(raw)
}
