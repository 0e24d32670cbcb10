use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use evalplot_core::{Destination, ErrorInfo, PlotConfig, PlotError};
use evalplot_report::{generate, MetadataReport, ReportVariant, METADATA_DESTINATION};
use evalplot_script::{RscriptRuntime, SystemViewer};
use tracing::debug;

use crate::{inputs, print_json};

/// Options shared by every plotting subcommand.
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Result files, or directories searched recursively for `.csv` files.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// Artifact path; its extension selects the output format (default `pdf`).
    #[arg(long, short)]
    pub out: Option<PathBuf>,
    /// YAML configuration file; flags below take precedence over it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Pivot dimension to aggregate with confidence bands.
    #[arg(long)]
    pub smooth: Option<String>,
    /// Confidence interval in percent.
    #[arg(long)]
    pub confidence: Option<f64>,
    /// Legend column count.
    #[arg(long)]
    pub ncol: Option<usize>,
    /// Skip the metadata summary and accuracy tables.
    #[arg(long)]
    pub no_metadata: bool,
    /// Raw CSV export mode.
    #[arg(long)]
    pub csv: bool,
    /// ROC chart override, `name=value` or a bare flag. Repeatable.
    #[arg(long = "roc-option")]
    pub roc_options: Vec<String>,
    /// DET chart override. Repeatable.
    #[arg(long = "det-option")]
    pub det_options: Vec<String>,
    /// Identification error chart override. Repeatable.
    #[arg(long = "iet-option")]
    pub iet_options: Vec<String>,
    /// Rank retrieval chart override. Repeatable.
    #[arg(long = "cmc-option")]
    pub cmc_options: Vec<String>,
    /// Detection precision/recall chart override. Repeatable.
    #[arg(long = "pr-option")]
    pub pr_options: Vec<String>,
    /// Installation root holding `share/evalplot/plot_utils.R`.
    #[arg(long)]
    pub sdk_path: Option<PathBuf>,
    /// Open the artifact after a successful run.
    #[arg(long)]
    pub show: bool,
    /// Write the script without running it.
    #[arg(long)]
    pub dry_run: bool,
    /// Interpreter used to run the generated script.
    #[arg(long, default_value = "Rscript")]
    pub rscript: PathBuf,
}

#[derive(Args, Debug)]
pub struct MetadataArgs {
    #[command(flatten)]
    pub plot: PlotArgs,
    /// Semicolon separated metadata columns, e.g. `Age;Gender`.
    #[arg(long)]
    pub columns: String,
}

impl PlotArgs {
    /// Merges the YAML configuration with command-line overrides.
    pub fn config(&self) -> Result<PlotConfig, PlotError> {
        let mut config = match &self.config {
            Some(path) => PlotConfig::from_yaml_file(path)?,
            None => PlotConfig::default(),
        };
        if let Some(smooth) = &self.smooth {
            config.smooth = Some(smooth.clone());
        }
        if let Some(confidence) = self.confidence {
            config.confidence = confidence;
        }
        if self.ncol.is_some() {
            config.ncol = self.ncol;
        }
        if self.no_metadata {
            config.metadata = false;
        }
        config.csv |= self.csv;
        config.roc_options.extend(self.roc_options.iter().cloned());
        config.det_options.extend(self.det_options.iter().cloned());
        config.iet_options.extend(self.iet_options.iter().cloned());
        config.cmc_options.extend(self.cmc_options.iter().cloned());
        config.pr_options.extend(self.pr_options.iter().cloned());
        if let Some(sdk_path) = &self.sdk_path {
            config.sdk_path = sdk_path.clone();
        }
        config.validate()?;
        Ok(config)
    }

    fn destination(&self, fallback: Option<&str>) -> Result<Destination, PlotError> {
        let path = match (&self.out, fallback) {
            (Some(out), _) => out.clone(),
            (None, Some(fallback)) => PathBuf::from(fallback),
            (None, None) => {
                return Err(PlotError::Options(
                    ErrorInfo::new("missing-destination", "an output path is required")
                        .with_hint("pass --out <file.pdf>"),
                ))
            }
        };
        Ok(Destination::new(path, self.config()?))
    }
}

pub fn run(
    variant: &dyn ReportVariant,
    args: &PlotArgs,
    fallback: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let destination = args.destination(fallback)?;
    let inputs = inputs::expand(&args.inputs);
    debug!(requested = args.inputs.len(), expanded = inputs.len(), "inputs resolved");
    let sealed = generate(variant, &inputs, &destination)?;

    let outcome = if args.dry_run {
        sealed.dry_run()?
    } else {
        let runtime = RscriptRuntime::new(&args.rscript);
        sealed.execute(&runtime, &SystemViewer, args.show)?
    };
    print_json(&outcome)?;

    if !outcome.success {
        return Err(format!(
            "{} exited unsuccessfully; script kept at {}",
            args.rscript.display(),
            outcome.script.display()
        )
        .into());
    }
    Ok(())
}

pub fn run_metadata(args: &MetadataArgs) -> Result<(), Box<dyn Error>> {
    let report = MetadataReport::parse(&args.columns);
    if report.columns.is_empty() {
        return Err(PlotError::Options(ErrorInfo::new(
            "metadata-columns",
            "at least one metadata column is required",
        ))
        .into());
    }
    run(&report, &args.plot, Some(METADATA_DESTINATION))
}
