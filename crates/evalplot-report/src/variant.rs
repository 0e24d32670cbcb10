use std::path::PathBuf;

use evalplot_core::{Destination, PlotError};
use evalplot_pivot::{classify, ClassifyOptions};
use evalplot_script::{seal, ArtifactViewer, PlotOutcome, ScriptBuilder, ScriptRuntime, SealedScript};
use tracing::info;

/// A fixed sequence of chart declarations appended to one document.
pub trait ReportVariant {
    fn name(&self) -> &'static str;

    fn compose(&self, builder: &mut ScriptBuilder<'_>) -> Result<(), PlotError>;
}

/// Classifies the inputs and builds the sealed program for one variant.
pub fn generate(
    variant: &dyn ReportVariant,
    inputs: &[PathBuf],
    destination: &Destination,
) -> Result<SealedScript, PlotError> {
    destination.config.validate()?;
    info!(
        variant = variant.name(),
        inputs = inputs.len(),
        destination = %destination.path.display(),
        "plotting"
    );
    let classification = classify(inputs, &ClassifyOptions::from_config(&destination.config))?;
    let mut builder = ScriptBuilder::new(&classification, destination);
    variant.compose(&mut builder)?;
    Ok(seal(builder.finish()))
}

/// Generates, writes and runs a report.
pub fn plot(
    variant: &dyn ReportVariant,
    inputs: &[PathBuf],
    destination: &Destination,
    runtime: &dyn ScriptRuntime,
    viewer: &dyn ArtifactViewer,
    show: bool,
) -> Result<PlotOutcome, PlotError> {
    generate(variant, inputs, destination)?.execute(runtime, viewer, show)
}
