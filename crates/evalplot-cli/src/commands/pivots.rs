use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use evalplot_pivot::{classify, ClassifyOptions};

use crate::{inputs, print_json};

#[derive(Args, Debug)]
pub struct PivotsArgs {
    /// Result files, or directories searched recursively for `.csv` files.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// Pivot dimension to aggregate with confidence bands.
    #[arg(long)]
    pub smooth: Option<String>,
    /// Confidence interval in percent.
    #[arg(long, default_value_t = 95.0)]
    pub confidence: f64,
    /// Legend column count.
    #[arg(long)]
    pub ncol: Option<usize>,
}

pub fn run(args: &PivotsArgs) -> Result<(), Box<dyn Error>> {
    let opts = ClassifyOptions {
        smooth: args.smooth.clone(),
        confidence: args.confidence,
        ncol: args.ncol,
    };
    let classification = classify(&inputs::expand(&args.inputs), &opts)?;
    print_json(&classification)
}
