//! Object detection report: discrete/continuous ROC and PR curves plus overlap
//! distributions.

use std::path::{Path, PathBuf};

use evalplot_core::errors::{ErrorInfo, PlotError};
use evalplot_pivot::Classification;
use evalplot_script::{Arg, ChartKind, Expr, OptionValue, ScriptBuilder};
use tracing::debug;

use crate::layers::{append, histogram_axes, pivot_facets, square};
use crate::variant::ReportVariant;

/// Relations the combined detection table is split into.
pub const DETECTION_RELATIONS: [&str; 6] = [
    "DiscreteROC",
    "ContinuousROC",
    "DiscretePR",
    "ContinuousPR",
    "Overlap",
    "AverageOverlap",
];

const CURVE_FAMILIES: [&str; 2] = ["Discrete", "Continuous"];

#[derive(Debug, Clone, Copy, Default)]
pub struct DetectionReport;

impl ReportVariant for DetectionReport {
    fn name(&self) -> &'static str {
        "detection"
    }

    fn compose(&self, builder: &mut ScriptBuilder<'_>) -> Result<(), PlotError> {
        let roc = builder.resolve_options(ChartKind::DetectionRoc)?;
        let pr = builder.resolve_options(ChartKind::DetectionPr)?;
        let classification = builder.classification();
        let paths: Vec<PathBuf> = classification.input_paths().map(Path::to_path_buf).collect();
        let geom = if any_single_point(&paths)? { "point" } else { "line" };
        debug!(geom, "detection curve geometry");

        builder.blank();
        builder.split_by_plot(&DETECTION_RELATIONS);
        builder.release_data();

        for (suffix, options) in [("ROC", &roc), ("PR", &pr)] {
            for family in CURVE_FAMILIES {
                let titled = options
                    .clone()
                    .with("title", OptionValue::Text(family.to_string()));
                builder.chart(geom, &format!("{family}{suffix}"), false, &titled);
            }
        }

        builder.figure(overlap_histogram(classification));
        builder.figure(average_overlap(classification, false));
        builder.figure(average_overlap(classification, true));
        Ok(())
    }
}

/// Whether any input holds at most one discrete ROC operating point.
pub fn any_single_point(paths: &[PathBuf]) -> Result<bool, PlotError> {
    for path in paths {
        if discrete_roc_rows(path)? <= 1 {
            return Ok(true);
        }
    }
    Ok(false)
}

// Stops counting after two rows.
fn discrete_roc_rows(path: &Path) -> Result<usize, PlotError> {
    let read_error = |err: csv::Error| {
        PlotError::Input(
            ErrorInfo::new("detection-read", "failed to read detection results")
                .with_context("path", path.display().to_string())
                .with_hint(err.to_string()),
        )
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(read_error)?;
    let mut rows = 0;
    let marker = DETECTION_RELATIONS[0].as_bytes();
    for record in reader.byte_records() {
        let record = record.map_err(read_error)?;
        if record.iter().any(|field| field == marker) {
            rows += 1;
            if rows > 1 {
                break;
            }
        }
    }
    Ok(rows)
}

fn overlap_histogram(classification: &Classification) -> Expr {
    let chart = Expr::call(
        "qplot",
        vec![
            Arg::pos(Expr::ident("X")),
            Arg::named("data", Expr::ident("Overlap")),
            Arg::named("geom", Expr::string("histogram")),
            Arg::named("position", Expr::string("identity")),
            Arg::named("xlab", Expr::string("Overlap")),
            Arg::named("ylab", Expr::string("Frequency")),
        ],
    );
    append(histogram_axes(chart), pivot_facets(classification, false)).plus(square(vec![
        Arg::named("legend.position", Expr::string("bottom")),
    ]))
}

/// Average overlap per pivot cell, as text (`tile == false`) or a heat map.
fn average_overlap(classification: &Classification, tile: bool) -> Expr {
    let (major, minor) = (&classification.major, &classification.minor);
    let x = if minor.is_multi_valued() {
        Expr::ident(&minor.header)
    } else {
        Expr::string("X")
    };
    let y = if major.is_multi_valued() {
        Expr::ident(&major.header)
    } else {
        Expr::string("Y")
    };
    let mut aes = vec![Arg::named("x", x), Arg::named("y", y)];
    let mut args = vec![Arg::pos(Expr::ident("AverageOverlap"))];
    let mut chart = if tile {
        aes.push(Arg::named("fill", Expr::ident("X")));
        args.push(Arg::pos(Expr::call("aes", aes)));
        Expr::call("ggplot", args)
            .plus(Expr::apply("geom_tile", vec![]))
            .plus(Expr::apply(
                "scale_fill_continuous",
                vec![Expr::string("Average Overlap")],
            ))
    } else {
        aes.push(Arg::named(
            "label",
            Expr::apply("round", vec![Expr::ident("X"), Expr::num(3.0)]),
        ));
        args.push(Arg::pos(Expr::call("aes", aes)));
        args.push(Arg::named("main", Expr::string("Average Overlap")));
        Expr::call("ggplot", args).plus(Expr::apply("geom_text", vec![]))
    };
    chart = chart.plus(Expr::apply("theme_minimal", vec![]));
    if !minor.is_multi_valued() {
        chart = chart.plus(Expr::apply("xlab", vec![Expr::Null]));
    }
    if !major.is_multi_valued() {
        chart = chart.plus(Expr::apply("ylab", vec![Expr::Null]));
    }
    chart
}
