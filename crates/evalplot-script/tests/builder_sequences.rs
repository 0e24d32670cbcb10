use std::path::PathBuf;

use evalplot_core::{Destination, PlotConfig, ProductInfo};
use evalplot_pivot::{classify, Classification, ClassifyOptions};
use evalplot_script::render::expr;
use evalplot_script::{legend_groups, ChartKind, ScriptBuilder};

fn classify_with(names: &[&str], config: &PlotConfig) -> Classification {
    let inputs: Vec<PathBuf> = names.iter().map(PathBuf::from).collect();
    classify(&inputs, &ClassifyOptions::from_config(config)).expect("classify")
}

const SCENARIO_A: [&str; 3] = [
    "Algorithm_Split/alg1_0.csv",
    "Algorithm_Split/alg2_0.csv",
    "Algorithm_Split/alg1_1.csv",
];

#[test]
fn preamble_folds_parts_into_data() {
    let destination = Destination::new("out/report.png", PlotConfig::default());
    let classification = classify_with(&SCENARIO_A, &destination.config);
    let builder = ScriptBuilder::new(&classification, &destination);
    let text = builder.document().render();

    assert!(text.starts_with("source(\"/usr/local/share/evalplot/plot_utils.R\")\n"));
    assert!(text.contains("part1 <- read.csv(\"Algorithm_Split/alg1_0.csv\")\n"));
    assert!(text.contains("part1$Algorithm <- \"alg1\"\npart1$Split <- \"0\"\n"));
    assert!(text.contains("part2 <- read.csv(\"Algorithm_Split/alg1_1.csv\")\n"));
    assert!(text.contains("part3$Algorithm <- \"alg2\"\npart3$Split <- \"0\"\n"));
    assert!(text.contains("data <- rbind(part1, part2, part3)\nrm(part1, part2, part3)\n"));
    assert!(text.contains("png(\"out/report.png\", width=800, height=800)\n"));
    assert!(text.trim_end().ends_with("# Write figures"));
}

#[test]
fn fallback_labels_every_file_by_name() {
    let destination = Destination::new("report.pdf", PlotConfig::default());
    let classification = classify_with(
        &[
            "Algorithm_Split/alg1_0.csv",
            "Algorithm_Split/alg2.csv",
            "Algorithm_Split/alg3_1.csv",
        ],
        &destination.config,
    );
    let mut builder = ScriptBuilder::new(&classification, &destination);
    let roc = builder.resolve_options(ChartKind::Roc).expect("options");
    builder.chart("line", "DET", true, &roc);
    let text = builder.finish().render();

    assert!(text.contains("part1$File <- \"alg1_0\"\n"));
    assert!(text.contains("part2$File <- \"alg2\"\n"));
    assert!(text.contains("part3$File <- \"alg3_1\"\n"));
    assert!(!text.contains("$Algorithm"));
    assert!(text.contains("pdf(\"./report.pdf\")\n"));
    assert!(!text.contains("colour=factor("));
    assert!(!text.contains("linetype=factor("));
    assert!(!text.contains("scale_linetype_discrete"));
}

#[test]
fn zero_confidence_still_aggregates_without_error_bars() {
    let config = PlotConfig {
        smooth: Some("Algorithm".into()),
        confidence: 0.0,
        ..PlotConfig::default()
    };
    let destination = Destination::new("report.pdf", config);
    let classification = classify_with(
        &["Algorithm_Split/a_0.csv", "Algorithm_Split/b_0.csv", "Algorithm_Split/c_0.csv"],
        &destination.config,
    );
    assert!(classification.major.smoothed);

    let mut builder = ScriptBuilder::new(&classification, &destination);
    builder.report_variables();
    builder.summarize();
    let det = builder.resolve_options(ChartKind::Det).expect("options");
    builder.chart("line", "DET", false, &det);
    let text = builder.finish().render();

    assert!(text.contains("errBars <- FALSE\n"));
    assert!(text.contains(
        "DET <- summarySE(DET, measurevar=\"Y\", groupvars=c(\"Split\", \"X\"), conf.interval=0)\n"
    ));
    assert!(text.contains(
        "ERR <- summarySE(ERR, measurevar=\"X\", groupvars=c(\"Error\", \"Split\", \"Y\"), conf.interval=0)\n"
    ));
    assert!(!text.contains("geom_errorbar"));
}

#[test]
fn legend_groups_pair_both_pivots_unless_smoothed() {
    let plain = classify_with(&SCENARIO_A, &PlotConfig::default());
    assert_eq!(
        expr(&legend_groups(&plain)),
        "paste(TF$Algorithm, TF$Split, sep=\"_\")"
    );

    let config = PlotConfig {
        smooth: Some("Split".into()),
        ..PlotConfig::default()
    };
    let smoothed = classify_with(&SCENARIO_A, &config);
    assert_eq!(expr(&legend_groups(&smoothed)), "TF$Algorithm");
}

#[test]
fn metadata_block_respects_flags() {
    let destination = Destination::new("report.pdf", PlotConfig::default());
    let classification = classify_with(&SCENARIO_A, &destination.config);
    let product = ProductInfo::new("evalplot", "9.9.9");
    let mut builder = ScriptBuilder::new(&classification, &destination).with_product(product);
    builder.metadata_tables();
    let text = builder.finish().render();
    assert!(text.contains("plotMetadata(data=data, title=\"evalplot - 9.9.9\")\nplot.new()\n"));
    assert!(text.contains(
        "plotTable(data=TS, name=\"Template Size by Algorithm\", labels=c(\"Template Size (bytes):\"))"
    ));
    assert_eq!(text.matches("plotTable(").count(), 4);

    let csv = PlotConfig {
        csv: true,
        ..PlotConfig::default()
    };
    let destination = Destination::new("report.pdf", csv);
    let mut builder = ScriptBuilder::new(&classification, &destination);
    builder.metadata_tables();
    assert!(!builder.document().render().contains("plot.new()"));

    let off = PlotConfig {
        metadata: false,
        ..PlotConfig::default()
    };
    let destination = Destination::new("report.pdf", off);
    let mut builder = ScriptBuilder::new(&classification, &destination);
    builder.metadata_tables();
    assert!(!builder.document().render().contains("plotMetadata"));
}

#[test]
fn galleries_are_gated_independently() {
    let destination = Destination::new("report.pdf", PlotConfig::default());
    let classification = classify_with(&SCENARIO_A, &destination.config);
    let mut builder = ScriptBuilder::new(&classification, &destination);
    builder.match_galleries();
    let text = builder.finish().render();
    assert!(text.contains("if (nrow(IM) != 0) {\n  library(jpeg)\n"));
    assert!(text.contains("if (nrow(GM) != 0) {\n  library(jpeg)\n"));
    assert!(text.contains("  for (i in seq_len(nrow(GM))) {\n"));
    assert!(text.contains("files <- unlist(strsplit(IM[i, 2], \"[:]\"))"));
    assert!(text.contains("labs(title=paste(\"Genuine score =\", score))"));
    assert!(text.contains("multiplot(plot1, plot2, cols=2)"));
    assert_eq!(text.matches("      next\n").count(), 4);
}

#[test]
fn bare_file_names_get_a_named_pivot_column() {
    let destination = Destination::new("report.pdf", PlotConfig::default());
    let classification = classify_with(&["a.csv", "b.csv"], &destination.config);
    let mut builder = ScriptBuilder::new(&classification, &destination);
    let det = builder.resolve_options(ChartKind::Det).expect("options");
    builder.chart("line", "DET", false, &det);
    let text = builder.finish().render();

    assert!(text.contains("part1 <- read.csv(\"a.csv\")\npart1$. <- \"a\"\n"));
    assert!(text.contains("part2$. <- \"b\"\n"));
    assert!(text.contains("colour=factor(.)"));
    assert!(!text.contains("$ <-"));
    assert!(!text.contains("factor()"));
}
