use std::path::PathBuf;

use evalplot_core::{Destination, PlotConfig};
use evalplot_report::{generate, LandmarkingReport, MetadataReport, METADATA_DESTINATION};

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

#[test]
fn landmarking_builds_helpers_table_and_charts() {
    let destination = Destination::new("landmarks.pdf", PlotConfig::default());
    let text = generate(
        &LandmarkingReport,
        &paths(&["Algorithm/dlib.csv", "Algorithm/stasm.csv"]),
        &destination,
    )
    .expect("generate")
    .render();

    assert!(text.contains("Box <- subset(data, Plot == \"Box\", select=-Plot)\n"));
    assert!(text.contains("Box$X <- factor(Box$X, levels=unique(Box$X), ordered=TRUE)\n"));
    assert!(text.contains("EXP$X <- as.character(EXP$X)\n"));
    assert!(text.contains("readData <- function(data) {\n  examples <- list()\n"));
    assert!(text.contains("    examples[[i]] <- list(file=file, value=value, image=img)\n"));
    assert!(text.contains("plotImage <- function(image, title=NULL, label=NULL) {\n"));
    assert!(text.contains("algs <- unique(Box$Algorithm)\n"));
    assert!(text.contains("if (nrow(EXT) != 0 && nrow(EXP) != 0) {\n"));
    assert!(text.contains("truthSample <- readData(EXT[EXT$Algorithm == algs[[j]], ])"));
    assert!(text.contains("sprintf(\"%s\\nPredicted Landmarks\", algs[[j]])"));
    assert!(text.contains("StatBox <- summarySE(Box, measurevar=\"Y\", groupvars=c(\"Algorithm\", \"X\"))\n"));
    assert!(text.contains("sep=\" \u{00b1} \""));
    assert!(text.contains("rownames(mat) <- c(seq(0, rows-1), \"Aggregate\", \"Average IPD\")\n"));
    assert!(text.contains("print(textplot(ETable))\n"));
    assert!(text.contains("ggplot(Box, aes(Y, colour=Algorithm)) + annotation_logticks(sides=\"b\") + stat_ecdf()"));
    assert!(text.contains("geom_boxplot(alpha=0.5) + geom_jitter(size=1, alpha=0.5)"));
    assert!(text.contains("geom_violin(alpha=0.5)"));
    assert!(text.ends_with("dev.off()\n"));
}

#[test]
fn metadata_columns_parse_and_save_individually() {
    let report = MetadataReport::parse("Age; Gender;;");
    assert_eq!(report.columns, vec!["Age", "Gender"]);

    let destination = Destination::new(METADATA_DESTINATION, PlotConfig::default());
    let sealed = generate(
        &report,
        &paths(&["Algorithm/a.csv", "Algorithm/b.csv"]),
        &destination,
    )
    .expect("generate");
    let text = sealed.render();
    assert!(text.contains("pdf(\"./PlotMetadata.pdf\")\n"));
    assert!(text.contains(
        "qplot(Algorithm, Age, data=data, geom=\"violin\", fill=Algorithm) + coord_flip() \
         + theme_minimal()\nggsave(\"Age.pdf\")\n"
    ));
    assert!(text.contains("ggsave(\"Gender.pdf\")\n"));
    assert_eq!(
        sealed.document().script_path(),
        PathBuf::from("./PlotMetadata.R")
    );
}
