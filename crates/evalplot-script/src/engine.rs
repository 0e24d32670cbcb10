//! Statement builders shared by every report variant.

use evalplot_core::{Destination, PlotConfig, PlotError, ProductInfo};
use evalplot_pivot::Classification;
use tracing::debug;

use crate::chart;
use crate::document::ScriptDocument;
use crate::gallery::{GENUINE_GALLERY, IMPOSTOR_GALLERY};
use crate::ir::{Arg, Expr, Statement};
use crate::options::{resolve, ChartKind, ChartOptions};

/// Combined relation every input is folded into.
pub const DATA_RELATION: &str = "data";

/// Column naming the sub-plot a row belongs to.
pub const PLOT_COLUMN: &str = "Plot";

/// Curve relations aggregated over the response `Y` when smoothing.
pub const SUMMARIZED_RELATIONS: [&str; 6] = ["DET", "IET", "CMC", "TF", "FT", "CT"];

/// Accuracy tables: relation, caption, column labels.
pub const ACCURACY_TABLES: [(&str, &str, &[&str]); 4] = [
    (
        "TF",
        "Table of True Accept Rates at various False Accept Rates",
        &[
            "FAR = 1e-06",
            "FAR = 1e-05",
            "FAR = 1e-04",
            "FAR = 1e-03",
            "FAR = 1e-02",
            "FAR = 1e-01",
        ],
    ),
    (
        "FT",
        "Table of False Accept Rates at various True Accept Rates",
        &[
            "TAR = 0.40",
            "TAR = 0.50",
            "TAR = 0.65",
            "TAR = 0.75",
            "TAR = 0.85",
            "TAR = 0.95",
        ],
    ),
    (
        "CT",
        "Table of retrieval rate at various ranks",
        &["Rank 1", "Rank 5", "Rank 10", "Rank 20", "Rank 50", "Rank 100"],
    ),
    (
        "TS",
        "Template Size by Algorithm",
        &["Template Size (bytes):"],
    ),
];

/// R expression naming the legend groups of the accuracy tables.
pub fn legend_groups(classification: &Classification) -> Expr {
    let tf = || Expr::ident("TF");
    let (major, minor) = (&classification.major, &classification.minor);
    if major.is_multi_valued() && minor.is_multi_valued() && !classification.is_smoothed() {
        Expr::call(
            "paste",
            vec![
                Arg::pos(tf().field(&major.header)),
                Arg::pos(tf().field(&minor.header)),
                Arg::named("sep", Expr::string("_")),
            ],
        )
    } else {
        tf().field(classification.group_header())
    }
}

/// Owns the document under construction and borrows the classification.
#[derive(Debug)]
pub struct ScriptBuilder<'a> {
    classification: &'a Classification,
    config: &'a PlotConfig,
    product: ProductInfo,
    document: ScriptDocument,
}

impl<'a> ScriptBuilder<'a> {
    /// Starts a document with the library import, data loads and output device.
    pub fn new(classification: &'a Classification, destination: &'a Destination) -> Self {
        let mut builder = Self {
            classification,
            config: &destination.config,
            product: ProductInfo::default(),
            document: ScriptDocument::new(destination.basename(), destination.suffix()),
        };
        builder.preamble();
        builder
    }

    pub fn with_product(mut self, product: ProductInfo) -> Self {
        self.product = product;
        self
    }

    pub fn classification(&self) -> &'a Classification {
        self.classification
    }

    pub fn config(&self) -> &'a PlotConfig {
        self.config
    }

    pub fn document(&self) -> &ScriptDocument {
        &self.document
    }

    pub fn push(&mut self, statement: Statement) {
        self.document.push(statement);
    }

    pub fn comment(&mut self, text: impl Into<String>) {
        self.push(Statement::comment(text));
    }

    pub fn blank(&mut self) {
        self.push(Statement::Blank);
    }

    pub fn eval(&mut self, expr: Expr) {
        self.push(Statement::eval(expr));
    }

    pub fn assign(&mut self, target: impl Into<String>, value: Expr) {
        self.push(Statement::assign(target, value));
    }

    /// Evaluates a chart expression followed by a blank line.
    pub fn figure(&mut self, expr: Expr) {
        self.eval(expr);
        self.blank();
    }

    /// Resolves a chart kind against the overrides stored in the configuration.
    pub fn resolve_options(&self, kind: ChartKind) -> Result<ChartOptions, PlotError> {
        resolve(kind, self.config.chart_overrides(kind.config_key()))
    }

    /// Declares a layered curve chart over `relation`.
    pub fn chart(&mut self, geom: &str, relation: &str, flip_y: bool, options: &ChartOptions) {
        debug!(relation, geom, flip_y, "chart declared");
        let expr = chart::qplot(self.classification, geom, relation, flip_y, options);
        self.figure(expr);
    }

    /// Recognition variables read by the shared formatting library.
    pub fn report_variables(&mut self) {
        self.assign(
            "basename",
            Expr::string(self.document.basename().display().to_string()),
        );
        self.assign("errBars", Expr::Bool(self.classification.error_bars()));
        self.assign("csv", Expr::Bool(self.config.csv));
        self.assign("algs", legend_groups(self.classification));
        self.assign(
            "algs",
            Expr::ident("algs").at(Expr::apply("duplicated", vec![Expr::ident("algs")]).not()),
        );
    }

    /// Confidence aggregation over the smoothed dimension; no-op otherwise.
    pub fn summarize(&mut self) {
        if !self.classification.is_smoothed() {
            return;
        }
        let group = self.classification.group_header().to_string();
        let confidence = self.classification.confidence;
        for relation in SUMMARIZED_RELATIONS {
            self.assign(
                relation,
                summary_se(relation, "Y", &[group.as_str(), "X"], Some(confidence)),
            );
        }
        self.assign(
            "ERR",
            summary_se("ERR", "X", &["Error", group.as_str(), "Y"], Some(confidence)),
        );
        self.blank();
    }

    /// Metadata summary page and accuracy tables, when enabled.
    pub fn metadata_tables(&mut self) {
        if !self.config.metadata {
            return;
        }
        self.comment("Write metadata table");
        self.eval(Expr::call(
            "plotMetadata",
            vec![
                Arg::named("data", Expr::ident(DATA_RELATION)),
                Arg::named("title", Expr::string(self.product.title())),
            ],
        ));
        if !self.config.csv {
            self.eval(Expr::apply("plot.new", vec![]));
        }
        for (relation, caption, labels) in ACCURACY_TABLES {
            self.eval(Expr::call(
                "plotTable",
                vec![
                    Arg::named("data", Expr::ident(relation)),
                    Arg::named("name", Expr::string(caption)),
                    Arg::named("labels", Expr::strings(labels.iter().copied())),
                ],
            ));
        }
        self.blank();
    }

    /// Splits the combined relation into one relation per `Plot` value.
    pub fn split_by_plot(&mut self, relations: &[&str]) {
        self.comment("Split data into individual plots");
        for relation in relations {
            self.assign(
                *relation,
                Expr::call(
                    "subset",
                    vec![
                        Arg::pos(Expr::ident(DATA_RELATION)),
                        Arg::pos(Expr::ident(PLOT_COLUMN).eq(Expr::string(*relation))),
                        Arg::named("select", Expr::ident(PLOT_COLUMN).neg()),
                    ],
                ),
            );
        }
    }

    /// Drops the combined relation once split.
    pub fn release_data(&mut self) {
        self.eval(Expr::apply("rm", vec![Expr::ident(DATA_RELATION)]));
        self.blank();
    }

    /// Impostor and genuine image-pair galleries.
    pub fn match_galleries(&mut self) {
        for gallery in [IMPOSTOR_GALLERY, GENUINE_GALLERY] {
            self.push(gallery.statement());
        }
        self.blank();
    }

    /// Hands the document over for finalization.
    pub fn finish(self) -> ScriptDocument {
        self.document
    }

    fn preamble(&mut self) {
        self.eval(Expr::apply(
            "source",
            vec![Expr::string(self.config.utils_script().display().to_string())],
        ));
        self.blank();
        self.comment("Read CSVs");
        let classification = self.classification;
        let mut parts = Vec::with_capacity(classification.inputs.len());
        for (idx, input) in classification.inputs.iter().enumerate() {
            let part = format!("part{}", idx + 1);
            debug!(path = %input.path.display(), part = %part, "input loaded");
            self.assign(
                part.as_str(),
                Expr::apply(
                    "read.csv",
                    vec![Expr::string(input.path.display().to_string())],
                ),
            );
            for (header, label) in classification.headers.iter().zip(&input.labels) {
                self.push(Statement::assign_to(
                    Expr::ident(part.as_str()).field(header),
                    Expr::string(label),
                ));
            }
            parts.push(Expr::ident(part));
        }
        self.assign(DATA_RELATION, Expr::apply("rbind", parts.clone()));
        self.eval(Expr::apply("rm", parts));
        self.blank();

        self.comment("Open output device");
        let device = self.document.device();
        self.push(device);
        self.blank();
        self.comment("Write figures");
    }
}

/// `summarySE(<relation>, measurevar=..., groupvars=c(...), conf.interval=...)`
pub fn summary_se(
    relation: &str,
    measure: &str,
    groups: &[&str],
    confidence: Option<f64>,
) -> Expr {
    let mut args = vec![
        Arg::pos(Expr::ident(relation)),
        Arg::named("measurevar", Expr::string(measure)),
        Arg::named("groupvars", Expr::strings(groups.iter().copied())),
    ];
    if let Some(confidence) = confidence {
        args.push(Arg::named("conf.interval", Expr::num(confidence)));
    }
    Expr::call("summarySE", args)
}
