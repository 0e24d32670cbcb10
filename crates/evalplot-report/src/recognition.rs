//! Biometric recognition report: ROC, DET, IET and CMC curves, score
//! distributions, the accuracy bar summary, error rates and match galleries.

use evalplot_core::PlotError;
use evalplot_pivot::{Classification, ALGORITHM_HEADER};
use evalplot_script::{
    discrete_scale, factor, Arg, BinaryOp, ChartKind, Expr, ScaleMode, ScriptBuilder,
};

use crate::layers::{append, histogram_axes, pivot_facets, square, vertical_text};
use crate::variant::ReportVariant;

#[derive(Debug, Clone, Copy, Default)]
pub struct RecognitionReport;

impl ReportVariant for RecognitionReport {
    fn name(&self) -> &'static str {
        "recognition"
    }

    fn compose(&self, builder: &mut ScriptBuilder<'_>) -> Result<(), PlotError> {
        let roc = builder.resolve_options(ChartKind::Roc)?;
        let det = builder.resolve_options(ChartKind::Det)?;
        let iet = builder.resolve_options(ChartKind::Iet)?;
        let cmc = builder.resolve_options(ChartKind::Cmc)?;

        builder.blank();
        builder.eval(Expr::apply("evalFormatting", vec![]));
        builder.blank();
        builder.report_variables();
        builder.blank();
        builder.summarize();
        builder.metadata_tables();

        builder.chart("line", "DET", true, &roc);
        builder.chart("line", "DET", false, &det);
        builder.chart("line", "IET", false, &iet);
        builder.chart("line", "CMC", false, &cmc);

        let classification = builder.classification();
        builder.figure(score_distribution(classification));
        builder.figure(accuracy_summary(classification));
        builder.figure(error_rates(classification));
        builder.match_galleries();
        Ok(())
    }
}

/// Genuine and impostor score histograms.
pub fn score_distribution(classification: &Classification) -> Expr {
    let chart = Expr::call(
        "qplot",
        vec![
            Arg::pos(Expr::ident("X")),
            Arg::named("data", Expr::ident("SD")),
            Arg::named("geom", Expr::string("histogram")),
            Arg::named("fill", Expr::ident("Y")),
            Arg::named("position", Expr::string("identity")),
            Arg::named(
                "alpha",
                Expr::apply(
                    "I",
                    vec![Expr::num(1.0).binary(BinaryOp::Div, Expr::num(2.0))],
                ),
            ),
            Arg::named("xlab", Expr::string("Score")),
            Arg::named("ylab", Expr::string("Frequency")),
        ],
    )
    .plus(Expr::call(
        "scale_fill_manual",
        vec![
            Arg::pos(Expr::string("Ground Truth")),
            Arg::named("values", Expr::strings(["blue", "red"])),
        ],
    ));
    let chart = histogram_axes(chart);
    append(chart, pivot_facets(classification, classification.flip)).plus(square(vec![]))
}

/// True accept rate at fixed false accept rates, per pivot.
pub fn accuracy_summary(classification: &Classification) -> Expr {
    let (major, minor) = (&classification.major, &classification.minor);
    let smoothed = classification.is_smoothed();
    let category = if major.smoothed {
        if minor.has_header() {
            minor.header.as_str()
        } else {
            ALGORITHM_HEADER
        }
    } else {
        major.header.as_str()
    };

    let mut args = vec![Arg::pos(factor(category))];
    if smoothed {
        args.push(Arg::pos(Expr::ident("Y")));
    }
    args.push(Arg::named("data", Expr::ident("BC")));
    if smoothed {
        args.push(Arg::named("geom", Expr::string("boxplot")));
    } else {
        args.push(Arg::named("geom", Expr::string("bar")));
        args.push(Arg::named("position", Expr::string("dodge")));
        args.push(Arg::named("weight", Expr::ident("Y")));
    }
    if major.is_multi_valued() {
        args.push(Arg::named("fill", factor(&major.header)));
    }
    args.push(Arg::named("xlab", Expr::string("False Accept Rate")));
    args.push(Arg::named("ylab", Expr::string("True Accept Rate")));

    let mut chart = Expr::call("qplot", args).plus(Expr::apply("theme_minimal", vec![]));
    if major.is_multi_valued() {
        chart = chart.plus(discrete_scale(
            ScaleMode::Fill,
            &major.header,
            major.cardinality,
        ));
    }
    chart = if minor.is_multi_valued() {
        chart.plus(Expr::apply(
            "facet_grid",
            vec![Expr::formula(
                Some(Expr::ident(&minor.header)),
                Expr::ident("X"),
            )],
        ))
    } else {
        chart.plus(Expr::call(
            "facet_grid",
            vec![
                Arg::pos(Expr::formula(Some(Expr::ident(".")), Expr::ident("X"))),
                Arg::named("labeller", Expr::ident("far_labeller")),
            ],
        ))
    };
    chart = chart
        .plus(Expr::call(
            "scale_y_continuous",
            vec![Arg::named("labels", Expr::ident("percent"))],
        ))
        .plus(Expr::call(
            "theme",
            vec![
                Arg::named("legend.position", Expr::string("none")),
                Arg::named("axis.text.x", vertical_text()),
            ],
        ));
    if !smoothed {
        chart = chart.plus(Expr::call(
            "geom_text",
            vec![
                Arg::named("data", Expr::ident("BC")),
                Arg::pos(Expr::call(
                    "aes",
                    vec![
                        Arg::named("label", Expr::ident("Y")),
                        Arg::named("y", Expr::num(0.05)),
                    ],
                )),
            ],
        ));
    }
    chart
}

/// False accept and false reject rates against the score threshold.
pub fn error_rates(classification: &Classification) -> Expr {
    let (major, minor) = (&classification.major, &classification.minor);
    let (coloured, faceted) = if classification.flip {
        (major, minor)
    } else {
        (minor, major)
    };

    let mut args = vec![
        Arg::pos(Expr::ident("X")),
        Arg::pos(Expr::ident("Y")),
        Arg::named("data", Expr::ident("ERR")),
        Arg::named("geom", Expr::string("line")),
        Arg::named("linetype", Expr::ident("Error")),
    ];
    if coloured.is_multi_valued() {
        args.push(Arg::named("colour", factor(&coloured.header)));
    }
    args.push(Arg::named("xlab", Expr::string("Score")));
    args.push(Arg::named("ylab", Expr::string("Error Rate")));

    let mut chart = Expr::call("qplot", args).plus(Expr::apply("theme_minimal", vec![]));
    if coloured.is_multi_valued() {
        chart = chart.plus(discrete_scale(
            ScaleMode::Colour,
            &coloured.header,
            coloured.cardinality,
        ));
    }
    chart = chart
        .plus(Expr::call(
            "scale_y_log10",
            vec![Arg::named("labels", Expr::ident("percent"))],
        ))
        .plus(Expr::call(
            "annotation_logticks",
            vec![Arg::named("sides", Expr::string("l"))],
        ));
    if faceted.is_multi_valued() {
        chart = chart.plus(Expr::call(
            "facet_wrap",
            vec![
                Arg::pos(Expr::formula(None, Expr::ident(&faceted.header))),
                Arg::named("scales", Expr::string("free_x")),
            ],
        ));
    }
    chart.plus(square(vec![]))
}
