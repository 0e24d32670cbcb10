//! Facial landmarking report: sample and per-algorithm landmark galleries, an
//! error table and landmark error distributions.

use evalplot_core::PlotError;
use evalplot_pivot::Classification;
use evalplot_script::{
    decode_image, factor, image_libraries, summary_se, Arg, BinaryOp, Expr, Param, ScriptBuilder,
    Statement,
};

use crate::variant::ReportVariant;

/// Relations the combined landmarking table is split into.
pub const LANDMARK_RELATIONS: [&str; 5] = ["Box", "Sample", "EXT", "EXP", "NormLength"];

const ERROR_BREAKS: [f64; 5] = [0.001, 0.01, 0.1, 1.0, 10.0];

#[derive(Debug, Clone, Copy, Default)]
pub struct LandmarkingReport;

impl ReportVariant for LandmarkingReport {
    fn name(&self) -> &'static str {
        "landmarking"
    }

    fn compose(&self, builder: &mut ScriptBuilder<'_>) -> Result<(), PlotError> {
        let classification = builder.classification();
        let group = classification.group_header().to_string();

        builder.blank();
        builder.split_by_plot(&LANDMARK_RELATIONS);
        let box_x = || Expr::ident("Box").field("X");
        builder.push(Statement::assign_to(
            box_x(),
            Expr::call(
                "factor",
                vec![
                    Arg::pos(box_x()),
                    Arg::named("levels", Expr::apply("unique", vec![box_x()])),
                    Arg::named("ordered", Expr::Bool(true)),
                ],
            ),
        ));
        for relation in ["Sample", "EXT", "EXP"] {
            let column = Expr::ident(relation).field("X");
            builder.push(Statement::assign_to(
                column.clone(),
                Expr::apply("as.character", vec![column]),
            ));
        }
        builder.release_data();

        builder.push(read_data_function());
        builder.blank();
        for statement in image_libraries() {
            builder.push(statement);
        }
        builder.blank();
        builder.push(plot_image_function());
        builder.blank();

        landmark_galleries(builder, &group);
        builder.blank();
        error_table(builder, &group);
        builder.blank();

        builder.figure(error_ecdf(classification));
        builder.figure(error_distribution(classification, false));
        builder.figure(error_distribution(classification, true));
        Ok(())
    }
}

/// `readData(data)`: decodes every image row into `list(file, value, image)`.
fn read_data_function() -> Statement {
    let cell = |col: f64| {
        Expr::ident("data").index(vec![Some(Expr::ident("i")), Some(Expr::num(col))])
    };
    let body = vec![
        Statement::assign("examples", Expr::apply("list", vec![])),
        Statement::for_each(
            "i",
            Expr::apply("seq_len", vec![Expr::apply("nrow", vec![Expr::ident("data")])]),
            vec![
                Statement::assign("path", cell(1.0)),
                Statement::assign("value", cell(2.0)),
                Statement::assign(
                    "file",
                    Expr::apply("tools::file_path_sans_ext", vec![Expr::ident("path")]),
                ),
                decode_image("img", Expr::ident("path")),
                Statement::assign_to(
                    Expr::ident("examples").element(Expr::ident("i")),
                    Expr::call(
                        "list",
                        vec![
                            Arg::named("file", Expr::ident("file")),
                            Arg::named("value", Expr::ident("value")),
                            Arg::named("image", Expr::ident("img")),
                        ],
                    ),
                ),
            ],
        ),
        Statement::Return(Expr::ident("examples")),
    ];
    Statement::Function {
        name: "readData".into(),
        params: vec![Param::new("data")],
        body,
    }
}

/// `plotImage(image, title, label)`: one decoded example on a blank canvas.
fn plot_image_function() -> Statement {
    let canvas = evalplot_script::gallery::blank_canvas(Expr::apply(
        "rasterGrob",
        vec![Expr::ident("image").field("image")],
    ))
    .plus(Expr::call(
        "theme",
        vec![
            Arg::named("axis.title.y", Expr::apply("element_blank", vec![])),
            Arg::named("line", Expr::apply("element_blank", vec![])),
        ],
    ))
    .plus(Expr::call(
        "labs",
        vec![Arg::named("title", Expr::ident("title"))],
    ))
    .plus(Expr::apply("xlab", vec![Expr::ident("label")]));
    Statement::Function {
        name: "plotImage".into(),
        params: vec![
            Param::new("image"),
            Param::with_default("title", Expr::Null),
            Param::with_default("label", Expr::Null),
        ],
        body: vec![
            Statement::assign("p", canvas),
            Statement::Return(Expr::ident("p")),
        ],
    }
}

fn sprintf(format: &str, value: Expr) -> Expr {
    Expr::apply("sprintf", vec![Expr::string(format), value])
}

fn landmark_galleries(builder: &mut ScriptBuilder<'_>, group: &str) {
    let first = || Expr::ident("sample").element(Expr::num(1.0));
    builder.assign("sample", Expr::apply("readData", vec![Expr::ident("Sample")]));
    builder.assign("rows", first().field("value"));
    builder.assign(
        "algs",
        Expr::apply("unique", vec![Expr::ident("Box").field(group)]),
    );
    builder.eval(Expr::apply(
        "print",
        vec![Expr::apply(
            "plotImage",
            vec![
                first(),
                Expr::string("Sample Landmarks"),
                sprintf("Total Landmarks: %s", first().field("value")),
            ],
        )],
    ));

    let alg = || Expr::ident("algs").element(Expr::ident("j"));
    let subset = |relation: &str| {
        Expr::apply(
            "readData",
            vec![Expr::ident(relation).index(vec![
                Some(Expr::ident(relation).field(group).eq(alg())),
                None,
            ])],
        )
    };
    let example = |name: &str| Expr::ident(name).element(Expr::ident("i"));
    let pair = Expr::call(
        "multiplot",
        vec![
            Arg::pos(Expr::apply(
                "plotImage",
                vec![
                    example("predictedSample"),
                    sprintf("%s\nPredicted Landmarks", alg()),
                    sprintf(
                        "Average Landmark Error: %.3f",
                        example("predictedSample").field("value"),
                    ),
                ],
            )),
            Arg::pos(Expr::apply(
                "plotImage",
                vec![
                    example("truthSample"),
                    Expr::string("Ground Truth\nLandmarks"),
                    Expr::string(""),
                ],
            )),
            Arg::named("cols", Expr::num(2.0)),
        ],
    );
    let non_empty = |relation: &str| {
        Expr::apply("nrow", vec![Expr::ident(relation)]).binary(BinaryOp::Ne, Expr::num(0.0))
    };
    builder.push(Statement::when(
        non_empty("EXT").binary(BinaryOp::And, non_empty("EXP")),
        vec![Statement::for_each(
            "j",
            Expr::apply("seq_along", vec![Expr::ident("algs")]),
            vec![
                Statement::assign("truthSample", subset("EXT")),
                Statement::assign("predictedSample", subset("EXP")),
                Statement::for_each(
                    "i",
                    Expr::apply("seq_along", vec![Expr::ident("predictedSample")]),
                    vec![Statement::eval(pair)],
                ),
            ],
        )],
    ));
}

/// Mean and confidence interval per landmark, with one column per group.
fn error_table(builder: &mut ScriptBuilder<'_>, group: &str) {
    let rounded = |value: Expr| Expr::apply("round", vec![value, Expr::num(3.0)]);
    let mean_ci = |relation: &str| {
        Expr::call(
            "paste",
            vec![
                Arg::pos(Expr::apply(
                    "as.character",
                    vec![rounded(Expr::ident(relation).field("Y"))],
                )),
                Arg::pos(rounded(Expr::ident(relation).field("ci"))),
                Arg::named("sep", Expr::string(" \u{00b1} ")),
            ],
        )
    };
    let mat = || Expr::ident("mat");

    builder.comment("Format landmark error table");
    builder.assign("StatBox", summary_se("Box", "Y", &[group, "X"], None));
    builder.assign("OverallStatBox", summary_se("Box", "Y", &[group], None));
    builder.assign(
        "mat",
        Expr::call(
            "matrix",
            vec![
                Arg::pos(mean_ci("StatBox")),
                Arg::named("nrow", Expr::ident("rows")),
                Arg::named("ncol", Expr::apply("length", vec![Expr::ident("algs")])),
                Arg::named("byrow", Expr::Bool(false)),
            ],
        ),
    );
    builder.assign(
        "mat",
        Expr::apply("rbind", vec![mat(), mean_ci("OverallStatBox")]),
    );
    builder.assign(
        "mat",
        Expr::apply(
            "rbind",
            vec![
                mat(),
                Expr::apply(
                    "as.character",
                    vec![rounded(Expr::ident("NormLength").field("Y"))],
                ),
            ],
        ),
    );
    builder.push(Statement::assign_to(
        Expr::apply("colnames", vec![mat()]),
        Expr::ident("algs"),
    ));
    builder.push(Statement::assign_to(
        Expr::apply("rownames", vec![mat()]),
        Expr::apply(
            "c",
            vec![
                Expr::apply(
                    "seq",
                    vec![
                        Expr::num(0.0),
                        Expr::ident("rows").binary(BinaryOp::Sub, Expr::num(1.0)),
                    ],
                ),
                Expr::string("Aggregate"),
                Expr::string("Average IPD"),
            ],
        ),
    ));
    builder.assign("ETable", Expr::apply("as.table", vec![mat()]));
    builder.blank();
    builder.eval(Expr::apply(
        "print",
        vec![Expr::apply("textplot", vec![Expr::ident("ETable")])],
    ));
    builder.eval(Expr::apply(
        "print",
        vec![Expr::apply(
            "title",
            vec![Expr::string("Landmarking Error Rates")],
        )],
    ));
}

fn pivot_aesthetics(classification: &Classification) -> Vec<Arg> {
    let mut aes = Vec::new();
    if classification.major.is_multi_valued() {
        aes.push(Arg::named(
            "colour",
            Expr::ident(&classification.major.header),
        ));
    }
    if classification.minor.is_multi_valued() {
        aes.push(Arg::named(
            "linetype",
            Expr::ident(&classification.minor.header),
        ));
    }
    aes
}

fn error_breaks() -> Expr {
    Expr::apply("c", ERROR_BREAKS.into_iter().map(Expr::num).collect())
}

fn error_ecdf(classification: &Classification) -> Expr {
    let mut aes = vec![Arg::pos(Expr::ident("Y"))];
    aes.extend(pivot_aesthetics(classification));
    Expr::apply("ggplot", vec![Expr::ident("Box"), Expr::call("aes", aes)])
        .plus(Expr::call(
            "annotation_logticks",
            vec![Arg::named("sides", Expr::string("b"))],
        ))
        .plus(Expr::apply("stat_ecdf", vec![]))
        .plus(Expr::call(
            "scale_x_log10",
            vec![
                Arg::pos(Expr::string("Normalized Error")),
                Arg::named("breaks", error_breaks()),
            ],
        ))
        .plus(Expr::call(
            "scale_y_continuous",
            vec![
                Arg::pos(Expr::string("Cumulative Density")),
                Arg::named("label", Expr::ident("percent")),
            ],
        ))
        .plus(Expr::apply("theme_minimal", vec![]))
}

/// Per-landmark error as box plus jitter, or as a violin.
fn error_distribution(classification: &Classification, violin: bool) -> Expr {
    let mut aes = vec![Arg::pos(factor("X")), Arg::pos(Expr::ident("Y"))];
    aes.extend(pivot_aesthetics(classification));
    let alpha = || Arg::named("alpha", Expr::num(0.5));
    let mut chart = Expr::apply("ggplot", vec![Expr::ident("Box"), Expr::call("aes", aes)]).plus(
        Expr::call(
            "annotation_logticks",
            vec![Arg::named("sides", Expr::string("l"))],
        ),
    );
    chart = if violin {
        chart.plus(Expr::call("geom_violin", vec![alpha()]))
    } else {
        chart
            .plus(Expr::call("geom_boxplot", vec![alpha()]))
            .plus(Expr::call(
                "geom_jitter",
                vec![Arg::named("size", Expr::num(1.0)), alpha()],
            ))
    };
    chart = chart
        .plus(Expr::apply(
            "scale_x_discrete",
            vec![Expr::string("Landmark")],
        ))
        .plus(Expr::call(
            "scale_y_log10",
            vec![
                Arg::pos(Expr::string("Normalized Error")),
                Arg::named("breaks", error_breaks()),
            ],
        ));
    if violin {
        chart
    } else {
        chart.plus(Expr::apply("theme_minimal", vec![]))
    }
}
