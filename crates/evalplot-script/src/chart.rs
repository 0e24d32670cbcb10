//! Layered `qplot` chart declarations shared by every report variant.

use evalplot_pivot::Classification;

use crate::ir::{Arg, BinaryOp, Expr};
use crate::options::ChartOptions;
use crate::scale::{discrete_scale, ScaleMode};

/// Relation whose charts never carry error bars.
pub const CMC_RELATION: &str = "CMC";

/// Row stride used when sampling points for error bars.
pub const ERRORBAR_STRIDE: f64 = 29.0;

/// Default text size for titles, legends and axes.
pub const DEFAULT_TEXT_SIZE: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }

    fn logtick_side(self) -> &'static str {
        match self {
            Axis::X => "b",
            Axis::Y => "l",
        }
    }
}

/// Builds the complete layer chain for one curve chart.
pub fn qplot(
    classification: &Classification,
    geom: &str,
    relation: &str,
    flip_y: bool,
    options: &ChartOptions,
) -> Expr {
    let major = &classification.major;
    let minor = &classification.minor;

    let y = if flip_y {
        Expr::num(1.0).binary(BinaryOp::Sub, Expr::ident("Y"))
    } else {
        Expr::ident("Y")
    };
    let mut args = vec![
        Arg::pos(Expr::ident("X")),
        Arg::pos(y),
        Arg::named("data", Expr::ident(relation)),
        Arg::named("geom", Expr::string(geom)),
        Arg::named("main", Expr::string(options.text("title").unwrap_or_default())),
    ];
    if let Some(size) = options.text("size") {
        args.push(Arg::named("size", Expr::apply("I", vec![Expr::raw(size)])));
    }
    if major.is_multi_valued() {
        args.push(Arg::named("colour", factor(&major.header)));
    }
    if minor.is_multi_valued() {
        args.push(Arg::named("linetype", factor(&minor.header)));
    }
    args.push(Arg::named(
        "xlab",
        Expr::string(options.text("xTitle").unwrap_or_default()),
    ));
    args.push(Arg::named(
        "ylab",
        Expr::string(options.text("yTitle").unwrap_or_default()),
    ));

    let mut chart = Expr::call("qplot", args).plus(Expr::apply("theme_minimal", vec![]));
    if classification.error_bars() && relation != CMC_RELATION {
        chart = chart.plus(error_bars(relation, flip_y));
    }
    if major.is_multi_valued() {
        chart = chart.plus(discrete_scale(
            ScaleMode::Colour,
            &major.header,
            major.cardinality,
        ));
    }
    if minor.is_multi_valued() {
        chart = chart.plus(Expr::apply(
            "scale_linetype_discrete",
            vec![Expr::string(&minor.header)],
        ));
    }
    for axis in [Axis::X, Axis::Y] {
        for layer in axis_scale(axis, options) {
            chart = chart.plus(layer);
        }
    }
    for axis in [Axis::X, Axis::Y] {
        if let Some(limits) = axis_limits(axis, options) {
            chart = chart.plus(limits);
        }
    }
    chart
        .plus(theme(options))
        .plus(Expr::call(
            "guides",
            vec![Arg::named(
                "col",
                Expr::call(
                    "guide_legend",
                    vec![Arg::named("ncol", Expr::num(classification.ncol as f64))],
                ),
            )],
        ))
}

/// `factor(<column>)`
pub fn factor(column: &str) -> Expr {
    Expr::apply("factor", vec![Expr::ident(column)])
}

fn error_bars(relation: &str, flip_y: bool) -> Expr {
    let bound = |name: &str| {
        if flip_y {
            Expr::num(1.0)
                .binary(BinaryOp::Sub, Expr::ident(name))
                .paren()
        } else {
            Expr::ident(name)
        }
    };
    let rows = Expr::call(
        "seq",
        vec![
            Arg::pos(Expr::num(1.0)),
            Arg::pos(Expr::apply("NROW", vec![Expr::ident(relation)])),
            Arg::named("by", Expr::num(ERRORBAR_STRIDE)),
        ],
    );
    Expr::call(
        "geom_errorbar",
        vec![
            Arg::named("data", Expr::ident(relation).index(vec![Some(rows), None])),
            Arg::pos(Expr::call(
                "aes",
                vec![
                    Arg::named("x", Expr::ident("X")),
                    Arg::named("ymin", bound("lower")),
                    Arg::named("ymax", bound("upper")),
                ],
            )),
            Arg::named("width", Expr::num(0.1)),
            Arg::named(
                "alpha",
                Expr::apply(
                    "I",
                    vec![Expr::num(1.0).binary(BinaryOp::Div, Expr::num(2.0))],
                ),
            ),
        ],
    )
}

fn axis_scale(axis: Axis, options: &ChartOptions) -> Vec<Expr> {
    let name = axis.name();
    let labels = options.text(&format!("{name}Labels")).map(Expr::raw);
    let breaks = options.text(&format!("{name}Breaks")).map(Expr::raw);
    if options.flag(&format!("{name}Log")) {
        let labels = labels.unwrap_or_else(|| {
            Expr::apply(
                "trans_format",
                vec![Expr::string("log10"), Expr::apply("math_format", vec![])],
            )
        });
        let breaks = breaks.unwrap_or_else(|| Expr::apply("waiver", vec![]));
        vec![
            Expr::call(
                format!("scale_{name}_log10"),
                vec![Arg::named("labels", labels), Arg::named("breaks", breaks)],
            ),
            Expr::call(
                "annotation_logticks",
                vec![Arg::named("sides", Expr::string(axis.logtick_side()))],
            ),
        ]
    } else {
        let labels = labels.unwrap_or_else(|| Expr::ident("percent"));
        let breaks = breaks.unwrap_or_else(|| {
            Expr::call("pretty_breaks", vec![Arg::named("n", Expr::num(10.0))])
        });
        vec![Expr::call(
            format!("scale_{name}_continuous"),
            vec![Arg::named("labels", labels), Arg::named("breaks", breaks)],
        )]
    }
}

fn axis_limits(axis: Axis, options: &ChartOptions) -> Option<Expr> {
    let key = format!("{}Limits", axis.name());
    let func = format!("{}lim", axis.name());
    if let Some((low, high)) = options.pair(&key) {
        return Some(Expr::apply(func, vec![Expr::num(low), Expr::num(high)]));
    }
    options
        .text(&key)
        .map(|raw| Expr::apply(func, vec![Expr::raw(raw)]))
}

fn theme(options: &ChartOptions) -> Expr {
    let size = options.number("textSize").unwrap_or(DEFAULT_TEXT_SIZE);
    let text = || Expr::call("element_text", vec![Arg::named("size", Expr::num(size))]);
    let legend_position = match (options.pair("legendPosition"), options.text("legendPosition")) {
        (Some((x, y)), _) => Expr::apply("c", vec![Expr::num(x), Expr::num(y)]),
        (None, Some(position)) => Expr::string(position),
        (None, None) => Expr::string("bottom"),
    };
    Expr::call(
        "theme",
        vec![
            Arg::named("legend.title", text()),
            Arg::named("legend.text", text()),
            Arg::named("plot.title", text()),
            Arg::named("axis.text", text()),
            Arg::named("axis.title.x", text()),
            Arg::named("axis.title.y", text()),
            Arg::named("legend.position", legend_position),
            Arg::named(
                "legend.background",
                Expr::call("element_rect", vec![Arg::named("fill", Expr::string("white"))]),
            ),
            Arg::named(
                "panel.grid.major",
                Expr::call(
                    "element_line",
                    vec![Arg::named("colour", Expr::string("gray"))],
                ),
            ),
            Arg::named(
                "panel.grid.minor",
                Expr::call(
                    "element_line",
                    vec![
                        Arg::named("colour", Expr::string("gray")),
                        Arg::named("linetype", Expr::string("dashed")),
                    ],
                ),
            ),
        ],
    )
}
