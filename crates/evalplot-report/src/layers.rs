//! Layers shared by the distribution charts of several variants.

use evalplot_pivot::Classification;
use evalplot_script::{Arg, Expr};

pub(crate) fn element_blank() -> Expr {
    Expr::apply("element_blank", vec![])
}

/// `element_text(angle=-90, hjust=0)`
pub(crate) fn vertical_text() -> Expr {
    Expr::call(
        "element_text",
        vec![
            Arg::named("angle", Expr::num(-90.0)),
            Arg::named("hjust", Expr::num(0.0)),
        ],
    )
}

/// Histogram axes without minor breaks or y tick labels.
pub(crate) fn histogram_axes(chart: Expr) -> Expr {
    chart
        .plus(Expr::apply("theme_minimal", vec![]))
        .plus(Expr::call(
            "scale_x_continuous",
            vec![Arg::named("minor_breaks", Expr::Null)],
        ))
        .plus(Expr::call(
            "scale_y_continuous",
            vec![Arg::named("minor_breaks", Expr::Null)],
        ))
        .plus(Expr::call(
            "theme",
            vec![
                Arg::named("axis.text.y", element_blank()),
                Arg::named("axis.ticks", element_blank()),
                Arg::named("axis.text.x", vertical_text()),
            ],
        ))
}

/// Facets over the multi-valued pivots; `flip` swaps grid rows and columns.
pub(crate) fn pivot_facets(classification: &Classification, flip: bool) -> Option<Expr> {
    let (major, minor) = (&classification.major, &classification.minor);
    if !major.is_multi_valued() {
        return None;
    }
    if minor.is_multi_valued() {
        let (rows, cols) = if flip {
            (&minor.header, &major.header)
        } else {
            (&major.header, &minor.header)
        };
        Some(Expr::call(
            "facet_grid",
            vec![
                Arg::pos(Expr::formula(Some(Expr::ident(rows)), Expr::ident(cols))),
                Arg::named("scales", Expr::string("free")),
            ],
        ))
    } else {
        Some(Expr::call(
            "facet_wrap",
            vec![
                Arg::pos(Expr::formula(None, Expr::ident(&major.header))),
                Arg::named("scales", Expr::string("free")),
            ],
        ))
    }
}

/// `theme(aspect.ratio=1, ...)`
pub(crate) fn square(extra: Vec<Arg>) -> Expr {
    let mut args = vec![Arg::named("aspect.ratio", Expr::num(1.0))];
    args.extend(extra);
    Expr::call("theme", args)
}

pub(crate) fn append(chart: Expr, layer: Option<Expr>) -> Expr {
    match layer {
        Some(layer) => chart.plus(layer),
        None => chart,
    }
}
