use std::path::PathBuf;

use evalplot_pivot::{classify, Classification, ClassifyOptions};
use evalplot_script::render::expr;
use evalplot_script::{discrete_scale, qplot, resolve, ChartKind, Palette, ScaleMode};

fn classification(names: &[&str], smooth: Option<&str>) -> Classification {
    let inputs: Vec<PathBuf> = names.iter().map(PathBuf::from).collect();
    let opts = ClassifyOptions {
        smooth: smooth.map(str::to_string),
        ..ClassifyOptions::default()
    };
    classify(&inputs, &opts).expect("classify")
}

fn scenario_a() -> Classification {
    classification(
        &[
            "Algorithm_Split/alg1_0.csv",
            "Algorithm_Split/alg2_0.csv",
            "Algorithm_Split/alg1_1.csv",
        ],
        None,
    )
}

#[test]
fn palette_boundaries() {
    assert_eq!(Palette::for_cardinality(2), Palette::Set1);
    assert_eq!(Palette::for_cardinality(9), Palette::Set1);
    assert_eq!(Palette::for_cardinality(10), Palette::Paired);
    assert_eq!(Palette::for_cardinality(11), Palette::Paired);
    assert_eq!(Palette::for_cardinality(12), Palette::Set3);
    assert_eq!(Palette::for_cardinality(13), Palette::Discrete);
    assert_eq!(
        expr(&discrete_scale(ScaleMode::Fill, "Algorithm", 12)),
        "scale_fill_brewer(\"Algorithm\", palette=\"Set3\")"
    );
    assert_eq!(
        expr(&discrete_scale(ScaleMode::Colour, "Algorithm", 40)),
        "scale_colour_discrete(\"Algorithm\")"
    );
}

#[test]
fn roc_chart_encodes_both_pivots_in_layer_order() {
    let options = resolve::<&str>(ChartKind::Roc, &[]).expect("options");
    let text = expr(&qplot(&scenario_a(), "line", "DET", true, &options));
    assert!(text.starts_with(
        "qplot(X, 1-Y, data=DET, geom=\"line\", main=\"\", colour=factor(Algorithm), \
         linetype=factor(Split), xlab=\"False Accept Rate\", ylab=\"True Accept Rate\") \
         + theme_minimal()"
    ));
    assert!(!text.contains("geom_errorbar"));

    let order = [
        "theme_minimal()",
        "scale_colour_brewer(\"Algorithm\", palette=\"Set1\")",
        "scale_linetype_discrete(\"Split\")",
        "scale_x_log10(labels=trans_format(\"log10\", math_format()), breaks=waiver()) \
         + annotation_logticks(sides=\"b\")",
        "scale_y_continuous(labels=percent, breaks=pretty_breaks(n=10))",
        "legend.position=\"bottom\"",
        "guides(col=guide_legend(ncol=2))",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn fallback_batch_has_no_discrete_encoding() {
    let fallback = classification(
        &[
            "Algorithm_Split/alg1_0.csv",
            "Algorithm_Split/alg2.csv",
            "Algorithm_Split/alg3_1.csv",
        ],
        None,
    );
    let options = resolve::<&str>(ChartKind::Det, &[]).expect("options");
    let text = expr(&qplot(&fallback, "line", "DET", false, &options));
    assert!(!text.contains("colour=factor("));
    assert!(!text.contains("linetype=factor("));
    assert!(!text.contains("scale_colour"));
    assert!(!text.contains("scale_linetype_discrete"));
    assert!(text.contains("scale_y_log10"));
    assert!(text.contains("guide_legend(ncol=1)"));
}

#[test]
fn smoothed_curves_carry_error_bars_except_rank_chart() {
    let smoothed = classification(
        &[
            "Algorithm_Split/a_0.csv",
            "Algorithm_Split/a_1.csv",
            "Algorithm_Split/b_0.csv",
        ],
        Some("Split"),
    );
    let roc = resolve::<&str>(ChartKind::Roc, &[]).expect("options");
    let text = expr(&qplot(&smoothed, "line", "DET", true, &roc));
    assert!(text.contains(
        "geom_errorbar(data=DET[seq(1, NROW(DET), by=29), ], \
         aes(x=X, ymin=(1-lower), ymax=(1-upper)), width=0.1, alpha=I(1/2))"
    ));
    assert!(!text.contains("linetype=factor("));

    let det = resolve::<&str>(ChartKind::Det, &[]).expect("options");
    let text = expr(&qplot(&smoothed, "line", "DET", false, &det));
    assert!(text.contains("aes(x=X, ymin=lower, ymax=upper)"));

    let cmc = resolve::<&str>(ChartKind::Cmc, &[]).expect("options");
    let text = expr(&qplot(&smoothed, "line", "CMC", false, &cmc));
    assert!(!text.contains("geom_errorbar"));
    assert!(text.contains("size=I(1)"));
    assert!(text.contains("scale_x_log10(labels=c(1,5,10,50,100), breaks=c(1,5,10,50,100))"));
}

#[test]
fn overrides_reach_limits_and_theme() {
    let options = resolve(
        ChartKind::Roc,
        &[
            "title=Face",
            "xLimits=(0.0001, 1)",
            "textSize=18",
            "legendPosition=(0.9, 0.1)",
        ],
    )
    .expect("options");
    let text = expr(&qplot(&scenario_a(), "point", "DET", true, &options));
    assert!(text.contains("geom=\"point\", main=\"Face\""));
    assert!(text.contains(" + xlim(0.0001, 1)"));
    assert!(!text.contains("ylim("));
    assert!(text.contains("legend.title=element_text(size=18)"));
    assert!(text.contains("legend.position=c(0.9, 0.1)"));
}
