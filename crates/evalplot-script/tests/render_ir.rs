use evalplot_script::render::{expr, number, program, quote};
use evalplot_script::{decode_image, Arg, BinaryOp, Expr, Param, Statement};

#[test]
fn literals_follow_r_syntax() {
    assert_eq!(quote("say \"hi\"\\\n"), r#""say \"hi\"\\\n""#);
    assert_eq!(number(1.0), "1");
    assert_eq!(number(0.95), "0.95");
    assert_eq!(number(-3.0), "-3");
    assert_eq!(expr(&Expr::Bool(true)), "TRUE");
    assert_eq!(expr(&Expr::Null), "NULL");
}

#[test]
fn calls_layers_and_indexing() {
    let chart = Expr::call(
        "qplot",
        vec![
            Arg::pos(Expr::ident("X")),
            Arg::pos(Expr::num(1.0).binary(BinaryOp::Sub, Expr::ident("Y"))),
            Arg::named("data", Expr::ident("DET")),
        ],
    )
    .plus(Expr::apply("theme_minimal", vec![]))
    .plus(Expr::apply("xlim", vec![Expr::num(0.0), Expr::num(1.0)]));
    assert_eq!(
        expr(&chart),
        "qplot(X, 1-Y, data=DET) + theme_minimal() + xlim(0, 1)"
    );

    let rows = Expr::ident("DET").index(vec![Some(Expr::ident("r")), None]);
    assert_eq!(expr(&rows), "DET[r, ]");
    let cell = Expr::ident("x").element(Expr::ident("j")).field("value");
    assert_eq!(expr(&cell), "x[[j]]$value");
    let facet = Expr::formula(Some(Expr::ident("Split")), Expr::ident("Algorithm"));
    assert_eq!(expr(&facet), "Split ~ Algorithm");
    assert_eq!(expr(&Expr::formula(None, Expr::ident("X"))), "~ X");
}

#[test]
fn extension_dispatch_renders_else_if_chain() {
    let text = program(&[decode_image("img", Expr::ident("p"))]);
    let expected = "\
if (tolower(tools::file_ext(p)) %in% c(\"jpg\", \"jpeg\")) {
  img <- readJPEG(p)
} else if (tolower(tools::file_ext(p)) %in% c(\"png\")) {
  img <- readPNG(p)
} else if (tolower(tools::file_ext(p)) %in% c(\"tif\", \"tiff\")) {
  img <- tiff::readTIFF(p)
} else {
  next
}
";
    assert_eq!(text, expected);
}

#[test]
fn functions_and_loops_nest() {
    let function = Statement::Function {
        name: "plotImage".into(),
        params: vec![
            Param::new("image"),
            Param::with_default("title", Expr::Null),
        ],
        body: vec![
            Statement::for_each(
                "i",
                Expr::apply("seq_len", vec![Expr::num(3.0)]),
                vec![Statement::comment("step")],
            ),
            Statement::Return(Expr::ident("image")),
        ],
    };
    let expected = "\
plotImage <- function(image, title=NULL) {
  for (i in seq_len(3)) {
    # step
  }
  return(image)
}
";
    assert_eq!(program(&[function]), expected);
}
