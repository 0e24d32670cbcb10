//! Image decoding dispatch and side-by-side match galleries.

use crate::ir::{Arg, BinaryOp, Expr, Statement};

/// Image formats the generated program knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Tiff,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Tiff];

    /// Lowercase extensions; matching is case-insensitive.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Jpeg => &["jpg", "jpeg"],
            ImageFormat::Png => &["png"],
            ImageFormat::Tiff => &["tif", "tiff"],
        }
    }

    /// R function decoding this format.
    pub fn reader(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "readJPEG",
            ImageFormat::Png => "readPNG",
            ImageFormat::Tiff => "tiff::readTIFF",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }
}

/// One image-pair gallery over a match relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchGallery {
    pub relation: &'static str,
    pub caption: &'static str,
    pub comment: &'static str,
}

pub const IMPOSTOR_GALLERY: MatchGallery = MatchGallery {
    relation: "IM",
    caption: "Impostor score =",
    comment: "Print impostor matches above the EER",
};

pub const GENUINE_GALLERY: MatchGallery = MatchGallery {
    relation: "GM",
    caption: "Genuine score =",
    comment: "Print genuine matches below the EER",
};

/// `library(jpeg)`, `library(png)`, `library(grid)`
pub fn image_libraries() -> Vec<Statement> {
    ["jpeg", "png", "grid"]
        .into_iter()
        .map(|lib| Statement::eval(Expr::apply("library", vec![Expr::ident(lib)])))
        .collect()
}

/// Assigns `target` from `path` by extension; unsupported images skip the
/// current loop iteration.
pub fn decode_image(target: &str, path: Expr) -> Statement {
    let ext = Expr::apply(
        "tolower",
        vec![Expr::apply("tools::file_ext", vec![path.clone()])],
    );
    let mut chain = vec![Statement::Next];
    for format in ImageFormat::ALL.into_iter().rev() {
        let cond = ext
            .clone()
            .binary(BinaryOp::In, Expr::strings(format.extensions().iter().copied()));
        chain = vec![Statement::If {
            cond,
            then: vec![Statement::assign(
                target,
                Expr::apply(format.reader(), vec![path.clone()]),
            )],
            otherwise: chain,
        }];
    }
    chain.remove(0)
}

/// A chart showing one decoded image without axes.
pub fn blank_canvas(grob: Expr) -> Expr {
    let range = Expr::num(1.0).binary(BinaryOp::Range, Expr::num(10.0));
    let inf = || Expr::ident("Inf");
    let blank = || Expr::apply("element_blank", vec![]);
    Expr::call(
        "qplot",
        vec![
            Arg::pos(range.clone()),
            Arg::pos(range),
            Arg::named("geom", Expr::string("blank")),
        ],
    )
    .plus(Expr::call(
        "annotation_custom",
        vec![
            Arg::pos(grob),
            Arg::named("xmin", inf().neg()),
            Arg::named("xmax", inf()),
            Arg::named("ymin", inf().neg()),
            Arg::named("ymax", inf()),
        ],
    ))
    .plus(Expr::call(
        "theme",
        vec![
            Arg::named("axis.line", blank()),
            Arg::named("axis.text.x", blank()),
            Arg::named("axis.text.y", blank()),
            Arg::named("axis.ticks", blank()),
            Arg::named("panel.background", blank()),
        ],
    ))
}

impl MatchGallery {
    /// Gallery guarded by `nrow(<relation>) != 0`.
    pub fn statement(&self) -> Statement {
        let rel = || Expr::ident(self.relation);
        let row = |col: f64| rel().index(vec![Some(Expr::ident("i")), Some(Expr::num(col))]);
        let files = |n: f64| Expr::ident("files").at(Expr::num(n));

        let mut body = vec![
            Statement::assign("score", row(1.0)),
            Statement::assign(
                "files",
                Expr::apply(
                    "unlist",
                    vec![Expr::apply("strsplit", vec![row(2.0), Expr::string("[:]")])],
                ),
            ),
            Statement::assign("alg", row(3.0)),
            decode_image("img1", files(2.0)),
            decode_image("img2", files(4.0)),
        ];
        for (grob, img) in [("g1", "img1"), ("g2", "img2")] {
            body.push(Statement::assign(
                grob,
                Expr::call(
                    "rasterGrob",
                    vec![
                        Arg::pos(Expr::ident(img)),
                        Arg::named("interpolate", Expr::Bool(true)),
                    ],
                ),
            ));
        }
        let caption = Expr::apply(
            "paste",
            vec![Expr::string(self.caption), Expr::ident("score")],
        );
        for (name, grob, title, image, label) in [
            ("plot1", "g1", Expr::ident("alg"), 2.0, 1.0),
            ("plot2", "g2", caption, 4.0, 3.0),
        ] {
            body.push(Statement::assign(
                name,
                blank_canvas(Expr::ident(grob))
                    .plus(Expr::call("labs", vec![Arg::named("title", title)]))
                    .plus(Expr::apply(
                        "ylab",
                        vec![Expr::apply("basename", vec![files(image)])],
                    ))
                    .plus(Expr::apply("xlab", vec![files(label)])),
            ));
        }
        body.push(Statement::eval(Expr::call(
            "multiplot",
            vec![
                Arg::pos(Expr::ident("plot1")),
                Arg::pos(Expr::ident("plot2")),
                Arg::named("cols", Expr::num(2.0)),
            ],
        )));

        let mut then = image_libraries();
        then.push(Statement::comment(self.comment));
        then.push(Statement::for_each(
            "i",
            Expr::apply("seq_len", vec![Expr::apply("nrow", vec![rel()])]),
            body,
        ));
        Statement::when(
            Expr::apply("nrow", vec![rel()]).binary(BinaryOp::Ne, Expr::num(0.0)),
            then,
        )
    }
}
