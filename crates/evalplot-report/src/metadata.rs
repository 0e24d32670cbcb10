use evalplot_core::PlotError;
use evalplot_script::{Arg, Expr, ScriptBuilder, DATA_RELATION};

use crate::variant::ReportVariant;

/// Destination used when the caller does not name one.
pub const METADATA_DESTINATION: &str = "PlotMetadata";

/// Separator of the column list accepted by [`MetadataReport::parse`].
pub const COLUMN_SEPARATOR: char = ';';

/// One violin chart per metadata column, each also saved on its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataReport {
    pub columns: Vec<String>,
}

impl MetadataReport {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a `;` separated column list, dropping empty entries.
    pub fn parse(columns: &str) -> Self {
        Self::new(
            columns
                .split(COLUMN_SEPARATOR)
                .map(str::trim)
                .filter(|column| !column.is_empty()),
        )
    }
}

impl ReportVariant for MetadataReport {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn compose(&self, builder: &mut ScriptBuilder<'_>) -> Result<(), PlotError> {
        let pivot = builder.classification().major.header.clone();
        for column in &self.columns {
            builder.eval(
                Expr::call(
                    "qplot",
                    vec![
                        Arg::pos(Expr::ident(&pivot)),
                        Arg::pos(Expr::ident(column)),
                        Arg::named("data", Expr::ident(DATA_RELATION)),
                        Arg::named("geom", Expr::string("violin")),
                        Arg::named("fill", Expr::ident(&pivot)),
                    ],
                )
                .plus(Expr::apply("coord_flip", vec![]))
                .plus(Expr::apply("theme_minimal", vec![])),
            );
            builder.eval(Expr::apply(
                "ggsave",
                vec![Expr::string(format!("{column}.pdf"))],
            ));
        }
        Ok(())
    }
}
