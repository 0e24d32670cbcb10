use serde::{Deserialize, Serialize};

use crate::ir::{Arg, Expr};

/// Aesthetic a discrete scale is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    Colour,
    Fill,
}

impl ScaleMode {
    fn as_str(self) -> &'static str {
        match self {
            ScaleMode::Colour => "colour",
            ScaleMode::Fill => "fill",
        }
    }
}

/// Discrete palette chosen from the number of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Palette {
    Set1,
    Paired,
    Set3,
    /// Too many categories for a brewer palette; ggplot's default hue scale.
    Discrete,
}

impl Palette {
    pub fn for_cardinality(values: usize) -> Self {
        match values {
            0..=9 => Palette::Set1,
            10 | 11 => Palette::Paired,
            12 => Palette::Set3,
            _ => Palette::Discrete,
        }
    }

    pub fn brewer_name(self) -> Option<&'static str> {
        match self {
            Palette::Set1 => Some("Set1"),
            Palette::Paired => Some("Paired"),
            Palette::Set3 => Some("Set3"),
            Palette::Discrete => None,
        }
    }
}

/// Discrete scale layer titled after the pivot it encodes.
pub fn discrete_scale(mode: ScaleMode, title: &str, values: usize) -> Expr {
    match Palette::for_cardinality(values).brewer_name() {
        Some(palette) => Expr::call(
            format!("scale_{}_brewer", mode.as_str()),
            vec![
                Arg::pos(Expr::string(title)),
                Arg::named("palette", Expr::string(palette)),
            ],
        ),
        None => Expr::apply(
            format!("scale_{}_discrete", mode.as_str()),
            vec![Expr::string(title)],
        ),
    }
}
