//! Product stamp written into generated reports.

use serde::{Deserialize, Serialize};

/// Name and version printed in the metadata summary title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Product name.
    pub name: String,
    /// Product version.
    pub version: String,
}

impl ProductInfo {
    /// Creates a product stamp.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Title used by the metadata summary, `<name> - <version>`.
    pub fn title(&self) -> String {
        format!("{} - {}", self.name, self.version)
    }
}

impl Default for ProductInfo {
    fn default() -> Self {
        Self::new("evalplot", env!("CARGO_PKG_VERSION"))
    }
}
