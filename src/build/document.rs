use serde::{Deserialize, Serialize};

use crate::types::priority;

/// One page to index, as exported by the documentation toolchain.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Sphinx docname, e.g. `generated/salmon.backend.sampler.Runner`.
    pub docname: String,
    /// Source path relative to the documentation root.
    pub filename: String,
    pub title: String,
    /// Section titles below the page title. Indexed as title words.
    #[serde(default)]
    pub headings: Vec<String>,
    /// Body text.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
}

/// A documented object (class, function, option, ...) defined on a page.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDef {
    /// Full dotted name.
    pub name: String,
    /// Name shown in results; its part before the last `.` becomes the
    /// `objects` prefix. Defaults to `name`.
    #[serde(default)]
    pub display_name: Option<String>,
    pub domain: String,
    /// Object type within the domain, e.g. `class`.
    pub kind: String,
    /// Human readable type, e.g. `Python class`. Defaults to `kind`.
    #[serde(default)]
    pub label: Option<String>,
    /// Defaults to the full name.
    #[serde(default)]
    pub anchor: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_priority() -> i32 {
    priority::DEFAULT
}

impl ObjectDef {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.kind)
    }

    pub fn anchor(&self) -> &str {
        self.anchor.as_deref().unwrap_or(&self.name)
    }
}
