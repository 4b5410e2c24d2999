use serde::Deserialize;

use crate::types::EnvVersion;

pub const MANIFEST_VERSION: u32 = 1;

/// `manifest.json` at the root of a build input directory.
#[derive(Deserialize, Clone, Debug)]
pub struct InputManifest {
    pub version: u32,
    /// Document files to (re)index, relative to the input directory.
    pub documents: Vec<String>,
    /// Every page of the site. Pages listed here but not in `documents` are
    /// kept from the previous index in incremental builds.
    #[serde(default)]
    pub docnames: Option<Vec<String>>,
    #[serde(default)]
    pub envversion: Option<EnvVersion>,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}
