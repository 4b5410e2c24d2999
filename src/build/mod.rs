pub mod builder;
pub mod document;
pub mod manifest;
pub mod parallel;

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::codec::{read_index, write_index};
use crate::error::{Error, Result};
use crate::language::Language;
use crate::verify::WellFormedIndex;

pub use builder::IndexBuilder;
pub use document::*;
pub use manifest::*;
pub use parallel::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Start from the index already at the output path.
    pub incremental: bool,
    /// Draw progress bars on stderr.
    pub progress: bool,
}

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub documents: usize,
    /// Pages fed in this build.
    pub fed: usize,
    /// Pages carried over from the previous index.
    pub kept: usize,
    pub terms: usize,
    pub titleterms: usize,
    pub objects: usize,
    pub bytes: usize,
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

pub fn read_manifest(input_dir: &Path) -> Result<InputManifest> {
    let path = input_dir.join("manifest.json");
    let content = fs::read_to_string(&path).map_err(|source| Error::Read {
        path: path.clone(),
        source,
    })?;
    let manifest: InputManifest = serde_json::from_str(&content).map_err(|source| Error::Manifest {
        path: path.clone(),
        source,
    })?;
    if manifest.version != MANIFEST_VERSION {
        return Err(Error::ManifestVersion {
            path,
            version: manifest.version,
        });
    }
    Ok(manifest)
}

/// Build `searchindex.js` from an input directory holding `manifest.json`
/// and the page documents it lists.
pub fn run_build(input_dir: &Path, output_path: &Path, options: BuildOptions) -> Result<BuildSummary> {
    let manifest = read_manifest(input_dir)?;
    let language = Language::from_code(&manifest.language)?;

    #[cfg(feature = "parallel")]
    let multi = MultiProgress::new();
    #[cfg(feature = "parallel")]
    let bar = |len: usize, prefix: &'static str| {
        let pb = if options.progress {
            multi.add(ProgressBar::new(len as u64))
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(create_progress_style());
        pb.set_prefix(prefix);
        pb
    };

    // 1. Load documents
    #[cfg(feature = "parallel")]
    let documents = {
        let load_pb = bar(manifest.documents.len(), "Loading");
        let documents = load_documents_with_progress(input_dir, &manifest, &load_pb)?;
        load_pb.finish_with_message(format!("loaded {} documents", documents.len()));
        documents
    };
    #[cfg(not(feature = "parallel"))]
    let documents = load_documents(input_dir, &manifest)?;

    // 2. Start fresh or from the previous index
    let mut builder = if options.incremental && output_path.exists() {
        match read_index(output_path) {
            Ok(previous) => IndexBuilder::from_index(&previous),
            Err(err) => {
                warn!(path = %output_path.display(), error = %err, "previous index unreadable; rebuilding from scratch");
                IndexBuilder::new()
            }
        }
    } else {
        IndexBuilder::new()
    }
    .with_language(language);
    if let Some(envversion) = &manifest.envversion {
        builder.set_envversion(envversion.clone());
    }

    // 3. Drop pages that no longer exist
    let fed: BTreeSet<&str> = documents.iter().map(|d| d.docname.as_str()).collect();
    let mut keep: Vec<&str> = fed.iter().copied().collect();
    if let Some(docnames) = &manifest.docnames {
        keep.extend(docnames.iter().map(String::as_str));
    }
    builder.prune(&keep);
    let kept = builder.docnames().filter(|d| !fed.contains(d)).count();

    // 4. Feed
    #[cfg(feature = "parallel")]
    let feed_pb = bar(documents.len(), "Indexing");
    let mut seen = HashSet::new();
    for doc in &documents {
        if !seen.insert(doc.docname.as_str()) {
            warn!(docname = %doc.docname, "docname appears in more than one document; the last one wins");
        }
        builder.feed(doc);
        #[cfg(feature = "parallel")]
        feed_pb.inc(1);
    }
    #[cfg(feature = "parallel")]
    feed_pb.finish_with_message(format!("{} pages", builder.doc_count()));

    // 5. Freeze, verify, write
    let index = WellFormedIndex::new(builder.freeze()).map_err(Error::Invalid)?;
    let bytes = write_index(output_path, &index)?;

    let summary = BuildSummary {
        output: output_path.to_path_buf(),
        documents: index.doc_count(),
        fed: fed.len(),
        kept,
        terms: index.terms.len(),
        titleterms: index.titleterms.len(),
        objects: index.object_count(),
        bytes,
    };
    info!(
        output = %summary.output.display(),
        documents = summary.documents,
        fed = summary.fed,
        kept = summary.kept,
        bytes = summary.bytes,
        "build complete"
    );
    Ok(summary)
}
