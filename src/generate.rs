//! Site generation.
//!
//! The orchestrator: for every language, for every discovered file, decide
//! whether the file is a pass-through asset or a template, compute the
//! final output path, and write the result.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── english/
//! │   ├── index.html             # Rendered templates
//! │   ├── css/main.css           # copy_cleanly assets, byte-identical
//! │   └── img/logo.png
//! └── mundo/
//!     └── ...
//! ```
//!
//! With `subdomain = true` a composite id like `en-US` nests as
//! `dist/en/US/...`; with no languages configured output lands directly
//! in `dist/`.
//!
//! ## Failure Policy
//!
//! No single (language, file) pair aborts the run. A missing vocabulary,
//! a template evaluation error, or an unwritable destination records a
//! `Failed` outcome for that pair and the loop continues. All outcomes
//! and warnings are accumulated in order into a [`RunReport`] and
//! reported at the end.
//!
//! The nested loop is the entire concurrency model: single-threaded,
//! synchronous, each pair independent. Pairs share only the read-only
//! config, and each pair gets a freshly merged context, so one
//! language's vocabulary can never leak into another's render.

use crate::config::SiteConfig;
use crate::languages::{self, Language};
use crate::render::{self, RenderContext, RenderError};
use crate::scan::{self, EntryKind, FileEntry, ScanError};
use crate::vocab::{self, VocabError};
use std::fs;
use std::path::{Path, PathBuf};
use tera::Value;
use thiserror::Error;

/// Failures that make the whole run meaningless, as opposed to per-pair
/// failures which are recorded and skipped.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Why a single (language, file) pair failed.
#[derive(Error, Debug)]
enum PairError {
    #[error(transparent)]
    Vocab(#[from] VocabError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of one (language, file) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairStatus {
    /// Template rendered and written.
    Written,
    /// Pass-through asset copied byte-for-byte.
    Copied,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PairOutcome {
    pub language: String,
    /// Full output path for this pair.
    pub destination: PathBuf,
    pub status: PairStatus,
}

/// Everything a run produced, in language-then-file order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<PairOutcome>,
    pub warnings: Vec<String>,
    /// Sources skipped by the exclusion list (verbose-level detail).
    pub excluded: Vec<PathBuf>,
}

impl RunReport {
    pub fn written(&self) -> usize {
        self.count(|s| matches!(s, PairStatus::Written))
    }

    pub fn copied(&self) -> usize {
        self.count(|s| matches!(s, PairStatus::Copied))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, PairStatus::Failed(_)))
    }

    fn count(&self, predicate: impl Fn(&PairStatus) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|o| predicate(&o.status))
            .count()
    }
}

/// Run the full pipeline: resolve languages, discover files, render or
/// copy every (language, file) pair.
pub fn generate(config: &SiteConfig) -> Result<RunReport, GenerateError> {
    let mut report = RunReport {
        warnings: config.validate(),
        ..RunReport::default()
    };

    // An unresolvable language set (wildcard against a missing vocab dir)
    // degrades to an empty run with a warning, per the failure policy.
    let languages = match languages::resolve(&config.vocabs, &config.vocab_directory) {
        Ok(languages) => languages,
        Err(e) => {
            report.warnings.push(e.to_string());
            Vec::new()
        }
    };

    let discovery = scan::discover(config)?;
    report.warnings.extend(discovery.warnings);
    report.excluded = discovery.excluded;

    for language in &languages {
        for entry in &discovery.entries {
            let destination = output_path(config, language, entry);
            let status = match generate_pair(config, language, entry, &destination) {
                Ok(status) => status,
                Err(e) => PairStatus::Failed(e.to_string()),
            };
            report.outcomes.push(PairOutcome {
                language: language.id().to_string(),
                destination,
                status,
            });
        }
    }

    Ok(report)
}

/// Final output path for one pair: output root, then the language's
/// directory segments, then the entry's destination.
fn output_path(config: &SiteConfig, language: &Language, entry: &FileEntry) -> PathBuf {
    let mut path = config.output_directory.clone();
    for segment in language.output_segments(config.subdomain) {
        path.push(segment);
    }
    for segment in entry.destination.split('/') {
        path.push(segment);
    }
    path
}

fn generate_pair(
    config: &SiteConfig,
    language: &Language,
    entry: &FileEntry,
    destination: &Path,
) -> Result<PairStatus, PairError> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|source| PairError::Write {
            path: destination.to_path_buf(),
            source,
        })?;
    }

    match entry.kind {
        // Fast path: never run binary/pre-built assets through the
        // template engine.
        EntryKind::Copy => {
            fs::copy(&entry.source, destination).map_err(|source| PairError::Write {
                path: destination.to_path_buf(),
                source,
            })?;
            Ok(PairStatus::Copied)
        }
        EntryKind::Render => {
            let context = build_context(config, language)?;
            let rendered = render::render_path(&config.template_directory, &entry.source, &context)?;
            fs::write(destination, rendered).map_err(|source| PairError::Write {
                path: destination.to_path_buf(),
                source,
            })?;
            Ok(PairStatus::Written)
        }
    }
}

/// Assemble the merged context for one pair.
///
/// Merge order (later wins): base data, expanded vocabulary, special
/// variables. A fresh map is built every time — base data is shared by
/// every pair in the run and must never absorb vocabulary keys.
///
/// The root language (no `vocabs` configured) renders with base data
/// only; there is no vocabulary file to load for it.
fn build_context(config: &SiteConfig, language: &Language) -> Result<RenderContext, PairError> {
    let mut context = RenderContext::new();

    for (key, value) in &config.data {
        context.insert(key.clone(), value.clone());
    }

    if !language.is_root() {
        let vocabulary = vocab::load(language, &config.vocab_directory)?;
        for (key, value) in vocab::expand_markup(&vocabulary) {
            context.insert(key, Value::String(value));
        }
    }

    context.insert(
        "vocab_dir".to_string(),
        Value::String(language.id().to_string()),
    );
    if let Some(base_url) = &config.base_url {
        context.insert("base_url".to_string(), Value::String(base_url.clone()));
    }

    Ok(context)
}
