//! Source discovery.
//!
//! Produces the list of input files a run will render or copy, one
//! [`FileEntry`] per file, each with a destination path relative to the
//! per-language output root.
//!
//! Two mutually exclusive modes:
//!
//! 1. **Explicit list** — the config's `[[files]]` mappings, wrapped
//!    unchanged. Takes precedence when non-empty.
//! 2. **Directory walk** — every file under the walk root, recursively.
//!    Destinations mirror the file's position relative to the root.
//!
//! Exclusion is a literal substring match (not a glob) against the full
//! source path, applied in walk mode; excluded files are skipped entirely
//! and surfaced at verbose level. Destination paths always use forward
//! slashes, and discovery is idempotent: walking the same tree twice
//! yields the same destinations.
//!
//! Destinations containing `..` segments would escape the per-language
//! output root; such entries are dropped with a warning.

use crate::config::SiteConfig;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Whether a file is rendered through the template engine or copied
/// byte-for-byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Render,
    Copy,
}

/// One discovered input file.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Full path to read the file from.
    pub source: PathBuf,
    /// Destination relative to the per-language output root, forward
    /// slashes regardless of host conventions.
    pub destination: String,
    pub kind: EntryKind,
}

/// The result of discovery: the entries to process, plus everything that
/// was skipped and why.
#[derive(Debug, Default)]
pub struct Discovery {
    pub entries: Vec<FileEntry>,
    /// Source paths skipped by the exclusion list (verbose-level detail).
    pub excluded: Vec<PathBuf>,
    /// Entries dropped for other reasons (e.g. escaping destinations).
    pub warnings: Vec<String>,
}

/// Discover the input files for a run.
pub fn discover(config: &SiteConfig) -> Result<Discovery, ScanError> {
    if !config.files.is_empty() {
        return Ok(discover_explicit(config));
    }
    discover_walk(config)
}

fn discover_explicit(config: &SiteConfig) -> Discovery {
    let mut discovery = Discovery::default();

    for mapping in &config.files {
        let destination = normalize_destination(&mapping.destination);
        if destination_escapes(&destination) {
            discovery.warnings.push(format!(
                "destination '{}' escapes the output root; entry skipped",
                mapping.destination
            ));
            continue;
        }
        let source = config.template_directory.join(&mapping.source);
        discovery.entries.push(FileEntry {
            kind: classify(&destination, &config.copy_cleanly),
            source,
            destination,
        });
    }

    discovery
}

fn discover_walk(config: &SiteConfig) -> Result<Discovery, ScanError> {
    let mut discovery = Discovery::default();
    let root = config.walk_root();

    if root.as_os_str().is_empty() || !root.is_dir() {
        discovery
            .warnings
            .push(format!("walk root '{}' is not a directory", root.display()));
        return Ok(discovery);
    }

    // sort_by_file_name gives a stable order on every platform, which
    // keeps reports diffable across runs.
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let source = entry.path();
        if is_excluded(source, &config.exclude) {
            discovery.excluded.push(source.to_path_buf());
            continue;
        }
        // strip_prefix cannot fail: walkdir only yields paths under root
        let relative = source.strip_prefix(root).expect("walked path under root");
        let destination = to_forward_slashes(relative);
        discovery.entries.push(FileEntry {
            kind: classify(&destination, &config.copy_cleanly),
            source: source.to_path_buf(),
            destination,
        });
    }

    Ok(discovery)
}

/// Literal substring match against the full source path.
fn is_excluded(source: &Path, exclude: &[String]) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let text = to_forward_slashes(source);
    exclude.iter().any(|needle| text.contains(needle.as_str()))
}

/// Join path components with `/`, dropping `.` segments.
fn to_forward_slashes(path: &Path) -> String {
    let segments: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::CurDir => None,
            other => Some(other.as_os_str().to_string_lossy().to_string()),
        })
        .collect();
    segments.join("/")
}

/// Normalize an explicit destination: forward slashes, no leading `./` or `/`.
fn normalize_destination(destination: &str) -> String {
    let destination = destination.replace('\\', "/");
    let mut out: Vec<&str> = Vec::new();
    for segment in destination.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        out.push(segment);
    }
    out.join("/")
}

fn destination_escapes(destination: &str) -> bool {
    destination.split('/').any(|segment| segment == "..")
}

/// Copy-list membership by file extension, ASCII case-insensitive.
/// Config entries may be written with or without a leading dot.
fn classify(destination: &str, copy_cleanly: &[String]) -> EntryKind {
    let extension = destination.rsplit('/').next().and_then(|name| {
        name.rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .map(|(_, ext)| ext)
    });
    let Some(extension) = extension else {
        return EntryKind::Render;
    };
    let copied = copy_cleanly
        .iter()
        .map(|e| e.trim_start_matches('.'))
        .any(|e| e.eq_ignore_ascii_case(extension));
    if copied { EntryKind::Copy } else { EntryKind::Render }
}
