//! Language resolution.
//!
//! Decides which languages a run renders. Three cases, mirroring how
//! configurations evolved over the years:
//!
//! - `vocabs = ["*"]` — render every vocabulary file found in the vocab
//!   directory. Order follows the directory listing and is unspecified;
//!   callers comparing language sets must compare as sets.
//! - `vocabs = ["english", "mundo"]` — render exactly these, caller order.
//! - no `vocabs` at all — render once with the empty language, straight
//!   into the output root with no per-language subfolder. Old single-site
//!   configs depend on this degenerate case.

use crate::config::VocabSpec;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LanguageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("vocab directory not found: {0} (required for `vocabs = \"*\"`)")]
    VocabDirMissing(PathBuf),
}

/// A language identifier: the stem of a vocabulary file and the name of an
/// output subdirectory.
///
/// The id may be composite (`"en-US"`); in subdomain mode that nests two
/// output levels (`en/US/`) instead of one (`en-US/`). The empty id is the
/// degenerate "no languages configured" case and nests zero levels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    id: String,
}

impl Language {
    pub fn new(id: impl Into<String>) -> Self {
        Language { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// True for the empty language, which renders into the output root.
    pub fn is_root(&self) -> bool {
        self.id.is_empty()
    }

    /// Output directory segments under the output root.
    ///
    /// Splits on the *first* `-` only: `"en-US-x"` in subdomain mode yields
    /// `["en", "US-x"]`.
    pub fn output_segments(&self, subdomain: bool) -> Vec<&str> {
        if self.id.is_empty() {
            return Vec::new();
        }
        if subdomain {
            if let Some((region, sublocale)) = self.id.split_once('-') {
                return vec![region, sublocale];
            }
        }
        vec![self.id.as_str()]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

/// Resolve the set of languages to render.
///
/// Wildcard resolution lists `*.json` files in the vocab directory; a
/// missing directory is an error the caller reports without aborting the
/// run (an empty language set just produces an empty run).
pub fn resolve(vocabs: &VocabSpec, vocab_dir: &Path) -> Result<Vec<Language>, LanguageError> {
    if vocabs.is_wildcard() {
        if !vocab_dir.is_dir() {
            return Err(LanguageError::VocabDirMissing(vocab_dir.to_path_buf()));
        }
        let mut languages = Vec::new();
        for entry in fs::read_dir(vocab_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path
                .extension()
                .map(|e| e.eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                if let Some(stem) = path.file_stem() {
                    languages.push(Language::new(stem.to_string_lossy().to_string()));
                }
            }
        }
        return Ok(languages);
    }

    if !vocabs.is_empty() {
        return Ok(vocabs.as_list().into_iter().map(Language::new).collect());
    }

    Ok(vec![Language::new("")])
}
