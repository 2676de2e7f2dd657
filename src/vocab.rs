//! Vocabulary loading and inline markup expansion.
//!
//! Each language has one flat JSON dictionary at
//! `<vocab_directory>/<language>.json` mapping keys to translated strings.
//! Values may carry a small BB-style inline markup that translators write
//! instead of raw HTML:
//!
//! | Tag | Expands to |
//! |-----|------------|
//! | `{B}bold{/B}` | `<strong>bold</strong>` |
//! | `{P}text{/P}` | `<p>text</p>` |
//! | `{URL=href}label{/URL}` | `<a href="href" target="_top">label</a>` |
//!
//! Tags are case-insensitive. `{B}` and `{P}` open/close tokens are
//! replaced *independently* — an unmatched token still expands, so
//! malformed vocabulary text produces malformed HTML. Vocabulary is
//! trusted translator input; no validation is attempted.
//!
//! Only the first `{URL=...}...{/URL}` per value is converted. This is a
//! long-standing limitation that downstream vocabularies rely on, asserted
//! as-is by the tests.

use crate::languages::Language;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("no vocabulary for language '{language}' at {path}")]
    NotFound { language: String, path: PathBuf },
    #[error("cannot read vocabulary {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed vocabulary {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A flat key → translated-string dictionary.
pub type Vocabulary = BTreeMap<String, String>;

static BOLD_OPEN: OnceLock<Regex> = OnceLock::new();
static BOLD_CLOSE: OnceLock<Regex> = OnceLock::new();
static PARA_OPEN: OnceLock<Regex> = OnceLock::new();
static PARA_CLOSE: OnceLock<Regex> = OnceLock::new();
static URL_TAG: OnceLock<Regex> = OnceLock::new();

/// Load the vocabulary file for a language.
pub fn load(language: &Language, vocab_dir: &Path) -> Result<Vocabulary, VocabError> {
    let path = vocab_dir.join(format!("{}.json", language.id()));
    if !path.is_file() {
        return Err(VocabError::NotFound {
            language: language.id().to_string(),
            path,
        });
    }
    let text = fs::read_to_string(&path).map_err(|source| VocabError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| VocabError::Json { path, source })
}

/// Expand inline markup in every value. Pure: returns a fresh map, never
/// mutates its argument (the same vocabulary may be shared across renders).
pub fn expand_markup(vocabulary: &Vocabulary) -> Vocabulary {
    vocabulary
        .iter()
        .map(|(key, value)| (key.clone(), expand_value(value)))
        .collect()
}

fn expand_value(value: &str) -> String {
    let bold_open = BOLD_OPEN.get_or_init(|| Regex::new(r"(?i)\{B\}").unwrap());
    let bold_close = BOLD_CLOSE.get_or_init(|| Regex::new(r"(?i)\{/B\}").unwrap());
    let para_open = PARA_OPEN.get_or_init(|| Regex::new(r"(?i)\{P\}").unwrap());
    let para_close = PARA_CLOSE.get_or_init(|| Regex::new(r"(?i)\{/P\}").unwrap());
    let url_tag = URL_TAG.get_or_init(|| Regex::new(r"(?i)\{URL=(.*?)\}(.*?)\{/URL\}").unwrap());

    let value = bold_open.replace_all(value, "<strong>");
    let value = bold_close.replace_all(&value, "</strong>");
    let value = para_open.replace_all(&value, "<p>");
    let value = para_close.replace_all(&value, "</p>");

    // First match only. `replace` (not `replace_all`) is deliberate.
    url_tag
        .replace(&value, |caps: &regex::Captures| {
            format!(r#"<a href="{}" target="_top">{}</a>"#, &caps[1], &caps[2])
        })
        .into_owned()
}
