//! Site configuration module.
//!
//! Handles loading and validating `site.toml`. Unlike hard validation
//! failures, most configuration mistakes here are *warnings*: the generator
//! runs best-effort and reports what it skipped, because a half-translated
//! site is more useful to a translator than no site at all.
//!
//! ## Configuration Options
//!
//! ```toml
//! # Languages to render. Each entry names a vocabulary file
//! # (<vocab_directory>/<name>.json). "*" renders every vocabulary found.
//! vocabs = ["english", "mundo"]
//!
//! output_directory = "dist"        # Per-language trees are written here
//! template_directory = "site"      # Walk root and include() resolution root
//! vocab_directory = "vocabs"       # One <language>.json per language
//!
//! exclude = ["js/", "subtemplates"]  # Literal substring match on source paths
//! copy_cleanly = ["png", "jpg", "css"] # Extensions copied verbatim, never rendered
//! subdomain = false                # "en-US" nests as en/US/ instead of en-US/
//! base_url = "https://cdn.example.org" # Optional, exposed to templates
//!
//! [data]                           # Base template context, any shape
//! title = "My Site"
//!
//! # Alternative to walking template_directory: an explicit file list.
//! # Sources are resolved relative to template_directory.
//! [[files]]
//! source = "index.tmpl"
//! destination = "index.html"
//! ```
//!
//! ## Discovery Modes
//!
//! `files` and directory walking are alternatives. When both are supplied
//! the explicit `files` list takes precedence and a warning is raised —
//! see [`SiteConfig::validate`].
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The language selection: an explicit list, or `"*"` for every vocabulary
/// file present in the vocab directory.
///
/// Accepts both `vocabs = "*"` and `vocabs = ["*"]` — legacy configurations
/// used either form interchangeably.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VocabSpec {
    One(String),
    Many(Vec<String>),
}

impl Default for VocabSpec {
    fn default() -> Self {
        VocabSpec::Many(Vec::new())
    }
}

impl VocabSpec {
    /// True when every available vocabulary should be rendered.
    pub fn is_wildcard(&self) -> bool {
        match self {
            VocabSpec::One(s) => s == "*",
            VocabSpec::Many(v) => v.first().map(String::as_str) == Some("*"),
        }
    }

    /// True when no language was configured at all.
    pub fn is_empty(&self) -> bool {
        match self {
            VocabSpec::One(s) => s.is_empty(),
            VocabSpec::Many(v) => v.is_empty(),
        }
    }

    /// The explicit language list, in caller order.
    pub fn as_list(&self) -> Vec<String> {
        match self {
            VocabSpec::One(s) => vec![s.clone()],
            VocabSpec::Many(v) => v.clone(),
        }
    }
}

/// An explicit (source, destination) mapping — the alternative to walking
/// the template directory. Sources are relative to `template_directory`;
/// destinations are relative to the per-language output root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileMapping {
    pub source: String,
    pub destination: String,
}

/// Site configuration loaded from `site.toml`.
///
/// Every field has a default; a config file only specifies what it needs.
/// After loading, the config is read-only for the rest of the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Languages to render, or `"*"` for all available vocabularies.
    pub vocabs: VocabSpec,
    /// Base template context, merged below vocabulary and special variables.
    pub data: BTreeMap<String, serde_json::Value>,
    /// Root for all generated output.
    pub output_directory: PathBuf,
    /// Template root: the default walk root, the resolution root for
    /// `include()` and for explicit `files` sources.
    pub template_directory: PathBuf,
    /// Directory holding one `<language>.json` per language.
    pub vocab_directory: PathBuf,
    /// Optional walk root distinct from `template_directory` (legacy setups
    /// keep shared includes outside the walked tree).
    pub source_directory: Option<PathBuf>,
    /// Literal substrings; a source path containing any of them is skipped.
    pub exclude: Vec<String>,
    /// File extensions copied verbatim, bypassing the template engine.
    pub copy_cleanly: Vec<String>,
    /// Split two-segment language ids ("en-US") into nested en/US/ output.
    pub subdomain: bool,
    /// Optional CDN or canonical base URL, exposed to templates as `base_url`.
    pub base_url: Option<String>,
    /// Explicit file list; takes precedence over directory walking.
    pub files: Vec<FileMapping>,
}

impl SiteConfig {
    /// Check the configuration for contradictions and omissions.
    ///
    /// Returns human-readable warnings. None of these abort the run: an
    /// empty `vocabs` renders untranslated into the output root, a missing
    /// source produces zero files, and a dual-mode config uses the explicit
    /// `files` list.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.vocabs.is_empty() {
            warnings.push(
                "no `vocabs` defined; rendering into the output root without translation"
                    .to_string(),
            );
        }

        if self.files.is_empty()
            && self.source_directory.is_none()
            && self.template_directory.as_os_str().is_empty()
        {
            warnings.push(
                "no source files: supply `files` or a `template_directory` to walk".to_string(),
            );
        }

        if !self.files.is_empty() && self.source_directory.is_some() {
            warnings.push(
                "both `files` and `source_directory` supplied; the explicit `files` list takes precedence"
                    .to_string(),
            );
        }

        warnings
    }

    /// The directory tree to walk when no explicit `files` list is given.
    pub fn walk_root(&self) -> &Path {
        self.source_directory
            .as_deref()
            .unwrap_or(&self.template_directory)
    }
}

/// Load `site.toml` from the given path.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// A documented stock `site.toml`, printed by `lingua-gen gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# lingua-gen site configuration.
# Every option is optional; defaults shown where they exist.

# Languages to render. Each entry names a vocabulary file at
# <vocab_directory>/<name>.json. Use "*" to render every vocabulary found.
vocabs = ["*"]

output_directory = "dist"
template_directory = "site"
vocab_directory = "vocabs"

# Source paths containing any of these substrings are skipped entirely
# (not rendered, not copied). Useful for raw JS/SASS that a separate
# build step minifies, and for include-only sub-templates.
exclude = ["js/", "subtemplates"]

# File extensions passed through byte-for-byte, never rendered.
copy_cleanly = ["png", "jpg", "gif", "css", "ico"]

# When true, a two-segment language id like "en-US" nests its output as
# en/US/ instead of a single en-US/ directory.
subdomain = false

# Optional. Exposed to every template as `base_url`.
# base_url = "https://cdn.example.org"

# Base template context. Vocabulary keys and special variables
# (`vocab_dir`, `base_url`) override colliding names.
[data]
title = "My Site"

# Alternative to walking template_directory: explicit (source, destination)
# pairs, sources relative to template_directory.
# [[files]]
# source = "index.tmpl"
# destination = "index.html"
"#
}
