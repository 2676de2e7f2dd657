//! Shared test utilities for the lingua-gen test suite.
//!
//! [`SiteFixture`] builds a throwaway site layout in a temp directory:
//!
//! ```text
//! <tmp>/
//! ├── templates/    # written via fixture.template(...)
//! ├── vocabs/       # written via fixture.vocab(...)
//! └── dist/         # read back via fixture.output(...)
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{SiteConfig, VocabSpec};

pub struct SiteFixture {
    tmp: TempDir,
}

impl SiteFixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("templates")).unwrap();
        fs::create_dir_all(tmp.path().join("vocabs")).unwrap();
        SiteFixture { tmp }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// Write a template (or asset) under `templates/`.
    pub fn template(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.tmp.path().join("templates").join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write `vocabs/<language>.json` from key/value pairs.
    pub fn vocab(&self, language: &str, pairs: &[(&str, &str)]) {
        let map: BTreeMap<&str, &str> = pairs.iter().copied().collect();
        let json = serde_json::to_string_pretty(&map).unwrap();
        fs::write(
            self.tmp.path().join("vocabs").join(format!("{language}.json")),
            json,
        )
        .unwrap();
    }

    /// A config pointing at this fixture's directories.
    pub fn config(&self, languages: &[&str]) -> SiteConfig {
        SiteConfig {
            vocabs: VocabSpec::Many(languages.iter().map(|s| s.to_string()).collect()),
            template_directory: self.tmp.path().join("templates"),
            vocab_directory: self.tmp.path().join("vocabs"),
            output_directory: self.tmp.path().join("dist"),
            copy_cleanly: vec!["png".to_string(), "jpg".to_string(), "css".to_string()],
            ..SiteConfig::default()
        }
    }

    pub fn config_wildcard(&self) -> SiteConfig {
        let mut config = self.config(&[]);
        config.vocabs = VocabSpec::One("*".to_string());
        config
    }

    /// Read a generated file, relative to the output root. Panics with the
    /// available files on miss.
    pub fn output(&self, rel: &str) -> String {
        let path = self.tmp.path().join("dist").join(rel);
        fs::read_to_string(&path).unwrap_or_else(|_| {
            panic!(
                "output '{rel}' not found. Generated: {:?}",
                self.generated_files()
            )
        })
    }

    pub fn output_exists(&self, rel: &str) -> bool {
        self.tmp.path().join("dist").join(rel).is_file()
    }

    fn generated_files(&self) -> Vec<String> {
        let dist = self.tmp.path().join("dist");
        let mut files = Vec::new();
        collect_files(&dist, &dist, &mut files);
        files
    }
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else if let Ok(rel) = path.strip_prefix(root) {
            files.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
}
