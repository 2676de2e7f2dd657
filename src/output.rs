//! CLI output formatting.
//!
//! Each concern has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! # Report Format
//!
//! ```text
//! warning: no `vocabs` defined; rendering into the output root without translation
//! Excluded: site/js/script.js
//! dist/english/index.html
//! dist/english/img/logo.png (copied)
//! dist/mundo/index.html FAILED: no vocabulary for language 'mundo' at vocabs/mundo.json
//!
//! Generated 2 files (1 copied), 1 failure
//! ```
//!
//! Outcome lines appear in language-then-file order, matching the
//! generation loop. Excluded sources are shown only at verbose level.

use crate::generate::{PairStatus, RunReport};
use crate::languages::Language;
use crate::scan::{Discovery, EntryKind};

/// Format a full run report. `verbose` adds the excluded-source lines.
pub fn format_report(report: &RunReport, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for warning in &report.warnings {
        lines.push(format!("warning: {warning}"));
    }

    if verbose {
        for path in &report.excluded {
            lines.push(format!("Excluded: {}", path.display()));
        }
    }

    for outcome in &report.outcomes {
        let path = outcome.destination.display();
        match &outcome.status {
            PairStatus::Written => lines.push(path.to_string()),
            PairStatus::Copied => lines.push(format!("{path} (copied)")),
            PairStatus::Failed(reason) => lines.push(format!("{path} FAILED: {reason}")),
        }
    }

    lines.push(String::new());
    lines.push(summary_line(report));
    lines
}

fn summary_line(report: &RunReport) -> String {
    let generated = report.written() + report.copied();
    let mut line = format!(
        "Generated {generated} {} ({} copied)",
        plural(generated, "file", "files"),
        report.copied()
    );
    let failed = report.failed();
    if failed > 0 {
        line.push_str(&format!(
            ", {failed} {}",
            plural(failed, "failure", "failures")
        ));
    }
    line
}

/// Format the `check` view: what a run would do, without writing.
pub fn format_check_output(languages: &[Language], discovery: &Discovery) -> Vec<String> {
    let mut lines = Vec::new();

    let ids: Vec<String> = languages
        .iter()
        .map(|l| {
            if l.is_root() {
                "(output root)".to_string()
            } else {
                l.id().to_string()
            }
        })
        .collect();
    lines.push(format!("Languages: {}", ids.join(", ")));

    lines.push(String::new());
    lines.push("Files".to_string());
    for entry in &discovery.entries {
        match entry.kind {
            EntryKind::Render => lines.push(format!("    {}", entry.destination)),
            EntryKind::Copy => lines.push(format!("    {} (copy)", entry.destination)),
        }
    }
    for path in &discovery.excluded {
        lines.push(format!("    Excluded: {}", path.display()));
    }

    lines.push(String::new());
    lines.push(format!(
        "{} languages × {} files = {} outputs",
        languages.len(),
        discovery.entries.len(),
        languages.len() * discovery.entries.len()
    ));
    lines
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

pub fn print_report(report: &RunReport, verbose: bool) {
    for line in format_report(report, verbose) {
        println!("{line}");
    }
}

pub fn print_check_output(languages: &[Language], discovery: &Discovery) {
    for line in format_check_output(languages, discovery) {
        println!("{line}");
    }
}
