//! # lingua-gen
//!
//! A minimal multi-language static site generator. One template tree,
//! one vocabulary dictionary per language, one rendered site per language:
//!
//! ```text
//! site/index.html  ×  {english.json, mundo.json}  →  dist/english/index.html
//!                                                    dist/mundo/index.html
//! ```
//!
//! # Pipeline
//!
//! A build is a single synchronous pass:
//!
//! 1. Resolve the language set (explicit list, `"*"` wildcard, or none).
//! 2. Discover input files (explicit `[[files]]` list or a directory walk
//!    with exclusion rules).
//! 3. For each language × file pair: copy pass-through assets verbatim, or
//!    load + expand the language's vocabulary, merge the render context,
//!    render the template, and write the result.
//!
//! Pairs are independent — no pair failure aborts the run. Outcomes are
//! accumulated in language-then-file order and reported at the end.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` loading, best-effort validation (warnings), stock config |
//! | [`languages`] | Language identifiers and wildcard/explicit/empty resolution |
//! | [`scan`] | Input discovery: walk or explicit list, exclusion, destination derivation |
//! | [`vocab`] | Per-language JSON dictionaries and inline `{B}/{P}/{URL=}` markup expansion |
//! | [`render`] | Tera-backed rendering with a recursive, context-rebinding `include()` |
//! | [`generate`] | The language × file loop: output paths, copy/render dispatch, outcomes |
//! | [`output`] | CLI report formatting — pure `format_*` functions plus `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## One Engine Instance Per Render
//!
//! Every render builds its own `Tera` instance with its own settings and
//! its own `include` binding. Older generators of this kind mutated a
//! process-wide template engine (delimiters, import tables) between
//! renders; repeated or interleaved invocations then corrupted each
//! other. Per-render instances make that class of bug unrepresentable.
//!
//! ## Context-Rebinding Includes
//!
//! `include(path=..., key=value, ...)` is a function value constructed
//! fresh for each render, closing over that render's live merged context.
//! A sub-template included three levels deep sees the parameters its
//! direct caller added, not a stale snapshot from the top of the stack.
//! Cycles in the inclusion graph hit a depth ceiling and fail that one
//! file's render.
//!
//! ## Trusted Vocabulary, Unbalanced Tags Preserved
//!
//! Vocabulary text comes from translators, not end users. Markup
//! expansion therefore replaces `{B}`/`{/B}` and `{P}`/`{/P}` tokens
//! independently and without validation: unbalanced input produces
//! unbalanced HTML, exactly as the site's translators have always
//! (occasionally) shipped it. Only the first `{URL=...}...{/URL}` per
//! value is expanded — a documented limitation the tests pin down.
//!
//! ## Best-Effort Runs
//!
//! A missing vocabulary file, an undefined template variable, or an
//! unwritable destination fails that single (language, file) pair. The
//! run always continues to completion and reports every outcome, because
//! a translator checking their one language should not be blocked by a
//! typo in someone else's.

pub mod config;
pub mod generate;
pub mod languages;
pub mod output;
pub mod render;
pub mod scan;
pub mod vocab;

#[cfg(test)]
pub(crate) mod test_helpers;
