//! Template rendering.
//!
//! Wraps [Tera](https://keats.github.io/tera/) as a pure
//! `render(template, context) -> text` primitive. Each render builds a
//! one-off `Tera` instance so that engine settings never leak between
//! renders — no process-wide template state, ever.
//!
//! Autoescaping is off: vocabulary values already contain HTML fragments
//! produced by markup expansion, and vocabulary is trusted translator
//! input.
//!
//! ## The `include` function
//!
//! Every render registers an `include` function:
//!
//! ```text
//! {{ include(path="subtemplates/header.tmpl", title="Home") }}
//! ```
//!
//! `path` is resolved against the template root. All other named
//! arguments are merged *over* the caller's live context (caller
//! arguments win on collision), and the sub-template is rendered
//! recursively with a freshly bound `include` of its own. Rebinding per
//! call is the point: a nested include sees the context of the render
//! that invoked it, not a snapshot captured by an ancestor.
//!
//! Template authors control the inclusion graph, so cycles are a
//! realistic mistake; a depth ceiling turns them into a render error
//! instead of a blown stack.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera, Value};
use thiserror::Error;

/// Hard ceiling on nested include depth.
pub const MAX_INCLUDE_DEPTH: usize = 64;

/// The merged mapping visible to one template render: base data,
/// expanded vocabulary, and special variables, later sources winning.
pub type RenderContext = serde_json::Map<String, Value>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("cannot read template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("template evaluation failed for {name}: {detail}")]
    Eval { name: String, detail: String },
    #[error("include depth exceeded {MAX_INCLUDE_DEPTH} rendering {name} (inclusion cycle?)")]
    TooDeep { name: String },
}

/// Flatten a tera error and its cause chain into one line. Tera's
/// `Display` shows only the outermost message; the interesting part
/// (the missing variable, the failing function) lives in the chain.
fn eval_error(name: &str, error: &tera::Error) -> RenderError {
    let mut detail = error.to_string();
    let mut cause = std::error::Error::source(error);
    while let Some(c) = cause {
        detail.push_str(": ");
        detail.push_str(&c.to_string());
        cause = c.source();
    }
    RenderError::Eval {
        name: name.to_string(),
        detail,
    }
}

/// Render the template file at `source`, resolving `include()` calls
/// against `template_dir`.
pub fn render_path(
    template_dir: &Path,
    source: &Path,
    context: &RenderContext,
) -> Result<String, RenderError> {
    let name = source.display().to_string();
    let text = fs::read_to_string(source).map_err(|e| RenderError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;
    render_text(template_dir, &name, &text, context, 0)
}

/// Render template text against a context.
///
/// `name` is only used in error messages. `depth` tracks include nesting.
fn render_text(
    template_dir: &Path,
    name: &str,
    text: &str,
    context: &RenderContext,
    depth: usize,
) -> Result<String, RenderError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(name, text)
        .map_err(|e| eval_error(name, &e))?;
    tera.register_function(
        "include",
        make_include(template_dir.to_path_buf(), context.clone(), depth),
    );

    let tera_context = Context::from_serialize(context).map_err(|e| eval_error(name, &e))?;
    tera.render(name, &tera_context)
        .map_err(|e| eval_error(name, &e))
}

/// Render the sub-template at `rel_path` under the template root.
fn render_include(
    template_dir: &Path,
    rel_path: &str,
    context: &RenderContext,
    depth: usize,
) -> Result<String, RenderError> {
    if depth > MAX_INCLUDE_DEPTH {
        return Err(RenderError::TooDeep {
            name: rel_path.to_string(),
        });
    }
    let path = template_dir.join(rel_path);
    let text = fs::read_to_string(&path).map_err(|e| RenderError::Read {
        path,
        source: e,
    })?;
    render_text(template_dir, rel_path, &text, context, depth)
}

/// Build the `include` function for one render call.
///
/// Closes over the *live* merged context of the render it belongs to.
/// Constructed fresh on every render so nested includes always see their
/// caller's context rather than an ancestor's snapshot.
fn make_include(
    template_dir: PathBuf,
    context: RenderContext,
    depth: usize,
) -> impl Fn(&HashMap<String, Value>) -> tera::Result<Value> + Send + Sync {
    move |args: &HashMap<String, Value>| {
        let rel_path = args
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| tera::Error::msg("include() requires a string `path` argument"))?;

        // Caller-supplied parameters win on key collision.
        let mut merged = context.clone();
        for (key, value) in args {
            if key != "path" {
                merged.insert(key.clone(), value.clone());
            }
        }

        let rendered = render_include(&template_dir, rel_path, &merged, depth + 1)
            .map_err(|e| tera::Error::msg(e.to_string()))?;
        Ok(Value::String(rendered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn context_of(pairs: &[(&str, Value)]) -> RenderContext {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn write_template(dir: &Path, rel: &str, text: &str) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn renders_variables_from_context() {
        let tmp = TempDir::new().unwrap();
        let path = write_template(tmp.path(), "index.tmpl", "Hello {{ greeting }}");

        let context = context_of(&[("greeting", json!("world"))]);
        let output = render_path(tmp.path(), &path, &context).unwrap();
        assert_eq!(output, "Hello world");
    }

    #[test]
    fn html_in_context_values_is_not_escaped() {
        let tmp = TempDir::new().unwrap();
        let path = write_template(tmp.path(), "index.html", "Hello {{ greeting }}");

        let context = context_of(&[("greeting", json!("<strong>Hi</strong>"))]);
        let output = render_path(tmp.path(), &path, &context).unwrap();
        assert_eq!(output, "Hello <strong>Hi</strong>");
    }

    #[test]
    fn unresolved_variable_names_the_template() {
        let tmp = TempDir::new().unwrap();
        let path = write_template(tmp.path(), "broken.tmpl", "{{ missing }}");

        let error = render_path(tmp.path(), &path, &RenderContext::new()).unwrap_err();
        assert!(matches!(error, RenderError::Eval { .. }));
        assert!(error.to_string().contains("broken.tmpl"));
    }

    #[test]
    fn unreadable_template_is_a_read_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.tmpl");

        let error = render_path(tmp.path(), &path, &RenderContext::new()).unwrap_err();
        assert!(matches!(error, RenderError::Read { .. }));
    }

    #[test]
    fn include_renders_sub_template_with_live_context() {
        let tmp = TempDir::new().unwrap();
        write_template(tmp.path(), "subtemplates/header.tmpl", "<h1>{{ title }}</h1>");
        let path = write_template(
            tmp.path(),
            "index.tmpl",
            r#"{{ include(path="subtemplates/header.tmpl") }}body"#,
        );

        let context = context_of(&[("title", json!("Home"))]);
        let output = render_path(tmp.path(), &path, &context).unwrap();
        assert_eq!(output, "<h1>Home</h1>body");
    }

    #[test]
    fn include_parameters_override_the_context() {
        let tmp = TempDir::new().unwrap();
        write_template(tmp.path(), "header.tmpl", "<h1>{{ title }}</h1>");
        let path = write_template(
            tmp.path(),
            "index.tmpl",
            r#"{{ include(path="header.tmpl", title="Override") }}"#,
        );

        let context = context_of(&[("title", json!("Original"))]);
        let output = render_path(tmp.path(), &path, &context).unwrap();
        assert_eq!(output, "<h1>Override</h1>");
    }

    #[test]
    fn nested_includes_see_parameters_from_the_caller() {
        let tmp = TempDir::new().unwrap();
        write_template(tmp.path(), "inner.tmpl", "[{{ label }}]");
        write_template(
            tmp.path(),
            "outer.tmpl",
            r#"outer:{{ include(path="inner.tmpl") }}"#,
        );
        let path = write_template(
            tmp.path(),
            "index.tmpl",
            r#"{{ include(path="outer.tmpl", label="deep") }}"#,
        );

        // `label` is introduced by the outermost include call, yet the
        // innermost template resolves it: each include rebinds the live
        // context rather than reusing the top-level snapshot.
        let output = render_path(tmp.path(), &path, &RenderContext::new()).unwrap();
        assert_eq!(output, "outer:[deep]");
    }

    #[test]
    fn missing_include_path_argument_fails_the_render() {
        let tmp = TempDir::new().unwrap();
        let path = write_template(tmp.path(), "index.tmpl", "{{ include() }}");

        let error = render_path(tmp.path(), &path, &RenderContext::new()).unwrap_err();
        assert!(error.to_string().contains("path"));
    }

    #[test]
    fn self_inclusion_hits_the_depth_ceiling() {
        let tmp = TempDir::new().unwrap();
        let path = write_template(
            tmp.path(),
            "loop.tmpl",
            r#"{{ include(path="loop.tmpl") }}"#,
        );

        let error = render_path(tmp.path(), &path, &RenderContext::new()).unwrap_err();
        assert!(error.to_string().contains("include depth exceeded"));
    }

    #[test]
    fn mutual_inclusion_also_hits_the_ceiling() {
        let tmp = TempDir::new().unwrap();
        write_template(tmp.path(), "a.tmpl", r#"{{ include(path="b.tmpl") }}"#);
        write_template(tmp.path(), "b.tmpl", r#"{{ include(path="a.tmpl") }}"#);
        let path = write_template(tmp.path(), "index.tmpl", r#"{{ include(path="a.tmpl") }}"#);

        let error = render_path(tmp.path(), &path, &RenderContext::new()).unwrap_err();
        assert!(error.to_string().contains("include depth exceeded"));
    }
}
