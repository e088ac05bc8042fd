//! Tree copying with template substitution.
//!
//! Directories are mirrored, template files (by suffix) are rendered with the
//! suffix stripped from their name, and every other file is copied as is.

use log::{debug, info};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

use crate::constants::TEMPLATE_SUFFIX;
use crate::error::{Error, Result};
use crate::expression::resolve_expression;

/// `{{ expression }}` occurrences in a template.
static TEMPLATE_EXPRESSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^}]*?)\s*\}\}").unwrap());

/// Options controlling a copy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOptions {
    /// File name suffix marking templates, stripped from the output name
    pub template_suffix: String,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            template_suffix: TEMPLATE_SUFFIX.to_string(),
        }
    }
}

/// What a copy run produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopySummary {
    pub directories: usize,
    pub copied: usize,
    pub rendered: usize,
}

/// Returns true if `filename` ends with `suffix` and has something before it.
pub fn is_template_name(filename: &str, suffix: &str) -> bool {
    !suffix.is_empty() && filename.len() > suffix.len() && filename.ends_with(suffix)
}

/// Resolves the output path for a source file.
///
/// # Returns
/// * `(PathBuf, bool)` - The output path and whether the file is a template
pub fn resolve_target_path(source: &Path, target: &Path, suffix: &str) -> (PathBuf, bool) {
    let is_template = source
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| is_template_name(name, suffix));

    let stripped = target
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| is_template && is_template_name(name, suffix))
        .and_then(|name| name.strip_suffix(suffix))
        .map(|name| target.with_file_name(name));

    (stripped.unwrap_or_else(|| target.to_path_buf()), is_template)
}

/// Substitutes every `{{ ... }}` expression in `content`.
///
/// All expressions are resolved before anything is replaced, so a single
/// failure leaves nothing half rendered. Replacement happens in one pass over
/// the original content and resolved text is never scanned again.
///
/// # Arguments
/// * `content` - Template text
/// * `data` - Substitution data
/// * `source_file` - Template path, used in error messages
pub fn render_template(content: &str, data: &Value, source_file: &Path) -> Result<String> {
    let mut spans: Vec<(Range<usize>, &str)> = Vec::new();
    let mut replacements: HashMap<&str, String> = HashMap::new();

    for caps in TEMPLATE_EXPRESSION_RE.captures_iter(content) {
        let (Some(matched), Some(expression)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        spans.push((matched.range(), matched.as_str()));
        if replacements.contains_key(matched.as_str()) {
            continue;
        }
        let replacement = resolve_expression(expression.as_str(), data, source_file)?;
        debug!("Resolved '{}' to '{}'", matched.as_str(), replacement);
        replacements.insert(matched.as_str(), replacement);
    }

    let mut rendered = String::with_capacity(content.len());
    let mut last = 0;
    for (span, matched) in spans {
        rendered.push_str(&content[last..span.start]);
        rendered.push_str(replacements.get(matched).map_or(matched, String::as_str));
        last = span.end;
    }
    rendered.push_str(&content[last..]);

    Ok(rendered)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn render_file(source: &Path, target: &Path, data: &Value) -> Result<()> {
    let bytes = fs::read(source)?;
    let content = String::from_utf8(bytes).map_err(|_| Error::InvalidTemplateEncoding {
        path: source.to_path_buf(),
    })?;
    let rendered = render_template(&content, data, source)?;

    ensure_parent(target)?;
    fs::write(target, rendered)?;
    Ok(())
}

fn copy_file(source: &Path, target: &Path) -> Result<()> {
    ensure_parent(target)?;
    fs::copy(source, target)?;
    Ok(())
}

/// Mirrors `source` into `target`, rendering templates with `data`.
///
/// `source` may be a single file or a directory. Entries are processed one at
/// a time, depth first, in file name order. Existing target files are
/// overwritten; unrelated files in `target` are left alone.
///
/// # Errors
/// The first IO, encoding or resolution error aborts the run.
pub fn copy_tree(
    source: &Path,
    target: &Path,
    data: &Value,
    options: &CopyOptions,
) -> Result<CopySummary> {
    let mut summary = CopySummary::default();

    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();

        let entry_target = if entry.depth() == 0 {
            target.to_path_buf()
        } else {
            let relative = path.strip_prefix(source).map_err(std::io::Error::other)?;
            target.join(relative)
        };

        if entry.file_type().is_dir() {
            debug!("Creating directory: {}", entry_target.display());
            fs::create_dir_all(&entry_target)?;
            summary.directories += 1;
            continue;
        }

        let (target_path, is_template) =
            resolve_target_path(path, &entry_target, &options.template_suffix);

        if is_template {
            debug!("Rendering {} to {}", path.display(), target_path.display());
            render_file(path, &target_path, data)?;
            summary.rendered += 1;
        } else {
            debug!("Copying {} to {}", path.display(), target_path.display());
            copy_file(path, &target_path)?;
            summary.copied += 1;
        }
    }

    info!(
        "Processed {} directories, rendered {} templates, copied {} files",
        summary.directories, summary.rendered, summary.copied
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_template_name() {
        assert!(is_template_name("strings.xml.tmpl", ".tmpl"));
        assert!(is_template_name("a.tmpl", ".tmpl"));
        assert!(!is_template_name(".tmpl", ".tmpl"));
        assert!(!is_template_name("strings.xml", ".tmpl"));
        assert!(!is_template_name("file.tmplx", ".tmpl"));
        assert!(!is_template_name("anything", ""));
    }

    #[test]
    fn test_resolve_target_path() {
        let (path, is_template) =
            resolve_target_path(Path::new("src/a.xml.tmpl"), Path::new("out/a.xml.tmpl"), ".tmpl");
        assert_eq!(path, PathBuf::from("out/a.xml"));
        assert!(is_template);

        let (path, is_template) =
            resolve_target_path(Path::new("src/icon.png"), Path::new("out/icon.png"), ".tmpl");
        assert_eq!(path, PathBuf::from("out/icon.png"));
        assert!(!is_template);

        // A single template file copied to an explicit name keeps that name.
        let (path, is_template) =
            resolve_target_path(Path::new("a.xml.tmpl"), Path::new("b.xml"), ".tmpl");
        assert_eq!(path, PathBuf::from("b.xml"));
        assert!(is_template);
    }

    #[test]
    fn test_render_template() {
        let data = json!({ "app": { "name": "Demo-App" }, "count": 3 });
        let rendered = render_template(
            "<name>{{app.name:lower:_}}</name><n>{{   count }}</n>{{missing=none}}",
            &data,
            Path::new("t.tmpl"),
        )
        .unwrap();
        assert_eq!(rendered, "<name>demo_app</name><n>3</n>none");
    }

    #[test]
    fn test_render_template_without_expressions() {
        let text = "no { braces } here }}";
        assert_eq!(render_template(text, &json!({}), Path::new("t")).unwrap(), text);
    }

    #[test]
    fn test_render_does_not_rescan_output() {
        let data = json!({ "a": "{{ b }}", "b": "B" });
        let rendered = render_template("{{ a }} {{ b }} {{ a }}", &data, Path::new("t")).unwrap();
        assert_eq!(rendered, "{{ b }} B {{ b }}");
    }

    #[test]
    fn test_render_repeated_and_adjacent_expressions() {
        let data = json!({ "a": "x", "b": "" });
        let rendered =
            render_template("{{a}}{{b}}{{ a }}-{{a}}{{a}}", &data, Path::new("t")).unwrap();
        assert_eq!(rendered, "xxx-xx");
    }

    #[test]
    fn test_render_fails_on_any_unresolved() {
        let err = render_template("{{ a }} {{ nope }}", &json!({ "a": 1 }), Path::new("t.tmpl"))
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvedExpression { ref fallbacks, .. } if fallbacks == "nope"));
    }
}
