//! Template expression parsing and resolution.
//!
//! An expression is the text between `{{` and `}}`:
//!
//! ```text
//! fallback ( '|' fallback )* ( '=' default )?
//! fallback := path ( ':' modifier )*
//! ```
//!
//! Fallbacks are tried in order and the first path present in the data wins.
//! When none is present the default text is used, with `@path@` tokens
//! replaced by the string or number found at `path`.

use std::convert::Infallible;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::lookup::{get, is_scalar_text, stringify};
use crate::modifier::{apply_modifiers, parse_modifiers, Modifier};

/// `@path@` tokens inside a default value.
static DEFAULT_VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([^@]*?)@").unwrap());

/// One candidate of a fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub path: String,
    pub modifiers: Vec<Modifier>,
}

impl Fallback {
    fn parse(text: &str) -> Self {
        let mut tokens = text.split(':');
        let path = tokens.next().unwrap_or_default().to_string();
        Self {
            path,
            modifiers: parse_modifiers(tokens),
        }
    }
}

/// A parsed `{{ ... }}` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    /// The raw expression text, used in error messages
    pub text: String,
    pub fallbacks: Vec<Fallback>,
    /// Trimmed text after the first `=`, if any
    pub default: Option<String>,
}

impl Expression {
    pub fn parse(text: &str) -> Self {
        let (spec, default) = match text.split_once('=') {
            Some((spec, default)) => (spec, Some(default.trim().to_string())),
            None => (text, None),
        };

        let fallbacks = spec
            .split('|')
            .map(|candidate| Fallback::parse(candidate.trim()))
            .collect();

        Self {
            text: text.to_string(),
            fallbacks,
            default,
        }
    }

    /// All fallback paths joined with ` | `.
    pub fn fallback_paths(&self) -> String {
        self.fallbacks
            .iter()
            .map(|fallback| fallback.path.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Resolves the expression against `data`.
    ///
    /// `source_file` only names the template in error messages.
    ///
    /// # Errors
    /// * `Error::UnresolvedExpression` if no fallback is present and there is no default
    /// * `Error::InvalidDefaultVariable` if a `@path@` in the default is not a string or number
    pub fn resolve(&self, data: &Value, source_file: &Path) -> Result<String> {
        for fallback in &self.fallbacks {
            if let Some(value) = get(data, &fallback.path) {
                let value = apply_modifiers(value.clone(), &fallback.modifiers)?;
                return Ok(stringify(&value));
            }
        }

        match &self.default {
            Some(default) => self.substitute_default(default, data, source_file),
            None => Err(Error::UnresolvedExpression {
                fallbacks: self.fallback_paths(),
                file: source_file.to_path_buf(),
            }),
        }
    }

    fn substitute_default(&self, default: &str, data: &Value, source_file: &Path) -> Result<String> {
        let mut failure = None;
        let substituted = DEFAULT_VARIABLE_RE.replace_all(default, |caps: &Captures| {
            let variable = &caps[1];
            match get(data, variable) {
                Some(value) if is_scalar_text(value) => stringify(value),
                _ => {
                    failure.get_or_insert_with(|| variable.to_string());
                    String::new()
                }
            }
        });

        match failure {
            Some(variable) => Err(Error::InvalidDefaultVariable {
                variable,
                expression: self.text.clone(),
                file: source_file.to_path_buf(),
            }),
            None => Ok(substituted.into_owned()),
        }
    }
}

impl FromStr for Expression {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Expression::parse(s))
    }
}

/// Parses `text` and resolves it against `data` in one step.
pub fn resolve_expression(text: &str, data: &Value, source_file: &Path) -> Result<String> {
    Expression::parse(text).resolve(data, source_file)
}
