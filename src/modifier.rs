//! Modifiers applied to a looked up value, e.g. `name:lower:_` or `obj:json:4`.

use log::debug;
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Value};

use crate::constants::{DEFAULT_JSON_INDENT, MAX_JSON_INDENT};
use crate::error::Result;
use crate::lookup::normalize_numbers;

/// A single transform in a modifier pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    /// Serialize the value as pretty printed JSON. An indent of 0 prints compact JSON.
    Json { indent: usize },
    /// Lowercase text.
    Lower,
    /// Uppercase text.
    Upper,
    /// Replace every `-` with `_` in text.
    Underscore,
    /// Replace every `_` with `-` in text.
    Dash,
}

/// Parses modifier tokens in order.
///
/// `json` consumes the following token when it is an integer and uses it as
/// the indent width. Unknown tokens are skipped.
pub fn parse_modifiers<'a, I>(tokens: I) -> Vec<Modifier>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tokens = tokens.into_iter().peekable();
    let mut modifiers = Vec::new();

    while let Some(token) = tokens.next() {
        let modifier = match token {
            "json" => {
                let indent = match tokens.peek().and_then(|next| next.parse::<i64>().ok()) {
                    Some(width) => {
                        tokens.next();
                        width.clamp(0, MAX_JSON_INDENT as i64) as usize
                    }
                    None => DEFAULT_JSON_INDENT,
                };
                Modifier::Json { indent }
            }
            "lower" => Modifier::Lower,
            "upper" => Modifier::Upper,
            "_" => Modifier::Underscore,
            "-" => Modifier::Dash,
            unknown => {
                debug!("Ignoring unknown modifier '{unknown}'");
                continue;
            }
        };
        modifiers.push(modifier);
    }

    modifiers
}

impl Modifier {
    /// Applies this modifier. Text modifiers leave non-string values untouched.
    pub fn apply(&self, value: Value) -> Result<Value> {
        let value = match (self, value) {
            (Modifier::Json { indent }, value) => Value::String(to_json(&value, *indent)?),
            (Modifier::Lower, Value::String(s)) => Value::String(s.to_lowercase()),
            (Modifier::Upper, Value::String(s)) => Value::String(s.to_uppercase()),
            (Modifier::Underscore, Value::String(s)) => Value::String(s.replace('-', "_")),
            (Modifier::Dash, Value::String(s)) => Value::String(s.replace('_', "-")),
            (_, value) => value,
        };
        Ok(value)
    }
}

/// Runs `value` through every modifier in order.
pub fn apply_modifiers(value: Value, modifiers: &[Modifier]) -> Result<Value> {
    modifiers
        .iter()
        .try_fold(value, |value, modifier| modifier.apply(value))
}

fn to_json(value: &Value, indent: usize) -> Result<String> {
    let value = normalize_numbers(value);
    if indent == 0 {
        return Ok(serde_json::to_string(&value)?);
    }

    let pad = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(pad.as_bytes()));
    value.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}
