//! Common constants used throughout tmplcopy.

/// File name suffix marking a file as a template
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Indentation used by the `json` modifier when no width is given
pub const DEFAULT_JSON_INDENT: usize = 2;

/// Widest indentation the `json` modifier will emit
pub const MAX_JSON_INDENT: usize = 10;
