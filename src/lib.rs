//! tmplcopy copies a file or directory tree and fills template files with
//! values from a JSON data file.
//!
//! Templates are files whose name ends with a suffix (`.tmpl` by default).
//! Every `{{ ... }}` expression in them is resolved against the data and the
//! result is written without the suffix. All other files are copied verbatim.

use log::info;

/// Command-line interface module
pub mod cli;

/// Common constants
pub mod constants;

/// Loading of the JSON or YAML substitution data
pub mod data;

/// Error types and handling
pub mod error;

/// Expression parsing and resolution against the data
pub mod expression;

/// Logger setup
pub mod logger;

/// Dot path lookup into the data
pub mod lookup;

/// Value modifiers (`json`, `lower`, `upper`, `_`, `-`)
pub mod modifier;

/// Tree walking, template rendering and file copying
pub mod processor;

use cli::Args;
use error::Result;
use processor::{copy_tree, CopySummary};

/// Loads the data file and copies `args.source` to `args.target`.
///
/// Has no process level side effects, so callers decide how failures map to
/// exit codes.
pub fn run(args: &Args) -> Result<CopySummary> {
    let data = data::load_data(&args.data)?;
    info!(
        "Copying {} to {} using {}",
        args.source.display(),
        args.target.display(),
        args.data.display()
    );
    copy_tree(&args.source, &args.target, &data, &args.copy_options())
}
