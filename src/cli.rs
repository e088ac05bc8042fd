//! Command-line interface implementation for tmplcopy.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::constants::TEMPLATE_SUFFIX;
use crate::processor::CopyOptions;

/// Command-line arguments structure for tmplcopy.
#[derive(Parser, Debug)]
#[command(author, version, about = "tmplcopy: copy a file tree, filling templates from JSON data", long_about = None)]
pub struct Args {
    /// File or directory to copy
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// JSON (or YAML) file with the substitution data
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// File or directory to create or overwrite
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// File name suffix marking templates; stripped from the output name
    #[arg(long, value_name = "SUFFIX", default_value = TEMPLATE_SUFFIX)]
    pub suffix: String,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn copy_options(&self) -> CopyOptions {
        CopyOptions {
            template_suffix: self.suffix.clone(),
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the usage on stderr if a required argument is missing
/// * With status code 1 and clap's message on stderr for any other argument error
/// * With status code 0 after printing help or version
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            ErrorKind::MissingRequiredArgument => {
                let help = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .render_help();
                eprint!("{help}");
                std::process::exit(1);
            }
            _ => {
                eprint!("{}", e.render());
                std::process::exit(1);
            }
        },
    }
}
