//! tmplcopy's main application entry point.

use tmplcopy::{cli::get_args, error::default_error_handler, logger::init_logger, run};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    match run(&args) {
        Ok(_) => println!(
            "Copied '{}' to '{}'.",
            args.source.display(),
            args.target.display()
        ),
        Err(err) => default_error_handler(err),
    }
}
