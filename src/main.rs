//! Binary entry point for the `taggr` command-line tool.
//!
//! # Control flow
//!
//! 1. [`FlagRegistry::new`] builds the immutable flag tables.
//! 2. [`parse_args`] scans `argv` into a `ParsedArgs` value — or a single
//!    fatal error, printed with a pointer to the manual.
//! 3. Warnings are emitted (stderr) only after the whole scan succeeded.
//! 4. The file is opened, staged edits are applied and committed, and the
//!    requested display (mode listing or custom format) is printed.
//!
//! Exit contract: informational invocations (help pages, empty argv) exit 0;
//! fatal parse or tag store errors exit 1; a successful run with warnings
//! still exits 0.

use taggr::cli::console;
use taggr::cli::registry::FlagRegistry;
use taggr::cli::scan::parse_args;
use taggr::show::show_tags;
use taggr::store::audio::AudioFileStore;
use taggr::store::{apply_edits, resolve_values};
use taggr::PROGRAM_NAME;

fn main() {
    let registry = FlagRegistry::new();

    let parsed = match parse_args(&registry) {
        Ok(parsed) => parsed,
        Err(error) => {
            console::error(&format!("parsing of arguments failed: {error}"));
            println!("\nuse `{PROGRAM_NAME} --help` to view the manual");
            std::process::exit(1);
        }
    };

    // Help pages and the bare invocation were already printed.
    if parsed.exit_early {
        std::process::exit(0);
    }

    for warning in &parsed.warnings {
        console::warn(warning);
    }

    let options = parsed.options;
    let filename = match options.filename.as_deref() {
        Some(filename) => filename,
        // The scanner rejects every scan that resolves no filename.
        None => {
            console::error("no input file resolved");
            std::process::exit(1);
        }
    };

    let mut store = match AudioFileStore::open(filename) {
        Ok(store) => store,
        Err(error) => {
            console::error(&format!("{error:#}"));
            std::process::exit(1);
        }
    };

    if let Err(error) = apply_edits(&mut store, &options) {
        console::error(&format!("failed to write tags: {error:#}"));
        std::process::exit(1);
    }

    if options.show.enabled {
        let values = resolve_values(&store);
        show_tags(&values, &options.show);
    }
}
