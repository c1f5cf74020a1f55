//! The launcher stub entry point.
//!
//! One compiled stub substitutes for one desktop-entry launch: it
//! adapts the bundle to its current location if needed, then starts the
//! entry's target with the right environment and console behavior. All
//! failures are terminal; each distinct condition exits with its own
//! status, reported synchronously on stderr.

use std::process::exit;

use console::style;
use stirrup_core::config::LauncherManifest;
use stirrup_platform::OsSpawner;

mod launch;

/// Rewritten by the bundle build tooling for each desktop entry.
const MANIFEST_TOML: &str = include_str!("../launcher.toml");

/// A manifest that does not parse is a packaging defect, not a runtime
/// condition; it gets its own status outside the launch-error range.
const BAD_MANIFEST_STATUS: i32 = 2;

fn main() {
    let manifest = match LauncherManifest::from_toml(MANIFEST_TOML) {
        Ok(manifest) => manifest,
        Err(err) => {
            report(&err);
            exit(BAD_MANIFEST_STATUS);
        }
    };

    // This run's arguments are the payload (the files the user opened),
    // forwarded into the template expansion untouched.
    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Err(err) = launch::run(&manifest, &args, &OsSpawner) {
        report(&err);
        exit(err.exit_code());
    }
}

fn report(err: &dyn std::error::Error) {
    eprintln!("{} {err}", style("error:").red().bold());
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  {} {cause}", style("caused by:").dim());
        source = cause.source();
    }
}
