//! CLI for TN Timing.
//!
//! This crate provides the `tn-timing` command, which annotates
//! `src/utils/TN_DATA.json` (relative to the working directory) with the
//! built-in backend timing table and prints a per-service transcript.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use clap::Parser;
use tn_timing_core::TimingAnnotator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

/// TN Timing CLI.
///
/// Takes no arguments: the data path is fixed.
#[derive(Parser, Debug)]
#[command(name = "tn-timing")]
#[command(author, version, about, long_about = None)]
pub struct Cli {}

/// Install the tracing subscriber.
///
/// Diagnostics go to stderr so stdout carries only the transcript.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Run the CLI.
///
/// Detail lines are printed as each detail is decided, the summary once
/// the document has been written.
///
/// # Returns
///
/// Returns `Ok(())` on success, or the first error encountered.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let _cli = Cli::parse();

    let report = TimingAnnotator::new().run_with(|outcome| println!("{outcome}"))?;

    println!();
    println!("{}", report.summary_line());
    println!("{}", report.services_line());

    Ok(())
}
