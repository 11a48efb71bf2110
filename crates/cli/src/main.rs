//! TN Timing CLI entry point.

fn main() {
    tn_timing_cli::init_tracing();

    if let Err(e) = tn_timing_cli::run() {
        println!("Error: {}", e);
        std::process::exit(1);
    }
}
