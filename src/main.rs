use anyhow::Result;
use clipsense::cli;

fn main() -> Result<()> {
    // Parse arguments first so --help and usage errors stay off the log.
    let args = cli::parse();

    // Initialize unified logging: routes all log::info!() etc. to the debug log file.
    // When RUST_LOG is set, also mirrors to stderr.
    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config (applied in cli::run).
    clipsense::debug::init_log_bridge(args.log_level_filter());

    log::info!("Starting clipsense {}", clipsense::VERSION);

    let result = cli::run(&args);
    if let Err(ref e) = result {
        log::error!("clipsense failed: {e:#}");
    }
    result
}
