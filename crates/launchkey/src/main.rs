//! launchkey - Android release signing resolver

mod cli;
mod exit_codes;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(console_level(cli.verbose, cli.quiet));

    if let Err(e) = cli.execute() {
        cli::output::error(&format!("{:#}", e));
        std::process::exit(exit_codes::for_error(&e));
    }
}

/// Console verbosity when `RUST_LOG` is unset.
///
/// `warn` keeps the debug-signing fallback visible by default.
fn console_level(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (true, _) => "info",
        (false, true) => "error",
        (false, false) => "warn",
    }
}

/// Console events go to stderr so `--format json` stdout stays parseable.
/// A debug-level JSON log is also written to `~/.launchkey/logs/` when
/// that directory is usable.
fn init_tracing(default_level: &str) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let (file, guard) = match log_directory() {
        Some(log_dir) => {
            let appender = tracing_appender::rolling::daily(&log_dir, "launchkey.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new(
                    "launchkey=debug,launchkey_core=debug,launchkey_signing=debug",
                ));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    guard
}

fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = dirs::home_dir()?.join(".launchkey").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}
