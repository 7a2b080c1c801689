//! Utilities: logging setup.
//!
//! Key items:
//!   derive_level  (-v / -q -> tracing directive)
//!   init_logging  (stderr subscriber, HIPCHAT_LOG overrides)

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the verbosity flags.
pub const LOG_ENV: &str = "HIPCHAT_LOG";

/// Map `-v` count and `-q` to a tracing directive.
pub fn derive_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries only
/// command output. Safe to call more than once.
pub fn init_logging(directive: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(directive));
    let use_ansi = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(use_ansi)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
