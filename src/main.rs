use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::debug;

mod client;
mod cmd;
mod config;
mod error;
mod utils;

use cmd::format::{StyleOptions, error_line, hint_line};
use cmd::{Operation, OperationFlags, Options};
use config::SettingsArgs;
use error::UsageError;

/// hipchat - command-line front-end for the HipChat v2 REST API
///
/// Exactly one operation flag per invocation; each operation names the
/// parameter flags it needs in its help line.
///
/// Auth / env:
///   --auth-token      API token (or HIPCHAT_TOKEN, or auth_token in --config)
///   --endpoint        API base URL (or HIPCHAT_ENDPOINT; default https://api.hipchat.com/v2/)
///   HIPCHAT_LOG       tracing filter, overrides -v / -q
///
/// Examples:
///   hipchat --rooms
///   hipchat --create_room --room "Ops" --privacy private
///   hipchat --notify_room --room Ops --msg "deploy done" --colour green --notify
///   hipchat --create_webhook --room Ops --url https://example.com/hook --event room_message
///   hipchat --emoticons --type global
#[derive(Parser, Debug)]
#[command(
    name = "hipchat",
    version,
    about = "Command-line front-end for the HipChat v2 REST API"
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long)]
    quiet: bool,

    /// API token (falls back to HIPCHAT_TOKEN)
    #[arg(long = "auth-token", value_name = "TOKEN")]
    auth_token: Option<String>,

    /// API base URL (falls back to HIPCHAT_ENDPOINT)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Request timeout in seconds (default 10)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// JSON or YAML file with auth_token / endpoint / timeout_secs
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(flatten)]
    operation: OperationFlags,

    #[command(flatten)]
    options: Options,
}

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();

    // Help wins over everything, including flags clap would reject first.
    if let Some(flag) = help_flag(&args) {
        let mut cmd = Cli::command();
        let shown = if flag == "--help" {
            cmd.print_long_help()
        } else {
            cmd.print_help()
        };
        return match shown {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    let cli = Cli::parse_from(args);

    utils::init_logging(utils::derive_level(cli.verbose, cli.quiet));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let style = StyleOptions::detect();
            eprintln!("{}", error_line(format!("{e:#}"), &style));
            if e.downcast_ref::<UsageError>().is_some() {
                eprintln!("{}", hint_line("Run `hipchat --help` for usage.", &style));
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

/// `-h` or `--help` anywhere before a `--` terminator.
fn help_flag(args: &[OsString]) -> Option<&'static str> {
    args.iter()
        .skip(1)
        .map(|a| a.to_str())
        .take_while(|a| *a != Some("--"))
        .find_map(|a| match a {
            Some("-h") => Some("-h"),
            Some("--help") => Some("--help"),
            _ => None,
        })
}

fn run(cli: Cli) -> Result<()> {
    let settings = config::resolve(
        &SettingsArgs {
            auth_token: cli.auth_token,
            endpoint: cli.endpoint,
            timeout_secs: cli.timeout,
            config: cli.config,
        },
        |key| std::env::var(key).ok(),
    )?;
    debug!(?settings, "settings resolved");

    // clap's operation group guarantees exactly one flag
    let kind = cli
        .operation
        .selected()
        .ok_or_else(|| anyhow::anyhow!("exactly one operation flag is required"))?;
    let op = Operation::from_options(kind, &cli.options)?;

    cmd::execute(&op, &settings)
}
