/*!
`run.rs`

Executes one validated `Operation` against the HipChat API.

Steps:
  1. Build the `ApiRequest` (may read the upload file; usage error if not).
  2. Create a current-thread Tokio runtime (main is sync).
  3. Send the single request through `HipChatClient`.
  4. Print the result as pretty JSON on stdout. `send_message` echoes the
     message first; `room_exists` prints `true` / `false`.

Errors from step 1 are `UsageError`s; everything after is an `ApiError`.
*/

use std::io::Write;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::client::{ApiRequest, HipChatClient};
use crate::cmd::format::render_result;
use crate::cmd::operation::Operation;
use crate::config::Settings;
use crate::error::ApiError;

/// What an operation produced: an optional echoed line plus the result.
#[derive(Debug, PartialEq)]
pub struct Outcome {
    pub echo: Option<String>,
    pub result: Value,
}

/// Entry point: build, send, print.
pub fn execute(op: &Operation, settings: &Settings) -> Result<()> {
    let request = op.to_request()?;
    let client = HipChatClient::new(settings)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;
    let outcome = rt.block_on(dispatch(&client, op, &request))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_outcome(&mut out, &outcome).context("failed to write output")?;
    Ok(())
}

/// Send `request` for `op` and shape the outcome.
pub async fn dispatch(
    client: &HipChatClient,
    op: &Operation,
    request: &ApiRequest,
) -> Result<Outcome, ApiError> {
    debug!(operation = op.kind().flag(), "dispatching");
    match op {
        Operation::RoomExists { .. } => {
            let found = client.exists(request).await?;
            Ok(Outcome {
                echo: None,
                result: Value::Bool(found),
            })
        }
        Operation::SendMessage { message, .. } => {
            let result = client.execute(request).await?;
            Ok(Outcome {
                echo: Some(message.clone()),
                result,
            })
        }
        _ => Ok(Outcome {
            echo: None,
            result: client.execute(request).await?,
        }),
    }
}

pub fn write_outcome(out: &mut impl Write, outcome: &Outcome) -> std::io::Result<()> {
    if let Some(echo) = &outcome.echo {
        writeln!(out, "{echo}")?;
    }
    writeln!(out, "{}", render_result(&outcome.result))?;
    out.flush()
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                       */
/* -------------------------------------------------------------------------- */
