/*!
Command dispatch.

Layout:
  src/cmd/
    mod.rs        (this file)
    options.rs    (OperationFlags + Options: the parsed option table)
    choices.rs    (WebhookEvent / EmoticonType enumerations)
    operation.rs  (OperationKind, Operation, request assembly)
    run.rs        (execute: runtime + single request + output)
    format.rs     (stdout JSON rendering, stderr diagnostics)

Conventions:
  - Validation happens in `Operation::from_options`, before any client or
    runtime exists.
  - `run::execute` is the only function that touches the network.
*/

pub mod choices;
pub mod format;
pub mod operation;
pub mod options;
pub mod run;

pub use operation::{Operation, OperationKind};
pub use options::{OperationFlags, Options};
pub use run::execute;
