use std::process::ExitCode;

use clap::Parser;
use planner_client::frameworks::runtime::{self, Cli, RuntimeError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    runtime::init_runtime();

    match runtime::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        // Client failures were already logged and shown by the error handler.
        Err(RuntimeError::Client(_)) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}
