//! The `formulator` binary.

use std::process::ExitCode;

use formulator::cli::{self, build_cli, CliOptions};

#[tokio::main]
async fn main() -> ExitCode {
    let options = CliOptions::from_matches(&build_cli().get_matches());

    match cli::run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("formulator: {e}");
            ExitCode::FAILURE
        }
    }
}
