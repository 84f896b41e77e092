use std::process::ExitCode;

use answerdesk_cli::Cli;
use answerdesk_cli::run_main;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    run_main(Cli::parse()).await
}
