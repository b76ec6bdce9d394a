use std::process::ExitCode;

use clap::Parser;
use deploy::{cli, logic};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logic::run(cli::Command::parse()).await
}
