mod cli;
mod main_lib;
mod prompt;
mod viewer;

use clap::Parser;
use std::process::ExitCode;

use cli::Args;
use main_lib::{init_tracing, run};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_format());

    match run(&args).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
