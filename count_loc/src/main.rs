// src/main.rs
use clap::Parser;
use std::process::ExitCode;

use count_loc::{Args, logging, run};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
