// src/bin/loc_bot.rs
use anyhow::{Context as _, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use count_loc::bot::{Handler, TelegramApi, run_polling};
use count_loc::{BotConfig, GitHubClient, load_config, logging};

/// Telegram bot that counts non-empty lines of code in GitHub repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file [default: nearest .loccount.toml]
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn run(args: &Args) -> Result<()> {
    let cwd = env::current_dir().context("Failed to read the current directory")?;
    let config = load_config(args.config.as_deref(), &cwd)?;
    let bot_config = BotConfig::from_settings(&config.bot, |name| env::var(name).ok())?;

    let client = GitHubClient::from_env(&config.github)?;
    let handler = Handler::new(&client, config.bot_filters(), bot_config.default_top);
    let api = TelegramApi::new(&bot_config)?;

    tracing::info!(default_top = bot_config.default_top.get(), "bot started");
    run_polling(&api, &handler).context("Telegram rejected the bot token")
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
