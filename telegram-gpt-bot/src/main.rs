//! Binary for the Telegram GPT bot.

use anyhow::Result;
use clap::Parser;
use telegram_gpt_bot::{cli::load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            bot_core::init_tracing(&config.log_file)?;
            run_bot(config).await
        }
    }
}
