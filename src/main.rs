//! # helpai - chat assistant
//!
//! One binary, two halves:
//! - `helpai serve` runs the relay server that forwards chat messages to the model API.
//! - `helpai` opens the terminal chat client, which talks to the relay.
//!
//! `-p` sends a single message through the relay and `segment` prints how a message
//! splits into text and code blocks.

mod cli;
mod core;
mod run;
mod server;
mod tui;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands};

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    match &args.command {
        Some(Commands::Serve { port }) => {
            let config = core::config::load_relay().unwrap_or_else(|e| fail(e));
            return run::run_server(config, *port).await;
        }
        Some(Commands::Segment { input }) => return run::run_segment(input.as_deref()),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Args::command();
            cli::generate(*shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
            return Ok(());
        }
        None => {}
    }

    let config = core::config::load_client().unwrap_or_else(|e| fail(e));

    if let Some(prompt) = &args.prompt {
        return run::run_single_prompt(prompt, &config).await;
    }

    run::launch_tui(config).await
}
