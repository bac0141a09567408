//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  helpai                        Launch the chat TUI (relay at HELPAI_API_URL)
  helpai serve                  Run the relay server on PORT (default 5000)
  helpai serve --port 8080      Run the relay server on another port
  helpai -p \"explain X\"         Send one message through the relay, print the reply
  helpai -p -                   Read the message from stdin
  helpai segment reply.md       Print the segments of a message as JSON
  helpai completions bash       Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Chat assistant: relay server and terminal client",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Send a single message then exit (without opening the TUI)
    #[arg(
        short = 'p',
        long,
        help = "Send one message through the relay and print the reply (use '-' to read from stdin)"
    )]
    pub prompt: Option<String>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Split a message into text and code segments, printed as JSON
    Segment {
        /// File to read ('-' or omitted for stdin)
        input: Option<PathBuf>,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    /// The server logs its startup lines at info, so `serve` defaults one notch higher.
    pub fn log_level(&self) -> &'static str {
        let base = u8::from(matches!(self.command, Some(Commands::Serve { .. })));
        if self.quiet {
            "error"
        } else {
            match self.verbose.saturating_add(base) {
                0 => "warn",
                1 => "info",
                _ => "debug",
            }
        }
    }

    /// True when the TUI will own the terminal, so logs must go to a file.
    pub fn is_tui(&self) -> bool {
        self.command.is_none() && self.prompt.is_none()
    }
}
