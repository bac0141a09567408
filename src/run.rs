//! Application run modes: logger init, relay server, single prompt, segment dump, TUI launch.

use std::io::{self, Read};
use std::path::Path;

use crate::cli::Args;
use crate::core;
use crate::core::config::{ClientConfig, RelayConfig};
use crate::core::relay_client::RelayClient;

/// Initialize env_logger. In TUI mode, writes to file to avoid corrupting the display.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));

    if args.is_tui()
        && let Some(path) = core::paths::log_file()
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    let _ = logger.try_init();
}

/// Run the relay server until Ctrl+C. `port` overrides the configured one.
pub async fn run_server(
    mut config: RelayConfig,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = port {
        config.port = port;
    }
    log::info!("{} v{} relay, model {}", core::app::NAME, core::app::VERSION, config.model_id);
    crate::server::serve(config).await?;
    Ok(())
}

/// Read from `path`, or stdin when `path` is `None` or `-`.
fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Print the segments of a message as a JSON array.
pub fn run_segment(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(path)?;
    let segments = core::segment::segment(&raw);
    debug_assert_eq!(core::segment::reconstruct(&segments), raw);
    log::debug!(
        "{} segments, {} code",
        segments.len(),
        segments.iter().filter(|s| s.is_code()).count()
    );
    println!("{}", serde_json::to_string_pretty(&segments)?);
    Ok(())
}

/// The prompt as typed, or `None` when it is only whitespace.
fn non_blank(prompt: String) -> Option<String> {
    (!prompt.trim().is_empty()).then_some(prompt)
}

/// Send one message through the relay and print the reply to stdout.
/// A failed request prints the fallback reply and exits non-zero.
pub async fn run_single_prompt(
    prompt_arg: &str,
    config: &ClientConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = if prompt_arg == "-" {
        read_input(None)?
    } else {
        prompt_arg.to_string()
    };
    let Some(prompt) = non_blank(raw) else {
        eprintln!("Error: empty prompt");
        std::process::exit(1);
    };

    let client = RelayClient::new(&config.api_url);
    match client.send(&prompt).await {
        Ok(reply) => {
            println!("{}", reply);
            Ok(())
        }
        Err(e) => {
            log::warn!("chat request failed: {}", e);
            eprintln!("{}", core::thread::REPLY_UNAVAILABLE);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Launch the TUI in a blocking thread. Returns on panic or IO error.
pub async fn launch_tui(config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    core::presentation::init(config.theme);
    let join_result: Result<io::Result<()>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || crate::tui::run(config)).await;

    match join_result {
        Ok(io_result) => io_result?,
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                eprintln!("TUI panic: {}", msg);
            }
            return Err(
                Box::new(io::Error::other("TUI thread panicked")) as Box<dyn std::error::Error>
            );
        }
    }
    Ok(())
}
