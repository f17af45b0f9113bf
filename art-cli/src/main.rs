//! # Emoji Art
//!
//! Command-line host for Emoji Art documents.

use art_cli::{ArtConfig, CliArgs, Command, Workspace};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing on stderr, keeping stdout for command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,art_core=debug,art_cli=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // Use JSON format when requested (RUST_LOG_FORMAT=json)
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Parse CLI arguments
    let mut args = CliArgs::parse();
    let command = args.command.take().unwrap_or(Command::Show);
    let config = ArtConfig::from(args);

    tracing::info!(
        "Data directory {} (palette store \"{}\")",
        config.data_dir.display(),
        config.store_name
    );

    let mut workspace = Workspace::open(&config)?;
    let stdout = std::io::stdout();
    workspace.execute(&command, &mut stdout.lock())?;

    tracing::debug!("Command finished");
    Ok(())
}
