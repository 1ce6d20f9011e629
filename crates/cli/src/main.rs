use anyhow::Context;
use clap::{Parser, Subcommand};

use libris_kernel::settings::Settings;

#[derive(Parser)]
#[command(name = "libris", about = "Library catalog and lending backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Print the effective configuration and exit
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => libris_app::run().await,
        Command::Config => {
            let settings = Settings::load().with_context(|| "failed to load libris settings")?;
            println!("{settings:#?}");
            Ok(())
        }
    }
}
