mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::carriers::handle_carriers;
use commands::track::{handle_track, TrackArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Convenience-store parcel tracking")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a parcel by tracking number.
    Track(TrackArgs),
    /// List supported platforms and their tracker tokens.
    Carriers,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Track(args) => handle_track(&args),
        Command::Carriers => handle_carriers(),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
