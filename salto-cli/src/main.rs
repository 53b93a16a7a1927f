mod announce;
mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use salto_core::config::EventConfig;

#[derive(Parser)]
#[command(name = "salto")]
#[command(about = "Program, speaker reveal and calendar export for the Salto No Hype event")]
struct Cli {
    /// Path to the event program file (defaults to ./event.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the session timeline, optionally filtered by day
    Schedule {
        /// Only show sessions for this day (sexta, sabado, domingo)
        #[arg(short, long)]
        day: Option<String>,
    },
    /// Show the reveal status of every speaker slot
    Speakers {
        /// Override the reveal lead time (e.g. "60m", "2h")
        #[arg(long)]
        lead: Option<String>,
    },
    /// Live countdown until each speaker reveal (Ctrl-C to stop)
    Watch {
        /// Override the reveal lead time (e.g. "60m", "2h")
        #[arg(long)]
        lead: Option<String>,

        /// Override the image preload lead time (e.g. "2h")
        #[arg(long)]
        preload_lead: Option<String>,
    },
    /// Write .ics calendar files for one session or the whole program
    Export {
        /// Session id (omit to choose interactively)
        session: Option<String>,

        /// Export every session into a single file
        #[arg(long)]
        all: bool,

        /// Directory to write into (defaults to the working directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the Google Calendar link for a session
    Link {
        /// Session id (omit to choose interactively)
        session: Option<String>,

        /// Open the link in the default browser
        #[arg(long)]
        open: bool,
    },
    /// Venue, dates and ticket information
    Info,
    /// Frequently asked questions
    Faq,
    /// Merch listing
    Merch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = EventConfig::resolve_path(cli.config)?;
    let event = EventConfig::load(&path)
        .with_context(|| format!("Failed to load event program from {}", path.display()))?;

    match cli.command {
        Commands::Schedule { day } => commands::schedule::run(&event, day.as_deref()),
        Commands::Speakers { lead } => commands::speakers::run(&event, lead.as_deref()),
        Commands::Watch { lead, preload_lead } => {
            let assets_dir = assets_dir_for(&path);
            commands::watch::run(event, assets_dir, lead.as_deref(), preload_lead.as_deref()).await
        }
        Commands::Export {
            session,
            all,
            output,
        } => commands::export::run(&event, session.as_deref(), all, output),
        Commands::Link { session, open } => commands::link::run(&event, session.as_deref(), open),
        Commands::Info => commands::info::run(&event),
        Commands::Faq => commands::faq::run(&event),
        Commands::Merch => commands::merch::run(&event),
    }
}

/// Images referenced by the program live next to the event file.
fn assets_dir_for(config_path: &std::path::Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.join("assets"))
        .unwrap_or_else(|| PathBuf::from("assets"))
}
