use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// carelead - contact submissions for the training and insurance site
#[derive(Parser)]
#[command(name = "carelead")]
#[command(about = "Contact form backend for the carelead website", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Inspect stored contact submissions
    Contact {
        #[command(subcommand)]
        command: ContactCommands,
    },
}

#[derive(Subcommand)]
enum ContactCommands {
    /// List submissions from the local store, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = carelead_contact::DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Case-insensitive status filter (New, sent, received)
        #[arg(long)]
        status: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = carelead::Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    carelead::observability::init_observability(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Contact { command } => match command {
            ContactCommands::List {
                page,
                page_size,
                status,
            } => cli::contact::list(config, page, page_size, status).await,
        },
    }
}
