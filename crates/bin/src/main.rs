use std::time::Duration;

use clap::Parser;
use docshim::{ClientConfig, Firestore, get_firestore, initialize_app};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{ClientArgs, Cli, Commands, OutputFormat};
use commands::CommandResult;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("docshim=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match &cli.command {
        // answered locally, no client needed
        Commands::Path(args) => commands::path::run(args, format),
        command => {
            let db = connect(&cli.client)?;
            run(&db, command, format).await
        }
    }
}

async fn run(db: &Firestore, command: &Commands, format: OutputFormat) -> CommandResult {
    match command {
        Commands::Get(args) => commands::read::get(db, args, format).await,
        Commands::List(args) => commands::read::list(db, args, format).await,
        Commands::Exists(args) => commands::read::exists(db, args, format).await,
        Commands::Query(args) => commands::read::query(db, args, format).await,
        Commands::Set(args) => commands::write::set(db, args, format).await,
        Commands::Delete(args) => commands::write::delete(db, args, format).await,
        Commands::Add(args) => commands::write::add(db, args, format).await,
        Commands::Path(args) => commands::path::run(args, format),
    }
}

/// Build the client configuration: config file first, then flags on top.
fn client_config(args: &ClientArgs) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading config file");
            ClientConfig::from_file(path)?
        }
        None => ClientConfig::default(),
    };
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    for (plural, singular) in &args.singulars {
        config.singular_names.insert(plural, singular);
    }
    Ok(config)
}

fn connect(args: &ClientArgs) -> Result<Firestore, Box<dyn std::error::Error>> {
    let app = initialize_app(client_config(args)?);
    Ok(get_firestore(&app)?)
}
