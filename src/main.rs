mod cli;

use imagerank::{config, server, voting::VotingService};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use imagerank_common::VoteDirection;
use std::path::Path;
use std::sync::Arc;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting imagerank server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    let service = Arc::new(VotingService::from_config(&config).await);

    server::start_server(config, service).await
}

async fn list_images(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let service = VotingService::from_config(&config).await;

    let entries = service.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No images found.");
        return Ok(());
    }

    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    for entry in &entries {
        println!("{:>6}  {:<width$}  {}", entry.score, entry.key, entry.url);
    }
    println!("\n{} images", entries.len());

    Ok(())
}

async fn cast_vote(
    config_path: Option<&Path>,
    image_key: &str,
    direction: VoteDirection,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let service = VotingService::from_config(&config).await;

    let score = service.vote(image_key, direction).await?;
    println!("{}: {}", image_key, score);

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "imagerank=trace,tower_http=debug".to_string()
        } else {
            "imagerank=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::List { json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_images(cli.config.as_deref(), json))
        }
        Commands::Vote {
            image_key,
            direction,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(cast_vote(cli.config.as_deref(), &image_key, direction))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("imagerank {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_summary(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            print_summary(&config);
        }
    }

    Ok(())
}

fn print_summary(config: &config::Config) {
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!(
        "  Storage: {:?} (bucket: {})",
        config.storage.backend, config.storage.bucket
    );
    println!(
        "  Scores: {:?} (table: {}, update mode: {:?})",
        config.scores.backend, config.scores.table, config.scores.update_mode
    );
    match config.listing.max_pages {
        Some(max) => println!("  Listing: up to {} pages of {}", max, config.listing.page_size),
        None => println!("  Listing: all pages of {}", config.listing.page_size),
    }
}
