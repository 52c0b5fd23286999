use clap::{Parser, Subcommand};
use imagerank_common::VoteDirection;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imagerank")]
#[command(author, version, about = "Rank images in a bucket by popular vote")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Start {
        /// Host to bind to (defaults to the config file value)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the config file value)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print every image with its score
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cast a single vote and print the new score
    Vote {
        /// Object key of the image
        #[arg(required = true)]
        image_key: String,

        /// Vote direction: up or down
        #[arg(value_parser = parse_direction)]
        direction: VoteDirection,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn parse_direction(s: &str) -> Result<VoteDirection, String> {
    s.parse().map_err(|e: imagerank_common::Error| e.to_string())
}
