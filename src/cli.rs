use crate::types::CardType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deal-discovery")]
#[command(about = "Route marketing questions and rank advertising deals", long_about = None)]
pub struct Cli {
    /// Extra configuration file layered over the global and local ones
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the MCP tools over stdio (default)
    Serve,
    /// Run one search against the configured API and print the outcome
    Search {
        query: String,
        #[arg(short = 'c', long = "card")]
        cards: Vec<CardType>,
    },
    /// Print the routing decision for a query without calling the API
    Classify {
        query: String,
        #[arg(short = 'c', long = "card")]
        cards: Vec<CardType>,
    },
}
