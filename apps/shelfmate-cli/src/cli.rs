use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Suggest books similar to a title from a CSV catalog.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "shelfmate", version, about)]
pub struct Args {
    /// Catalog CSV with `title` and `authors` columns
    #[arg(long, global = true, env = "SHELFMATE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Keep at most this many books after cleaning
    #[arg(long, global = true, conflicts_with = "all")]
    pub max_items: Option<usize>,

    /// Use the whole catalog, no cap
    #[arg(long, global = true)]
    pub all: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show sample titles and prompt for titles until /quit (default)
    Interactive,

    /// Recommend books similar to one title and exit
    Query {
        /// Exact, case-sensitive catalog title
        title: String,

        /// Number of recommendations
        #[arg(short, long)]
        k: Option<usize>,

        /// Print similarity scores next to titles
        #[arg(long)]
        scores: bool,

        /// Print results as JSON
        #[arg(long, conflicts_with = "scores")]
        json: bool,
    },

    /// Print a random sample of catalog titles
    Sample {
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}
