use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aggregator")]
#[command(about = "Merge security and privacy news feeds into a single RSS 2.0 feed")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all sources and write the merged feed
    Run {
        /// Output file path (overrides AGGREGATOR_OUTPUT)
        #[arg(short, long)]
        output: Option<String>,

        /// Maximum number of items in the merged feed
        #[arg(long)]
        max_entries: Option<usize>,

        /// Read the source list from an OPML file instead of the configuration
        #[arg(long)]
        opml: Option<String>,

        /// Print the feed to stdout instead of writing the output file
        #[arg(long)]
        dry_run: bool,
    },

    /// List the configured sources
    Sources,

    /// Export the configured sources to OPML format
    Export {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}
