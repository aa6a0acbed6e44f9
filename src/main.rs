use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aggregator::cli::{Cli, Commands};
use aggregator::config::Config;
use aggregator::domain::FeedDocument;
use aggregator::errors::AggregatorResult;
use aggregator::output::{render, write_atomic};
use aggregator::services::{aggregate, source_list, FetchService};
use aggregator::sources::HttpFeedFetcher;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> AggregatorResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    match cli.command {
        Commands::Run {
            output,
            max_entries,
            opml,
            dry_run,
        } => {
            let mut config = match opml {
                Some(path) => {
                    let content = fs::read_to_string(&path)?;
                    config.with_sources(source_list::import_opml(&content)?)?
                }
                None => config,
            };
            if let Some(output) = output {
                config.output_path = PathBuf::from(output);
            }
            if let Some(max_entries) = max_entries {
                config.max_entries = max_entries;
            }
            cmd_run(&config, dry_run)
        }
        Commands::Sources => cmd_sources(&config),
        Commands::Export { output } => cmd_export(&config, output),
    }
}

fn cmd_run(config: &Config, dry_run: bool) -> AggregatorResult<()> {
    let fetcher = HttpFeedFetcher::from_config(config)?;
    let fetch_service = FetchService::new(fetcher, config.request_delay);

    println!("Starting RSS aggregation...");

    let result = fetch_service.collect(&config.sources);

    println!(
        "\nCollected {} entries from {} sources ({} failed)",
        result.entries.len(),
        result.fetched.len(),
        result.failed.len()
    );

    let items = aggregate(result.entries, config.max_entries);
    let document = FeedDocument::new(config.channel.clone(), items);
    let xml = render(&document)?;

    if dry_run {
        io::stdout().write_all(&xml)?;
        io::stdout().flush()?;
        return Ok(());
    }

    write_atomic(&config.output_path, &xml)?;
    println!(
        "RSS feed written: {} ({} items)",
        config.output_path.display(),
        document.items.len()
    );

    Ok(())
}

fn cmd_sources(config: &Config) -> AggregatorResult<()> {
    if config.sources.is_empty() {
        println!("No sources configured.");
        return Ok(());
    }

    println!("Configured sources:\n");
    for source in &config.sources {
        println!("  {}", source);
    }

    Ok(())
}

fn cmd_export(config: &Config, output: Option<String>) -> AggregatorResult<()> {
    let opml = source_list::export_opml(&config.sources)?;

    match output {
        Some(path) => {
            fs::write(&path, &opml)?;
            println!("Exported sources to {}", path);
        }
        None => {
            println!("{}", opml);
        }
    }

    Ok(())
}
