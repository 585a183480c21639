#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the AMDb scraper.

mod pipeline;

use amdb_graphql::{AmdbService, DEFAULT_ENDPOINT, GraphqlClient, GraphqlConfig};
use amdb_scraper::{DEFAULT_BASE_URL, ScrapeConfig, ScrapeSession};
use clap::{Parser, Subcommand};

const ENDPOINT_ENV: &str = "AMDB_GRAPHQL_URL";
const BASE_URL_ENV: &str = "AMDB_BASE_URL";

#[derive(Parser)]
#[command(name = "amdb", about = "Scrapes movie-database pages into the AMDb graph")]
struct Cli {
    /// GraphQL endpoint to write to (overrides `AMDB_GRAPHQL_URL`)
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Site root to scrape (overrides `AMDB_BASE_URL`)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Milliseconds to wait after each page fetch
    #[arg(long, global = true)]
    delay_ms: Option<u64>,
    /// Print the scraped records as JSON instead of writing them
    #[arg(long, global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a title with its crew and cast, then write them and their relations
    Title {
        /// Free-text search, e.g. "The Dark Knight"
        query: String,
    },
    /// Scrape a person with their awards, then write them
    Person {
        /// Free-text search, e.g. "Christian Bale"
        query: String,
    },
}

/// Flag, then environment variable, then built-in default.
fn resolve(flag: Option<String>, env_var: &str, default: &str) -> String {
    flag.or_else(|| std::env::var(env_var).ok())
        .unwrap_or_else(|| default.to_owned())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = amdb_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut scrape_config = ScrapeConfig::new(&resolve(cli.base_url, BASE_URL_ENV, DEFAULT_BASE_URL));
    if let Some(ms) = cli.delay_ms {
        scrape_config = scrape_config.with_delay_ms(ms);
    }
    let mut session = ScrapeSession::new(&scrape_config)?;

    let service = if cli.dry_run {
        log::info!("Dry run: records will be printed, not written");
        None
    } else {
        let endpoint = resolve(cli.endpoint, ENDPOINT_ENV, DEFAULT_ENDPOINT);
        log::info!("Writing to {endpoint}");
        Some(AmdbService::new(GraphqlClient::new(GraphqlConfig::new(
            &endpoint,
        ))?))
    };

    match cli.command {
        Commands::Title { query } => {
            let spinner = amdb_cli_utils::spinner(&multi, &format!("Scraping title '{query}'"));
            let scrape = pipeline::scrape_title(&mut session, &query, &multi);
            spinner.finish_and_clear();
            let scrape = scrape?;

            match &service {
                Some(service) => pipeline::write_title(service, &scrape),
                None => println!("{}", serde_json::to_string_pretty(&scrape)?),
            }
        }
        Commands::Person { query } => {
            let spinner = amdb_cli_utils::spinner(&multi, &format!("Scraping person '{query}'"));
            let scrape = pipeline::scrape_person(&mut session, &query);
            spinner.finish_and_clear();
            let scrape = scrape?;

            match &service {
                Some(service) => pipeline::write_person(service, &scrape),
                None => println!("{}", serde_json::to_string_pretty(&scrape)?),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_title_command_with_global_flags() {
        let cli = Cli::try_parse_from([
            "amdb",
            "--dry-run",
            "title",
            "The Dark Knight",
            "--delay-ms",
            "250",
        ])
        .unwrap();

        assert!(cli.dry_run);
        assert_eq!(cli.delay_ms, Some(250));
        assert!(matches!(cli.command, Commands::Title { query } if query == "The Dark Knight"));
    }

    #[test]
    fn parses_person_command_with_endpoint() {
        let cli = Cli::try_parse_from([
            "amdb",
            "--endpoint",
            "http://graph.test/gql",
            "person",
            "Christian Bale",
        ])
        .unwrap();

        assert!(!cli.dry_run);
        assert_eq!(cli.endpoint.as_deref(), Some("http://graph.test/gql"));
        assert!(matches!(cli.command, Commands::Person { query } if query == "Christian Bale"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["amdb", "--dry-run"]).is_err());
    }

    #[test]
    fn flag_wins_over_default() {
        assert_eq!(
            resolve(Some("http://a.test".to_string()), "AMDB_TEST_UNSET", "http://b.test"),
            "http://a.test"
        );
        assert_eq!(
            resolve(None, "AMDB_TEST_UNSET", "http://b.test"),
            "http://b.test"
        );
    }
}
