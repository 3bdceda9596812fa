use anyhow::{Context, Result};
use clap::Parser;
use giphy_adapter::config::ProcessEnv;
use giphy_adapter::{AdapterConfig, GifService, Rating, SearchOptions};
use serde::Serialize;
use std::process::ExitCode;
use std::time::Duration;

/// giphy - search Giphy from the command line
///
/// The API key is read from --api-key or the GIPHY_API_KEY environment variable.
/// Other GIPHY_* variables (GIPHY_API_URL, GIPHY_LIMIT, GIPHY_RATING, GIPHY_LANG,
/// GIPHY_TIMEOUT_SECS, GIPHY_RETRY_ATTEMPTS, GIPHY_RETRY_DELAY_MS) tune the client.
///
/// Examples:
///   giphy search "happy cat" --limit 5
///   giphy message "I'm excited!"
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Giphy API key
    #[arg(
        long = "api-key",
        env = "GIPHY_API_KEY",
        value_name = "KEY",
        hide_env_values = true,
        global = true
    )]
    api_key: Option<String>,

    /// Giphy API base URL (defaults to https://api.giphy.com/v1/gifs)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<f64>,

    /// Attempts per request, including the first
    #[arg(long, value_name = "N", global = true)]
    retries: Option<usize>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Search for GIFs
    Search(SearchArgs),

    /// Pick one GIF for a chat message
    Message(MessageArgs),

    /// Check connectivity to the Giphy API
    Health,
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Search text
    #[arg(value_name = "QUERY")]
    query: String,

    /// Number of results (1-50)
    #[arg(long)]
    limit: Option<u32>,

    /// Result offset
    #[arg(long)]
    offset: Option<u32>,

    /// Content rating: g, pg, pg-13 or r
    #[arg(long)]
    rating: Option<Rating>,

    /// Language code
    #[arg(long)]
    lang: Option<String>,
}

#[derive(clap::Args, Debug)]
struct MessageArgs {
    /// Free-text message to find a GIF for
    #[arg(value_name = "TEXT")]
    text: String,
}

impl Cli {
    fn config(&self) -> Result<AdapterConfig> {
        let mut config = AdapterConfig::service_defaults().overlay_env(&ProcessEnv)?;
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url.as_str());
        }
        if let Some(secs) = self.timeout {
            let timeout = Duration::try_from_secs_f64(secs).context("Invalid --timeout")?;
            config = config.with_timeout(timeout);
        }
        if let Some(retries) = self.retries {
            config = config.with_retry_attempts(retries);
        }
        Ok(config)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let api_key = cli
        .api_key
        .clone()
        .context("A Giphy API key is required (--api-key or GIPHY_API_KEY)")?;
    let service = GifService::with_config(api_key, cli.config()?)?;

    let found = match cli.command {
        Commands::Search(args) => {
            let options = SearchOptions {
                limit: args.limit,
                offset: args.offset,
                rating: args.rating,
                lang: args.lang,
            };
            match service.search_gifs(&args.query, &options).await {
                Some(results) => print_json(&results).map(|_| true)?,
                None => {
                    eprintln!("No GIFs found");
                    false
                }
            }
        }
        Commands::Message(args) => {
            match service
                .get_gif_for_message(&args.text, &SearchOptions::default())
                .await
            {
                Some(gif) => print_json(&gif).map(|_| true)?,
                None => {
                    eprintln!("No GIF found");
                    false
                }
            }
        }
        Commands::Health => {
            let health = service.health_check().await;
            print_json(&health)?;
            health.adapter_healthy
        }
    };

    service.close().await;
    Ok(if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
