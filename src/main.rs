use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ember::client::HnClient;
use ember::config::Config;
use ember::preview::PreviewFetcher;
use ember::server::ProxyServer;

#[derive(Parser)]
#[command(
    name = "ember",
    version,
    about = "Hacker News aggregation proxy with link previews",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP proxy server
    Serve {
        /// Bind address, e.g. 0.0.0.0:8080
        #[arg(short, long)]
        bind: Option<String>,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Print the current top stories to stdout
    Top {
        /// Number of stories to fetch
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Print the Open Graph preview for a URL
    Preview {
        /// URL to scrape
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    match cli.command {
        Commands::Serve { bind, config } => {
            let mut config = match config {
                Some(path) => Config::from_file(std::path::Path::new(&path))?,
                None => Config::from_env()?,
            };
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }

            tracing::info!(bind = %config.server.bind_address, "Starting serve command");
            serve(config).await?;
        }

        Commands::Top { limit } => {
            tracing::info!(limit = %limit, "Starting top command");
            top(limit).await?;
        }

        Commands::Preview { url } => {
            tracing::info!(url = %url, "Starting preview command");
            preview(url).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("ember=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("ember=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

async fn serve(config: Config) -> Result<()> {
    let server = ProxyServer::new(config)?;

    server
        .start_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

async fn top(limit: usize) -> Result<()> {
    let mut config = Config::from_env()?;
    config.upstream.top_stories_limit = limit;

    let client = HnClient::new(&config.upstream)?;
    let stories = client.fetch_top_stories().await?;

    for story in stories {
        println!(
            "{:>5}  {}  ({})",
            story.score,
            story.title,
            story.url.as_deref().unwrap_or("self-post")
        );
    }

    Ok(())
}

async fn preview(url: String) -> Result<()> {
    let config = Config::from_env()?;
    let fetcher = PreviewFetcher::new(&config.preview)?;

    let data = fetcher.fetch_preview(&url).await?;
    println!("{}", serde_json::to_string_pretty(&data)?);

    Ok(())
}
