mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use showscout_lib::{Config, ShowClient};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "showscout")]
#[command(about = "Discover TV shows: trending, popular, search, and details")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shows trending today or this week
    Trending(commands::listings::TrendingArgs),
    /// Most popular shows
    Popular(commands::listings::ListingArgs),
    /// Highest rated shows
    TopRated(commands::listings::ListingArgs),
    /// Shows with an episode airing in the next seven days
    OnTheAir(commands::listings::ListingArgs),
    /// Search shows by name
    Search(commands::search::SearchArgs),
    /// Filtered listing by genre, network, year, rating, or provider
    Discover(Box<commands::discover::DiscoverArgs>),
    /// Details for one show
    Show(commands::show::ShowArgs),
    /// Cast and crew of a show
    Credits(commands::show::ShowArgs),
    /// Shows similar to a show
    Similar(commands::show::RelatedArgs),
    /// Recommendations based on a show
    Recommendations(commands::show::RelatedArgs),
    /// Where a show can be streamed, rented, or bought
    Providers(commands::show::ProvidersArgs),
    /// List TV genres
    Genres,
    /// Details for a network
    Network(commands::genres::NetworkArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("showscout=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let config = Config::from_env();
    let client = ShowClient::new(&config)?;

    match &cli.command {
        Commands::Trending(args) => commands::listings::run_trending(args, &client, &format).await?,
        Commands::Popular(args) => {
            commands::listings::run(commands::listings::Listing::Popular, args, &client, &format)
                .await?
        }
        Commands::TopRated(args) => {
            commands::listings::run(commands::listings::Listing::TopRated, args, &client, &format)
                .await?
        }
        Commands::OnTheAir(args) => {
            commands::listings::run(commands::listings::Listing::OnTheAir, args, &client, &format)
                .await?
        }
        Commands::Search(args) => commands::search::run(args, &client, &format).await?,
        Commands::Discover(args) => commands::discover::run(args.as_ref(), &client, &format).await?,
        Commands::Show(args) => commands::show::run_details(args, &client, &format).await?,
        Commands::Credits(args) => commands::show::run_credits(args, &client, &format).await?,
        Commands::Similar(args) => commands::show::run_similar(args, &client, &format).await?,
        Commands::Recommendations(args) => {
            commands::show::run_recommendations(args, &client, &format).await?
        }
        Commands::Providers(args) => commands::show::run_providers(args, &client, &format).await?,
        Commands::Genres => commands::genres::run_genres(&client, &format).await?,
        Commands::Network(args) => commands::genres::run_network(args, &client, &format).await?,
    }

    Ok(())
}
