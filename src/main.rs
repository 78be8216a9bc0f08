use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use market_digest::{
    app::{
        fetcher::DEFAULT_LOOKBACK,
        ranker::DEFAULT_TOP_N,
        report::movers_table,
        utils::format_thousands,
    },
    config::Config,
    models::Universe,
    server,
    services::MarketService,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Top gainers and losers of a universe over the last two sessions
    Movers {
        #[arg(long, default_value_t = Universe::Sp500)]
        universe: Universe,

        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,

        /// Maximum number of requests in flight
        #[arg(long, default_value_t = 20)]
        concurrency: usize,

        /// Trailing observations requested per symbol
        #[arg(long, default_value_t = DEFAULT_LOOKBACK)]
        lookback: usize,
    },
    /// One-line summary per digest index
    Digest,
    /// Latest and previous close of the major indexes as JSON
    Indexes,
    /// Crypto spot prices and 24h change as JSON
    Crypto,
    /// Raw trailing closes for the given symbols
    History {
        #[arg(required = true)]
        symbols: Vec<String>,

        #[arg(long, default_value_t = DEFAULT_LOOKBACK)]
        window: usize,
    },
    /// Serve the JSON endpoints over HTTP
    Serve {
        #[arg(long, env = "MARKET_DIGEST_ADDR", default_value = "127.0.0.1:5004")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service = MarketService::from_config(cli.config)?;

    match cli.command {
        Command::Movers {
            universe,
            top_n,
            concurrency,
            lookback,
        } => {
            let report = service
                .top_movers(universe, top_n, concurrency, lookback)
                .await?;
            let ranking = report.ranking();

            println!(
                "\n--- Top {} {} Gainers (based on last two trading days) ---",
                top_n, universe
            );
            if ranking.gainers().is_empty() {
                println!("No gainers found.");
            } else {
                println!("{}", movers_table(ranking.gainers()));
            }

            println!(
                "\n--- Top {} {} Losers (based on last two trading days) ---",
                top_n, universe
            );
            if ranking.losers().is_empty() {
                println!("No losers found.");
            } else {
                println!("{}", movers_table(ranking.losers()));
            }

            println!(
                "\nFetched {}/{} symbols. Total execution time: {:.2} seconds.",
                report.fetched(),
                report.requested(),
                report.elapsed().as_secs_f64()
            );
        }
        Command::Digest => println!("{}", service.market_digest().await?),
        Command::Indexes => {
            let snapshots = service.index_data().await?;
            println!("{}", serde_json::to_string_pretty(&snapshots)?);
        }
        Command::Crypto => {
            let prices = service.crypto_prices().await?;
            println!("{}", serde_json::to_string_pretty(&prices)?);
        }
        Command::History { symbols, window } => {
            for (symbol, history) in service.history(&symbols, window).await? {
                match history {
                    Ok(points) if points.is_empty() => println!("{}: no data available", symbol),
                    Ok(points) => {
                        println!("{}", symbol);
                        for point in points {
                            println!(
                                "  {}  {:>12}",
                                point.timestamp().format("%Y-%m-%d"),
                                format_thousands(*point.close(), 2)
                            );
                        }
                    }
                    Err(err) => println!("{}: {}", symbol, err),
                }
            }
        }
        Command::Serve { addr } => server::serve(Arc::new(service), addr).await?,
    }

    Ok(())
}
