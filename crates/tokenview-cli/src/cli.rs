use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tokenview",
    about = "tokenview - paginated token, holder and balance queries over a BRC-20 ledger",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP service over the in-memory ledger store
    Serve(ServeArgs),
    /// Load and validate a configuration file
    CheckConfig(CheckConfigArgs),
    /// Run one query against a seeded store and print the JSON result
    Query(QueryArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Overrides server.bind_addr
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Overrides store.seed_path
    #[arg(long)]
    pub seed: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckConfigArgs {
    #[arg(short, long)]
    pub config: PathBuf,
}

#[derive(Args)]
pub struct QueryArgs {
    #[command(subcommand)]
    pub view: QueryView,
    /// JSON ledger fixture to query
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,
    /// Configuration file (pagination bounds, seed path)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum QueryView {
    /// List deployed tokens
    Tokens {
        #[arg(long = "ticker")]
        tickers: Vec<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a token with its supply
    Token { ticker: String },
    /// Rank holders of a token
    Holders {
        ticker: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// List balances of an address
    Balances {
        address: String,
        #[arg(long = "ticker")]
        tickers: Vec<String>,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Args, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub limit: Option<i64>,
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<i64>,
}
