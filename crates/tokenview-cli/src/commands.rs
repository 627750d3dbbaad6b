use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde_json::Value;
use tokenview_query::{PageParams, TokenQueryService};
use tokenview_server::dto::{BalanceDto, HolderDto, TokenDetailsDto, TokenDto};
use tokenview_server::{open_store, LoggingConfig, ServiceConfig, TokenviewServer};
use tracing_subscriber::EnvFilter;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let verbose = cli.verbose;
    match cli.command {
        Command::Serve(args) => cmd_serve(args, verbose),
        Command::CheckConfig(args) => cmd_check_config(args),
        Command::Query(args) => cmd_query(args, verbose),
    }
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let directive = if verbose { "debug" } else { logging.filter.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServiceConfig> {
    match path {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(ServiceConfig::default()),
    }
}

fn cmd_serve(args: ServeArgs, verbose: bool) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    if let Some(seed) = args.seed {
        config.store.seed_path = Some(seed);
    }
    init_tracing(&config.logging, verbose);

    let store = open_store(&config.store)?;
    println!(
        "{} tokenview on {} (prefix {})",
        "✓".green().bold(),
        config.server.bind_addr.to_string().bold(),
        display_prefix(&config.server.route_prefix).cyan()
    );
    runtime()?.block_on(TokenviewServer::new(config, store).serve())?;
    Ok(())
}

fn cmd_check_config(args: CheckConfigArgs) -> anyhow::Result<()> {
    let config = load_config(Some(&args.config))?;
    println!("{} {} is valid", "✓".green().bold(), args.config.display());
    println!("  Bind: {}", config.server.bind_addr.to_string().bold());
    println!("  Prefix: {}", display_prefix(&config.server.route_prefix).cyan());
    println!(
        "  Pagination: default {}, max {}",
        config.pagination.default_limit, config.pagination.max_limit
    );
    if config.cache.enabled {
        println!("  Cache: {} (max {} entries)", "enabled".green(), config.cache.max_entries);
    } else {
        println!("  Cache: {}", "disabled".yellow());
    }
    match &config.store.seed_path {
        Some(path) => println!("  Seed: {}", path.display().to_string().blue()),
        None => println!("  Seed: {}", "none".dimmed()),
    }
    Ok(())
}

fn cmd_query(args: QueryArgs, verbose: bool) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.store.seed_path = Some(seed);
    }
    init_tracing(&config.logging, verbose);

    let output = runtime()?.block_on(run_query(&config, args.view))?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Run one view against a freshly seeded store and return its JSON body.
async fn run_query(config: &ServiceConfig, view: QueryView) -> anyhow::Result<Value> {
    let store = open_store(&config.store)?;
    let service = TokenQueryService::new(store, config.pagination);
    let value = match view {
        QueryView::Tokens { tickers, page } => serde_json::to_value(
            service
                .tokens(&tickers, page.into())
                .await?
                .map(TokenDto::from),
        )?,
        QueryView::Token { ticker } => {
            serde_json::to_value(TokenDetailsDto::from(service.token_details(&ticker).await?))?
        }
        QueryView::Holders { ticker, page } => serde_json::to_value(
            service
                .holders(&ticker, page.into())
                .await?
                .map(HolderDto::from),
        )?,
        QueryView::Balances {
            address,
            tickers,
            page,
        } => serde_json::to_value(
            service
                .balances(&address, &tickers, page.into())
                .await?
                .map(BalanceDto::from),
        )?,
    };
    Ok(value)
}

fn display_prefix(prefix: &str) -> &str {
    if prefix.is_empty() {
        "/"
    } else {
        prefix
    }
}

impl From<PageArgs> for PageParams {
    fn from(page: PageArgs) -> Self {
        PageParams::new(page.limit, page.offset)
    }
}
