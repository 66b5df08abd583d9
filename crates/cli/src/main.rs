mod render;

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    process::ExitCode,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hashdash_api::{ClientOptions, HashrateIndexClient};
use hashdash_engine::Dashboard;
use hashdash_registry::{DashboardConfig, ParameterCatalog};
use hashdash_types::{CURRENCY_AXIS, DashboardError, INTERVAL_AXIS};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hashdash", version, about = "Hashrate Index dashboard for the terminal")]
struct Cli {
    /// Catalog file (YAML or JSON) used instead of the built-in one
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List operations with their parameter axes
    Operations {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch one operation and print the result
    Fetch(FetchArgs),
}

#[derive(Debug, Args)]
struct FetchArgs {
    /// Operation name, e.g. "Network Hashrate"
    #[arg(long, short)]
    operation: String,
    /// Interval label, e.g. "7 Days"
    #[arg(long, short)]
    interval: Option<String>,
    /// Currency label, e.g. "USD"
    #[arg(long, short)]
    currency: Option<String>,
    /// API key; defaults to HASHRATE_INDEX_API_KEY
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Print the request instead of sending it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(error = %format!("{error:#}"), "hashdash failed");
            match error.downcast_ref::<DashboardError>() {
                Some(dashboard_error) => eprintln!("{}", dashboard_error.user_message()),
                None => eprintln!("Error: {error:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let interactive = cli.command.is_none();
    init_tracing(interactive);

    let config = DashboardConfig::load();
    let catalog = ParameterCatalog::load(&config, cli.catalog.as_deref()).context("load catalog")?;
    debug!(operations = catalog.len(), "catalog loaded");

    match cli.command {
        None => {
            let options = client_options(&config, None);
            hashdash_tui::run(catalog, options).await
        }
        Some(Command::Operations { json }) => {
            if json {
                let operations: Vec<_> = catalog.operations().collect();
                println!("{}", serde_json::to_string_pretty(&operations)?);
            } else {
                print!("{}", render::operations(&catalog));
            }
            Ok(())
        }
        Some(Command::Fetch(args)) => fetch(catalog, &config, args).await,
    }
}

async fn fetch(catalog: ParameterCatalog, config: &DashboardConfig, args: FetchArgs) -> Result<()> {
    let mut labels: Vec<(&str, &str)> = Vec::new();
    if let Some(interval) = args.interval.as_deref() {
        labels.push((INTERVAL_AXIS, interval));
    }
    if let Some(currency) = args.currency.as_deref() {
        labels.push((CURRENCY_AXIS, currency));
    }
    let selection = catalog.resolve_selection(&args.operation, &labels)?;

    let options = client_options(config, args.api_key.as_deref());
    let client = HashrateIndexClient::new(options)?;

    if args.dry_run {
        let request = client.dry_run(&selection.operation().api_method, &selection.wire_values())?;
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&request)?),
            OutputFormat::Table => println!("{request}"),
        }
        return Ok(());
    }

    let dashboard = Dashboard::new(catalog, Arc::new(client))?;
    let outcome = dashboard.fetch(&selection).await?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Table => print!("{}", render::outcome(&outcome)),
    }
    Ok(())
}

fn client_options(config: &DashboardConfig, api_key: Option<&str>) -> ClientOptions {
    let options = ClientOptions::from_env(api_key, config.api_base.as_deref());
    match config.timeout_secs {
        Some(seconds) => options.with_timeout(Duration::from_secs(seconds)),
        None => options,
    }
}

/// The TUI owns the terminal, so interactive sessions log to
/// `<cache_dir>/hashdash/hashdash.log`; subcommands log to stderr.
fn init_tracing(interactive: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if !interactive {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    }

    let Some(dir) = dirs_next::cache_dir().map(|dir| dir.join("hashdash")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(dir.join("hashdash.log")) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fetch_arguments_parse() {
        let cli = Cli::parse_from([
            "hashdash",
            "--catalog",
            "/tmp/catalog.yaml",
            "fetch",
            "--operation",
            "Hashprice",
            "--interval",
            "7 Days",
            "--currency",
            "BTC",
            "--format",
            "json",
        ]);
        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/catalog.yaml")));
        match cli.command {
            Some(Command::Fetch(args)) => {
                assert_eq!(args.operation, "Hashprice");
                assert_eq!(args.interval.as_deref(), Some("7 Days"));
                assert_eq!(args.currency.as_deref(), Some("BTC"));
                assert_eq!(args.format, OutputFormat::Json);
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_tui() {
        assert!(Cli::parse_from(["hashdash"]).command.is_none());
    }
}
