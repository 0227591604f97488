//! remote-facts: command-line entrypoint.
//! Lists the endpoint catalog and fetches facts from it.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use remote_facts::metrics::Metrics;
use remote_facts::{
    run_all, BoundEndpoint, Catalog, FactSource, FetchConfig, FetchOptions, Fetcher, Params,
};

#[derive(Parser, Debug)]
#[command(name = "remote-facts", version, about = "Fetch normalized facts from public APIs")]
struct Cli {
    /// Config file (TOML or JSON). Defaults to $FACTS_CONFIG_PATH, then config/facts.{toml,json}.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print Prometheus metrics after the command finishes.
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog entries with their parameters and credentials.
    List,
    /// Fetch one fact.
    Get {
        name: String,
        /// Template parameter, repeatable.
        #[arg(short = 'p', long = "param", value_parser = Params::parse_pair)]
        params: Vec<(String, String)>,
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Print the fact as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Fetch every entry that runs without extra parameters, concurrently.
    Sample {
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

/// Logs go to stderr; level via RUST_LOG (default: warn).
/// FACTS_LOG_FORMAT=json switches to one JSON object per line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var("FACTS_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let (compact, json_layer) = if json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (Some(fmt::layer().compact().with_writer(std::io::stderr)), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json_layer)
        .init();
}

fn options(timeout_ms: Option<u64>) -> FetchOptions {
    match timeout_ms {
        Some(ms) => FetchOptions::default().with_timeout(Duration::from_millis(ms)),
        None => FetchOptions::default(),
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let cfg = match &cli.config {
        Some(p) => FetchConfig::load_from(p)?,
        None => FetchConfig::load_default()?,
    };
    let catalog = Catalog::from_config(&cfg)?;
    let fetcher = Fetcher::new(&cfg)?;

    match cli.command {
        Command::List => {
            for d in catalog.iter() {
                let mut extra = Vec::new();
                let req = d.required_params();
                if !req.is_empty() {
                    extra.push(format!("params: {}", req.join(", ")));
                }
                if let Some(c) = &d.credential {
                    extra.push(format!("credential: {}", c.name));
                }
                let extra = if extra.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", extra.join("; "))
                };
                println!("{:<20} {}{}", d.name, d.summary, extra);
            }
            Ok(true)
        }
        Command::Get {
            name,
            params,
            timeout_ms,
            json,
        } => {
            let Some(desc) = catalog.get(&name) else {
                match catalog.suggest(&name) {
                    Some(s) => anyhow::bail!("unknown endpoint `{name}` (did you mean `{s}`?)"),
                    None => anyhow::bail!("unknown endpoint `{name}`; try `remote-facts list`"),
                }
            };
            let params: Params = params.into_iter().collect();
            match fetcher.fetch(desc, &params, &options(timeout_ms)).await {
                Ok(fact) if json => {
                    println!("{}", serde_json::to_string_pretty(&fact).context("encoding fact")?);
                    Ok(true)
                }
                Ok(fact) => {
                    println!("{fact}");
                    Ok(true)
                }
                Err(e) => {
                    eprintln!("{name}: {e} ({})", e.kind());
                    Ok(false)
                }
            }
        }
        Command::Sample { timeout_ms } => {
            let opts = options(timeout_ms);
            let sources: Vec<Box<dyn FactSource>> = catalog
                .iter()
                .filter(|d| d.required_params().is_empty())
                .filter(|d| {
                    d.credential
                        .as_ref()
                        .map_or(true, |c| fetcher.credentials().resolve(&c.name).is_some())
                })
                .map(|d| {
                    Box::new(BoundEndpoint::new(fetcher.clone(), d.clone()).with_options(opts.clone()))
                        as Box<dyn FactSource>
                })
                .collect();

            let outcomes = run_all(&sources, &Params::new()).await;
            let mut all_ok = true;
            for o in outcomes {
                match o.result {
                    Ok(fact) => println!("{:<20} {}", o.endpoint, fact),
                    Err(e) => {
                        all_ok = false;
                        println!("{:<20} ! {} ({})", o.endpoint, e, e.kind());
                    }
                }
            }
            Ok(all_ok)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev so API keys can live outside the shell profile.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let metrics = if cli.metrics {
        match Metrics::init() {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!(error = ?e, "metrics disabled");
                None
            }
        }
    } else {
        None
    };

    let code = match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    };

    if let Some(m) = metrics {
        print!("{}", m.render());
    }
    code
}
