//! Operator CLI for the path routing engine.
//!
//! ```text
//! path-router --config router.yaml check
//! path-router --config router.yaml route /pb33f/test/123
//! path-router --config router.yaml matches /pb33f/test/123
//! path-router --config router.yaml watch
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;

use path_router::config::{load_config, ConfigWatcher};
use path_router::observability::logging;
use path_router::routing::RouteDescriptor;
use path_router::{SharedRouter, Shutdown};

#[derive(Parser)]
#[command(name = "path-router")]
#[command(about = "Inspect and hot-reload proxy path routing configuration", long_about = None)]
struct Cli {
    /// Routing configuration file (.yaml, .yml, .toml or .json).
    #[arg(short, long, default_value = "router.yaml")]
    config: PathBuf,

    /// Log level; overrides the configured one. `RUST_LOG` overrides both.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and compile the configuration
    Check,
    /// Show the upstream URL and delay for a request path
    Route {
        path: String,
        /// Sleep for the configured delay before printing
        #[arg(long)]
        apply_delay: bool,
    },
    /// List every route matching a request path, in selection order
    Matches { path: String },
    /// Keep the configuration compiled and hot-reload it on change
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    logging::init_logging(level)?;
    // load_config ran before the subscriber existed.
    tracing::info!(
        path = %cli.config.display(),
        routes = config.paths.len(),
        delays = config.path_delays.len(),
        "Configuration loaded"
    );

    let shared = Arc::new(SharedRouter::from_config(&config)?);
    let router = shared.load();

    match cli.command {
        Commands::Check => {
            println!(
                "{}: {} routes, {} delays",
                cli.config.display(),
                router.routes().len(),
                router.delays().len()
            );
        }
        Commands::Route { path, apply_delay } => {
            let delay = if apply_delay {
                shared.inject_delay(&path).await
            } else {
                shared.delay_for(&path)
            };
            match shared.route(&path) {
                Some(url) => println!("{url}"),
                None => println!("no route matched"),
            }
            println!("delay: {}ms", delay.as_millis());
        }
        Commands::Matches { path } => {
            let routes: Vec<_> = router.find_routes(&path).into_iter().map(describe).collect();
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Commands::Watch => {
            watch(cli.config, shared).await?;
        }
    }

    Ok(())
}

fn describe(route: &RouteDescriptor) -> serde_json::Value {
    let rewrites: Vec<_> = route
        .rewrite_rules()
        .iter()
        .map(|rule| json!({ "pattern": rule.pattern(), "replacement": rule.replacement() }))
        .collect();

    json!({
        "pattern": route.pattern(),
        "target": route.target(),
        "secure": route.secure(),
        "pathRewrite": rewrites,
    })
}

async fn watch(path: PathBuf, shared: Arc<SharedRouter>) -> Result<(), Box<dyn std::error::Error>> {
    let shutdown = Shutdown::new();
    let (watcher, updates) = ConfigWatcher::new(&path);
    let _watcher = watcher.run()?;

    let reload_task = tokio::spawn(shared.clone().run(updates, shutdown.subscribe()));

    tracing::info!(
        path = %path.display(),
        generation = shared.generation(),
        "Watching routing configuration; press Ctrl+C to stop"
    );

    shutdown.trigger_on_ctrl_c().await?;
    reload_task.await?;

    tracing::info!(generation = shared.generation(), "Shutdown complete");
    Ok(())
}
