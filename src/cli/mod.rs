//! # SBCTL CLI
//!
//! Command-line front end for the secret browser.
//!
//! ## Usage
//!
//! ```bash
//! # Engine types that have a list view
//! sbctl engines
//!
//! # Schema and list path for an engine and tab
//! sbctl resolve pki --tab cert
//! sbctl resolve kv --kv-version 2
//!
//! # List a mount, or a prefix under it
//! sbctl list secret
//! sbctl list kv2-store app/ --page 2 --filter db
//! sbctl list pki --tab cert --json
//! sbctl list secret --metrics
//! ```
//!
//! `VAULT_ADDR`, `VAULT_TOKEN` and `VAULT_NAMESPACE` select the server.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

use secret_browser::observability::{init_tracing, metrics};
use secret_browser::paths::prelude::{resolve, EngineType, KvVersion};
use secret_browser::{
    BrowserConfig, NavigationController, NavigationError, NavigationResult, Redirect,
    RouteParams, Transition, VaultStore, ViewState,
};

/// Secret Browser CLI
#[derive(Parser)]
#[command(name = "sbctl")]
#[command(
    about = "Browse the resources of mounted secret engines",
    version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("BUILD_GIT_HASH"),
        ", built ",
        env!("BUILD_DATETIME"),
        ")"
    ),
    long_about = None,
    after_help = "\
Examples:
  sbctl engines
  sbctl resolve database --tab role
  sbctl list kv2-store app/ --filter db
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the engine types that have a list view
    Engines,
    /// Show the schema and list path used for an engine type and tab
    Resolve {
        /// Engine type as reported by the mount (e.g. kv, pki, transit)
        #[arg(value_name = "ENGINE")]
        engine: String,

        /// Tab within the mount (e.g. role, cert, provider)
        #[arg(long)]
        tab: Option<String>,

        /// KV version; required for kv and generic mounts
        #[arg(long, value_enum)]
        kv_version: Option<KvVersionArg>,
    },
    /// List one page of a mount
    List {
        /// Mount path
        #[arg(value_name = "MOUNT")]
        mount: String,

        /// Prefix under the mount; must end in '/'
        #[arg(value_name = "PREFIX")]
        prefix: Option<String>,

        #[arg(long)]
        tab: Option<String>,

        /// 1-based page number
        #[arg(long)]
        page: Option<usize>,

        /// Case-insensitive key filter
        #[arg(long)]
        filter: Option<String>,

        /// Print the view state as JSON
        #[arg(long)]
        json: bool,

        /// Print collected Prometheus metrics to stderr afterwards
        #[arg(long)]
        metrics: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KvVersionArg {
    #[value(name = "1")]
    V1,
    #[value(name = "2")]
    V2,
}

impl From<KvVersionArg> for KvVersion {
    fn from(arg: KvVersionArg) -> Self {
        match arg {
            KvVersionArg::V1 => KvVersion::V1,
            KvVersionArg::V2 => KvVersion::V2,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Must run before any TLS client is built
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|existing| {
            anyhow::anyhow!("Failed to install rustls crypto provider, one is already set: {existing:?}")
        })?;

    let config = BrowserConfig::from_env();
    init_tracing(&config);

    let cli = Cli::parse();

    match cli.command {
        Commands::Engines => {
            for engine in EngineType::ALL {
                println!("{engine}");
            }
            Ok(())
        }
        Commands::Resolve {
            engine,
            tab,
            kv_version,
        } => resolve_command(&engine, tab.as_deref(), kv_version.map(Into::into)),
        Commands::List {
            mount,
            prefix,
            tab,
            page,
            filter,
            json,
            metrics: show_metrics,
        } => {
            let mut params = match prefix {
                Some(prefix) => RouteParams::nested(mount, prefix),
                None => RouteParams::root(mount),
            };
            params.tab = tab;
            params.page = page;
            params.page_filter = filter;
            let result = list_command(config, params, json).await;
            if show_metrics {
                eprint!("{}", metrics::gather_text());
            }
            result
        }
    }
}

fn resolve_command(engine: &str, tab: Option<&str>, kv_version: Option<KvVersion>) -> Result<()> {
    let engine: EngineType = engine
        .parse()
        .with_context(|| format!("'{engine}' has no list view"))?;
    let spec = resolve(engine, tab, kv_version)
        .with_context(|| format!("Failed to resolve schema for '{engine}'"))?;

    println!("schema: {}", spec.schema);
    println!("list:   {}", spec.path_template);
    println!("read:   {}", spec.schema.read_template());
    Ok(())
}

async fn list_command(config: BrowserConfig, params: RouteParams, json: bool) -> Result<()> {
    metrics::register_metrics().context("Failed to register metrics")?;

    let store = Arc::new(VaultStore::new(&config).context("Failed to create API client")?);
    if let Err(e) = store.load_mount(&params.mount_path).await {
        warn!("Could not load mount {}: {}", params.mount_path, e);
    }

    let controller = NavigationController::with_page_size(store, config.page_size);
    let mut transition = Transition::new(params);

    // A prefix without trailing slash is followed once, the way a browser
    // would replace the URL
    for _ in 0..2 {
        match controller.navigate(transition.clone()).await {
            Ok(NavigationResult::Redirect(Redirect::Replace { path })) => {
                eprintln!("Redirecting to {path}");
                transition.params.path_prefix = path;
            }
            Ok(NavigationResult::Redirect(Redirect::SecretsLanding)) => {
                anyhow::bail!(
                    "Mount '{}' is unknown or its engine type has no list view",
                    transition.params.mount_path
                );
            }
            Ok(NavigationResult::Settled(view) | NavigationResult::Aborted(view)) => {
                return print_view(&view, json);
            }
            Ok(NavigationResult::Superseded) => {
                anyhow::bail!("Navigation was superseded");
            }
            Err(e) => return Err(report_error(e, json)),
        }
    }

    anyhow::bail!("Too many redirects")
}

fn print_view(view: &ViewState, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(view).context("Failed to serialize view state")?;
        println!("{out}");
        return Ok(());
    }

    if view.has_no_permissions_at_root {
        println!("You do not have permission to list keys at this path.");
    } else if view.items.is_empty() {
        println!("No keys found.");
    }
    for item in &view.items {
        println!("{item}");
    }
    for record in &view.certificates {
        println!("[{}] certificate available", record.id);
    }
    if let Some(meta) = view.meta {
        println!(
            "-- page {}/{} ({} of {} keys{})",
            meta.current_page,
            meta.last_page,
            meta.filtered_total,
            meta.total,
            if view.filter.is_empty() {
                String::new()
            } else {
                format!(", filter '{}'", view.filter)
            }
        );
    }
    if view.has_404 {
        println!("-- requested path was not found, showing previous listing");
    }
    Ok(())
}

fn report_error(error: NavigationError, json: bool) -> anyhow::Error {
    if json {
        if let Some(context) = error.context() {
            if let Ok(out) = serde_json::to_string_pretty(context) {
                eprintln!("{out}");
            }
        }
    }
    anyhow::Error::new(error).context("Listing failed")
}
