//! routecheck - list the routes documented in a forked API collection
//!
//! Results go to stdout, logs to stderr (or `--log-file`).

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

use routecheck::constants::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_FORK_LABEL, DEFAULT_WORKSPACE_NAME};
use routecheck::report::{render_json, render_text};
use routecheck::{diff_routes, load_routes, ApiClient, Config, Pipeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "routecheck", version, about = "Resolve the route URLs of a forked API collection")]
struct Args {
    /// API key sent as X-API-Key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, default_value = "")]
    api_key: String,

    /// Base URL of the collection API
    #[arg(long, env = "ROUTECHECK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Name of the workspace holding the collection
    #[arg(long, env = "ROUTECHECK_WORKSPACE", default_value = DEFAULT_WORKSPACE_NAME)]
    workspace: String,

    /// Fork label of the collection to read
    #[arg(long, env = "ROUTECHECK_FORK_LABEL", default_value = DEFAULT_FORK_LABEL)]
    fork_label: String,

    /// Service route list (OpenAPI .json/.yaml or one route per line) to diff against
    #[arg(long)]
    routes: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> Config {
        Config::new(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_workspace_name(self.workspace.clone())
            .with_fork_label(self.fork_label.clone())
    }
}

/// Initialize logging; the guard must outlive the run when logging to a file
fn init_logging(args: &Args) -> anyhow::Result<Option<WorkerGuard>> {
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    match &args.log_file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(std::path::Path::new("."));
            let file_name = path.file_name().context("log file path has no file name")?;
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_max_level(level)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_max_level(level)
                .init();
            Ok(None)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_logging(&args)?;

    let config = args.config();
    let pipeline = Pipeline::new(ApiClient::new(&config), config);

    let resolution = pipeline.resolve().await.map_err(|e| {
        let kind = e.kind();
        tracing::debug!(kind, "Resolution failed");
        anyhow::Error::new(e).context(format!("{} failure", kind))
    })?;

    let diff = match &args.routes {
        Some(path) => {
            let routes = load_routes(path)?;
            tracing::info!(routes = routes.len(), file = %path.display(), "Loaded service routes");
            Some(diff_routes(&resolution.urls, &routes)?)
        }
        None => None,
    };

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&resolution, diff.as_ref())),
        OutputFormat::Json => println!("{}", render_json(&resolution, diff.as_ref())?),
    }

    Ok(())
}
