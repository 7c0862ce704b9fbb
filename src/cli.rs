use crate::{
    api::BoardApi,
    config::Config,
    http::ReqwestClient,
    pipeline::Pipeline,
    store::DailyJsonStore,
    util::{ensure_dir, looks_like_url},
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "monster-scraper")]
#[command(about = "Job-board listing harvester (paged search + detail enrichment + daily JSON output)")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./monster-scraper.toml if present, else built-in defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape every configured query and append to today's output file.
    Run {
        /// Replace the configured queries (repeatable).
        #[arg(long = "query")]
        queries: Vec<String>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print one raw search page.
    Search {
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = 0)]
        start: u64,
    },
    /// Print the decoded detail record for one job.
    Detail {
        #[arg(long)]
        job_id: String,
    },
    /// Run the availability check against one job page.
    Check {
        #[arg(long)]
        url: String,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;

    if let Command::Run {
        queries, out_dir, ..
    } = &args.cmd
    {
        if !queries.is_empty() {
            cfg.search.queries = queries.clone();
        }
        if let Some(dir) = out_dir {
            cfg.output.out_dir = dir.display().to_string();
        }
    }

    let log_path = resolve_log_path(&cfg);
    let _guard = init_logging(&args, &cfg, log_path.as_deref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    match &args.cmd {
        Command::Run { .. } => runtime.block_on(run(&cfg)),
        Command::Search { query, start } => runtime.block_on(search(&cfg, query, *start)),
        Command::Detail { job_id } => runtime.block_on(detail(&cfg, job_id)),
        Command::Check { url } => runtime.block_on(check(&cfg, url)),
    }
}

fn load_config(user: Option<&Path>) -> Result<Config> {
    if let Some(p) = user {
        return Config::load(p);
    }
    let default = PathBuf::from("monster-scraper.toml");
    if default.exists() {
        Config::load(&default)
    } else {
        Ok(Config::default())
    }
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file || cfg.logging.file_path.is_empty() {
        return None;
    }
    Some(PathBuf::from(&cfg.logging.file_path))
}

async fn run(cfg: &Config) -> Result<()> {
    let client = ReqwestClient::new(cfg)?;
    let store = DailyJsonStore::from_config(cfg);
    info!("JobScraper initialized out={}", store.today_path().display());

    let pipeline = Pipeline::new(cfg, client, store);
    let report = pipeline.run(&cfg.search.queries).await;

    info!(
        "run finished: {} records appended to {}",
        report.total_saved(),
        report.output_file
    );
    if cfg.global.print_summary {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

async fn search(cfg: &Config, query: &str, start: u64) -> Result<()> {
    let api = BoardApi::new(cfg, ReqwestClient::new(cfg)?);
    let jobs = api
        .search(query, start)
        .await
        .with_context(|| format!("search query={query} start={start}"))?;
    println!("{}", serde_json::to_string_pretty(&jobs)?);
    Ok(())
}

async fn detail(cfg: &Config, job_id: &str) -> Result<()> {
    let api = BoardApi::new(cfg, ReqwestClient::new(cfg)?);
    let detail = api
        .detail(job_id)
        .await
        .with_context(|| format!("detail job_id={job_id}"))?;
    println!("{}", serde_json::to_string_pretty(&detail)?);
    Ok(())
}

async fn check(cfg: &Config, url: &str) -> Result<()> {
    if !looks_like_url(url) {
        return Err(anyhow!("not an http(s) URL: {url}"));
    }
    let api = BoardApi::new(cfg, ReqwestClient::new(cfg)?);
    let availability = api.availability(Some(url)).await;
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "url": url,
            "available": availability.is_available(),
            "availability": availability,
        }))?
    );
    Ok(())
}
