pub mod config;
pub mod fizzbuzz;
pub mod model;
pub mod search;
pub mod session;
pub mod ui;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use config::Config;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::search::gateway::SearchGateway;
use crate::session::SearchSession;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "ghus",
    version,
    about = "Debounced GitHub user search with local list editing"
)]
pub struct Cli {
    /// Path to a TOML config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the search endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Override the debounce delay in milliseconds
    #[arg(long, global = true)]
    pub debounce_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch interactive TUI
    Tui {
        /// Render once and exit (headless-friendly with TUI_HEADLESS=1)
        #[arg(long, default_value_t = false)]
        once: bool,

        /// Start with this query typed in
        #[arg(long)]
        query: Option<String>,
    },
    /// Run a single search and print the results
    Search {
        query: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print FizzBuzz for 1..=N (N random in 1..=100 unless given)
    Fizzbuzz {
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate man page to stdout
    Man,
}

impl Cli {
    /// Config file + environment, with CLI overrides on top.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut cfg = Config::load(self.config.as_deref()).context("loading configuration")?;
        if let Some(endpoint) = &self.endpoint {
            cfg.endpoint = endpoint.clone();
        }
        if let Some(ms) = self.debounce_ms {
            cfg.debounce_ms = ms;
        }
        Ok(cfg)
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tui { once, ref query } => {
            let cfg = cli.resolve_config()?;
            let tui_headless = std::env::var("TUI_HEADLESS").ok();
            let headless = headless_requested(once, tui_headless.as_deref());
            // The alternate screen owns stdout/stderr; log to a file instead.
            let _guard = if headless {
                init_stderr_logging();
                None
            } else {
                Some(init_file_logging(&config::default_data_dir())?)
            };
            let query = query.clone();
            tokio::task::spawn_blocking(move || {
                if headless {
                    ui::tui::run_tui_headless(&cfg, query.as_deref(), &mut std::io::stdout())
                } else {
                    ui::tui::run_tui(&cfg, once, query)
                }
            })
            .await
            .context("tui task panicked")?
        }
        Commands::Search { ref query, json } => {
            init_stderr_logging();
            let cfg = cli.resolve_config()?;
            let query = query.clone();
            tokio::task::spawn_blocking(move || run_search(&cfg, &query, json))
                .await
                .context("search task panicked")?
        }
        Commands::Fizzbuzz { limit } => {
            init_stderr_logging();
            fizzbuzz::run(limit, &mut std::io::stdout().lock())
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "ghus", &mut std::io::stdout());
            Ok(())
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            let mut out = std::io::stdout();
            man.render(&mut out)?;
            Ok(())
        }
    }
}

/// Headless rendering needs both `--once` and `TUI_HEADLESS=1`.
fn headless_requested(once: bool, tui_headless: Option<&str>) -> bool {
    once && tui_headless == Some("1")
}

/// One-shot search: same gateway and session rules as the TUI.
fn run_search(cfg: &Config, query: &str, json: bool) -> Result<()> {
    let gateway = SearchGateway::from_config(cfg)?;
    tracing::debug!(endpoint = gateway.endpoint(), "one-shot search");
    let mut session = SearchSession::new(cfg.debounce());
    session.search_now(&gateway, query);

    if let Some(notice) = session.take_notice() {
        anyhow::bail!("{}: {}", notice.title(), notice.body());
    }

    let mut out = std::io::stdout().lock();
    if json {
        let payload = serde_json::json!({
            "query": query.trim(),
            "count": session.items().len(),
            "items": session.items(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
    } else {
        write!(out, "{}", ui::data::render_plain(&session))?;
    }
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_file_logging(dir: &std::path::Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, "ghus.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(writer)
        .try_init();
    Ok(guard)
}
