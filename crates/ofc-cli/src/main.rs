use anyhow::Result;
use clap::{Parser, Subcommand};
use ofc_config::{report_unused_keys, FormConfig, UnusedKeyPolicy};
use tracing::warn;

mod commands;

#[derive(Parser)]
#[command(name = "ofc")]
#[command(about = "Order-form controller (headless host)", long_about = None)]
struct Cli {
    /// Layered config paths in merge order
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    /// Fail instead of warning when the config has unrecognized keys
    #[arg(long, global = true, default_value_t = false)]
    strict_config: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute line subtotals and totals for a form snapshot
    Totals {
        /// Form snapshot (YAML or JSON)
        #[arg(long)]
        form: String,
    },

    /// Load a form snapshot and dispatch a scripted event sequence
    Run {
        /// Form snapshot (YAML or JSON)
        #[arg(long)]
        form: String,

        /// Events in order: print | verify | send | reset | qty:<row>=<text> |
        /// type:<row>=<key> | field:<id>=<text> | consent=<true|false>
        #[arg(long = "event")]
        events: Vec<String>,

        /// Write the final form state as JSON
        #[arg(long)]
        out: Option<String>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();
    let cfg = load_form_config(&cli.config_paths, cli.strict_config)?;

    match cli.cmd {
        Commands::Totals { form } => commands::totals(&form),
        Commands::Run { form, events, out } => {
            commands::run_script(&form, &events, out.as_deref(), &cfg)
        }
        Commands::ConfigHash { paths } => commands::config_hash(&paths),
    }
}

/// Load config (if any), install tracing, then report unused keys through it.
fn load_form_config(paths: &[String], strict: bool) -> Result<FormConfig> {
    if paths.is_empty() {
        init_tracing(ofc_config::DEFAULT_LOG_FILTER);
        return Ok(FormConfig::default());
    }

    let refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = ofc_config::load_layered_yaml(&refs)?;
    let cfg = FormConfig::from_json(&loaded.config_json);
    init_tracing(&cfg.log_filter);

    let policy = if strict {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = report_unused_keys(&loaded.config_json, policy)?;
    if !report.is_clean() {
        warn!(unused = ?report.unused_leaf_pointers, "config has unrecognized keys");
    }
    Ok(cfg)
}

/// Logs go to stderr; stdout carries the command's key=value output.
fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
