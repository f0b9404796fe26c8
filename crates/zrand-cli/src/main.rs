//! zrand: generate passwords and tokens from composable recipes
//!
//! Commands:
//!   generate [--recipe NAME] [--count N]  - print generated values
//!   inspect [--recipe NAME]               - show the buffer requirements of a recipe
//!   recipes                               - list built-in and configured recipes
//!   config show                           - display current configuration

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use config::{load_config, ZrandConfig};
use zrand_core::Recipe;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "zrand",
    version,
    about = "Generate passwords and tokens from composable recipes"
)]
struct Cli {
    /// Path to zrand.toml configuration file
    #[arg(long, short = 'c', env = "ZRAND_CONFIG", default_value = "zrand.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "ZRAND_LOG")]
    log: Option<String>,

    /// Log format; overrides the config file
    #[arg(long, env = "ZRAND_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print generated values, one per line
    Generate {
        /// Recipe name (default: [generate] recipe from the config)
        #[arg(long, short = 'r')]
        recipe: Option<String>,
        /// Number of values (default: [generate] count from the config)
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },

    /// Show the output, scratch, and randomness byte counts of a recipe
    Inspect {
        /// Recipe name (default: [generate] recipe from the config)
        #[arg(long, short = 'r')]
        recipe: Option<String>,
    },

    /// List built-in and configured recipes
    Recipes,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let level = cli.log.as_deref().unwrap_or(&config.logging.level);
    let format = match &cli.log_format {
        Some(format) => format.clone(),
        None => LogFormat::from_str(&config.logging.format, true)
            .map_err(|e| anyhow::anyhow!("invalid log format in config: {e}"))?,
    };
    init_logging(level, &format);

    debug!(config = %cli.config.display(), "configuration loaded");

    match cli.command {
        Commands::Generate { recipe, count } => {
            cmd_generate(&config, recipe.as_deref(), count.unwrap_or(config.generate.count))
        }
        Commands::Inspect { recipe } => cmd_inspect(&config, recipe.as_deref()),
        Commands::Recipes => cmd_recipes(&config),
        Commands::Config {
            action: ConfigAction::Show,
        } => cmd_config_show(&config, &cli.config),
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr; stdout carries only generated values.
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

// ── `zrand generate` ──────────────────────────────────────────────────────────

fn cmd_generate(config: &ZrandConfig, recipe: Option<&str>, count: usize) -> Result<()> {
    let name = recipe.unwrap_or(&config.generate.recipe);
    let op = config.op(name)?;
    info!(recipe = name, count, len = op.output_len(), "generating");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for _ in 0..count {
        let value = zrand_core::build_string(&op)
            .with_context(|| format!("generating from recipe '{name}'"))?;
        out.write_all(&value)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

// ── `zrand inspect` ───────────────────────────────────────────────────────────

fn cmd_inspect(config: &ZrandConfig, recipe: Option<&str>) -> Result<()> {
    let name = recipe.unwrap_or(&config.generate.recipe);
    let req = config.op(name)?.requirements();

    println!("recipe:      {name}");
    println!("output:      {} bytes", req.output);
    println!("scratch:     {} bytes", req.scratch);
    println!("randomness:  {} bytes", req.randomness);
    Ok(())
}

// ── `zrand recipes` ───────────────────────────────────────────────────────────

fn cmd_recipes(config: &ZrandConfig) -> Result<()> {
    for (name, recipe) in zrand_core::builtins() {
        let origin = if config.recipes.contains_key(name) {
            "built-in, overridden by config"
        } else {
            "built-in"
        };
        println!("{name:<12} {}  ({origin})", describe_len(&recipe));
    }
    for (name, recipe) in &config.recipes {
        println!("{name:<12} {}  (config)", describe_len(recipe));
    }
    Ok(())
}

fn describe_len(recipe: &Recipe) -> String {
    match recipe.to_op() {
        Ok(op) => format!("{:>4} bytes", op.output_len()),
        Err(e) => format!("invalid: {e}"),
    }
}

// ── `zrand config show` ───────────────────────────────────────────────────────

fn cmd_config_show(config: &ZrandConfig, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!("# Configuration: defaults (no file at {})", config_path.display());
    }
    println!();
    let rendered = toml::to_string_pretty(config).context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}
