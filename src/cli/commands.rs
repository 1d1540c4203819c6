//! CLI command definitions for naa-scout.
//!
//! Running with no subcommand performs the five-category digest scan and
//! writes `top_news.json`, matching the default behaviour of the tool.

use crate::config::{ScoutConfig, API_BASE_ENV, API_KEY_ENV, DEFAULT_OUTPUT_PATH, MODEL_ENV};
use crate::llm::GeminiProvider;
use crate::scout::{Scout, ScoutFailure, Variant};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

/// News scout: asks a search-grounded LLM for today's top signals.
#[derive(Parser)]
#[command(name = "naa-scout")]
#[command(about = "Scan the last 24 hours of news with a search-grounded LLM and save the top signals as JSON")]
#[command(version)]
#[command(
    long_about = "naa-scout asks Gemini (with Google Search grounding) for the most impactful recent headlines,\nextracts the JSON from its reply and writes it to a local file.\n\nExample usage:\n  export GEMINI_API_KEY=your_key\n  naa-scout                      # five-category digest -> top_news.json\n  naa-scout headline -o top.json # single top headline"
)]
pub struct Cli {
    /// The scan to run (defaults to `digest`).
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub scan: ScanArgs,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// One headline for each of the five fixed categories (JSON array).
    #[command(alias = "all")]
    Digest,

    /// The single most impactful headline (JSON object).
    #[command(alias = "top")]
    Headline,
}

impl From<Commands> for Variant {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Digest => Variant::Digest,
            Commands::Headline => Variant::Headline,
        }
    }
}

/// Options shared by every scan.
///
/// Unset or blank flags fall back to `GEMINI_MODEL`, `GEMINI_API_KEY` and
/// `GEMINI_API_BASE`, then to the built-in defaults.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Gemini model to use [env: GEMINI_MODEL] [default: gemini-2.5-flash-lite].
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Output file, overwritten on success.
    #[arg(short = 'o', long, global = true, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: String,

    /// Gemini API key [env: GEMINI_API_KEY].
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Gemini API base URL [env: GEMINI_API_BASE].
    #[arg(long, global = true)]
    pub api_base: Option<String>,
}

impl ScanArgs {
    /// The flag value standing in for an environment variable, if given.
    fn flag_for(&self, key: &str) -> Option<&str> {
        let value = match key {
            API_KEY_ENV => self.api_key.as_deref(),
            MODEL_ENV => self.model.as_deref(),
            API_BASE_ENV => self.api_base.as_deref(),
            _ => None,
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// Parse CLI arguments and return the Cli struct.
///
/// This allows main.rs to access CLI arguments (like log_level) before running commands.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

/// Run the CLI with the parsed arguments.
///
/// Scan failures are reported on stdout and do not produce an error exit.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    run_scan(cli, |key| std::env::var(key).ok()).await
}

async fn run_scan<F>(cli: Cli, env: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let variant: Variant = cli.command.unwrap_or(Commands::Digest).into();

    let outcome = match build_config(&cli.scan, variant, env) {
        Ok(config) => {
            info!(
                model = %config.model,
                variant = %config.variant,
                output = %config.output_path.display(),
                key = %config.api_key_masked(),
                "Configuration resolved"
            );
            let provider = Arc::new(GeminiProvider::from_config(&config));
            Scout::new(provider, config).run().await.map(|_| ())
        }
        Err(failure) => Err(failure),
    };

    if let Err(failure) = outcome {
        warn!(kind = failure.kind(), "Scan did not complete");
        println!("{}", failure);
    }

    Ok(())
}

/// Builds the run configuration with flags layered over `env`.
///
/// Resolution goes through [`ScoutConfig::from_lookup`], so the credential
/// is checked before anything else and blank values count as unset.
pub fn build_config<F>(
    args: &ScanArgs,
    variant: Variant,
    env: F,
) -> Result<ScoutConfig, ScoutFailure>
where
    F: Fn(&str) -> Option<String>,
{
    let config = ScoutConfig::from_lookup(|key: &str| {
        args.flag_for(key).map(str::to_string).or_else(|| env(key))
    })?
    .with_output_path(args.output.as_str())
    .with_variant(variant);

    config.validate()?;
    Ok(config)
}
