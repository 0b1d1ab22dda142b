//! Command-line interface for clipsense.
//!
//! Every subcommand reads one clipboard record from a file argument or from
//! stdin and writes its result to stdout.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::classifier::{ContentClassifier, RenderPlan, format_content, highlight_language};
use clipsense_config::{ClassifierConfig, LogLevel};

/// clipsense - content-type classification for clipboard text
#[derive(Parser)]
#[command(name = "clipsense")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace); overrides RUST_LOG and the config file
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the detected content type and confidence
    Classify {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Emit the full detection record as JSON
        #[arg(long)]
        json: bool,

        /// List every detector that voted, best first
        #[arg(long)]
        candidates: bool,
    },
    /// Print the content pretty-printed for its detected type
    Format {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,
    },
    /// Print the highlighter grammar name for the content
    Highlight {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,
    },
    /// Print the render plan (type, grammar, formatted text) as JSON
    Plan {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,
    },
    /// List the registered detectors in priority order
    Formats,
}

fn parse_log_level(name: &str) -> Result<LogLevel, String> {
    LogLevel::parse(name).ok_or_else(|| format!("unknown log level '{name}'"))
}

/// Parse the process arguments.
pub fn parse() -> Cli {
    Cli::parse()
}

impl Cli {
    /// The `--log-level` flag as a `log` filter.
    pub fn log_level_filter(&self) -> Option<log::LevelFilter> {
        self.log_level.map(LogLevel::to_level_filter)
    }
}

/// Load the configuration, then run the selected subcommand against stdout.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    crate::debug::apply_config_log_level(config.log_level.to_level_filter());

    let input = match &cli.command {
        Commands::Classify { input, .. }
        | Commands::Format { input }
        | Commands::Highlight { input }
        | Commands::Plan { input } => read_input(input.as_deref())?,
        Commands::Formats => String::new(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &config, &input, &mut out)?;
    out.flush()?;
    Ok(())
}

/// An explicit path must load cleanly; the default location falls back to
/// built-in defaults on error.
fn load_config(path: Option<&Path>) -> anyhow::Result<ClassifierConfig> {
    match path {
        Some(path) => ClassifierConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(ClassifierConfig::load().unwrap_or_else(|e| {
            log::warn!("Using default configuration: {e}");
            ClassifierConfig::default()
        })),
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    let bytes = match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Run one subcommand on already-loaded input.
pub fn execute(
    command: &Commands,
    config: &ClassifierConfig,
    input: &str,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let classifier = ContentClassifier::from_config(config);

    match command {
        Commands::Classify {
            json, candidates, ..
        } => {
            if *candidates {
                let votes = classifier.candidates(input);
                if *json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&votes)?)?;
                } else {
                    for vote in &votes {
                        writeln!(
                            out,
                            "{}\t{}\t{:.2}",
                            vote.format_id,
                            vote.content_type.kind,
                            vote.content_type.confidence
                        )?;
                    }
                }
                return Ok(());
            }
            let detected = classifier.classify(input);
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&detected)?)?;
            } else {
                writeln!(out, "{}\t{:.2}", detected.kind(), detected.confidence())?;
            }
        }
        Commands::Format { .. } => {
            let detected = classifier.classify(input);
            writeln!(out, "{}", format_content(&detected))?;
        }
        Commands::Highlight { .. } => {
            let detected = classifier.classify(input);
            writeln!(out, "{}", highlight_language(&detected))?;
        }
        Commands::Plan { .. } => {
            let detected = classifier.classify(input);
            let plan = RenderPlan::build(&detected, &config.rendering);
            writeln!(out, "{}", serde_json::to_string_pretty(&plan)?)?;
        }
        Commands::Formats => {
            for (id, name) in classifier.registry().registered_formats() {
                writeln!(out, "{id}\t{name}")?;
            }
        }
    }
    Ok(())
}
