use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Finds Java interfaces that qualify as functional interfaces but lack the
/// `@FunctionalInterface` annotation.
///
/// sam-check reads a resolved symbol snapshot (JSON, or a packed `.bin`) produced by a
/// Java front end and classifies every interface in it.
#[derive(Parser, Debug)]
#[command(
    name = "sam-check",
    version,
    about,
    long_about = None,
    propagate_version = true,
)]
pub struct Cli {
    /// Enable debug logging on stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results.
#[derive(Clone, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    /// Compact one-line-per-result format (default).
    #[default]
    Compact,
    /// Human-readable columnar table with optional ANSI color when stdout is a terminal.
    Table,
    /// Structured JSON suitable for programmatic consumption.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report interfaces that should be annotated with @FunctionalInterface.
    Check {
        /// Snapshot file (`.json` or packed `.bin`).
        snapshot: PathBuf,

        /// Java source level (`8`, `1.7`); overrides `java_version` in sam-check.toml.
        #[arg(long)]
        java_version: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },

    /// Explain the classification of interfaces whose qualified name matches a pattern.
    ///
    /// Supports regex patterns (e.g. "com\.acme\..*Handler").
    Classify {
        /// Qualified-name regex pattern.
        pattern: String,

        /// Snapshot file (`.json` or packed `.bin`).
        snapshot: PathBuf,

        /// Case-insensitive pattern matching.
        #[arg(short = 'i', long)]
        case_insensitive: bool,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },

    /// Snapshot statistics: type breakdown, unresolved supertypes, candidates.
    Stats {
        /// Snapshot file (`.json` or packed `.bin`).
        snapshot: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },

    /// Convert a JSON snapshot into the packed binary form.
    Pack {
        /// Input JSON snapshot.
        input: PathBuf,

        /// Output path for the packed snapshot.
        output: PathBuf,
    },
}
