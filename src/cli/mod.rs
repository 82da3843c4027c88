//! CLI command definitions for sitemap-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListFormat {
    /// One entry per line
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML document
    Yaml,
}

/// Sitemap URL configuration aggregator and export tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (bypasses tier merging)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a merged URL list by key (excluded_urls or custom_urls)
    List(ListArgs),

    /// Query every configured source and report its status
    Check,

    /// Render the merged custom URLs as a sitemap XML file
    Export(ExportArgs),

    /// Watch config and fragment files, re-exporting on change
    Watch,
}

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Which list to print; the recognized keys are part of the
    /// external contract
    pub key: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ListFormat::Text)]
    pub format: ListFormat,
}

/// Arguments for the `export` command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file; defaults to the configured output path, `-` writes
    /// to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Gzip the output (a `.gz` extension also enables compression)
    #[arg(long)]
    pub gzip: bool,

    /// Skip exclusion filtering and emit every custom URL
    #[arg(long)]
    pub include_excluded: bool,
}
