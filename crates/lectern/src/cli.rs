//! Clap derive structures for the `lectern` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lectern -- serve and inspect course content from a headless CMS
#[derive(Debug, Parser)]
#[command(
    name = "lectern",
    version,
    about = "Serve course content from a headless CMS",
    long_about = "Runs the course site (JSON API plus chapter and lesson pages) and\n\
        offers ad-hoc queries against the CMS delivery API.\n\n\
        CMS credentials come from CONTENTFUL_* environment variables or the\n\
        [contentful] table of the config file.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, env = "LECTERN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Query raw CMS entries of one content type
    #[command(alias = "q")]
    Query(QueryArgs),

    /// Show lesson metadata by slug
    Lesson {
        /// Lesson slug
        slug: String,
    },

    /// List quizzes
    Quizzes,

    /// Inspect configuration
    Config(ConfigArgs),
}

// ── Serve ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides server.bind)
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Port to listen on (overrides server.port)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}

// ── Query ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Content type id (e.g. lesson, chapter, quiz)
    pub content_type: String,

    /// Field equality filter, repeatable (e.g. --field slug=intro-to-git)
    #[arg(long = "field", short = 'f', value_parser = parse_key_val)]
    pub fields: Vec<(String, String)>,

    /// Maximum number of entries
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,

    /// Entries to skip
    #[arg(long)]
    pub skip: Option<u32>,

    /// Sort order (e.g. fields.title, -sys.createdAt)
    #[arg(long)]
    pub order: Option<String>,

    /// Link resolution depth (0-10)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub include: Option<u8>,

    /// Locale code
    #[arg(long)]
    pub locale: Option<String>,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty field name in '{raw}'"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved configuration (secrets redacted)
    Show,

    /// Print the config file path
    Path,
}
