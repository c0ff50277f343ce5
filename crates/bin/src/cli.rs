//! CLI argument definitions for the docshim binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Aligned table of document ids and fields
    Human,
}

/// Document-database style access to a plain REST backend
#[derive(Parser, Debug)]
#[command(name = "docshim")]
#[command(about = "docshim: document-database calls over a json-server style REST API")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub client: ClientArgs,

    /// Output format
    #[arg(long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options used to build the client
#[derive(clap::Args, Debug)]
pub struct ClientArgs {
    /// JSON config file with base_url, timeout_secs and singular_names
    #[arg(short, long, global = true, env = "DOCSHIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the REST backend. Overrides the config file.
    #[arg(short, long, global = true, env = "DOCSHIM_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, global = true)]
    pub timeout: Option<u64>,

    /// Singular name of a collection, as plural=singular. Repeatable.
    #[arg(long = "singular", global = true, value_parser = parse_singular)]
    pub singulars: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read one document
    Get(RefArgs),
    /// Read a collection
    List(RefArgs),
    /// Create or update a document
    Set(WriteArgs),
    /// Delete a document
    Delete(RefArgs),
    /// Append a document to a collection
    Add(WriteArgs),
    /// Check whether a document exists
    Exists(RefArgs),
    /// Build a query and read its results
    Query(QueryArgs),
    /// Show how segments map to a REST path, without any request
    Path(RefArgs),
}

/// Arguments naming a document or collection
#[derive(clap::Args, Debug)]
pub struct RefArgs {
    /// Path segments, e.g. `lists 4 items 9`
    #[arg(required = true, num_args = 1..)]
    pub segments: Vec<String>,
}

/// Arguments for commands that send a payload
#[derive(clap::Args, Debug)]
pub struct WriteArgs {
    /// Path segments, e.g. `lists 4 items 9`
    #[arg(required = true, num_args = 1..)]
    pub segments: Vec<String>,

    /// JSON payload
    #[arg(short, long, value_parser = parse_json)]
    pub data: Value,
}

/// Arguments for the query command
#[derive(clap::Args, Debug)]
pub struct QueryArgs {
    /// Collection path segments, e.g. `singles`
    #[arg(required = true, num_args = 1..)]
    pub segments: Vec<String>,

    /// Constraint as three values: field, operator and value. Repeatable.
    #[arg(long = "where", num_args = 3, value_names = ["FIELD", "SIGN", "VALUE"])]
    pub constraints: Vec<String>,
}

fn parse_singular(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((plural, singular)) if !plural.is_empty() && !singular.is_empty() => {
            Ok((plural.to_string(), singular.to_string()))
        }
        _ => Err(format!("expected plural=singular, got '{s}'")),
    }
}

fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {e}"))
}
