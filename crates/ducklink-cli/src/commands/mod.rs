//! Subcommands of the `ducklink` tool.
//!
//! Every command returns its rendered output as a `String`; printing is left
//! to `main` so the commands can be tested directly.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Subcommand};
use ducklink_core::MessageKind;

use crate::config::AppConfig;
use crate::output::OutputFormat;

pub mod catalog;
pub mod checksum;
pub mod config;
pub mod decode;
pub mod encode;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List message kinds with their id, wire length and field layout.
    Catalog(CatalogArgs),
    /// Build a message from field assignments and print its bytes as hex.
    Encode(EncodeArgs),
    /// Decode one message from hex and print its fields.
    Decode(DecodeArgs),
    /// Print the Fletcher-16 checksum of arbitrary bytes.
    Checksum(ChecksumArgs),
    /// Inspect or create the configuration file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Only show this kind (name or numeric id).
    pub kind: Option<String>,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Message kind, by catalog name (any case) or numeric id.
    pub kind: String,
    /// Field assignment; repeat for several fields.  Out-of-range values are
    /// clamped and long strings truncated, exactly as the setters do.
    #[arg(long = "set", short = 's', value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<Assignment>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Encoded message as hex.  Spaces, `:` and `-` are ignored.
    pub hex: String,
    /// Decode as this id instead of reading it from the first byte.
    #[arg(long)]
    pub id: Option<u8>,
}

#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// Bytes as hex.  Spaces, `:` and `-` are ignored.
    pub hex: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a config file with default values.
    Init(ConfigInitArgs),
    /// Print the effective configuration (file plus command-line overrides).
    Show,
    /// Print the config file location.
    Path,
}

#[derive(Args, Debug, Default)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// One `FIELD=VALUE` pair from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub field: String,
    pub value: String,
}

/// Parses `FIELD=VALUE`.  The value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok(Assignment {
            field: field.trim().to_string(),
            value: value.to_string(),
        }),
        _ => Err(format!("expected FIELD=VALUE, got `{raw}`")),
    }
}

/// Resolves a kind from its catalog name (any case) or numeric id.
///
/// # Errors
///
/// Fails for an id outside the catalog or a name that matches no kind.
pub fn parse_kind(raw: &str) -> anyhow::Result<MessageKind> {
    if let Ok(id) = raw.parse::<u8>() {
        return Ok(MessageKind::try_from(id)?);
    }
    match MessageKind::from_name(raw) {
        Some(kind) => Ok(kind),
        None => {
            let known: Vec<&str> = MessageKind::ALL.iter().map(|k| k.name()).collect();
            bail!("unknown message kind `{raw}` (known: {})", known.join(", "))
        }
    }
}

/// Settings every command runs with.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Effective configuration: file values with command-line overrides applied.
    pub config: AppConfig,
    /// Where the config file lives, if a location could be determined.
    pub config_path: Option<PathBuf>,
}

impl Context {
    pub fn format(&self) -> OutputFormat {
        self.config.output.format
    }

    pub fn hex_uppercase(&self) -> bool {
        self.config.output.hex_uppercase
    }
}

/// Runs `command` and returns what it wants printed on stdout.
///
/// # Errors
///
/// Propagates the command's failure, with context for the operator.
pub fn run(command: Command, ctx: &Context) -> anyhow::Result<String> {
    match command {
        Command::Catalog(args) => catalog::run(args, ctx),
        Command::Encode(args) => encode::run(args, ctx),
        Command::Decode(args) => decode::run(args, ctx),
        Command::Checksum(args) => checksum::run(args, ctx),
        Command::Config(cmd) => config::run(cmd, ctx),
    }
}
