//! `ducklink` command-line entry point.
//!
//! Parses arguments, loads the configuration file, applies command-line
//! overrides, starts logging, then hands off to the selected command.
//!
//! ```text
//! main()
//!  └─ Cli::parse()
//!  └─ load_config_from()    -- optional TOML file, defaults if absent
//!  └─ apply_overrides()     -- --format / --log-level / --uppercase
//!  └─ init_logging()        -- stderr, RUST_LOG wins
//!  └─ commands::run()       -- output printed on stdout
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing::debug;

use ducklink_cli::commands::{self, Command, ConfigCommand, Context};
use ducklink_cli::config::{self, AppConfig};
use ducklink_cli::logging::{init_logging, resolve_level, LogLevel};
use ducklink_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "ducklink",
    version,
    about = "Encode, decode and inspect Ducklink bus messages"
)]
struct Cli {
    /// Config file (default: the platform config directory).
    #[arg(long, value_name = "FILE", global = true, env = "DUCKLINK_CONFIG")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Minimum log level (stderr).  `RUST_LOG` takes precedence.
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<LogLevel>,

    /// Print hex in upper case.
    #[arg(long, global = true)]
    uppercase: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// `config init` must work even when the existing file is broken.
    fn skips_config_file(&self) -> bool {
        matches!(self.command, Command::Config(ConfigCommand::Init(_)))
    }
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.uppercase {
        config.output.hex_uppercase = true;
    }
    config.logging.level = resolve_level(cli.log_level, &config.logging.level);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = config::resolve_path(cli.config.clone()).ok();
    let mut app_config = match &config_path {
        Some(path) if !cli.skips_config_file() => config::load_config_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        _ => AppConfig::default(),
    };
    apply_overrides(&mut app_config, &cli);

    init_logging(&app_config.logging.level);
    debug!(path = ?config_path, "configuration resolved");

    let ctx = Context {
        config: app_config,
        config_path,
    };
    let output = commands::run(cli.command, &ctx)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_encode_with_repeated_sets() {
        let cli = Cli::try_parse_from([
            "ducklink",
            "encode",
            "UpSpeedReport",
            "--set",
            "vtheta=15",
            "-s",
            "vx=-200",
        ])
        .expect("encode args should parse");

        match cli.command {
            Command::Encode(args) => {
                assert_eq!(args.kind, "UpSpeedReport");
                assert_eq!(args.assignments.len(), 2);
                assert_eq!(args.assignments[1].value, "-200");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_malformed_assignment() {
        let err = Cli::try_parse_from(["ducklink", "encode", "UpPlop", "--set", "decimal"])
            .expect_err("assignment without '=' should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ducklink", "decode", "0300000000", "--format", "json"])
            .expect("decode args should parse");
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Command::Decode(_)));
    }

    #[test]
    fn test_parses_config_init_force() {
        let cli = Cli::try_parse_from(["ducklink", "config", "init", "--force"])
            .expect("config init should parse");
        assert!(cli.skips_config_file());
    }

    #[test]
    fn test_overrides_replace_file_values() {
        // Arrange
        let cli = Cli::try_parse_from([
            "ducklink",
            "--format",
            "json",
            "--log-level",
            "warn",
            "--uppercase",
            "catalog",
        ])
        .expect("catalog args should parse");
        let mut cfg = AppConfig::default();

        // Act
        apply_overrides(&mut cfg, &cli);

        // Assert
        assert_eq!(cfg.output.format, OutputFormat::Json);
        assert!(cfg.output.hex_uppercase);
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn test_no_overrides_keep_file_values() {
        let cli = Cli::try_parse_from(["ducklink", "catalog"]).expect("catalog args should parse");
        let mut cfg = AppConfig::default();
        cfg.logging.level = "debug".to_string();

        apply_overrides(&mut cfg, &cli);

        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.output.format, OutputFormat::Text);
    }
}
