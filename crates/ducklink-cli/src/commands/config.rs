use anyhow::bail;

use crate::commands::{ConfigCommand, ConfigInitArgs, Context};
use crate::config::{save_config_to, AppConfig, ConfigError};
use crate::output::{to_json, OutputFormat};

pub fn run(command: ConfigCommand, ctx: &Context) -> anyhow::Result<String> {
    match command {
        ConfigCommand::Init(args) => init(args, ctx),
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => {
            let path = ctx.config_path.as_ref().ok_or(ConfigError::NoPlatformConfigDir)?;
            Ok(path.display().to_string())
        }
    }
}

fn init(args: ConfigInitArgs, ctx: &Context) -> anyhow::Result<String> {
    let path = ctx.config_path.as_ref().ok_or(ConfigError::NoPlatformConfigDir)?;
    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    save_config_to(&AppConfig::default(), path)?;
    Ok(format!("wrote {}", path.display()))
}

fn show(ctx: &Context) -> anyhow::Result<String> {
    match ctx.format() {
        OutputFormat::Text => Ok(toml::to_string_pretty(&ctx.config)?.trim_end().to_string()),
        OutputFormat::Json => to_json(&ctx.config),
    }
}
