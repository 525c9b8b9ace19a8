use std::fmt::Write as _;

use anyhow::Context as _;
use ducklink_core::{decode_any, decode_message, AnyMessage};
use tracing::warn;

use crate::commands::{Context, DecodeArgs};
use crate::output::{parse_hex, to_json, OutputFormat};

pub fn run(args: DecodeArgs, ctx: &Context) -> anyhow::Result<String> {
    let bytes = parse_hex(&args.hex).context("invalid hex input")?;
    let msg = match args.id {
        Some(id) => decode_any(id, &bytes),
        None => decode_message(&bytes),
    }
    .context("decode failed")?;

    if bytes.len() > msg.wire_len() {
        warn!(
            extra = bytes.len() - msg.wire_len(),
            "ignoring bytes after the {} message",
            msg.name()
        );
    }

    match ctx.format() {
        OutputFormat::Text => Ok(render_text(&msg)),
        OutputFormat::Json => to_json(&msg),
    }
}

/// Kind header followed by one aligned `name  value` line per field.
pub fn render_text(msg: &AnyMessage) -> String {
    let fields = msg.fields();
    let width = fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let mut out = format!("{} (id {}, {} bytes)", msg.name(), msg.id(), msg.wire_len());
    for (name, value) in &fields {
        let _ = write!(out, "\n  {name:<width$}  {value}");
    }
    out
}
