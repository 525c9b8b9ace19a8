use anyhow::Context as _;
use ducklink_core::compute_checksum;
use serde::Serialize;

use crate::commands::{ChecksumArgs, Context};
use crate::output::{format_hex, parse_hex, to_json, OutputFormat};

#[derive(Serialize)]
struct ChecksumOutput {
    length: usize,
    checksum: u16,
    /// The two checksum bytes in transmission order (little-endian).
    wire: String,
}

pub fn run(args: ChecksumArgs, ctx: &Context) -> anyhow::Result<String> {
    let bytes = parse_hex(&args.hex).context("invalid hex input")?;
    let checksum = compute_checksum(&bytes);
    let wire = format_hex(&checksum.to_le_bytes(), ctx.hex_uppercase());

    match ctx.format() {
        OutputFormat::Text if ctx.hex_uppercase() => Ok(format!("0x{checksum:04X} (wire {wire})")),
        OutputFormat::Text => Ok(format!("0x{checksum:04x} (wire {wire})")),
        OutputFormat::Json => to_json(&ChecksumOutput {
            length: bytes.len(),
            checksum,
            wire,
        }),
    }
}
