//! Output formats and hex text handling shared by every command.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How command results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned, human-readable text.
    #[default]
    Text,
    /// One pretty-printed JSON document.
    Json,
}

/// Renders `value` as pretty JSON.
///
/// # Errors
///
/// Fails only if `value`'s `Serialize` impl does.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// ── Hex text ──────────────────────────────────────────────────────────────────

/// Formats bytes as contiguous hex digits.
pub fn format_hex(bytes: &[u8], uppercase: bool) -> String {
    if uppercase {
        hex::encode_upper(bytes)
    } else {
        hex::encode(bytes)
    }
}

/// Parses operator-typed hex into bytes.
///
/// Whitespace and the `:` / `-` separators used by common hex dumps are
/// ignored, as is a leading `0x`.  Case does not matter.
///
/// # Errors
///
/// Returns [`hex::FromHexError`] for an odd digit count or a non-hex character.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();
    hex::decode(digits)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
