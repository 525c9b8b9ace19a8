use ducklink_core::{encode_message, AnyMessage, FieldError, MessageKind};
use serde::Serialize;
use tracing::{debug, warn};

use crate::commands::{parse_kind, Assignment, Context, EncodeArgs};
use crate::output::{format_hex, to_json, OutputFormat};

#[derive(Serialize)]
struct EncodeOutput<'a> {
    hex: String,
    wire_len: usize,
    message: &'a AnyMessage,
}

pub fn run(args: EncodeArgs, ctx: &Context) -> anyhow::Result<String> {
    let kind = parse_kind(&args.kind)?;
    let msg = build_message(kind, &args.assignments)?;
    let bytes = encode_message(&msg);
    debug!(kind = %kind, bytes = bytes.len(), "encoded message");

    let hex = format_hex(&bytes, ctx.hex_uppercase());
    match ctx.format() {
        OutputFormat::Text => Ok(hex),
        OutputFormat::Json => to_json(&EncodeOutput {
            hex,
            wire_len: bytes.len(),
            message: &msg,
        }),
    }
}

/// Starts from the kind's default message and applies every assignment
/// through the clamping setters, in order.
///
/// A value that had to be clamped or truncated is logged at `warn` but is not
/// an error.
///
/// # Errors
///
/// Fails for a field name the kind does not have or a value that does not
/// parse as the field's type.
pub fn build_message(kind: MessageKind, assignments: &[Assignment]) -> anyhow::Result<AnyMessage> {
    let mut msg = kind.default_message();
    for assignment in assignments {
        let spec = kind
            .fields()
            .iter()
            .find(|spec| spec.name == assignment.field)
            .ok_or_else(|| FieldError::UnknownField {
                kind: kind.name(),
                field: assignment.field.clone(),
            })?;

        let requested = spec.ty.parse(&assignment.value)?;
        msg.set_field(spec.name, requested.clone())?;

        if let Some(stored) = msg.field(spec.name) {
            if stored != requested {
                warn!(
                    field = spec.name,
                    requested = %requested,
                    stored = %stored,
                    "value adjusted to fit {}",
                    spec.ty
                );
            }
        }
    }
    Ok(msg)
}
