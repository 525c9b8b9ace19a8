use std::fmt::Write as _;

use ducklink_core::protocol::codec::ID_LEN;
use ducklink_core::schema::field_offset;
use ducklink_core::MessageKind;
use serde::Serialize;

use crate::commands::{parse_kind, CatalogArgs, Context};
use crate::output::{to_json, OutputFormat};

#[derive(Serialize)]
struct KindInfo {
    id: u8,
    name: &'static str,
    wire_len: usize,
    fields: Vec<FieldInfo>,
}

#[derive(Serialize)]
struct FieldInfo {
    name: &'static str,
    #[serde(rename = "type")]
    ty: String,
    /// Offset from the start of the message, id byte included.
    offset: usize,
    width: usize,
}

fn describe(kind: MessageKind) -> KindInfo {
    let specs = kind.fields();
    let fields = specs
        .iter()
        .enumerate()
        .map(|(i, spec)| FieldInfo {
            name: spec.name,
            ty: spec.ty.to_string(),
            offset: ID_LEN + field_offset(specs, i),
            width: spec.ty.width(),
        })
        .collect();
    KindInfo {
        id: kind.id(),
        name: kind.name(),
        wire_len: kind.wire_len(),
        fields,
    }
}

pub fn run(args: CatalogArgs, ctx: &Context) -> anyhow::Result<String> {
    let kinds = match args.kind.as_deref() {
        Some(raw) => vec![parse_kind(raw)?],
        None => MessageKind::ALL.to_vec(),
    };
    let infos: Vec<KindInfo> = kinds.into_iter().map(describe).collect();

    match ctx.format() {
        OutputFormat::Json => to_json(&infos),
        OutputFormat::Text => Ok(render_text(&infos)),
    }
}

fn render_text(infos: &[KindInfo]) -> String {
    let mut out = String::new();
    for (i, info) in infos.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{} (id {}, {} bytes)", info.name, info.id, info.wire_len);
        let width = info.fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
        for field in &info.fields {
            let _ = writeln!(
                out,
                "  @{:<3} {:<width$}  {}",
                field.offset, field.name, field.ty
            );
        }
    }
    out.trim_end().to_string()
}
