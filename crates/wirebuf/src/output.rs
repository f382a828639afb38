use std::io::{IsTerminal, Write};

use bytes::Bytes;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::value::Value;

const ENCODED_SCHEMA: &str = "https://schemas.wirebuf.dev/cli/v1/encoded.schema.json";
const DECODED_SCHEMA: &str = "https://schemas.wirebuf.dev/cli/v1/decoded.schema.json";

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// A value together with where it sits in the buffer and its wire bytes.
#[derive(Debug, Clone)]
pub struct Placed {
    pub offset: usize,
    pub value: Value,
    pub wire: Bytes,
}

#[derive(Serialize)]
struct FieldOutput {
    offset: usize,
    #[serde(rename = "type")]
    kind: &'static str,
    value: serde_json::Value,
    hex: String,
}

#[derive(Serialize)]
struct EncodedOutput<'a> {
    schema_id: &'a str,
    size: usize,
    hex: String,
    fields: Vec<FieldOutput>,
}

#[derive(Serialize)]
struct DecodedOutput<'a> {
    schema_id: &'a str,
    consumed: usize,
    remaining: String,
    fields: Vec<FieldOutput>,
}

pub fn print_encoded(fields: &[Placed], wire: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = EncodedOutput {
                schema_id: ENCODED_SCHEMA,
                size: wire.len(),
                hex: hex::encode(wire),
                fields: field_outputs(fields),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            println!("{}", field_table(fields));
            println!("size={} hex={}", wire.len(), hex::encode(wire));
        }
        OutputFormat::Pretty => println!("{}", hex::encode(wire)),
        OutputFormat::Raw => print_raw(wire),
    }
}

pub fn print_decoded(fields: &[Placed], remaining: &[u8], format: OutputFormat) {
    let consumed: usize = fields.iter().map(|f| f.wire.len()).sum();
    match format {
        OutputFormat::Json => {
            let out = DecodedOutput {
                schema_id: DECODED_SCHEMA,
                consumed,
                remaining: hex::encode(remaining),
                fields: field_outputs(fields),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            println!("{}", field_table(fields));
            println!("consumed={consumed} remaining={}", hex::encode(remaining));
        }
        OutputFormat::Pretty => {
            for field in fields {
                println!(
                    "offset={} type={} value={} hex={}",
                    field.offset,
                    field.value.kind(),
                    field.value,
                    hex::encode(&field.wire)
                );
            }
            if !remaining.is_empty() {
                println!("remaining={}", hex::encode(remaining));
            }
        }
        OutputFormat::Raw => {
            for field in fields {
                println!("{}", field.value);
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn field_outputs(fields: &[Placed]) -> Vec<FieldOutput> {
    fields
        .iter()
        .map(|field| FieldOutput {
            offset: field.offset,
            kind: field.value.kind().name(),
            value: field.value.to_json(),
            hex: hex::encode(&field.wire),
        })
        .collect()
}

fn field_table(fields: &[Placed]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["OFFSET", "TYPE", "VALUE", "HEX"]);
    for field in fields {
        table.add_row(vec![
            field.offset.to_string(),
            field.value.kind().to_string(),
            field.value.to_string(),
            hex::encode(&field.wire),
        ]);
    }
    table
}
