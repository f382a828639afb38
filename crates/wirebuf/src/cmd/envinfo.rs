use std::collections::BTreeMap;

use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;
use wirebuf_core::Buffer;

use crate::cmd::version::host_endian;
use crate::cmd::EnvinfoArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;
use crate::value::Kind;

const ENV_VARS: [&str; 3] = ["WIREBUF_FORMAT", "WIREBUF_LOG_FORMAT", "WIREBUF_LOG_LEVEL"];

// Written once in network order and once little-endian.
const SAMPLE: u32 = 0x0102_0304;

#[derive(Serialize)]
struct TypeWidth {
    #[serde(rename = "type")]
    kind: &'static str,
    width: Option<usize>,
}

#[derive(Serialize)]
struct EnvInfoOutput {
    version: &'static str,
    os: &'static str,
    arch: &'static str,
    host_endian: &'static str,
    /// Hex of `SAMPLE` appended with `append_u32`.
    network_sample: String,
    /// Hex of `SAMPLE` appended with `append_u32_le`.
    little_endian_sample: String,
    types: Vec<TypeWidth>,
    environment: BTreeMap<&'static str, Option<String>>,
}

impl EnvInfoOutput {
    fn collect() -> Self {
        let mut network = Buffer::with_capacity(4);
        network.append_u32(SAMPLE);
        let mut little = Buffer::with_capacity(4);
        little.append_u32_le(SAMPLE);

        Self {
            version: env!("CARGO_PKG_VERSION"),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            host_endian: host_endian(),
            network_sample: format!("{network:x}"),
            little_endian_sample: format!("{little:x}"),
            types: Kind::ALL
                .into_iter()
                .map(|kind| TypeWidth {
                    kind: kind.name(),
                    width: kind.width(),
                })
                .collect(),
            environment: ENV_VARS
                .into_iter()
                .map(|key| (key, std::env::var(key).ok()))
                .collect(),
        }
    }
}

pub fn run(_args: EnvinfoArgs, format: OutputFormat) -> CliResult<i32> {
    let output = EnvInfoOutput::collect();
    tracing::debug!(host_endian = output.host_endian, "collected environment");

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Table | OutputFormat::Pretty => print_pretty(&output),
        OutputFormat::Raw => println!("{}", output.network_sample),
    }
    Ok(SUCCESS)
}

fn print_pretty(output: &EnvInfoOutput) {
    println!("wirebuf {} on {}/{}", output.version, output.os, output.arch);
    println!("host byte order:  {}-endian", output.host_endian);
    println!("u32 0x{SAMPLE:08x} -> {} (network)", output.network_sample);
    println!("u32 0x{SAMPLE:08x} -> {} (u32le)", output.little_endian_sample);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["TYPE", "WIDTH"]);
    for entry in &output.types {
        let width = entry
            .width
            .map_or_else(|| "N".to_string(), |w| w.to_string());
        table.add_row(vec![entry.kind.to_string(), width]);
    }
    println!("{table}");

    for (key, value) in &output.environment {
        println!("{key:<20} {}", value.as_deref().unwrap_or("(not set)"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_show_both_byte_orders() {
        let output = EnvInfoOutput::collect();
        assert_eq!(output.network_sample, "01020304");
        assert_eq!(output.little_endian_sample, "04030201");
    }

    #[test]
    fn lists_every_type_with_its_width() {
        let json = serde_json::to_value(EnvInfoOutput::collect()).unwrap();
        let types = json["types"].as_array().unwrap();
        assert_eq!(types.len(), Kind::ALL.len());
        assert!(types.contains(&serde_json::json!({"type": "f64", "width": 8})));
        assert!(types.contains(&serde_json::json!({"type": "str", "width": null})));
    }
}
