use std::fs;

use bytes::Bytes;
use wirebuf_core::Buffer;

use crate::cmd::DecodeArgs;
use crate::exit::{hex_error, io_error, overflow_error, CliResult, SUCCESS};
use crate::output::{print_decoded, OutputFormat, Placed};
use crate::value::Field;

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let fields = args
        .fields
        .iter()
        .map(|raw| raw.parse::<Field>())
        .collect::<CliResult<Vec<_>>>()?;

    let mut buf = Buffer::from(load_input(&args)?);
    tracing::debug!(size = buf.size(), fields = fields.len(), peek = args.peek, "decoding");

    buf.discard(args.offset)
        .map_err(|err| overflow_error("--offset", err))?;

    let (placed, remaining) = if args.peek {
        peek(&buf, &fields, args.offset)?
    } else {
        consume(&mut buf, &fields, args.offset)?
    };

    print_decoded(&placed, &remaining, format);
    Ok(SUCCESS)
}

fn load_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    let text = args.hex.as_deref().unwrap_or_default();
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let compact = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(compact).map_err(|err| hex_error("--hex", err))
}

/// Pull each field off the head of `buf`. Returns what is left afterwards.
fn consume(buf: &mut Buffer, fields: &[Field], base: usize) -> CliResult<(Vec<Placed>, Bytes)> {
    let mut placed = Vec::with_capacity(fields.len());
    let mut offset = base;

    for (index, field) in fields.iter().enumerate() {
        let context = || format!("field {} ({})", index + 1, field.kind);
        let wire = buf
            .read_string(field.len, 0)
            .map_err(|err| overflow_error(&context(), err))?;
        let value = field
            .consume(buf)
            .map_err(|err| overflow_error(&context(), err))?;
        placed.push(Placed {
            offset,
            value,
            wire,
        });
        offset += field.len;
    }

    Ok((placed, buf.flush()))
}

/// Read each field positionally, leaving `buf` untouched.
fn peek(buf: &Buffer, fields: &[Field], base: usize) -> CliResult<(Vec<Placed>, Bytes)> {
    let mut placed = Vec::with_capacity(fields.len());
    let mut cursor = 0usize;

    for (index, field) in fields.iter().enumerate() {
        let context = || format!("field {} ({})", index + 1, field.kind);
        let wire = buf
            .read_string(field.len, cursor)
            .map_err(|err| overflow_error(&context(), err))?;
        let value = field
            .read(buf, cursor)
            .map_err(|err| overflow_error(&context(), err))?;
        placed.push(Placed {
            offset: base + cursor,
            value,
            wire,
        });
        cursor += field.len;
    }

    let remaining = buf
        .read_string(buf.size() - cursor, cursor)
        .map_err(|err| overflow_error("trailing bytes", err))?;
    Ok((placed, remaining))
}
