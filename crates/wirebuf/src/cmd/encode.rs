use wirebuf_core::Buffer;

use crate::cmd::EncodeArgs;
use crate::exit::{overflow_error, CliResult, SUCCESS};
use crate::output::{print_encoded, OutputFormat, Placed};
use crate::value::Value;

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let values = args
        .values
        .iter()
        .map(|raw| raw.parse::<Value>())
        .collect::<CliResult<Vec<_>>>()?;

    let (buf, fields) = encode(values)?;
    tracing::debug!(fields = fields.len(), size = buf.size(), "encoded values");

    print_encoded(&fields, buf.as_slice(), format);
    Ok(SUCCESS)
}

/// Append every value to a fresh buffer, recording where each one landed.
pub(crate) fn encode(values: Vec<Value>) -> CliResult<(Buffer, Vec<Placed>)> {
    let capacity = values.iter().map(Value::wire_size).sum();
    let mut buf = Buffer::with_capacity(capacity);
    let mut offsets = Vec::with_capacity(values.len());

    for value in &values {
        offsets.push(buf.size());
        value.append_to(&mut buf);
    }

    let fields = values
        .into_iter()
        .zip(offsets)
        .map(|(value, offset)| {
            let wire = buf
                .read_string(value.wire_size(), offset)
                .map_err(|err| overflow_error("re-reading encoded value", err))?;
            Ok(Placed {
                offset,
                value,
                wire,
            })
        })
        .collect::<CliResult<Vec<_>>>()?;

    Ok((buf, fields))
}
