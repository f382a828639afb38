//! Typed values as written on the command line.
//!
//! Encoding takes `type:literal` pairs (`u16:0x1234`, `i8:-1`, `str:hello`).
//! Decoding takes bare type names, with `str:N` for N raw bytes.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use wirebuf_core::{Buffer, BufferOverflow};

use crate::exit::{CliError, CliResult, USAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    U32Le,
    I64,
    U64,
    F32,
    F64,
    Str,
}

impl Kind {
    pub const ALL: [Kind; 13] = [
        Kind::Bool,
        Kind::I8,
        Kind::U8,
        Kind::I16,
        Kind::U16,
        Kind::I32,
        Kind::U32,
        Kind::U32Le,
        Kind::I64,
        Kind::U64,
        Kind::F32,
        Kind::F64,
        Kind::Str,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::U8 => "u8",
            Kind::I16 => "i16",
            Kind::U16 => "u16",
            Kind::I32 => "i32",
            Kind::U32 => "u32",
            Kind::U32Le => "u32le",
            Kind::I64 => "i64",
            Kind::U64 => "u64",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Str => "str",
        }
    }

    /// Wire width, or `None` for raw byte strings.
    pub fn width(self) -> Option<usize> {
        match self {
            Kind::Bool | Kind::I8 | Kind::U8 => Some(1),
            Kind::I16 | Kind::U16 => Some(2),
            Kind::I32 | Kind::U32 | Kind::U32Le | Kind::F32 => Some(4),
            Kind::I64 | Kind::U64 | Kind::F64 => Some(8),
            Kind::Str => None,
        }
    }
}

impl FromStr for Kind {
    type Err = CliError;

    fn from_str(s: &str) -> CliResult<Self> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CliError::new(USAGE, format!("unknown type: {s}")))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    U32Le(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(Bytes),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) => Kind::I8,
            Value::U8(_) => Kind::U8,
            Value::I16(_) => Kind::I16,
            Value::U16(_) => Kind::U16,
            Value::I32(_) => Kind::I32,
            Value::U32(_) => Kind::U32,
            Value::U32Le(_) => Kind::U32Le,
            Value::I64(_) => Kind::I64,
            Value::U64(_) => Kind::U64,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Str(_) => Kind::Str,
        }
    }

    /// Number of bytes this value occupies once appended.
    pub fn wire_size(&self) -> usize {
        match self {
            Value::Str(bytes) => bytes.len(),
            other => other.kind().width().unwrap_or(0),
        }
    }

    pub fn append_to(&self, buf: &mut Buffer) {
        match self {
            Value::Bool(v) => buf.append_bool(*v),
            Value::I8(v) => buf.append_i8(*v),
            Value::U8(v) => buf.append_u8(*v),
            Value::I16(v) => buf.append_i16(*v),
            Value::U16(v) => buf.append_u16(*v),
            Value::I32(v) => buf.append_i32(*v),
            Value::U32(v) => buf.append_u32(*v),
            Value::U32Le(v) => buf.append_u32_le(*v),
            Value::I64(v) => buf.append_i64(*v),
            Value::U64(v) => buf.append_u64(*v),
            Value::F32(v) => buf.append_f32(*v),
            Value::F64(v) => buf.append_f64(*v),
            Value::Str(v) => buf.append_string(v),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(v) => (*v).into(),
            Value::I8(v) => (*v).into(),
            Value::U8(v) => (*v).into(),
            Value::I16(v) => (*v).into(),
            Value::U16(v) => (*v).into(),
            Value::I32(v) => (*v).into(),
            Value::U32(v) | Value::U32Le(v) => (*v).into(),
            Value::I64(v) => (*v).into(),
            Value::U64(v) => (*v).into(),
            Value::F32(v) => (*v).into(),
            Value::F64(v) => (*v).into(),
            Value::Str(v) => hex::encode(v).into(),
        }
    }
}

impl FromStr for Value {
    type Err = CliError;

    fn from_str(s: &str) -> CliResult<Self> {
        let (kind, literal) = s
            .split_once(':')
            .ok_or_else(|| CliError::new(USAGE, format!("expected type:value, got {s}")))?;
        let kind: Kind = kind.parse()?;
        let bad = || CliError::new(USAGE, format!("invalid {kind} literal: {literal}"));

        let value = match kind {
            Kind::Bool => Value::Bool(parse_bool(literal).ok_or_else(bad)?),
            Kind::I8 => Value::I8(parse_int(literal).ok_or_else(bad)?),
            Kind::U8 => Value::U8(parse_int(literal).ok_or_else(bad)?),
            Kind::I16 => Value::I16(parse_int(literal).ok_or_else(bad)?),
            Kind::U16 => Value::U16(parse_int(literal).ok_or_else(bad)?),
            Kind::I32 => Value::I32(parse_int(literal).ok_or_else(bad)?),
            Kind::U32 => Value::U32(parse_int(literal).ok_or_else(bad)?),
            Kind::U32Le => Value::U32Le(parse_int(literal).ok_or_else(bad)?),
            Kind::I64 => Value::I64(parse_int(literal).ok_or_else(bad)?),
            Kind::U64 => Value::U64(parse_int(literal).ok_or_else(bad)?),
            Kind::F32 => Value::F32(literal.trim().parse().map_err(|_| bad())?),
            Kind::F64 => Value::F64(literal.trim().parse().map_err(|_| bad())?),
            Kind::Str => Value::Str(Bytes::copy_from_slice(literal.as_bytes())),
        };
        Ok(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::U32(v) | Value::U32Le(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Str(v) => match std::str::from_utf8(v) {
                Ok(text) => write!(f, "{text:?}"),
                Err(_) => write!(f, "0x{}", hex::encode(v)),
            },
        }
    }
}

/// A field to pull out of a buffer: a scalar type, or `str:N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub kind: Kind,
    pub len: usize,
}

impl Field {
    /// Decode this field at `offset` without touching the buffer.
    pub fn read(&self, buf: &Buffer, offset: usize) -> Result<Value, BufferOverflow> {
        let value = match self.kind {
            Kind::Bool => Value::Bool(buf.read_bool(offset)?),
            Kind::I8 => Value::I8(buf.read_i8(offset)?),
            Kind::U8 => Value::U8(buf.read_u8(offset)?),
            Kind::I16 => Value::I16(buf.read_i16(offset)?),
            Kind::U16 => Value::U16(buf.read_u16(offset)?),
            Kind::I32 => Value::I32(buf.read_i32(offset)?),
            Kind::U32 => Value::U32(buf.read_u32(offset)?),
            Kind::U32Le => Value::U32Le(buf.read_u32_le(offset)?),
            Kind::I64 => Value::I64(buf.read_i64(offset)?),
            Kind::U64 => Value::U64(buf.read_u64(offset)?),
            Kind::F32 => Value::F32(buf.read_f32(offset)?),
            Kind::F64 => Value::F64(buf.read_f64(offset)?),
            Kind::Str => Value::Str(buf.read_string(self.len, offset)?),
        };
        Ok(value)
    }

    /// Decode this field from the head of the buffer, removing its bytes.
    pub fn consume(&self, buf: &mut Buffer) -> Result<Value, BufferOverflow> {
        let value = match self.kind {
            Kind::Bool => Value::Bool(buf.consume_bool()?),
            Kind::I8 => Value::I8(buf.consume_i8()?),
            Kind::U8 => Value::U8(buf.consume_u8()?),
            Kind::I16 => Value::I16(buf.consume_i16()?),
            Kind::U16 => Value::U16(buf.consume_u16()?),
            Kind::I32 => Value::I32(buf.consume_i32()?),
            Kind::U32 => Value::U32(buf.consume_u32()?),
            Kind::U32Le => Value::U32Le(buf.consume_u32_le()?),
            Kind::I64 => Value::I64(buf.consume_i64()?),
            Kind::U64 => Value::U64(buf.consume_u64()?),
            Kind::F32 => Value::F32(buf.consume_f32()?),
            Kind::F64 => Value::F64(buf.consume_f64()?),
            Kind::Str => Value::Str(buf.consume_string(self.len)?),
        };
        Ok(value)
    }
}

impl FromStr for Field {
    type Err = CliError;

    fn from_str(s: &str) -> CliResult<Self> {
        let (name, len) = match s.split_once(':') {
            Some((name, len)) => (name, Some(len)),
            None => (s, None),
        };
        let kind: Kind = name.parse()?;

        match (kind.width(), len) {
            (Some(width), None) => Ok(Field { kind, len: width }),
            (None, Some(len)) => {
                let len = len
                    .trim()
                    .parse()
                    .map_err(|_| CliError::new(USAGE, format!("invalid length in {s}")))?;
                Ok(Field { kind, len })
            }
            (None, None) => Err(CliError::new(USAGE, format!("{kind} needs a length ({kind}:N)"))),
            (Some(_), Some(_)) => Err(CliError::new(
                USAGE,
                format!("{kind} has a fixed width, drop the length in {s}"),
            )),
        }
    }
}

fn parse_bool(literal: &str) -> Option<bool> {
    match literal.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Decimal or `0x` hex, optionally negative, range-checked against `T`.
fn parse_int<T: TryFrom<i128>>(literal: &str) -> Option<T> {
    let literal = literal.trim();
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let (radix, digits) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    // The std parsers take their own sign; only the one stripped above is allowed.
    if !digits.starts_with(|c: char| c.is_ascii_hexdigit()) {
        return None;
    }
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    let value = if negative {
        magnitude.checked_neg()?
    } else {
        magnitude
    };
    T::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_literals() {
        assert_eq!("u16:0x1234".parse::<Value>().unwrap(), Value::U16(0x1234));
        assert_eq!("i8:-1".parse::<Value>().unwrap(), Value::I8(-1));
        assert_eq!("u64:18446744073709551615".parse::<Value>().unwrap(), Value::U64(u64::MAX));
        assert_eq!("i64:-0x10".parse::<Value>().unwrap(), Value::I64(-16));
        assert_eq!("bool:true".parse::<Value>().unwrap(), Value::Bool(true));
        assert_eq!("f64:-2.5".parse::<Value>().unwrap(), Value::F64(-2.5));
        assert_eq!(
            "str:a:b".parse::<Value>().unwrap(),
            Value::Str(Bytes::from_static(b"a:b"))
        );
    }

    #[test]
    fn rejects_out_of_range_and_unknown() {
        assert_eq!("u8:256".parse::<Value>().unwrap_err().code, USAGE);
        assert_eq!("i8:128".parse::<Value>().unwrap_err().code, USAGE);
        assert_eq!("u16:-1".parse::<Value>().unwrap_err().code, USAGE);
        assert_eq!("u128:1".parse::<Value>().unwrap_err().code, USAGE);
        assert_eq!("1234".parse::<Value>().unwrap_err().code, USAGE);
    }

    #[test]
    fn rejects_repeated_or_misplaced_signs() {
        for literal in ["u8:--5", "i8:0x-5", "i16:+7", "u32:-+1", "i8:- 1"] {
            assert_eq!(literal.parse::<Value>().unwrap_err().code, USAGE, "{literal}");
        }
        let huge = "i64:--170141183460469231731687303715884105728";
        assert_eq!(huge.parse::<Value>().unwrap_err().code, USAGE);
        assert_eq!(parse_int::<i128>("-170141183460469231731687303715884105727"), Some(-i128::MAX));
        assert_eq!(parse_int::<i64>("-0x8000000000000000"), Some(i64::MIN));
    }

    #[test]
    fn parses_fields() {
        assert_eq!(
            "u32".parse::<Field>().unwrap(),
            Field { kind: Kind::U32, len: 4 }
        );
        assert_eq!(
            "str:5".parse::<Field>().unwrap(),
            Field { kind: Kind::Str, len: 5 }
        );
        assert!("str".parse::<Field>().is_err());
        assert!("u8:3".parse::<Field>().is_err());
    }

    #[test]
    fn append_then_consume_each_kind() {
        let values = [
            "bool:1", "i8:-5", "u8:200", "i16:-300", "u16:65535", "i32:-70000", "u32:0xdeadbeef",
            "u32le:0x01020304", "i64:-1", "u64:42", "f32:1.5", "f64:0.1", "str:hey",
        ];
        let mut buf = Buffer::new();
        let parsed: Vec<Value> = values.iter().map(|v| v.parse().unwrap()).collect();
        for value in &parsed {
            value.append_to(&mut buf);
        }
        let total: usize = parsed.iter().map(Value::wire_size).sum();
        assert_eq!(buf.size(), total);

        for value in &parsed {
            let field = Field {
                kind: value.kind(),
                len: value.wire_size(),
            };
            assert_eq!(&field.read(&buf, 0).unwrap(), value);
            assert_eq!(&field.consume(&mut buf).unwrap(), value);
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn consume_past_end_overflows() {
        let mut buf = Buffer::from(&[0x01]);
        let field: Field = "u16".parse().unwrap();
        assert_eq!(field.consume(&mut buf), Err(BufferOverflow));
        assert_eq!(buf.size(), 1);
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::I8(-1).to_string(), "-1");
        assert_eq!(Value::Str(Bytes::from_static(b"hi")).to_string(), "\"hi\"");
        assert_eq!(Value::Str(Bytes::from_static(&[0xFF])).to_string(), "0xff");
        assert_eq!(Value::U16(0x1234).to_json(), serde_json::json!(4660));
    }
}
