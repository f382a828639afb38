use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod envinfo;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode typed values into network byte order.
    Encode(EncodeArgs),
    /// Decode typed values from bytes.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Envinfo(args) => envinfo::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Values to append, as type:literal (e.g. u16:0x1234 i8:-1 str:hello).
    #[arg(required = true, value_name = "TYPE:VALUE", allow_hyphen_values = true)]
    pub values: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input bytes as a hex string.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub hex: Option<String>,
    /// Read input bytes from a file.
    #[arg(long, conflicts_with = "hex")]
    pub file: Option<PathBuf>,
    /// Discard this many leading bytes before decoding.
    #[arg(long, default_value = "0")]
    pub offset: usize,
    /// Read fields positionally instead of consuming them.
    #[arg(long)]
    pub peek: bool,
    /// Field types in order (u8, i16, u32le, f64, str:N, ...).
    #[arg(required = true, value_name = "TYPE")]
    pub fields: Vec<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}
