use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::value::Kind;

pub fn run(args: VersionArgs) -> CliResult<i32> {
    println!("wirebuf {}", env!("CARGO_PKG_VERSION"));
    if args.extended {
        let types: Vec<&str> = Kind::ALL.iter().map(|kind| kind.name()).collect();
        println!("wire order: big-endian (host is {}-endian)", host_endian());
        println!("types: {}", types.join(" "));
    }
    Ok(SUCCESS)
}

pub(crate) fn host_endian() -> &'static str {
    if cfg!(target_endian = "big") {
        "big"
    } else {
        "little"
    }
}
