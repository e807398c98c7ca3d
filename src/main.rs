//! Cryptdatum CLI

use std::env;
use std::fs::File;
use std::io;
use std::path::Path;
use std::process;

use chrono::{DateTime, Utc};
use memmap2::Mmap;
use tracing::{debug, error, Level};

use cryptdatum::{decode_header, has_header, has_valid_header, DatumFlags, Header, HEADER_SIZE};

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let verbose = args.iter().any(|arg| arg == "-v");
    args.retain(|arg| arg != "-v");

    if verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(io::stderr)
            .init();
    }

    if args.len() < 2 {
        usage();
        process::exit(1);
    }

    let command = args[0].as_str();
    let path = Path::new(&args[1]);

    let ok = match command {
        "file-has-header" => probe_file(path, has_header),
        "file-has-valid-header" => probe_file(path, has_valid_header),
        "file-info" => cmd_file_info(path),
        _ => {
            eprintln!("Unknown command: {command}");
            usage();
            false
        }
    };

    if !ok {
        process::exit(1);
    }
}

fn usage() {
    eprintln!("cryptdatum v{}", env!("CARGO_PKG_VERSION"));
    eprintln!();
    eprintln!("Usage: cryptdatum [-v] <command> <file>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  file-has-header        Check whether a file starts with a cryptdatum header");
    eprintln!("  file-has-valid-header  Check whether the header also passes validation");
    eprintln!("  file-info              Decode the header and print its fields");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v    Write error diagnostics to stderr");
}

/// Map the file and run a header check over its bytes.
///
/// Probing never reads payload bytes through a copy; the check sees the
/// mapped file directly.
fn probe_file(path: &Path, check: fn(&[u8]) -> bool) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            // Open failures print regardless of verbosity.
            eprintln!("{}: {e}", path.display());
            return false;
        }
    };

    let len = match file.metadata() {
        Ok(meta) => meta.len(),
        Err(e) => {
            debug!("failed to stat {}: {e}", path.display());
            return false;
        }
    };

    // Nothing shorter than one header can match, and zero-length files
    // cannot be mapped at all.
    if len < HEADER_SIZE as u64 {
        debug!("{}: {len} bytes is shorter than a header", path.display());
        return false;
    }

    match unsafe { Mmap::map(&file) } {
        Ok(map) => check(&map),
        Err(e) => {
            debug!("failed to map {}: {e}", path.display());
            false
        }
    }
}

fn cmd_file_info(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            return false;
        }
    };

    match decode_header(&mut file) {
        Ok(header) => {
            print_header(&header);
            true
        }
        Err(e) => {
            error!("{}: {e}", path.display());
            false
        }
    }
}

fn print_header(header: &Header) {
    let unset = || "-".to_string();

    println!("CRYPTDATUM");
    println!("  version         {}", header.version);
    println!(
        "  created         {}",
        format_timestamp(header.timestamp)
    );
    println!(
        "  size            {} ({} bytes)",
        pretty_size(header.size),
        header.size
    );
    println!("  opc             {}", header.opc);
    println!(
        "  checksum        {}",
        header
            .declared_checksum()
            .map_or_else(unset, |c| format!("{c:#018x}"))
    );
    println!(
        "  compression     {}",
        header
            .declared_compression()
            .map_or_else(unset, |alg| alg.to_string())
    );
    println!(
        "  encryption      {}",
        header
            .declared_encryption()
            .map_or_else(unset, |alg| alg.to_string())
    );
    println!(
        "  signature       {}",
        header
            .declared_signature()
            .map_or_else(unset, |(ty, size)| format!("type {ty}, {size} bytes"))
    );
    println!(
        "  file ext        {}",
        if header.file_ext_str().is_empty() {
            unset()
        } else {
            header.file_ext_str()
        }
    );
    println!(
        "  custom          {}",
        if header.flags.contains(DatumFlags::CUSTOM) {
            hex::encode(header.custom)
        } else {
            unset()
        }
    );
    println!();
    println!("FLAGS           {:#06x}", header.flags.bits());

    let flag_names = [
        ("invalid", DatumFlags::INVALID),
        ("draft", DatumFlags::DRAFT),
        ("empty", DatumFlags::EMPTY),
        ("checksum", DatumFlags::CHECKSUM),
        ("opc", DatumFlags::OPC),
        ("compressed", DatumFlags::COMPRESSED),
        ("encrypted", DatumFlags::ENCRYPTED),
        ("extractable", DatumFlags::EXTRACTABLE),
        ("signed", DatumFlags::SIGNED),
        ("streamable", DatumFlags::STREAMABLE),
        ("custom", DatumFlags::CUSTOM),
        ("compromised", DatumFlags::COMPROMISED),
    ];
    for (name, flag) in flag_names {
        println!("  {name:<14}{}", header.flags.contains(flag));
    }
}

fn format_timestamp(ns: u64) -> String {
    let secs = (ns / 1_000_000_000) as i64;
    let nanos = (ns % 1_000_000_000) as u32;

    DateTime::<Utc>::from_timestamp(secs, nanos).map_or_else(
        || ns.to_string(),
        |ts| ts.format("%Y-%m-%dT%H:%M:%S%.9fZ").to_string(),
    )
}

fn pretty_size(size: u64) -> String {
    const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

    let mut value = size;
    let mut unit = 0;
    while value >= 1024 && unit < UNITS.len() - 1 {
        value /= 1024;
        unit += 1;
    }

    format!("{value} {}", UNITS[unit])
}
