use std::env;
use std::io;
use std::path;
use std::process;

use xdifile::prelude::*;
use xdifile::XDIFile;

fn summarize(xdi: &XDIFile) {
    println!("Path: {}", xdi.filename().unwrap_or("-"));
    println!("XDI version: {} {}", xdi.xdi_version(), xdi.extra_version());
    println!("Element: {} {} edge", xdi.element(), xdi.edge());
    match xdi.dspacing() {
        Some(d) => println!("Mono d-spacing: {d}"),
        None => println!("Mono d-spacing: unknown"),
    }
    if let Some(start) = xdi.start_time() {
        println!("Start time: {start}");
    }
    println!("Columns: {} x {} points", xdi.narrays(), xdi.npts());
    for (i, column) in xdi.columns().iter().enumerate() {
        let values = xdi.column_by_index(i + 1).unwrap_or_default();
        let (lo, hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        println!("  {:>2}: {:<12} [{lo}, {hi}]", i + 1, column.to_string());
    }
    println!("Metadata: {} fields", xdi.nmetadata());
    for param in xdi.metadata().iter() {
        println!("  {}: {}", param.name(), param.value());
    }
    if !xdi.comments().is_empty() {
        println!("Comments:");
        for line in xdi.comments().lines() {
            println!("  {line}");
        }
    }
    if xdi.has_warnings() {
        println!("Warnings: {}", xdi.warnings().len());
        for warning in xdi.warnings() {
            println!("  {warning}");
        }
    }
}

#[cfg(feature = "serde")]
fn write_json(xdi: &XDIFile) -> io::Result<()> {
    xdi.to_json_writer(io::stdout().lock())
        .map_err(io::Error::other)?;
    println!();
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn write_json(_xdi: &XDIFile) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "JSON output requires the `serde` feature",
    ))
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let path = match args.iter().find(|a| !a.starts_with("--")) {
        Some(p) => path::PathBuf::from(p),
        None => {
            eprintln!("Usage: xdifile <path> [--json]");
            process::exit(2);
        }
    };

    let xdi = match xdifile::open_file(&path) {
        Ok(xdi) => xdi,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", path.display());
            process::exit(1);
        }
    };

    if json {
        write_json(&xdi)
    } else {
        summarize(&xdi);
        Ok(())
    }
}
