//! Print the data table of an XDI file as whitespace-separated columns,
//! optionally selecting columns by label.
//!
//! ```bash
//! cargo run --example xdidump -- test/data/cu_metal_rt.xdi -c energy -c mutrans
//! ```
use std::io::{self, prelude::*};
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use log::info;

use xdifile::XDIFile;

#[derive(Parser, Debug)]
#[command(name = "xdidump")]
#[command(about = "Dump the columns of an XDI file as a whitespace-separated table")]
struct Args {
    /// The XDI file to read, optionally gzip-compressed
    path: PathBuf,

    /// Only write the columns with these labels, in this order
    #[arg(short, long = "column")]
    columns: Vec<String>,

    /// Omit the header line of column labels
    #[arg(long)]
    no_header: bool,
}

fn select<'a>(
    xdi: &'a XDIFile,
    labels: &'a [String],
) -> Result<Vec<(&'a str, &'a [f64])>, String> {
    if labels.is_empty() {
        return Ok(xdi
            .columns()
            .iter()
            .zip(xdi.table().columns())
            .map(|(spec, values)| (spec.label.as_str(), values))
            .collect());
    }
    labels
        .iter()
        .map(|label| {
            let values = xdi.column_by_name(label).map_err(|e| e.to_string())?;
            Ok((label.as_str(), values))
        })
        .collect()
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let xdi = xdifile::open_file(&args.path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {e}", args.path.display());
        exit(1)
    });
    info!(
        "Read {} columns of {} points from {}",
        xdi.narrays(),
        xdi.npts(),
        args.path.display()
    );

    let columns = select(&xdi, &args.columns).unwrap_or_else(|e| {
        eprintln!("{e}");
        exit(1)
    });

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if !args.no_header {
        let labels: Vec<_> = columns.iter().map(|(label, _)| *label).collect();
        writeln!(out, "# {}", labels.join("\t"))?;
    }
    for i in 0..xdi.npts() {
        let row: Vec<String> = columns.iter().map(|(_, v)| v[i].to_string()).collect();
        writeln!(out, "{}", row.join("\t"))?;
    }
    out.flush()
}
