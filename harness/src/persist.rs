//! Writes the result and statistics tables as pipe-separated text.
//!
//! File names carry the host name so runs on different machines can share an
//! output directory. Existing files are overwritten.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;

use crate::aggregate::{ResultTable, StatisticsTable, THROUGHPUT_COLUMN};
use crate::record::{COLUMN_NAMES, FIELD_SEPARATOR};

const UNKNOWN_HOST: &str = "unknown-host";

/// Name of the machine running the sweep.
///
/// `HOSTNAME` when set, then the output of the `hostname` command.
pub fn host_name() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            Command::new("hostname")
                .output()
                .ok()
                .filter(|out| out.status.success())
                .and_then(|out| String::from_utf8(out.stdout).ok())
                .map(|out| out.trim().to_string())
                .filter(|value| !value.is_empty())
        })
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}

pub fn results_filename(host: &str) -> String {
    format!("mem_bench_{host}.csv")
}

pub fn statistics_filename(host: &str) -> String {
    format!("mem_bench_stat_{host}.csv")
}

/// Quote a cell only when it would otherwise break the row apart.
fn escape(cell: &str) -> Cow<'_, str> {
    if cell.contains([FIELD_SEPARATOR, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Shortest round-trip float text in the layout of Python's `repr`, which is
/// what earlier result files contain: `1.0`, `252.5`, `1e-07`, `1.5e+16`.
/// NaN becomes an empty cell.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        // `{:e}` gives e.g. "1e-7"; pad the exponent to two digits with a sign.
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) => {
                let exponent: i32 = exponent.parse().unwrap_or(0);
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exponent.abs())
            }
            None => text,
        };
    }

    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

fn write_row<W: Write, S: AsRef<str>>(out: &mut W, cells: &[S]) -> std::io::Result<()> {
    let mut sep = [0u8; 4];
    let sep = FIELD_SEPARATOR.encode_utf8(&mut sep);
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.write_all(sep.as_bytes())?;
        }
        out.write_all(escape(cell.as_ref()).as_bytes())?;
    }
    out.write_all(b"\n")
}

/// Raw table: an unnamed row-index column, the five record columns as
/// captured, then throughput.
pub fn write_results<W: Write>(out: &mut W, table: &ResultTable) -> std::io::Result<()> {
    let mut header = vec![""];
    header.extend(COLUMN_NAMES);
    header.push(THROUGHPUT_COLUMN);
    write_row(out, &header)?;

    for row in 0..table.len() {
        write_row(
            out,
            &[
                row.to_string().as_str(),
                table.method[row].as_str(),
                table.advise[row].as_str(),
                table.bytes_text[row].as_str(),
                table.duration_text[row].as_str(),
                table.unit[row].as_str(),
                format_float(table.throughput[row]).as_str(),
            ],
        )?;
    }
    Ok(())
}

pub fn write_statistics<W: Write>(out: &mut W, stats: &StatisticsTable) -> std::io::Result<()> {
    write_row(out, &[COLUMN_NAMES[0], COLUMN_NAMES[1], "mean", "median", "std"])?;
    for group in &stats.rows {
        write_row(
            out,
            &[
                group.method.as_str(),
                group.advise.as_str(),
                format_float(group.summary.mean).as_str(),
                format_float(group.summary.median).as_str(),
                format_float(group.summary.std).as_str(),
            ],
        )?;
    }
    Ok(())
}

fn write_file<F>(path: &Path, write: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out).with_context(|| format!("failed to write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

pub fn store_results(dir: &Path, host: &str, table: &ResultTable) -> anyhow::Result<PathBuf> {
    let path = dir.join(results_filename(host));
    write_file(&path, |out| write_results(out, table))?;
    log::info!("Results stored in {}", path.display());
    Ok(path)
}

pub fn store_statistics(dir: &Path, host: &str, stats: &StatisticsTable) -> anyhow::Result<PathBuf> {
    let path = dir.join(statistics_filename(host));
    write_file(&path, |out| write_statistics(out, stats))?;
    log::info!("Statistics stored in {}", path.display());
    Ok(path)
}
