//! Console summary of the grouped throughput statistics.

use crate::aggregate::StatisticsTable;

fn cell(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Render the statistics table as aligned text, one line per group.
pub fn format_report(stats: &StatisticsTable, host: &str) -> String {
    let method_width = stats
        .rows
        .iter()
        .map(|g| g.method.chars().count())
        .chain(std::iter::once("Method".len()))
        .max()
        .unwrap_or(0);
    let advise_width = stats
        .rows
        .iter()
        .map(|g| g.advise.chars().count())
        .chain(std::iter::once("madvise".len()))
        .max()
        .unwrap_or(0);
    let rule_width = method_width + advise_width + 4 * 13;

    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "=".repeat(rule_width)));
    out.push_str(&format!("  Memory benchmark throughput on {host} (GB/s)\n"));
    out.push_str(&format!("{}\n", "=".repeat(rule_width)));
    out.push_str(&format!(
        "  {:mw$} {:aw$} {:>8} {:>12} {:>12} {:>12}\n",
        "Method",
        "madvise",
        "Samples",
        "Mean",
        "Median",
        "Std",
        mw = method_width,
        aw = advise_width,
    ));
    out.push_str(&format!("  {}\n", "-".repeat(rule_width - 2)));
    for group in &stats.rows {
        out.push_str(&format!(
            "  {:mw$} {:aw$} {:>8} {:>12} {:>12} {:>12}\n",
            group.method,
            group.advise,
            group.summary.count,
            cell(group.summary.mean),
            cell(group.summary.median),
            cell(group.summary.std),
            mw = method_width,
            aw = advise_width,
        ));
    }
    out
}

pub fn print_report(stats: &StatisticsTable, host: &str) {
    println!("{}", format_report(stats, host));
}
