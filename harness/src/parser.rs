//! Turns one invocation's captured output into records.

use crate::invoker::RawOutput;
use crate::record::{ErrorRecord, Measurement, Record, FIELD_SEPARATOR};

/// Diagnostic pointer dump the benchmark prints after every run.
const POINTER_DUMP_MARKER: &str = "p: 0x";

/// Parse captured output.
///
/// Any stderr content means failure: the result is a single error record with
/// the trimmed stderr text and stdout is not looked at. Otherwise every
/// non-empty stdout line that is not a pointer dump becomes one measurement.
/// Output with neither yields no records at all.
pub fn parse_output(output: &RawOutput) -> Vec<Record> {
    if !output.stderr.is_empty() {
        let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return vec![Record::Error(ErrorRecord { message })];
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .filter(|line| !line.contains(POINTER_DUMP_MARKER))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

pub fn parse_line(line: &str) -> Record {
    Record::Measurement(Measurement::new(line.split(FIELD_SEPARATOR)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(stdout: &str, stderr: &str) -> RawOutput {
        RawOutput {
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    #[test]
    fn splits_measurement_line_into_fields() {
        let records = parse_output(&output(
            "mmap+loop_set(double)|madvise ON|4096|17|us\n",
            "",
        ));
        assert_eq!(
            records,
            vec![Record::Measurement(Measurement::new([
                "mmap+loop_set(double)",
                "madvise ON",
                "4096",
                "17",
                "us",
            ]))]
        );
    }

    #[test]
    fn drops_pointer_dump_lines() {
        let records = parse_output(&output("p: 0x7fec95afc000\n", ""));
        assert!(records.is_empty());

        let records = parse_output(&output(
            "malloc|madvise OFF|1048576|12|us\np: 0x7fec95afc000\n",
            "",
        ));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn stderr_wins_over_stdout() {
        let records = parse_output(&output("malloc|madvise OFF|1|1|us\n", "segfault\n"));
        assert_eq!(
            records,
            vec![Record::Error(ErrorRecord {
                message: "segfault".to_string()
            })]
        );
    }

    #[test]
    fn stderr_only_yields_single_error() {
        let records = parse_output(&output("", "segfault\n"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].to_cells(), vec!["error", "segfault", "0", "0", ""]);
    }

    #[test]
    fn empty_output_yields_nothing() {
        assert!(parse_output(&output("", "")).is_empty());
        assert!(parse_output(&output("\n\n   \n", "")).is_empty());
    }

    #[test]
    fn malformed_line_is_passed_through_unvalidated() {
        let records = parse_output(&output("Don't know what to do with 41\np: 0\n", ""));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].to_cells(), vec!["Don't know what to do with 41"]);
    }

    #[test]
    fn crlf_and_padding_are_trimmed() {
        let records = parse_output(&output("  memset|madvise ON|8|2|us \r\n", ""));
        assert_eq!(
            records[0].to_cells(),
            vec!["memset", "madvise ON", "8", "2", "us"]
        );
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let records = parse_output(&RawOutput {
            stdout: Vec::new(),
            stderr: b"bad \xff byte\n".to_vec(),
        });
        assert_eq!(records[0].to_cells()[1], "bad \u{fffd} byte");
    }

    #[test]
    fn multiple_lines_keep_order() {
        let records = parse_output(&output("a|x|1|1|us\nb|y|2|2|us\n", ""));
        let methods: Vec<_> = records
            .iter()
            .map(|r| r.to_cells()[0].clone())
            .collect();
        assert_eq!(methods, vec!["a", "b"]);
    }
}
