//! Records produced by one benchmark invocation.

/// Field separator of the benchmark's stdout and of both persisted tables.
pub const FIELD_SEPARATOR: char = '|';

/// Column names of the raw result table, in field order.
pub const COLUMN_NAMES: [&str; 5] = ["method", "madvise flag", "bytes", "duration", "unit"];

/// Method label carried by every error row.
pub const ERROR_METHOD: &str = "error";

/// One stdout line split on [`FIELD_SEPARATOR`].
///
/// Tokens are kept as text and unvalidated; a short or overlong line is only
/// rejected when the aggregator coerces the numeric columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub tokens: Vec<String>,
}

impl Measurement {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn method(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn advise(&self) -> Option<&str> {
        self.tokens.get(1).map(String::as_str)
    }
}

/// Failure reported by the benchmark on stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Measurement(Measurement),
    Error(ErrorRecord),
}

impl Record {
    pub fn is_error(&self) -> bool {
        matches!(self, Record::Error(_))
    }

    /// Flatten into the positional row shape shared by both variants.
    ///
    /// Error rows become `["error", message, "0", "0", ""]`, so the message
    /// sits in the advise column and the numeric columns coerce to zero.
    pub fn to_cells(&self) -> Vec<String> {
        match self {
            Record::Measurement(m) => m.tokens.clone(),
            Record::Error(e) => vec![
                ERROR_METHOD.to_string(),
                e.message.clone(),
                "0".to_string(),
                "0".to_string(),
                String::new(),
            ],
        }
    }
}

impl From<Measurement> for Record {
    fn from(m: Measurement) -> Self {
        Record::Measurement(m)
    }
}

impl From<ErrorRecord> for Record {
    fn from(e: ErrorRecord) -> Self {
        Record::Error(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_row_has_measurement_arity() {
        let record = Record::from(ErrorRecord {
            message: "segfault".to_string(),
        });
        let cells = record.to_cells();
        assert_eq!(cells.len(), COLUMN_NAMES.len());
        assert_eq!(cells, vec!["error", "segfault", "0", "0", ""]);
        assert!(record.is_error());
    }

    #[test]
    fn measurement_cells_are_tokens_verbatim() {
        let m = Measurement::new(["malloc", "madvise OFF", "1024", "3", "us"]);
        assert_eq!(m.method(), Some("malloc"));
        assert_eq!(m.advise(), Some("madvise OFF"));
        assert_eq!(Record::from(m.clone()).to_cells(), m.tokens);
    }

    #[test]
    fn short_measurement_keeps_its_short_shape() {
        let m = Measurement::new(["Don't know what to do with 41"]);
        assert_eq!(m.advise(), None);
        assert_eq!(Record::from(m).to_cells().len(), 1);
    }
}
