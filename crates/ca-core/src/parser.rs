//! Monitor log validation and parsing.
//!
//! A log is plain text with one header line followed by comma-separated
//! numeric rows. Lines starting with `#` are comments and may appear anywhere.
//!
//! # Validation Order
//!
//! 1. Reject files holding more than one monitoring session
//! 2. Require at least three non-empty lines
//! 3. Require the first non-comment line to be a known header
//! 4. Parse every data row with enough fields; short rows are skipped
//! 5. Require at least one parsed row

use std::num::ParseFloatError;

use thiserror::Error;

use crate::series::{Sample, Series};

/// Marker written by the monitor at the start of each session.
pub const SESSION_MARKER: &str = "New dual-channel monitoring session started at";

/// Header of a dual-channel log.
pub const DUAL_CHANNEL_HEADER: &str = "UTC Timestamp, Run Time (Seconds), Channel 1 Current (mA), Channel 2 Current (mA), Channel 1 Integral (mC), Channel 2 Integral (mC)";

/// Header of a legacy single-channel log.
pub const SINGLE_CHANNEL_HEADER: &str =
    "UTC Timestamp, Run Time (Seconds), Current (mA), Integral Value (mC)";

/// Minimum number of non-empty lines in a usable file.
const MIN_LINES: usize = 3;

/// Errors raised while validating or parsing a log.
///
/// Every variant identifies the rule that failed. A failed parse never
/// produces a partial [`Series`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The file contains more than one monitoring session (append mode).
    #[error(
        "file contains {sessions} monitoring sessions (append mode); only single-session files are supported"
    )]
    MultiSession { sessions: usize },

    /// Too few non-empty lines to hold a header and data.
    #[error("file content is incomplete: {lines} non-empty lines, at least 3 required")]
    IncompleteFile { lines: usize },

    /// The header matches neither known layout.
    #[error("incorrect file header format: {found:?}")]
    HeaderMismatch { found: String },

    /// A numeric field could not be parsed.
    #[error("invalid number {value:?} at line {line}, column {column}")]
    InvalidField {
        line: usize,
        column: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// No data rows survived filtering.
    #[error("no valid data rows found in file")]
    EmptyData,
}

/// Column layout selected by the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    DualChannel,
    SingleChannel,
}

impl Layout {
    fn from_header(header: &str) -> Option<Self> {
        if header != DUAL_CHANNEL_HEADER && header != SINGLE_CHANNEL_HEADER {
            return None;
        }
        if header.contains("Channel 1") && header.contains("Channel 2") {
            Some(Self::DualChannel)
        } else {
            Some(Self::SingleChannel)
        }
    }

    const fn min_fields(self) -> usize {
        match self {
            Self::DualChannel => 6,
            Self::SingleChannel => 4,
        }
    }

    fn sample(self, fields: &[&str], line: usize) -> Result<Sample, ParseError> {
        let number = |column: usize| parse_field(fields[column], line, column);
        match self {
            Self::DualChannel => Ok(Sample {
                timestamp: number(0)?,
                runtime: number(1)?,
                channel1_current: number(2)?,
                channel2_current: number(3)?,
                channel1_integral: number(4)?,
                channel2_integral: number(5)?,
            }),
            Self::SingleChannel => Ok(Sample {
                timestamp: number(0)?,
                runtime: number(1)?,
                channel1_current: number(2)?,
                channel2_current: 0.0,
                channel1_integral: number(3)?,
                channel2_integral: 0.0,
            }),
        }
    }
}

fn parse_field(value: &str, line: usize, column: usize) -> Result<f64, ParseError> {
    value
        .parse::<f64>()
        .map_err(|source| ParseError::InvalidField {
            line,
            column: column + 1,
            value: value.to_string(),
            source,
        })
}

/// Parses raw log text into a [`Series`].
pub fn parse(raw: &str) -> Result<Series, ParseError> {
    let sessions = raw.matches(SESSION_MARKER).count();
    if sessions > 1 {
        return Err(ParseError::MultiSession { sessions });
    }

    // (1-based line number, trimmed text)
    let lines: Vec<(usize, &str)> = raw
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();
    if lines.len() < MIN_LINES {
        return Err(ParseError::IncompleteFile { lines: lines.len() });
    }

    let mut records = lines.into_iter().filter(|(_, line)| !line.starts_with('#'));
    let Some((_, header)) = records.next() else {
        return Err(ParseError::HeaderMismatch {
            found: String::new(),
        });
    };
    let layout = Layout::from_header(header).ok_or_else(|| ParseError::HeaderMismatch {
        found: header.to_string(),
    })?;

    let mut samples = Vec::new();
    let mut skipped = 0usize;
    for (line_no, line) in records {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < layout.min_fields() {
            skipped += 1;
            continue;
        }
        samples.push(layout.sample(&fields, line_no)?);
    }

    if skipped > 0 {
        tracing::debug!(skipped, "skipped rows with too few fields");
    }
    if let Some(pair) = samples.windows(2).find(|w| w[1].timestamp < w[0].timestamp) {
        tracing::warn!(
            previous = pair[0].timestamp,
            next = pair[1].timestamp,
            "timestamps are not monotonic; interpolation falls back to the nearest sample"
        );
    }

    let dual = layout == Layout::DualChannel;
    let series = Series::new(samples, dual).ok_or(ParseError::EmptyData)?;
    tracing::debug!(
        samples = series.len(),
        dual_channel = dual,
        "parsed current record"
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual(rows: &[&str]) -> String {
        let mut text = format!("{DUAL_CHANNEL_HEADER}\n");
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    #[test]
    fn parses_dual_channel_rows_in_file_order() {
        let text = dual(&[
            "100.0, 0.0, 1.0, 2.0, 0.0, 0.0",
            "102.0, 2.0, 1.0, 2.0, 2.0, 4.0",
        ]);
        let series = parse(&text).unwrap();

        assert!(series.is_dual_channel());
        assert_eq!(series.len(), 2);
        assert_eq!(series.samples()[1].channel2_integral, 4.0);
        assert_eq!(series.start_timestamp(), 100.0);
        assert_eq!(series.end_timestamp(), 102.0);
        assert_eq!(series.total_runtime(), 2.0);
    }

    #[test]
    fn single_channel_rows_zero_second_channel() {
        let text = format!(
            "{SINGLE_CHANNEL_HEADER}\n10.0,0.0,0.5,0.0\n11.0,1.0,0.6,0.55\n12.0,2.0,0.7,1.2\n"
        );
        let series = parse(&text).unwrap();

        assert!(!series.is_dual_channel());
        assert_eq!(series.len(), 3);
        for sample in series.samples() {
            assert_eq!(sample.channel2_current, 0.0);
            assert_eq!(sample.channel2_integral, 0.0);
        }
        assert_eq!(series.samples()[2].channel1_integral, 1.2);
    }

    #[test]
    fn comments_are_ignored_anywhere() {
        let text = format!(
            "# New dual-channel monitoring session started at 2025-07-16 03:55:06\n\
             # device: monitor-01\n\
             {DUAL_CHANNEL_HEADER}\n\
             100.0,0.0,1.0,2.0,0.0,0.0\n\
             # pause\n\
             101.0,1.0,1.0,2.0,1.0,2.0\n"
        );
        let series = parse(&text).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn windows_line_endings_and_padding_accepted() {
        let text = format!("  {DUAL_CHANNEL_HEADER}  \r\n100.0 ,0.0, 1.0 ,2.0,0.0,0.0\r\n\r\n101.0,1.0,1.0,2.0,1.0,2.0\r\n");
        let series = parse(&text).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn two_session_markers_rejected() {
        let text = format!(
            "# {SESSION_MARKER} 2025-07-16 03:55:06\n\
             {DUAL_CHANNEL_HEADER}\n\
             100.0,0.0,1.0,2.0,0.0,0.0\n\
             # {SESSION_MARKER} 2025-07-16 04:10:00\n\
             {DUAL_CHANNEL_HEADER}\n\
             200.0,0.0,1.0,2.0,0.0,0.0\n"
        );
        assert_eq!(parse(&text), Err(ParseError::MultiSession { sessions: 2 }));
    }

    #[test]
    fn too_few_lines_is_incomplete() {
        let text = format!("{DUAL_CHANNEL_HEADER}\n\n100.0,0.0,1.0,2.0,0.0,0.0\n");
        assert_eq!(parse(&text), Err(ParseError::IncompleteFile { lines: 2 }));
    }

    #[test]
    fn header_one_character_off_rejected() {
        let header = DUAL_CHANNEL_HEADER.replace("(mC)", "(mc)");
        let text = format!("{header}\n100.0,0.0,1.0,2.0,0.0,0.0\n101.0,1.0,1.0,2.0,1.0,2.0\n");
        assert_eq!(
            parse(&text),
            Err(ParseError::HeaderMismatch { found: header })
        );

        let header = SINGLE_CHANNEL_HEADER.replacen("UTC", "UTc", 1);
        let text = format!("{header}\n10.0,0.0,0.5,0.0\n11.0,1.0,0.6,0.55\n");
        assert!(matches!(
            parse(&text),
            Err(ParseError::HeaderMismatch { .. })
        ));
    }

    #[test]
    fn comment_only_file_has_no_header() {
        let text = "# a\n# b\n# c\n";
        assert_eq!(
            parse(text),
            Err(ParseError::HeaderMismatch {
                found: String::new()
            })
        );
    }

    #[test]
    fn short_rows_skipped_without_aborting() {
        let text = dual(&[
            "100.0,0.0,1.0,2.0,0.0,0.0",
            "101.0,1.0,1.0",
            "102.0,2.0,1.0,2.0,2.0,4.0",
        ]);
        let series = parse(&text).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.end_timestamp(), 102.0);
    }

    #[test]
    fn extra_fields_ignored() {
        let text = dual(&[
            "100.0,0.0,1.0,2.0,0.0,0.0,extra",
            "101.0,1.0,1.0,2.0,1.0,2.0",
        ]);
        assert_eq!(parse(&text).unwrap().len(), 2);
    }

    #[test]
    fn malformed_number_fails_whole_file() {
        let text = dual(&[
            "100.0,0.0,1.0,2.0,0.0,0.0",
            "101.0,1.0,abc,2.0,1.0,2.0",
        ]);
        let err = parse(&text).unwrap_err();
        assert!(matches!(
            &err,
            ParseError::InvalidField { line: 3, column: 3, value, .. } if value == "abc"
        ));
        insta::assert_snapshot!(err.to_string(), @r#"invalid number "abc" at line 3, column 3"#);
    }

    #[test]
    fn only_short_rows_is_empty_data() {
        let text = dual(&["100.0,0.0,1.0", "101.0,1.0"]);
        assert_eq!(parse(&text), Err(ParseError::EmptyData));
    }

    #[test]
    fn non_monotonic_timestamps_still_parse() {
        let text = dual(&[
            "100.0,0.0,1.0,2.0,0.0,0.0",
            "99.0,1.0,1.0,2.0,1.0,2.0",
        ]);
        assert_eq!(parse(&text).unwrap().len(), 2);
    }
}
