//! Delimited course record parsing.
//!
//! One record per line: `identifier,title[,prerequisite]*`. Pure string
//! handling; reading the source is the application layer's job.

use tracing::warn;

use crate::domain::entities::Course;
use crate::domain::error::{DomainError, DomainResult};

/// Default field separator.
pub const DEFAULT_DELIMITER: char = ',';

/// Outcome of parsing a whole source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecords {
    /// Valid courses in source order
    pub courses: Vec<Course>,
    /// One `MalformedRecord` per rejected line
    pub skipped: Vec<DomainError>,
}

/// Parse one line into a course.
///
/// Returns `Ok(None)` for blank lines. Fields are trimmed; empty trailing
/// prerequisite fields (`CS101,Intro,,`) are dropped.
pub fn parse_record(
    line: &str,
    line_number: usize,
    delimiter: char,
) -> DomainResult<Option<Course>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields = line.split(delimiter).map(str::trim);
    let identifier = fields.next().unwrap_or_default();
    let Some(title) = fields.next() else {
        return Err(DomainError::MalformedRecord {
            line: line_number,
            reason: format!("expected at least 2 fields, found 1: {line:?}"),
        });
    };

    if identifier.is_empty() {
        return Err(DomainError::MalformedRecord {
            line: line_number,
            reason: "missing course identifier".to_string(),
        });
    }
    if title.is_empty() {
        return Err(DomainError::MalformedRecord {
            line: line_number,
            reason: format!("missing title for course {identifier}"),
        });
    }

    let prerequisites = fields
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect();

    Course::new(identifier, title, prerequisites).map(Some)
}

/// Parse every line of `content`, skipping malformed ones.
pub fn parse_records(content: &str, delimiter: char) -> ParsedRecords {
    parse_bytes(content.as_bytes(), delimiter)
}

/// Parse raw file content line by line.
///
/// Lines are decoded individually, so a line that is not valid UTF-8 is
/// skipped like any other malformed record.
pub fn parse_bytes(content: &[u8], delimiter: char) -> ParsedRecords {
    let mut parsed = ParsedRecords::default();

    for (idx, raw) in content.split(|&b| b == b'\n').enumerate() {
        let line_number = idx + 1;
        let result = match std::str::from_utf8(raw) {
            Ok(line) => parse_record(line, line_number, delimiter),
            Err(_) => Err(DomainError::MalformedRecord {
                line: line_number,
                reason: "invalid UTF-8".to_string(),
            }),
        };

        match result {
            Ok(Some(course)) => parsed.courses.push(course),
            Ok(None) => {}
            Err(e) => {
                warn!("skipping record: {}", e);
                parsed.skipped.push(e);
            }
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_full_line_when_parsing_then_collects_prerequisites_in_order() {
        let course = parse_record("CS300,Algorithms,CS200,MATH201", 1, ',')
            .unwrap()
            .unwrap();

        assert_eq!(course.identifier(), "CS300");
        assert_eq!(course.title(), "Algorithms");
        assert_eq!(course.prerequisites(), ["CS200", "MATH201"]);
    }

    #[test]
    fn given_two_fields_when_parsing_then_has_no_prerequisites() {
        let course = parse_record("CS101,Intro to CS", 1, ',').unwrap().unwrap();
        assert!(!course.has_prerequisites());
    }

    #[rstest]
    #[case("CS300")]
    #[case(",Nameless")]
    #[case("CS300,")]
    #[case("CS300, ,CS200")]
    fn given_incomplete_line_when_parsing_then_reports_malformed(#[case] line: &str) {
        let result = parse_record(line, 7, ',');
        assert!(
            matches!(result, Err(DomainError::MalformedRecord { line: 7, .. })),
            "unexpected result for {line:?}: {result:?}"
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\r")]
    fn given_blank_line_when_parsing_then_yields_nothing(#[case] line: &str) {
        assert_eq!(parse_record(line, 1, ',').unwrap(), None);
    }

    #[test]
    fn given_padding_and_trailing_delimiters_when_parsing_then_trims_fields() {
        let course = parse_record(" CS200 , Data Structures , CS101 ,, \r", 1, ',')
            .unwrap()
            .unwrap();

        assert_eq!(course.identifier(), "CS200");
        assert_eq!(course.title(), "Data Structures");
        assert_eq!(course.prerequisites(), ["CS101"]);
    }

    #[test]
    fn given_custom_delimiter_when_parsing_then_splits_on_it() {
        let course = parse_record("CS200;Data Structures;CS101", 1, ';')
            .unwrap()
            .unwrap();
        assert_eq!(course.prerequisites(), ["CS101"]);
    }

    #[test]
    fn given_mixed_content_when_parsing_all_then_skips_bad_lines_and_continues() {
        let content = "CS101,Intro to CS\nCS300\n\nCS200,Data Structures,CS101\n";

        let parsed = parse_records(content, DEFAULT_DELIMITER);

        let ids: Vec<_> = parsed.courses.iter().map(|c| c.identifier()).collect();
        assert_eq!(ids, ["CS101", "CS200"]);
        assert_eq!(parsed.skipped.len(), 1);
        assert!(matches!(
            parsed.skipped[0],
            DomainError::MalformedRecord { line: 2, .. }
        ));
    }

    #[test]
    fn given_invalid_utf8_line_when_parsing_bytes_then_skips_only_that_line() {
        let content = b"CS101,Intro\nCS102,Caf\xe9\nCS201,DS,CS101\r\n";

        let parsed = parse_bytes(content, DEFAULT_DELIMITER);

        let ids: Vec<_> = parsed.courses.iter().map(|c| c.identifier()).collect();
        assert_eq!(ids, ["CS101", "CS201"]);
        assert_eq!(
            parsed.skipped,
            vec![DomainError::MalformedRecord {
                line: 2,
                reason: "invalid UTF-8".to_string()
            }]
        );
    }
}
