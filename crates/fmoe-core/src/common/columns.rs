//! Fixed-column field extraction for Fortran-style report lines.
//!
//! Ranges are half-open byte ranges `[start, end)`. A range reaching past the
//! end of the line and a range holding non-numeric text are distinct
//! failures: optional trailing columns treat the former as "absent".

use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Columns {
    pub start: usize,
    pub end: usize,
}

impl Columns {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl Display for Columns {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    #[error("string out of range: columns {columns} of a {len}-byte line")]
    OutOfRange { columns: Columns, len: usize },
    #[error("invalid {expected} in columns {columns}: '{value}'")]
    FieldFormat {
        columns: Columns,
        value: String,
        expected: &'static str,
    },
}

impl ColumnError {
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

pub type ColumnResult<T> = Result<T, ColumnError>;

/// Raw column text, untrimmed.
pub fn slice(line: &str, columns: Columns) -> ColumnResult<&str> {
    if line.len() < columns.end || columns.start > columns.end {
        return Err(ColumnError::OutOfRange {
            columns,
            len: line.len(),
        });
    }

    line.get(columns.start..columns.end)
        .ok_or_else(|| ColumnError::FieldFormat {
            columns,
            value: String::from_utf8_lossy(&line.as_bytes()[columns.start..columns.end])
                .into_owned(),
            expected: "character boundary",
        })
}

pub fn slice_trim(line: &str, columns: Columns) -> ColumnResult<&str> {
    slice(line, columns).map(str::trim)
}

pub fn int_field(line: &str, columns: Columns) -> ColumnResult<i32> {
    let text = slice_trim(line, columns)?;
    text.parse::<i32>().map_err(|_| ColumnError::FieldFormat {
        columns,
        value: text.to_string(),
        expected: "integer",
    })
}

pub fn float_field(line: &str, columns: Columns) -> ColumnResult<f64> {
    let text = slice_trim(line, columns)?;
    text.parse::<f64>().map_err(|_| ColumnError::FieldFormat {
        columns,
        value: text.to_string(),
        expected: "float",
    })
}

/// Raw column text, or `default` when the line ends before the column does.
pub fn optional_slice(line: &str, columns: Columns, default: &str) -> ColumnResult<String> {
    match slice(line, columns) {
        Ok(value) => Ok(value.to_string()),
        Err(ColumnError::OutOfRange { .. }) => Ok(default.to_string()),
        Err(error @ ColumnError::FieldFormat { .. }) => Err(error),
    }
}

/// Splits `count` fixed-width integers off the front of `line`, left to right.
pub fn packed_int_fields(line: &str, width: usize, count: usize) -> ColumnResult<Vec<i32>> {
    let mut values = Vec::with_capacity(count);
    let mut rest = line;
    let mut offset = 0;
    for _ in 0..count {
        let field = Columns::new(0, width);
        let value = int_field(rest, field).map_err(|error| shift_columns(error, offset))?;
        values.push(value);
        rest = &rest[width..];
        offset += width;
    }
    Ok(values)
}

fn shift_columns(error: ColumnError, offset: usize) -> ColumnError {
    match error {
        ColumnError::OutOfRange { columns, len } => ColumnError::OutOfRange {
            columns: Columns::new(columns.start + offset, columns.end + offset),
            len: len + offset,
        },
        ColumnError::FieldFormat {
            columns,
            value,
            expected,
        } => ColumnError::FieldFormat {
            columns: Columns::new(columns.start + offset, columns.end + offset),
            value,
            expected,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ColumnError, Columns, float_field, int_field, optional_slice, packed_int_fields, slice,
        slice_trim,
    };

    #[test]
    fn slice_returns_raw_text_and_trim_strips_padding() {
        let line = "    1 C  CA  ALA";
        assert_eq!(slice(line, Columns::new(5, 8)).unwrap(), " C ");
        assert_eq!(slice_trim(line, Columns::new(5, 8)).unwrap(), "C");
        assert_eq!(slice_trim(line, Columns::new(0, 5)).unwrap(), "1");
    }

    #[test]
    fn range_past_line_end_is_out_of_range() {
        let line = " ".repeat(136);
        let error = slice(&line, Columns::new(137, 138)).expect_err("line is too short");
        assert_eq!(
            error,
            ColumnError::OutOfRange {
                columns: Columns::new(137, 138),
                len: 136
            }
        );
        assert!(error.is_out_of_range());

        let exact = " ".repeat(138);
        assert_eq!(slice(&exact, Columns::new(137, 138)).unwrap(), " ");
    }

    #[test]
    fn non_numeric_text_is_a_format_error_not_a_range_error() {
        let line = "  abc 1.5e3";
        let error = int_field(line, Columns::new(0, 5)).expect_err("not an integer");
        assert!(matches!(
            error,
            ColumnError::FieldFormat { expected: "integer", ref value, .. } if value == "abc"
        ));
        assert!(!error.is_out_of_range());

        assert_eq!(float_field(line, Columns::new(5, 11)).unwrap(), 1500.0);
        assert!(matches!(
            float_field("      ", Columns::new(0, 6)),
            Err(ColumnError::FieldFormat { expected: "float", .. })
        ));
    }

    #[test]
    fn integers_accept_signs_and_leading_zeros() {
        assert_eq!(int_field("  -12", Columns::new(0, 5)).unwrap(), -12);
        assert_eq!(int_field("  007", Columns::new(0, 5)).unwrap(), 7);
        assert_eq!(int_field("   +3", Columns::new(0, 5)).unwrap(), 3);
    }

    #[test]
    fn optional_columns_default_only_when_absent() {
        let short = "x".repeat(136);
        assert_eq!(
            optional_slice(&short, Columns::new(137, 138), " ").unwrap(),
            " "
        );

        let mut long = " ".repeat(137);
        long.push('B');
        assert_eq!(optional_slice(&long, Columns::new(137, 138), " ").unwrap(), "B");
    }

    #[test]
    fn multibyte_split_is_reported_as_format_error() {
        let line = "ab\u{00e9}cd";
        let error = slice(line, Columns::new(0, 3)).expect_err("splits a character");
        assert!(matches!(error, ColumnError::FieldFormat { .. }));
    }

    #[test]
    fn packed_fields_are_consumed_left_to_right() {
        let line = "    1   22  333";
        assert_eq!(packed_int_fields(line, 5, 3).unwrap(), vec![1, 22, 333]);
        assert_eq!(packed_int_fields(line, 5, 0).unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn packed_field_errors_report_absolute_columns() {
        let error = packed_int_fields("    1    2", 5, 3).expect_err("third field missing");
        assert_eq!(
            error,
            ColumnError::OutOfRange {
                columns: Columns::new(10, 15),
                len: 10
            }
        );
    }
}
