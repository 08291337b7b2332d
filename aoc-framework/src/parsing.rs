//! Helpers for parsing line-based input.

use thiserror::Error;

use crate::DynamicError;

/// Parsing a line of the input failed.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// Zero based index of the line, displayed one based.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    /// The one based line number that failed to parse.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_index.saturating_add(1)
    }
}

/// Parse every line of `input` with `parser`, which receives the zero based line index and the
/// line.
///
/// A parser error is wrapped in an [`InvalidLine`] holding the line position.
///
/// # Returns
///
/// An iterator of results, one per line.
pub fn parse_input_lines<T, E, F>(
    input: &str,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    E: Into<DynamicError>,
    F: FnMut(usize, &str) -> Result<T, E>,
{
    input.lines().enumerate().map(move |(line_index, line)| {
        parser(line_index, line).map_err(|error| InvalidLine {
            line_index,
            source: error.into(),
        })
    })
}

/// Parse a rectangular grid of characters into rows, mapping each character with `cell_parser`.
///
/// Width checks are left to the grid type built from the rows.
///
/// # Errors
///
/// The first character rejected by `cell_parser` fails its line with an [`InvalidLine`].
pub fn parse_char_rows<T, E, F>(input: &str, mut cell_parser: F) -> Result<Vec<Vec<T>>, InvalidLine>
where
    E: Into<DynamicError>,
    F: FnMut(char) -> Result<T, E>,
{
    parse_input_lines(input, |_, line| {
        line.chars().map(&mut cell_parser).collect::<Result<Vec<_>, E>>()
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Error, Debug)]
    #[error("unexpected character {0:?}")]
    struct Unexpected(char);

    fn digit(ch: char) -> Result<u32, Unexpected> {
        ch.to_digit(10).ok_or(Unexpected(ch))
    }

    #[test]
    fn parses_rows_of_digits() -> Result<(), InvalidLine> {
        let rows = parse_char_rows("123\n456\n", digit)?;
        assert_eq!(rows, vec![vec![1, 2, 3], vec![4, 5, 6]]);
        Ok(())
    }

    #[test]
    fn reports_one_based_line_number() {
        let Err(error) = parse_char_rows("12\n3x\n", digit) else {
            panic!("expected a parse failure");
        };
        assert_eq!(error.line_number(), 2);
        assert_eq!(error.to_string(), "failure parsing line 2");
    }

    #[test]
    fn line_parser_receives_indices() {
        let indices: Vec<usize> = parse_input_lines("a\nb\nc", |index, _| Ok::<_, Unexpected>(index))
            .collect::<Result<_, _>>()
            .unwrap_or_default();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
