//! Numbered selections read from standard input.

use crate::error::{Result, SelectionError};
use std::io::{self, BufRead, Write};

/// Parses a 1-based selection into a 0-based index into a listing of `count` items.
pub fn parse_selection(input: &str, count: usize) -> std::result::Result<usize, SelectionError> {
    let input = input.trim();
    let selection: u64 = input
        .parse()
        .map_err(|_| SelectionError::NotANumber(input.to_owned()))?;

    if selection == 0 || selection > count as u64 {
        return Err(SelectionError::OutOfRange { selection, count });
    }

    Ok((selection - 1) as usize)
}

/// Prompts on standard output and reads lines from standard input until one parses as a valid
/// 1-based selection, returning the 0-based index.
///
/// An invalid selection is reported and prompted again. Reaching end of input surfaces as an I/O
/// error.
pub fn prompt_selection(prompt: &str, count: usize) -> Result<usize> {
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("{prompt}");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input while waiting for a selection",
            )
            .into());
        }

        match parse_selection(&line, count) {
            Ok(index) => return Ok(index),
            Err(err) => eprintln!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_selection_converts_to_zero_based() {
        assert_eq!(parse_selection("1", 3), Ok(0));
        assert_eq!(parse_selection("3", 3), Ok(2));
        assert_eq!(parse_selection(" 2 \n", 3), Ok(1));
    }

    #[test]
    fn zero_is_out_of_range() {
        assert_eq!(
            parse_selection("0", 3),
            Err(SelectionError::OutOfRange {
                selection: 0,
                count: 3
            })
        );
    }

    #[test]
    fn selection_past_the_listing_is_out_of_range() {
        assert_eq!(
            parse_selection("4", 3),
            Err(SelectionError::OutOfRange {
                selection: 4,
                count: 3
            })
        );
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        assert_eq!(
            parse_selection("first", 3),
            Err(SelectionError::NotANumber("first".to_owned()))
        );

        assert_eq!(
            parse_selection("-1", 3),
            Err(SelectionError::NotANumber("-1".to_owned()))
        );
    }
}
