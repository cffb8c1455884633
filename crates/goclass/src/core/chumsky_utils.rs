//! Shared chumsky parser utilities for Go source text
//!
//! Character-level combinators for the trivia between Go tokens, plus the
//! offset-to-position mapping used when reporting errors.

use chumsky::prelude::*;

/// Parse one whitespace character, including newlines.
pub fn whitespace_char<'src>() -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone
{
    one_of(" \t\r\n").ignored()
}

/// Parse a `//` comment up to, but not including, the end of the line.
pub fn line_comment<'src>() -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone
{
    just("//")
        .then(any().and_is(just('\n').not()).repeated())
        .ignored()
}

/// Parse a `/* ... */` comment, which may span lines.
pub fn block_comment<'src>() -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone
{
    just("/*")
        .then(any().and_is(just("*/").not()).repeated())
        .then(just("*/"))
        .ignored()
}

/// Parse any run of whitespace and comments, possibly empty.
///
/// Each alternative consumes at least one character, so the repetition
/// always makes progress.
pub fn trivia<'src>() -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone {
    choice((whitespace_char(), line_comment(), block_comment()))
        .repeated()
        .ignored()
}

/// Byte order mark Go tools accept at the very start of a file
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Convert a byte offset into a 1-based line and column (in characters).
///
/// A leading byte order mark does not count as a column.
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let mut line_text = &before[line_start..];
    if line_start == 0 {
        line_text = line_text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(line_text);
    }
    let column = line_text.chars().count() + 1;
    (line, column)
}
