//! Prefix scanners used by the lexer.
//!
//! Every `take_*` function returns the matched prefix and the unconsumed rest;
//! a miss yields `None` and leaves the caller's slice untouched.

pub(crate) fn strip_spaces(text: &str) -> &str {
    text.trim_start_matches(' ')
}

pub(crate) fn leading_spaces(text: &str) -> usize {
    text.len() - strip_spaces(text).len()
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

fn split_while(text: &str, predicate: impl Fn(char) -> bool) -> (&str, &str) {
    let end = text
        .char_indices()
        .find(|&(_, c)| !predicate(c))
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    text.split_at(end)
}

pub(crate) fn take_number(text: &str) -> Option<(&str, &str)> {
    let (digits, rest) = split_while(text, |c| c.is_ascii_digit());
    (!digits.is_empty()).then_some((digits, rest))
}

pub(crate) fn take_identifier(text: &str) -> Option<(&str, &str)> {
    let first = text.chars().next()?;
    if !is_identifier_start(first) {
        return None;
    }
    Some(split_while(text, is_identifier_char))
}

/// Longest pattern from `table` that `text` starts with.
pub(crate) fn take_pattern<'t, T: Clone>(
    text: &'t str,
    table: &[(&str, T)],
) -> Option<(T, &'t str)> {
    table
        .iter()
        .filter(|(pattern, _)| text.starts_with(pattern))
        .max_by_key(|(pattern, _)| pattern.len())
        .map(|(pattern, value)| (value.clone(), &text[pattern.len()..]))
}

/// Like [`take_pattern`], but the match must end on a word boundary.
pub(crate) fn take_keyword<'t, T: Clone>(
    text: &'t str,
    table: &[(&str, T)],
) -> Option<(T, &'t str)> {
    let (value, rest) = take_pattern(text, table)?;
    match rest.chars().next() {
        Some(c) if is_identifier_char(c) => None,
        _ => Some((value, rest)),
    }
}

/// Splits a literal delimited by `quote`. `Some(Err(()))` means the opening
/// quote was found but the closing one was not.
pub(crate) fn take_quoted(text: &str, quote: char) -> Option<Result<(&str, &str), ()>> {
    let body = text.strip_prefix(quote)?;
    Some(match body.find(quote) {
        Some(end) => Ok((&body[..end], &body[end + quote.len_utf8()..])),
        None => Err(()),
    })
}
