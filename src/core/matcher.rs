//! Purpose: Single predicate deciding whether text carries the `error` token.
//! Exports: `contains_error_token`.
//! Invariants: Plain substring match, ASCII case-insensitive, no word boundaries.

const TOKEN: &[u8] = b"error";

pub(crate) fn contains_error_token(text: &str) -> bool {
    text.as_bytes()
        .windows(TOKEN.len())
        .any(|window| window.eq_ignore_ascii_case(TOKEN))
}
