use std::borrow::Cow;

/// Character substituted for anything outside the legal set.
pub const REPLACEMENT_CHAR: char = '?';

/// Returns true for tab, line feed, carriage return and printable ASCII.
///
/// Text shown with the built-in fonts goes through their default
/// single-byte encoding, so nothing else can be embedded as-is.
pub fn is_legal_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r' | ' '..='~')
}

/// Replaces every illegal character with [`REPLACEMENT_CHAR`], one for one.
///
/// The output has exactly as many characters as the input. Input that is
/// already legal is borrowed unchanged.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_legal_char) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.chars()
            .map(|ch| if is_legal_char(ch) { ch } else { REPLACEMENT_CHAR })
            .collect(),
    )
}
