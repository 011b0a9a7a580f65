use super::types::Remainder;

/// Split a special into its routing prefix and the unconsumed rest.
///
/// The prefix is the leading run of ASCII alphanumerics. If the character
/// right after that run is ASCII punctuation it becomes part of the prefix
/// too, so `ps:` and `ps` route to different handlers.
pub fn split_prefix(special: &str) -> (&str, Remainder<'_>) {
    let bytes = special.as_bytes();
    let mut end = bytes
        .iter()
        .position(|b| !b.is_ascii_alphanumeric())
        .unwrap_or(bytes.len());

    if bytes.get(end).is_some_and(u8::is_ascii_punctuation) {
        end += 1;
    }

    (&special[..end], Remainder::at(special, end))
}
