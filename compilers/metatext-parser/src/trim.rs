/// Strips non-alphanumeric characters from both ends of `s`.
///
/// Interior punctuation and casing are preserved: `"``Well, hello!"`
/// becomes `"Well, hello"`.
pub fn trim_punctuation(s: &str) -> &str {
    s.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Joins `tokens[from..=to]` with single spaces and trims the edges.
///
/// Out-of-range bounds are clamped to the sequence; an empty sequence or an
/// inverted pair yields an empty string.
pub fn join_and_trim<S: AsRef<str>>(tokens: &[S], from: usize, to: usize) -> String {
    if tokens.is_empty() || from > to || from >= tokens.len() {
        return String::new();
    }
    let to = to.min(tokens.len() - 1);

    let joined = tokens[from..=to]
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ");

    trim_punctuation(&joined).to_string()
}
