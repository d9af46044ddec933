/// Collapses every run of whitespace (spaces, tabs, newlines) to a single
/// space and trims the ends.
///
/// # Arguments
///
/// * `text` - The text to normalize
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Truncates `message` to at most `max` characters, appending an ellipsis
/// marker when anything was cut. Cuts on a character boundary.
pub(crate) fn truncate_message(message: &str, max: usize) -> String {
    if message.chars().count() <= max {
        return message.to_string();
    }
    let truncated: String = message.chars().take(max).collect();
    format!("{}...", truncated.trim_end())
}
