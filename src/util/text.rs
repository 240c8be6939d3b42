// src/util/text.rs

/// One-line preview of note content for the list view.
///
/// This function:
/// 1. Takes the first non-empty line
/// 2. Trims whitespace
/// 3. Cuts it to `max_chars` characters, marking the cut with `…`
///
/// # Examples
///
/// ```
/// use notehub::util::text::preview;
///
/// let content = "Buy milk\nand bread";
/// assert_eq!(preview(content, 20), "Buy milk");
/// assert_eq!(preview(content, 4), "Buy…");
/// ```
pub fn preview(content: &str, max_chars: usize) -> String {
    let line = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    if line.chars().count() <= max_chars {
        return line.to_string();
    }

    let kept: String = line.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}
