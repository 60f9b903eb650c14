// Output: table construction, CSV/EUC-KR rendering and terminal summaries.

pub mod tables;
pub mod terminal;
pub mod writer;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Counts characters, not bytes, so Hangul axis names are never split
/// mid-character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
