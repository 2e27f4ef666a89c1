//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` characters, appending `...` when
/// anything was cut (UTF-8 safe).
///
/// The limit counts characters, not bytes, so the visible excerpt length is
/// the same for ASCII and multi-byte text. The ellipsis is not counted.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}...", &s[..end]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello world", 5), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("日本語テスト", 30), "日本語テスト");
        assert_eq!(truncate_chars("日本語テスト文字列", 4), "日本語テ...");
    }

    #[test]
    fn test_truncate_emoji() {
        assert_eq!(truncate_chars("👋🌍🎉", 2), "👋🌍...");
    }
}
