use std::fmt::Write;

/// Escape special characters in a string for JSON output.
///
/// Escapes the two JSON metacharacters (`"` and `\`), the short-form
/// control characters (`\b`, `\t`, `\n`, `\f`, `\r`), and every other
/// character below 0x20 as a `\u00XX` sequence. Valid Unicode above the
/// control range passes through unchanged.
///
/// # Examples
///
/// ```
/// use ejson_util::strings::escape;
///
/// assert_eq!(escape("hello"), "hello");
/// assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
/// assert_eq!(escape("line1\nline2"), "line1\\nline2");
/// ```
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{000C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => {
                // Remaining control characters have no short escape.
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
