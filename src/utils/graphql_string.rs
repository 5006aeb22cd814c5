//! GraphQL string literal helpers.
//!
//! Filter values are user text and end up between double quotes in the
//! compiled query. They are escaped per the GraphQL `StringValue` grammar:
//! `"` and `\` get a backslash, the named control characters get their short
//! escape, every other control character becomes `\uXXXX`.
//!
//! # Examples
//! ```
//! use glui::utils::graphql_string::quote;
//!
//! assert_eq!(quote("Acme"), r#""Acme""#);
//! assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
//! assert_eq!(quote("a\nb"), r#""a\nb""#);
//! ```

/// Escape `value` for use inside a GraphQL string literal (without quotes).
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Escape and wrap in double quotes.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", escape(value))
}
