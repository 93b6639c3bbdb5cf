use chrono::{DateTime, Utc};

/// Format a timestamp for human-readable display
pub fn format_timestamp(timestamp: &Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Format a timestamp string for display
pub fn format_timestamp_str(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Truncate a string to max length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Canonicalize a node display name for comparison purposes.
///
/// Two names collide if their normalized forms match: trim, collapse
/// internal whitespace, unescape doubled backslashes and escaped quotes.
/// Every path that compares node names (add/update/remove, connection
/// endpoints, the autofixer's rename suggestions) must route through
/// this function rather than rolling its own variant.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();

    let mut collapsed = String::with_capacity(trimmed.len());
    let mut last_was_space = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                collapsed.push(' ');
            }
            last_was_space = true;
        } else {
            collapsed.push(ch);
            last_was_space = false;
        }
    }

    let mut unescaped = String::with_capacity(collapsed.len());
    let mut chars = collapsed.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.peek() {
                Some('\\') => {
                    unescaped.push('\\');
                    chars.next();
                }
                Some('"') => {
                    unescaped.push('"');
                    chars.next();
                }
                _ => unescaped.push(ch),
            }
        } else {
            unescaped.push(ch);
        }
    }

    unescaped
}

/// Generate an opaque stable identifier, used for node ids and for
/// filter-condition ids the sanitizer fills in when missing.
pub fn generate_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_collapses_whitespace() {
        assert_eq!(normalize_name("  A    B  "), "A B");
    }

    #[test]
    fn test_normalize_unescapes_backslashes_and_quotes() {
        assert_eq!(normalize_name(r#"Say \"Hi\""#), r#"Say "Hi""#);
        assert_eq!(normalize_name(r"A\\B"), r"A\B");
    }

    #[test]
    fn test_normalize_collision() {
        assert_eq!(normalize_name("Node  One"), normalize_name("Node One"));
        assert_ne!(normalize_name("Node One"), normalize_name("Node Two"));
    }
}
