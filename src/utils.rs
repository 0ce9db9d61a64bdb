use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Convert a glob pattern (with * and ?) to an anchored regex pattern
pub fn glob_to_regex(pattern: &str, case_sensitive: bool) -> String {
    let mut regex = if case_sensitive {
        String::from("^")
    } else {
        String::from("(?i)^")
    };
    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            // Escape regex special characters
            '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' | '\\' => {
                regex.push('\\');
                regex.push(c);
            }
            _ => regex.push(c),
        }
    }
    regex.push('$');
    regex
}

/// Format a file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a modification time in local time, e.g. "Mar 04, 2025 14:30"
pub fn format_timestamp(time: Option<SystemTime>) -> String {
    match time {
        Some(t) => DateTime::<Local>::from(t).format("%b %d, %Y %H:%M").to_string(),
        None => "------------------".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_glob_to_regex() {
        let re = Regex::new(&glob_to_regex("*.txt", false)).unwrap();
        assert!(re.is_match("notes.txt"));
        assert!(re.is_match("NOTES.TXT"));
        assert!(!re.is_match("notes.txt.bak"));

        let re = Regex::new(&glob_to_regex("img_??.png", true)).unwrap();
        assert!(re.is_match("img_01.png"));
        assert!(!re.is_match("img_001.png"));
        assert!(!re.is_match("IMG_01.png"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_format_timestamp_missing() {
        assert_eq!(format_timestamp(None), "------------------");
        assert_eq!(format_timestamp(Some(SystemTime::now())).len(), 18);
    }
}
