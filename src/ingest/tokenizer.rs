//! Line-level CSV field splitting
//!
//! Quoted fields follow RFC 4180 conventions: a field wrapped in double quotes
//! may contain commas, and `""` inside an open quote is a literal quote.
//! Records never span lines; the caller splits the blob into lines first.

/// Split one CSV line into trimmed fields.
///
/// An unterminated quote runs to end of line: everything after the opening
/// quote is kept as field text (still trimmed). The final field is always
/// emitted, so `"a,"` yields `["a", ""]` and an empty line yields `[""]`.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Remove at most one leading and one trailing double quote
pub fn strip_wrapping_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Split a CSV blob into trimmed, non-blank lines (`\n` or `\r\n`)
pub fn split_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields_are_trimmed() {
        assert_eq!(parse_csv_line("a, b ,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted_comma_and_escaped_quote() {
        assert_eq!(parse_csv_line(r#""a,b""c""#), vec![r#"a,b"c"#]);
        assert_eq!(
            parse_csv_line(r#"1,"$1,200.50",current"#),
            vec!["1", "$1,200.50", "current"]
        );
    }

    #[test]
    fn test_trailing_delimiter_emits_empty_field() {
        assert_eq!(parse_csv_line("a,"), vec!["a", ""]);
        assert_eq!(parse_csv_line(""), vec![""]);
    }

    #[test]
    fn test_unterminated_quote_runs_to_end_of_line() {
        assert_eq!(parse_csv_line(r#"x,"open, still open"#), vec!["x", "open, still open"]);
    }

    #[test]
    fn test_strip_wrapping_quotes() {
        assert_eq!(strip_wrapping_quotes(r#""Loan Amount""#), "Loan Amount");
        assert_eq!(strip_wrapping_quotes(r#""left"#), "left");
        assert_eq!(strip_wrapping_quotes("plain"), "plain");
        assert_eq!(strip_wrapping_quotes(r#""""#), "");
    }

    #[test]
    fn test_split_lines_drops_blanks_and_crlf() {
        let lines = split_lines("h1,h2\r\n\r\n1,2\n   \n3,4\n");
        assert_eq!(lines, vec!["h1,h2", "1,2", "3,4"]);
    }
}
