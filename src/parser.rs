/// Split a single raw gradebook line into its fields.
///
/// A `"` toggles whether we are inside a quoted section and is never part of
/// the output. Commas inside a quoted section are kept as field content,
/// commas outside of one end the current field. The final field is always
/// emitted, even when empty, so every line yields at least one field.
///
/// There is no support for escaped quotes: `""` simply toggles the quoted
/// state twice. Malformed quoting never fails, it only moves the field
/// boundaries. Fields are not trimmed.
pub fn parse_line(raw: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for c in raw.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}

/// Split file contents into lines, accepting `\n`, `\r\n` and a bare `\r` as
/// terminators. A trailing terminator does not produce an empty last line.
pub fn split_lines(contents: &str) -> Vec<&str> {
    let bytes = contents.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\n' => {
                lines.push(&contents[start..pos]);
                pos += 1;
                start = pos;
            }
            b'\r' => {
                lines.push(&contents[start..pos]);
                pos += 1;
                if bytes.get(pos) == Some(&b'\n') {
                    pos += 1;
                }
                start = pos;
            }
            _ => pos += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&contents[start..]);
    }

    lines
}

/// Parse a trimmed numeric cell, returning `None` when it isn't a finite
/// number.
pub fn parse_number(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_split_plain_fields() {
        assert_eq!(parse_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn should_keep_commas_inside_quotes() {
        assert_eq!(parse_line("a,\"b,c\",d"), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn should_emit_trailing_empty_fields() {
        assert_eq!(parse_line(""), vec![""]);
        assert_eq!(parse_line("a,,"), vec!["a", "", ""]);
        assert_eq!(parse_line(",,,50,50"), vec!["", "", "", "50", "50"]);
    }

    #[test]
    fn should_strip_quotes_anywhere() {
        assert_eq!(parse_line("a\"\"b"), vec!["ab"]);
        assert_eq!(parse_line("\"\",x"), vec!["", "x"]);
        assert_eq!(parse_line("S\"1\",Alice"), vec!["S1", "Alice"]);
    }

    #[test]
    fn should_not_trim_whitespace() {
        assert_eq!(parse_line(" a , \"b\" "), vec![" a ", " b "]);
    }

    #[test]
    fn should_swallow_delimiters_after_unbalanced_quote() {
        // The opening quote is never closed, so the rest of the line is one
        // field.
        assert_eq!(parse_line("a,\"b,c,d"), vec!["a", "b,c,d"]);
    }

    #[test]
    fn should_parse_numbers() {
        assert_eq!(parse_number(" 45 "), Some(45.0));
        assert_eq!(parse_number("12.5"), Some(12.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("oops"), None);
    }

    #[test]
    fn should_reject_non_finite_numbers() {
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-Infinity"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("1e400"), None);
    }

    #[test]
    fn should_split_lines_on_any_terminator() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\rb\r"), vec!["a", "b"]);
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\r\r\nb"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }
}
