// Literal formatting for ImageJ macro source (no I/O)

/// Escape text for a double-quoted macro string literal
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

/// Value for a `key=[value]` option, which ends at the first `]`
pub fn option_value(s: &str) -> String {
    escape_string(&s.replace(']', ")"))
}

/// Render a float the way ImageJ dialogs record them: always with a decimal point
pub fn number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_keep_decimal_point() {
        assert_eq!(number(100.0), "100.0");
        assert_eq!(number(1.6), "1.6");
        assert_eq!(number(0.25), "0.25");
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(escape_string(r#"a "b" \c"#), r#"a \"b\" \\c"#);
    }

    #[test]
    fn option_values_cannot_close_bracket() {
        assert_eq!(option_value("PSF: [odd]"), "PSF: [odd)");
    }
}
