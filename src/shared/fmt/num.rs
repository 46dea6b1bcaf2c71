//! String-level number formatting helpers shared by the `decimal` formatters.

/// Inserts comma thousands separators into an integer digit string.
///
/// Accepts an optional leading `-`.
pub fn group_thousands(integer_part: &str) -> String {
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let grouped = digits
        .chars()
        .rev()
        .collect::<String>()
        .as_bytes()
        .chunks(3)
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",")
        .chars()
        .rev()
        .collect::<String>();

    format!("{}{}", sign, grouped)
}

/// Trims trailing zeros from a fraction, keeping at least `min_digits`.
pub fn trim_fraction(fraction: &str, min_digits: usize) -> String {
    let trimmed = fraction.trim_end_matches('0');
    if trimmed.len() >= min_digits {
        trimmed.to_string()
    } else {
        format!("{:0<width$}", trimmed, width = min_digits)
    }
}

/// Truncates text to `max_len` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("-1234567890"), "-1,234,567,890");
        assert_eq!(group_thousands("-123"), "-123");
    }

    #[test]
    fn test_trim_fraction() {
        assert_eq!(trim_fraction("5000", 2), "50");
        assert_eq!(trim_fraction("1230", 2), "123");
        assert_eq!(trim_fraction("", 2), "00");
        assert_eq!(trim_fraction("0000", 0), "");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Bitcoin", 10), "Bitcoin");
        assert_eq!(truncate_text("Wrapped Bitcoin", 7), "Wrapped...");
        assert_eq!(truncate_text("Ünïcödé", 3), "Ünï...");
    }
}
