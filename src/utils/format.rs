//! Number and label formatting shared by legends, the CLI and the web API.

/// Format a value with comma thousands separators.
///
/// Integers print without a fractional part; other values keep up to two
/// decimals with trailing zeros dropped (`1234.5` → `"1,234.5"`).
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac = frac.trim_end_matches('0');
    let negative = value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(whole));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Insert a comma every three digits from the right.
fn group_digits(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

/// Turn a snake_case payload key into a display label.
///
/// `"average_order_value"` → `"Average Order Value"`.
pub fn humanize_key(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_integers() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(12345.0), "12,345");
        assert_eq!(format_number(1234567.0), "1,234,567");
    }

    #[test]
    fn keeps_two_decimals() {
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(0.875), "0.88");
        assert_eq!(format_number(99.999), "100");
        assert_eq!(format_number(1234567.25), "1,234,567.25");
    }

    #[test]
    fn negative_values() {
        assert_eq!(format_number(-1500.0), "-1,500");
        assert_eq!(format_number(-0.001), "0");
    }

    #[test]
    fn values_beyond_u64_keep_every_digit() {
        assert_eq!(format_number(1e20), "100,000,000,000,000,000,000");
        assert_eq!(format_number(-2e20), "-200,000,000,000,000,000,000");
        assert_eq!(format_number(18446744073709551616.0), "18,446,744,073,709,551,616");
    }

    #[test]
    fn humanizes_keys() {
        assert_eq!(humanize_key("total_revenue"), "Total Revenue");
        assert_eq!(humanize_key("churn_rate"), "Churn Rate");
        assert_eq!(humanize_key("orders"), "Orders");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("ab", 2), "ab");
    }
}
