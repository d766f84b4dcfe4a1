//! Display strings for currency, percentages and durations

/// Insert thousands separators into a string of ASCII digits
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn currency_with(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    let rendered = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    // -0.004 rounds to $0.00, not -$0.00
    let is_zero = rendered.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match fraction {
        Some(fraction) => format!("{sign}${}.{fraction}", group_thousands(whole)),
        None => format!("{sign}${}", group_thousands(whole)),
    }
}

/// `1234.567` → `$1,234.57`; negatives as `-$1,234.57`
pub fn format_currency(value: f64) -> String {
    currency_with(value, 2)
}

/// `1234.567` → `$1,235`
pub fn format_currency_whole(value: f64) -> String {
    currency_with(value, 0)
}

/// `format_percent(7.5, 2)` → `7.50%`; the value is already a percentage
pub fn format_percent(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    format!("{:.*}%", decimals, value)
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// `123` → `10 years, 3 months`
pub fn format_duration(months: u32) -> String {
    let years = months / 12;
    let rest = months % 12;
    match (years, rest) {
        (0, rest) => plural(rest, "month"),
        (years, 0) => plural(years, "year"),
        (years, rest) => format!("{}, {}", plural(years, "year"), plural(rest, "month")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(-1234.567), "-$1,234.57");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567.00");
        assert_eq!(format_currency(f64::NAN), "N/A");
    }

    #[test]
    fn test_currency_whole() {
        assert_eq!(format_currency_whole(1234.567), "$1,235");
        assert_eq!(format_currency_whole(795_759.02), "$795,759");
        assert_eq!(format_currency_whole(12.0), "$12");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(7.5, 2), "7.50%");
        assert_eq!(format_percent(22.0, 0), "22%");
    }

    #[test]
    fn test_duration() {
        assert_eq!(format_duration(0), "0 months");
        assert_eq!(format_duration(1), "1 month");
        assert_eq!(format_duration(12), "1 year");
        assert_eq!(format_duration(123), "10 years, 3 months");
        assert_eq!(format_duration(13), "1 year, 1 month");
    }
}
