// Utility functions: price parsing and source naming
use chrono::NaiveDate;

/// Value used for prices that are missing or cannot be read.
pub const PRICE_FALLBACK: f64 = 0.0;

/// Converts a currency string such as `"£1,299.99"` into pounds.
///
/// Everything except digits and the decimal point is stripped first. Missing,
/// empty or unparseable input yields [`PRICE_FALLBACK`]; this never fails.
pub fn parse_price(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return PRICE_FALLBACK;
    };
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => PRICE_FALLBACK,
    }
}

/// Formats pounds the way the retailer exports do, e.g. `£1,299.99`.
/// Negative amounts get a leading `-`.
pub fn format_price(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}£{}.{}", sign, grouped, fraction)
}

/// Converts a string to kebab-case.
pub fn to_kebab_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

/// Per-source id prefix: the file name without its extension, in kebab-case.
pub fn source_discriminator(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(file_name);
    let kebab = to_kebab_case(stem);
    if kebab.is_empty() {
        "source".to_string()
    } else {
        kebab
    }
}

/// Extracts the scrape date embedded in names like `matalan-2024-11-21.csv`.
pub fn snapshot_date(file_name: &str) -> Option<NaiveDate> {
    let bytes = file_name.as_bytes();
    bytes.windows(10).enumerate().find_map(|(start, window)| {
        let shaped = window.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
        if !shaped {
            return None;
        }
        NaiveDate::parse_from_str(file_name.get(start..start + 10)?, "%Y-%m-%d").ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_currency_strings() {
        assert_eq!(parse_price(Some("£20.00")), 20.0);
        assert_eq!(parse_price(Some("£1,299.99")), 1299.99);
        assert_eq!(parse_price(Some(" 45 ")), 45.0);
        assert_eq!(parse_price(Some("Now £12.50")), 12.5);
    }

    #[test]
    fn malformed_prices_fall_back_to_zero() {
        assert_eq!(parse_price(None), 0.0);
        assert_eq!(parse_price(Some("")), 0.0);
        assert_eq!(parse_price(Some("£")), 0.0);
        assert_eq!(parse_price(Some("free")), 0.0);
        assert_eq!(parse_price(Some(".")), 0.0);
        assert_eq!(parse_price(Some("£12.99 - £15.00")), 0.0);
    }

    #[test]
    fn formatted_prices_parse_back() {
        for value in [0.0, 0.5, 9.99, 49.99, 1000.0, 1234.56, 98765.43] {
            let parsed = parse_price(Some(&format_price(value)));
            assert!((parsed - value).abs() < 0.005, "{} -> {}", value, parsed);
        }
        assert_eq!(format_price(1234567.0), "£1,234,567.00");
    }

    #[test]
    fn negative_prices_keep_their_sign() {
        assert_eq!(format_price(-1234.5), "-£1,234.50");
        assert_eq!(format_price(-0.001), "£0.00");
    }

    #[test]
    fn discriminator_from_file_name() {
        assert_eq!(source_discriminator("matalan-2024-11-21.csv"), "matalan-2024-11-21");
        assert_eq!(
            source_discriminator("whistles-2024-11-26 - Copy.csv"),
            "whistles-2024-11-26-copy"
        );
        assert_eq!(source_discriminator("Phase Eight.CSV"), "phase-eight");
        assert_eq!(source_discriminator(""), "source");
    }

    #[test]
    fn snapshot_date_is_found_in_name() {
        assert_eq!(
            snapshot_date("pixiegirl-2024-12-01-blue.csv"),
            NaiveDate::from_ymd_opt(2024, 12, 1)
        );
        assert_eq!(
            snapshot_date("matalan-2024-11-21.csv"),
            NaiveDate::from_ymd_opt(2024, 11, 21)
        );
        assert_eq!(
            snapshot_date("relr-2024-11-26.csv"),
            NaiveDate::from_ymd_opt(2024, 11, 26)
        );
        assert_eq!(snapshot_date("relr.csv"), None);
        assert_eq!(snapshot_date("stock-2024-13-01.csv"), None);
    }
}
