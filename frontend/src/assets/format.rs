//! pt-BR display formatting for prices, quantities and trade dates.

use chrono::NaiveDate;

/// Format a price as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let formatted = format!("{:.2}", value.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if value < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };

    format!("{sign}R$\u{a0}{},{fraction}", group_thousands(integer))
}

/// Format a traded quantity as a grouped integer, e.g. `15.000.000`.
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let rounded = format!("{:.0}", value.abs());
    let sign = if value < 0.0 && rounded != "0" { "-" } else { "" };
    format!("{sign}{}", group_thousands(&rounded))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Day and month only, used on the chart axis.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// `"{from}-{to} of {total}"` for a zero-based page index.
pub fn pagination_label(page: u32, page_size: u32, total: u64) -> String {
    let (from, to) = if total == 0 {
        (0, 0)
    } else {
        let start = u64::from(page) * u64::from(page_size);
        let end = (start + u64::from(page_size)).min(total);
        (start + 1, end)
    };
    format!("{from}-{to} of {total}")
}

/// Whether a page exists after `page` given the result-set total.
pub fn has_next_page(page: u32, page_size: u32, total: u64) -> bool {
    (u64::from(page) + 1) * u64::from(page_size) < total
}

fn group_thousands(digits: &str) -> String {
    let mut groups: Vec<&str> = Vec::with_capacity(digits.len() / 3 + 1);
    let head = digits.len() % 3;
    if head > 0 {
        groups.push(&digits[..head]);
    }
    groups.extend(
        digits.as_bytes()[head..]
            .chunks(3)
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default()),
    );
    groups.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_brazilian_separators() {
        assert_eq!(format_brl(43.0), "R$\u{a0}43,00");
        assert_eq!(format_brl(1234.567), "R$\u{a0}1.234,57");
        assert_eq!(format_brl(0.5), "R$\u{a0}0,50");
        assert_eq!(format_brl(-1_000_000.0), "-R$\u{a0}1.000.000,00");
    }

    #[test]
    fn currency_symbol_does_not_wrap() {
        let label = format_brl(1234.5);
        assert!(!label.contains(' '));
        assert!(label.starts_with("R$\u{a0}"));
    }

    #[test]
    fn quantity_is_grouped_without_decimals() {
        assert_eq!(format_quantity(15_000_000.0), "15.000.000");
        assert_eq!(format_quantity(999.0), "999");
        assert_eq!(format_quantity(1000.4), "1.000");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn dates_render_day_first() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date), "05/01/2024");
        assert_eq!(format_short_date(date), "05/01");
    }

    #[test]
    fn pagination_label_tracks_total_not_page_length() {
        assert_eq!(pagination_label(0, 30, 2), "1-2 of 2");
        assert_eq!(pagination_label(1, 30, 75), "31-60 of 75");
        assert_eq!(pagination_label(2, 30, 75), "61-75 of 75");
        assert_eq!(pagination_label(0, 30, 0), "0-0 of 0");
    }

    #[test]
    fn next_page_stops_at_total() {
        assert!(has_next_page(0, 30, 31));
        assert!(!has_next_page(0, 30, 30));
        assert!(!has_next_page(2, 30, 75));
    }
}
