use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as US dollars with two decimals and thousands
/// separators, e.g. `1234.5` → `"$1,234.50"`. Half-cents round away from
/// zero.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// One decimal place followed by `%`, e.g. `12.345` → `"12.3%"`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
