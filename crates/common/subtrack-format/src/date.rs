use chrono::{DateTime, NaiveDate};

/// Parses user or wire input into a calendar date. Accepts `YYYY-MM-DD` and
/// RFC 3339 timestamps, whose date part is kept.
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

/// Normalises a date for transmission: `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Describes a payment date relative to `today`, e.g. `"in 3 days"`,
/// `"2 months ago"`, `"today"`.
pub fn format_payment_date(date: NaiveDate, today: NaiveDate) -> String {
    let days = (date - today).num_days();
    if days == 0 {
        return "today".to_string();
    }

    let distance = describe_distance(days.unsigned_abs());
    if days > 0 {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

fn describe_distance(days: u64) -> String {
    match days {
        0..=29 => plural(days, "day"),
        30..=44 => "about 1 month".to_string(),
        45..=364 => plural((days as f64 / 30.0).round() as u64, "month"),
        _ => {
            let years = days / 365;
            format!("about {}", plural(years, "year"))
        }
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
