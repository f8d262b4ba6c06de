//! Pure conversions from raw values to display strings.

mod date;
mod number;

pub use date::{format_date, format_payment_date, parse_calendar_date};
pub use number::{format_currency, format_percentage};
