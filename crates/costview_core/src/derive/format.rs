//! Currency and date rendering (en-US conventions).

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// Marker rendered for timestamps that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Display format, e.g. "Jan 5, 2024, 3:45 PM".
const DATE_DISPLAY_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// Naive timestamp layouts accepted besides RFC 3339.
const NAIVE_LAYOUTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// How many decimals a monetary value is shown with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FractionDigits {
    /// Table cells and summary cards: two decimals
    Table,
    /// Chart labels and tooltips: whole units
    Chart,
}

impl FractionDigits {
    pub fn places(self) -> usize {
        match self {
            Self::Table => 2,
            Self::Chart => 0,
        }
    }
}

/// Symbol used in front of the amount for a currency code.
fn currency_symbol(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CNY" => "CN¥",
        "INR" => "₹",
        "KRW" => "₩",
        "CAD" => "CA$",
        "AUD" => "A$",
        "NZD" => "NZ$",
        "HKD" => "HK$",
        "TWD" => "NT$",
        "MXN" => "MX$",
        "BRL" => "R$",
        "ILS" => "₪",
        "VND" => "₫",
        _ => return None,
    };
    Some(symbol)
}

/// Prefix for a well-formed (three ASCII letters) ISO 4217 code: its symbol
/// when there is one, otherwise the code itself followed by a space.
fn currency_prefix(code: &str) -> Option<String> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let code = code.to_ascii_uppercase();
    Some(match currency_symbol(&code) {
        Some(symbol) => symbol.to_string(),
        None => format!("{} ", code),
    })
}

/// Format a monetary amount, failing on a malformed currency code.
pub fn try_format_currency(amount: f64, code: &str, digits: FractionDigits) -> CoreResult<String> {
    let prefix = currency_prefix(code).ok_or_else(|| CoreError::Format {
        code: code.to_string(),
    })?;
    let (negative, number) = format_number(amount, digits.places());
    Ok(format!("{}{}{}", sign(negative), prefix, number))
}

/// Format a monetary amount for display.
///
/// Codes without a known symbol are shown as a prefix (`CHF 1,234.50`).
/// Malformed codes fall back to a plain number with the code as suffix
/// (`1,234.50 US$`).
pub fn format_currency(amount: f64, code: &str, digits: FractionDigits) -> String {
    match try_format_currency(amount, code, digits) {
        Ok(formatted) => formatted,
        Err(e) => {
            debug!("{}, using plain number format", e);
            let (negative, number) = format_number(amount, digits.places());
            let code = code.trim();
            if code.is_empty() {
                format!("{}{}", sign(negative), number)
            } else {
                format!("{}{} {}", sign(negative), number, code)
            }
        }
    }
}

/// Axis tick in thousands, e.g. `$12k`.
pub fn format_thousands_tick(value: f64, code: &str) -> String {
    let thousands = round_half_away(value / 1000.0, 0);
    let negative = thousands < 0.0;
    let whole = format!("{:.0}", thousands.abs());
    let prefix = currency_prefix(code).unwrap_or_default();
    format!("{}{}{}k", sign(negative), prefix, whole)
}

fn sign(negative: bool) -> &'static str {
    if negative {
        "-"
    } else {
        ""
    }
}

/// Render `|amount|` with grouping and fixed decimals; the flag says whether
/// a minus sign is due.
fn format_number(amount: f64, places: usize) -> (bool, String) {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let rounded = round_half_away(amount, places);
    let fixed = format!("{:.*}", places, rounded.abs());

    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = group_thousands(whole);
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    (rounded < 0.0 && !is_zero, out)
}

fn round_half_away(value: f64, places: usize) -> f64 {
    let scale = 10f64.powi(places as i32);
    let scaled = (value * scale).round() / scale;
    if scaled.is_finite() {
        scaled
    } else {
        value
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render an ISO-8601 timestamp as "Jan 5, 2024, 3:45 PM".
///
/// Timestamps with an offset and bare dates (taken as UTC midnight) are
/// shown in local time; naive timestamps as given. Unparseable input renders
/// as [`INVALID_DATE`].
pub fn format_date(iso: &str) -> String {
    match parse_timestamp(iso.trim()) {
        Some(timestamp) => timestamp.format(DATE_DISPLAY_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Local).naive_local());
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|midnight| {
                    Utc.from_utc_datetime(&midnight)
                        .with_timezone(&Local)
                        .naive_local()
                })
        })
}
