//! Parsing and fixed formatting of monetary amounts.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::DomainError;

/// Largest amount accepted on entry (one trillion).
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Parses user-entered amount text into a strictly positive decimal.
///
/// Amounts are persisted as JSON numbers, so only values that read back
/// unchanged through an `f64` are accepted. The returned decimal is the
/// value storage will hold.
pub fn parse_amount(text: &str) -> Result<Decimal, DomainError> {
    let invalid = || DomainError::InvalidAmount(text.to_string());

    let amount: Decimal = text.trim().parse().map_err(|_| invalid())?;
    if amount <= Decimal::ZERO || amount > Decimal::from(MAX_AMOUNT) {
        return Err(invalid());
    }

    let stored: Decimal = amount
        .to_f64()
        .ok_or_else(invalid)?
        .to_string()
        .parse()
        .map_err(|_| invalid())?;
    if stored != amount {
        return Err(invalid());
    }
    Ok(stored)
}

/// Formats an amount with thousands separators and two fraction digits,
/// e.g. `1234.5` -> `1,234.50`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
