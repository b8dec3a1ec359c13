use std::time::Duration;
use thiserror::Error;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// The reason a duration literal was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    /// The literal does not follow the `<number><unit>` grammar.
    #[error("invalid duration '{0}'.")]
    Invalid(String),

    /// A number was not followed by a unit.
    #[error("missing unit in duration '{0}'.")]
    MissingUnit(String),

    /// A unit was not one of `ns`, `us`, `µs`, `ms`, `s`, `m`, `h`.
    #[error("unknown unit '{unit}' in duration '{literal}'.")]
    UnknownUnit {
        /// The offending unit.
        unit: String,
        /// The full literal.
        literal: String,
    },

    /// The literal does not fit in 64 bits of nanoseconds.
    #[error("duration '{0}' is out of range.")]
    Overflow(String),

    /// The literal is below zero.
    #[error("duration '{0}' is negative.")]
    Negative(String),
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        // Both the micro sign (U+00B5) and the greek mu (U+03BC).
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parse a duration literal such as `"300ms"`, `"1.5h"` or `"2h45m"`.
///
/// A literal is a sequence of decimal numbers, each with an optional fraction and a mandatory unit.
/// The single literal `"0"` needs no unit.
pub(crate) fn parse_duration(literal: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::Invalid(literal.to_string());
    let mut rest = literal;
    let mut negative = false;

    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }

    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;

    while !rest.is_empty() {
        let bytes = rest.as_bytes();
        if !(bytes[0] == b'.' || bytes[0].is_ascii_digit()) {
            return Err(invalid());
        }

        // Whole part.
        let digits = leading_digits(rest);
        let whole = if digits.is_empty() {
            0
        } else {
            digits
                .parse::<u64>()
                .map_err(|_| DurationError::Overflow(literal.to_string()))?
        };
        let has_whole = !digits.is_empty();
        rest = &rest[digits.len()..];

        // Fractional part.
        let mut fraction: u64 = 0;
        let mut scale: f64 = 1.0;
        let mut has_fraction = false;

        if let Some(stripped) = rest.strip_prefix('.') {
            rest = stripped;
            let digits = leading_digits(rest);
            has_fraction = !digits.is_empty();
            let mut saturated = false;

            for digit in digits.bytes() {
                if saturated {
                    continue;
                }

                match fraction
                    .checked_mul(10)
                    .and_then(|f| f.checked_add(u64::from(digit - b'0')))
                {
                    Some(f) => {
                        fraction = f;
                        scale *= 10.0;
                    }
                    // Precision beyond 64 bits is dropped.
                    None => saturated = true,
                }
            }

            rest = &rest[digits.len()..];
        }

        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        // Unit.
        let unit_length = rest
            .bytes()
            .position(|b| b == b'.' || b.is_ascii_digit())
            .unwrap_or(rest.len());

        if unit_length == 0 {
            return Err(DurationError::MissingUnit(literal.to_string()));
        }

        let unit = &rest[..unit_length];
        rest = &rest[unit_length..];
        let nanos = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            literal: literal.to_string(),
        })?;

        let overflow = || DurationError::Overflow(literal.to_string());
        let mut value = whole.checked_mul(nanos).ok_or_else(overflow)?;

        if fraction > 0 {
            let partial = (fraction as f64 * (nanos as f64 / scale)) as u64;
            value = value.checked_add(partial).ok_or_else(overflow)?;
        }

        total = total.checked_add(value).ok_or_else(overflow)?;
    }

    if negative && total > 0 {
        return Err(DurationError::Negative(literal.to_string()));
    }

    Ok(Duration::from_nanos(total))
}

fn leading_digits(value: &str) -> &str {
    let end = value
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(value.len());
    &value[..end]
}
