//! Record parser: turns one framed line into a [`Reading`].
//!
//! A record is `<int_a>,<int_b>`. Delimiter problems (no comma, comma first,
//! comma last) always map to [`Reading::INVALID`]. What happens when a field
//! is present but not numeric is decided by [`NumericPolicy`].

use serde::Deserialize;

use crate::error::{Field, ParseError};
use crate::types::Reading;

/// Handling of a field that has a valid comma position but no digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Map the record to [`Reading::INVALID`]. Parsing is total.
    #[default]
    Sentinel,
    /// Report the conversion failure; the delivery is aborted.
    Strict,
}

impl std::fmt::Display for NumericPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericPolicy::Sentinel => write!(f, "sentinel"),
            NumericPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for NumericPolicy {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sentinel" => Ok(NumericPolicy::Sentinel),
            "strict" => Ok(NumericPolicy::Strict),
            other => Err(crate::error::ConfigError::UnknownVariant {
                key: "numeric_policy",
                value: other.to_string(),
            }),
        }
    }
}

/// Parse `line` into a reading.
///
/// Returns `Ok(Reading::INVALID)` for a misplaced or missing comma. A
/// numeric conversion failure is returned as `Err` and left to the caller
/// (see [`parse_record_with`]).
pub fn parse_record(line: &str) -> Result<Reading, ParseError> {
    let Some(comma) = line.find(',') else {
        return Ok(Reading::INVALID);
    };
    if comma == 0 || comma + 1 >= line.len() {
        return Ok(Reading::INVALID);
    }

    let a = parse_leading_int(&line[..comma], Field::A)?;
    let b = parse_leading_int(&line[comma + 1..], Field::B)?;
    Ok(Reading::new(a, b))
}

/// [`parse_record`] with the numeric failure resolved by `policy`.
pub fn parse_record_with(line: &str, policy: NumericPolicy) -> Result<Reading, ParseError> {
    match (parse_record(line), policy) {
        (Err(err), NumericPolicy::Sentinel) => {
            tracing::debug!(line, %err, "non-numeric field mapped to sentinel");
            Ok(Reading::INVALID)
        }
        (result, _) => result,
    }
}

/// Decimal conversion that skips leading whitespace, accepts one optional
/// sign and stops at the first non-digit.
///
/// `"  7xyz"` converts to `7`; `"x7"` and `"-"` have no digits.
pub fn parse_leading_int(text: &str, field: Field) -> Result<i32, ParseError> {
    let trimmed = text.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(ParseError::NoDigits { field });
    }

    let mut value: i64 = 0;
    for d in unsigned[..digits].bytes() {
        value = value * 10 + i64::from(d - b'0');
        if value > i64::from(i32::MAX) + 1 {
            return Err(ParseError::OutOfRange { field });
        }
    }
    let value = if negative { -value } else { value };
    i32::try_from(value).map_err(|_| ParseError::OutOfRange { field })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
