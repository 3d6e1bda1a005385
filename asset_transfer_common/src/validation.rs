//! Input validation for stored balances and transfer amounts

use std::num::ParseIntError;

/// **Parses a base-10 integer the way stored balances are written**
///
/// An optional sign, then ASCII digits; no surrounding whitespace.
pub fn parse_integer(value: &str) -> Result<i64, ParseIntError> {
    value.parse::<i64>()
}

/// **Treats an empty stored value the same as a missing one**
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
