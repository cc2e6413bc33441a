//! Numeric increment of label fields
//!
//! Used to number a run of labels ("Box 1", "Box 2", ...). Every unsigned
//! integer or decimal run in the text is advanced by the same delta; the
//! surrounding text is kept as is.
//!
//! Numbers go through a numeric type, so leading zeros are dropped
//! (`"x007y"` becomes `"x8y"`). Decimals are printed in shortest form with
//! trailing zeros dropped, but always keep one fractional digit (`"1.50"`
//! becomes `"2.5"`, `"2.0"` becomes `"3.0"`).
//!
//! Only ASCII digits `0-9` count as numbers. Digits from other scripts are
//! left untouched as plain text.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{PrintError, PrintResult};

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("Invalid number regex"));

/// Increment every numeric run in `text` by `delta`
///
/// Returns [`PrintError::Format`] if a run cannot be represented (more digits
/// than the numeric types hold).
pub fn increment_numbers(text: &str, delta: i64) -> PrintResult<String> {
    let mut out = String::with_capacity(text.len() + 2);
    let mut last = 0;

    for m in NUMBER_RE.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        out.push_str(&increment_token(m.as_str(), delta)?);
        last = m.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}

fn increment_token(token: &str, delta: i64) -> PrintResult<String> {
    if token.contains('.') {
        let value =
            Decimal::from_str(token).map_err(|_| PrintError::Format(token.to_string()))?;
        value
            .checked_add(Decimal::from(delta))
            .map(format_decimal)
            .ok_or_else(|| PrintError::Format(token.to_string()))
    } else {
        let value: i128 = token
            .parse()
            .map_err(|_| PrintError::Format(token.to_string()))?;
        value
            .checked_add(i128::from(delta))
            .map(|v| v.to_string())
            .ok_or_else(|| PrintError::Format(token.to_string()))
    }
}

fn format_decimal(value: Decimal) -> String {
    let value = value.normalize();
    if value.scale() == 0 {
        format!("{}.0", value)
    } else {
        value.to_string()
    }
}
