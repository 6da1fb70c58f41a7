//! Canonical text encoding of transactions.
//!
//! Block hashes are computed over this encoding, so every byte it produces
//! is part of the hash contract: key names and order, string escaping and
//! the rendering of `f32` amounts must never change.

use std::io;

use serde::Serialize;
use serde::ser::{Error as _, Serializer};
use serde_json::ser::Formatter;
use serde_json::value::RawValue;

use super::Transaction;
use crate::error::{LedgerError, Result};

/// Shortest round-trip decimal rendering of `value`, never in exponent form.
///
/// This is the rendering used inside transaction ids.
pub fn shortest_decimal(value: f32) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f32::INFINITY {
        "+Inf".to_string()
    } else if value == f32::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        value.to_string()
    }
}

/// JSON number rendering of `value`.
///
/// Positional for magnitudes in `[1e-6, 1e21)`, exponent form outside of it
/// with an explicit sign on positive exponents (`1e-7`, `1.5e+21`).
pub fn json_number(value: f32) -> Result<String> {
    if !value.is_finite() {
        return Err(LedgerError::NonFiniteValue(value));
    }
    let abs = value.abs();
    if abs != 0.0 && (abs < 1e-6 || abs >= 1e21) {
        let rendered = format!("{value:e}");
        return Ok(match rendered.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => rendered,
        });
    }
    Ok(value.to_string())
}

pub(crate) fn serialize_value<S: Serializer>(
    value: &f32,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let rendered = json_number(*value).map_err(S::Error::custom)?;
    let raw = RawValue::from_string(rendered).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}

/// Compact JSON that additionally escapes `<`, `>`, `&`, U+2028 and U+2029.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Encode `transactions` as the whitespace-free JSON array blocks hash over.
///
/// Fails when a transaction carries a value JSON cannot represent; callers
/// must surface that instead of hashing a partial encoding.
pub fn serialize_transactions(transactions: &[Transaction]) -> Result<String> {
    let mut buf = Vec::with_capacity(transactions.len() * 192 + 2);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter);
    transactions.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}
