//! Whitespace-terminated unsigned integer fields.
//!
//! Header and command lines are sequences of numeric fields, each ending in
//! exactly one whitespace byte. [`parse_uint`] reads one such field and
//! hands back the cursor positioned after its terminator.

use crate::error::ParseError;

/// Parse one unsigned integer field in `radix` from the start of `input`.
///
/// Nothing is skipped before the digits: signs, leading blanks and `0x`
/// prefixes are not digits and fail with [`ParseError::NoDigits`] (a
/// leading `0` parses as the digit zero and then fails on the `x`). The
/// byte right after the digits must be ASCII whitespace; it is consumed,
/// and the returned slice starts after it.
///
/// # Panics
///
/// Panics if `radix` is not in `2..=36`.
pub fn parse_uint(input: &[u8], radix: u32) -> Result<(u64, &[u8]), ParseError> {
    assert!((2..=36).contains(&radix), "radix must be in 2..=36");

    let digits = input
        .iter()
        .take_while(|&&b| char::from(b).is_digit(radix))
        .count();
    if digits == 0 {
        return Err(ParseError::NoDigits {
            found: input.first().copied(),
        });
    }

    let mut value: u64 = 0;
    for &b in &input[..digits] {
        // `is_digit` above guarantees the conversion succeeds.
        let digit = char::from(b).to_digit(radix).unwrap_or(0);
        value = value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or(ParseError::Overflow)?;
    }

    match input.get(digits) {
        Some(b) if b.is_ascii_whitespace() => Ok((value, &input[digits + 1..])),
        found => Err(ParseError::BadTerminator {
            found: found.copied(),
        }),
    }
}
