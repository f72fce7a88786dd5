//! Numeric literal canonicalization.

use num_bigint::BigInt;

use crate::ast::Literal;

/// Largest positive exponent expanded into trailing zeros.
const MAX_EXPANSION: u32 = 4096;

/// Converts the text of a numeric literal into its canonical value.
///
/// Integers stay integers. Anything with a decimal point or an exponent
/// becomes a decimal whose scale reflects the written digits, so `600.` is
/// 600 with scale 0 and `0.00e0` is 0 with scale 2. Values are exact at any
/// magnitude.
pub(crate) fn canonicalize(text: &str) -> Result<Literal, String> {
    let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
        None => (text, None),
    };

    let (negative, unsigned) = match mantissa.as_bytes().first() {
        Some(b'-') => (true, &mantissa[1..]),
        Some(b'+') => (false, &mantissa[1..]),
        _ => (false, mantissa),
    };
    let (int_digits, frac_digits) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(String::from("numeric literal has no digits"));
    }

    let digits = [int_digits, frac_digits].concat();
    let mut coefficient = BigInt::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| format!("invalid digits in numeric literal {text:?}"))?;
    if negative {
        coefficient = -coefficient;
    }

    if exponent.is_none() && !unsigned.contains('.') {
        return Ok(Literal::Integer(coefficient));
    }

    let written_exponent = match exponent {
        Some(exp) => exp
            .parse::<i64>()
            .map_err(|e| format!("invalid exponent: {e}"))?,
        None => 0,
    };
    let exponent = i64::try_from(frac_digits.len())
        .ok()
        .and_then(|frac_len| written_exponent.checked_sub(frac_len))
        .ok_or_else(|| String::from("exponent is out of range"))?;

    if exponent <= 0 {
        return Ok(Literal::Decimal {
            coefficient,
            exponent,
        });
    }

    let shift = u32::try_from(exponent)
        .ok()
        .filter(|&shift| shift <= MAX_EXPANSION)
        .ok_or_else(|| format!("exponent {exponent} exceeds {MAX_EXPANSION}"))?;
    Ok(Literal::Decimal {
        coefficient: coefficient * BigInt::from(10_u32).pow(shift),
        exponent: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(text: &str) -> (String, i64) {
        let literal = canonicalize(text).unwrap();
        let (coefficient, exponent) = literal
            .decimal_parts()
            .unwrap_or_else(|| panic!("{text} is not a decimal"));
        (coefficient.to_string(), exponent)
    }

    fn integer(text: &str) -> String {
        match canonicalize(text).unwrap() {
            Literal::Integer(n) => n.to_string(),
            other => panic!("{text} is not an integer: {other:?}"),
        }
    }

    #[test]
    fn test_integers_stay_integers() {
        assert_eq!(integer("42"), "42");
        assert_eq!(integer("-7"), "-7");
        assert_eq!(integer("+3"), "3");
    }

    #[test]
    fn test_decimal_scale_is_preserved() {
        assert_eq!(parts(".1"), (String::from("1"), -1));
        assert_eq!(parts("600."), (String::from("600"), 0));
        assert_eq!(parts("0.00e0"), (String::from("0"), -2));
        assert_eq!(parts("1.50"), (String::from("150"), -2));
        assert_eq!(parts("-2.5"), (String::from("-25"), -1));
    }

    #[test]
    fn test_exponents() {
        assert_eq!(parts("15e-1"), (String::from("15"), -1));
        assert_eq!(parts("1.5e-3"), (String::from("15"), -4));
        assert_eq!(parts("12e2"), (String::from("1200"), 0));
        assert_eq!(parts("1.5E+2"), (String::from("150"), 0));
    }

    #[test]
    fn test_integers_beyond_i64() {
        assert_eq!(integer("9223372036854775808"), "9223372036854775808");
        assert_eq!(
            integer("-99999999999999999999999999999999"),
            "-99999999999999999999999999999999"
        );
    }

    #[test]
    fn test_decimals_beyond_fixed_precision() {
        assert_eq!(
            parts("0.00000000000000000000000000001"),
            (String::from("1"), -29)
        );
        assert_eq!(parts("1e-40"), (String::from("1"), -40));
        assert_eq!(
            parts("123456789012345678901234567890.5"),
            (String::from("1234567890123456789012345678905"), -1)
        );
        assert_eq!(parts("1e400"), (format!("1{}", "0".repeat(400)), 0));
    }

    #[test]
    fn test_extreme_exponents_are_errors() {
        assert_eq!(
            parts("1.5e-9223372036854775807"),
            (String::from("15"), i64::MIN)
        );
        assert!(canonicalize("1.5e-9223372036854775808").is_err());
        assert!(canonicalize("1.55e-9223372036854775807").is_err());
        assert!(canonicalize("1e99999999999999999999").is_err());
        assert!(canonicalize("1e5000").is_err());
    }
}
