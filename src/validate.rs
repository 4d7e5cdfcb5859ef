//! Lexical conformance of string values to [`ParamType`] tags.
//!
//! Everything here is a pure function of its arguments.

use std::str::FromStr;

use crate::{codec::DELIMITER, param::ParamType};

/// Checks that `value` conforms to `ty`, returning the reason when it does not.
///
/// The value is checked as given; callers trim beforehand.
pub fn validate(value: &str, ty: ParamType) -> Result<(), String> {
    match ty {
        ParamType::Int8 => parse_int::<i8>(value, ty),
        ParamType::Int16 => parse_int::<i16>(value, ty),
        ParamType::Int32 => parse_int::<i32>(value, ty),
        ParamType::Int64 => parse_int::<i64>(value, ty),
        ParamType::Uint8 => parse_int::<u8>(value, ty),
        ParamType::Uint16 => parse_int::<u16>(value, ty),
        ParamType::Uint32 => parse_int::<u32>(value, ty),
        ParamType::Uint64 => parse_int::<u64>(value, ty),
        ParamType::Float => parse_float::<f32>(value, ty, f32::is_finite),
        ParamType::Double => parse_float::<f64>(value, ty, f64::is_finite),
        ParamType::Bool => parse_bool(value).map(|_| ()),
        ParamType::String => Ok(()),
    }
}

pub fn conforms(value: &str, ty: ParamType) -> bool {
    validate(value, ty).is_ok()
}

/// Checks that `name` can be stored in a registry and written to a
/// `.param` line unchanged.
///
/// Names are keys on load, where each field is trimmed and split on
/// [`DELIMITER`], so a name must be non-empty, free of surrounding
/// whitespace, and contain neither the delimiter nor a line break.
pub fn check_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name is empty".to_string());
    }
    if name.trim() != name {
        return Err("name has leading or trailing whitespace".to_string());
    }
    if name.contains(DELIMITER) {
        return Err(format!("name contains '{DELIMITER}'"));
    }
    if name.contains(['\n', '\r']) {
        return Err("name contains a line break".to_string());
    }
    Ok(())
}

/// Only `true` and `false` are accepted.
pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("invalid boolean: '{value}' (expected true or false)")),
    }
}

fn parse_int<T>(value: &str, ty: ParamType) -> Result<(), String>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    value.parse::<T>().map(|_| ()).map_err(|err| {
        use std::num::IntErrorKind::*;
        match err.kind() {
            PosOverflow | NegOverflow => format!("'{value}' is out of range for {ty}"),
            Empty => format!("empty value is not a valid {ty}"),
            _ => format!("invalid integer: '{value}'"),
        }
    })
}

fn parse_float<T>(value: &str, ty: ParamType, is_finite: fn(T) -> bool) -> Result<(), String>
where
    T: FromStr + Copy,
{
    // `str::parse` also takes `inf`, `NaN` and friends.
    let lexical = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !lexical || !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(format!("invalid {ty} literal: '{value}'"));
    }

    match value.parse::<T>() {
        Ok(parsed) if is_finite(parsed) => Ok(()),
        Ok(_) => Err(format!("'{value}' is out of range for {ty}")),
        Err(_) => Err(format!("invalid {ty} literal: '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_name() {
        assert!(check_name("gain").is_ok());
        assert!(check_name("motor max").is_ok());

        assert_eq!(check_name("").unwrap_err(), "name is empty");
        assert_eq!(check_name("  ").unwrap_err(), "name is empty");
        assert!(check_name(" gain").is_err());
        assert!(check_name("gain\t").is_err());
        assert_eq!(check_name("a,b").unwrap_err(), "name contains ','");
        assert!(check_name("x\ny").is_err());
        assert!(check_name("x\ry").is_err());
    }

    #[test]
    fn test_integer_widths() {
        assert!(conforms("-128", ParamType::Int8));
        assert!(conforms("127", ParamType::Int8));
        assert!(!conforms("128", ParamType::Int8));
        assert!(!conforms("-129", ParamType::Int8));

        assert!(conforms("32767", ParamType::Int16));
        assert!(!conforms("32768", ParamType::Int16));

        assert!(conforms("-2147483648", ParamType::Int32));
        assert!(!conforms("2147483648", ParamType::Int32));

        assert!(conforms("9223372036854775807", ParamType::Int64));
        assert!(!conforms("9223372036854775808", ParamType::Int64));
    }

    #[test]
    fn test_unsigned_rejects_negative_and_overflow() {
        assert!(conforms("255", ParamType::Uint8));
        assert!(!conforms("256", ParamType::Uint8));
        assert!(!conforms("-1", ParamType::Uint8));
        assert!(conforms("65535", ParamType::Uint16));
        assert!(!conforms("65536", ParamType::Uint16));
        assert!(conforms("4294967295", ParamType::Uint32));
        assert!(!conforms("4294967296", ParamType::Uint32));
        assert!(conforms("18446744073709551615", ParamType::Uint64));
        assert!(!conforms("18446744073709551616", ParamType::Uint64));
    }

    #[test]
    fn test_integers_reject_non_numeric() {
        for ty in ParamType::ALL.into_iter().filter(|ty| ty.is_integer()) {
            assert!(!conforms("abc", ty), "{ty}");
            assert!(!conforms("1.5", ty), "{ty}");
            assert!(!conforms("", ty), "{ty}");
            assert!(!conforms("1e3", ty), "{ty}");
        }
    }

    #[test]
    fn test_out_of_range_reason() {
        let reason = validate("300", ParamType::Uint8).unwrap_err();
        assert!(reason.contains("out of range"), "{reason}");
    }

    #[test]
    fn test_floats() {
        for ty in [ParamType::Float, ParamType::Double] {
            assert!(conforms("0", ty));
            assert!(conforms("-3.25", ty));
            assert!(conforms(".5", ty));
            assert!(conforms("1e-3", ty));
            assert!(conforms("6.02E23", ty));
            assert!(!conforms("abc", ty));
            assert!(!conforms("1.2.3", ty));
            assert!(!conforms("inf", ty));
            assert!(!conforms("NaN", ty));
            assert!(!conforms("", ty));
            assert!(!conforms("e", ty));
        }
    }

    #[test]
    fn test_float_overflow_depends_on_width() {
        assert!(!conforms("1e40", ParamType::Float));
        assert!(conforms("1e40", ParamType::Double));
        assert!(!conforms("1e400", ParamType::Double));
    }

    #[test]
    fn test_bool_accepts_only_canonical_literals() {
        assert!(conforms("true", ParamType::Bool));
        assert!(conforms("false", ParamType::Bool));
        assert!(!conforms("1", ParamType::Bool));
        assert!(!conforms("0", ParamType::Bool));
        assert!(!conforms("yes", ParamType::Bool));
        assert!(!conforms("TRUE", ParamType::Bool));
    }

    #[test]
    fn test_string_always_conforms() {
        assert!(conforms("", ParamType::String));
        assert!(conforms("anything at all", ParamType::String));
    }
}
