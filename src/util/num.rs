use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Reals at or beyond this magnitude are shown in scientific notation.
const SCIENTIFIC_UPPER: f64 = 1e16;
/// Non-zero reals below this magnitude are shown in scientific notation.
const SCIENTIFIC_LOWER: f64 = 1e-4;

/// Converts an `i64` to the nearest `f64`.
///
/// Used when an integer meets a real in arithmetic or when integer arithmetic
/// overflows and is redone on reals, so rounding beyond `2^53` is accepted.
///
/// ## Example
/// ```
/// use relief::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// assert_eq!(i64_to_f64(i64::MAX), 9.223372036854776e18);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a repetition count to `u64`.
///
/// ## Errors
/// Returns `TypeError` if the value is negative.
///
/// ## Example
/// ```
/// use relief::{error::RuntimeError, util::num::i64_to_count};
///
/// assert_eq!(i64_to_count(3, 1).unwrap(), 3);
///
/// let err = i64_to_count(-1, 9).unwrap_err();
/// assert!(matches!(err, RuntimeError::TypeError { line: 9, .. }));
/// ```
pub fn i64_to_count(value: i64, line: usize) -> EvalResult<u64> {
    u64::try_from(value).map_err(|_| {
                            RuntimeError::TypeError { details: format!("repetition count must not be negative, got {value}"),
                                                      line }
                        })
}

/// Formats a real the way the language prints it.
///
/// Integral values keep one decimal place (`2.0`), very large or very small
/// magnitudes use scientific notation with a signed, two-digit exponent
/// (`1e+20`, `1.5e-07`), and the non-finite values print as `inf`, `-inf` and
/// `nan`.
///
/// ## Example
/// ```
/// use relief::util::num::format_real;
///
/// assert_eq!(format_real(2.0), "2.0");
/// assert_eq!(format_real(2.5), "2.5");
/// assert_eq!(format_real(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_real(1e20), "1e+20");
/// assert_eq!(format_real(-1.5e-7), "-1.5e-07");
/// assert_eq!(format_real(f64::INFINITY), "inf");
/// assert_eq!(format_real(f64::NAN), "nan");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}inf");
    }

    let magnitude = value.abs();
    if magnitude >= SCIENTIFIC_UPPER || (magnitude != 0.0 && magnitude < SCIENTIFIC_LOWER) {
        return format_scientific(value);
    }

    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn format_scientific(value: f64) -> String {
    let formatted = format!("{value:e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };

    let (sign, digits) = exponent.strip_prefix('-')
                                 .map_or(("+", exponent), |digits| ("-", digits));

    format!("{mantissa}e{sign}{digits:0>2}")
}
