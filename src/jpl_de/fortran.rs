//! Fortran-formatted numeric fields.
//!
//! DE ASCII files encode every floating value in Fortran exponent form,
//! e.g. `0.143951838384999992D-05`: a decimal mantissa followed by a `D`
//! exponent marker. Rust's float parser only understands `e`, so each field
//! is rewritten before parsing. Both the header parser and the chunk loader
//! go through [`eval_number`]; callers map the parse failure onto their own
//! error variant so a bad field is reported in context.

use std::num::ParseFloatError;

/// Evaluate one Fortran-formatted field, e.g. `+0.143951838384999992D-05`.
///
/// Plain decimal fields (as found in GROUP 1030 of the header) pass through
/// unchanged since they contain no exponent marker.
pub(crate) fn eval_number(raw: &str) -> Result<f64, ParseFloatError> {
    let trimmed = raw.trim();
    if trimmed.contains(['D', 'd']) {
        trimmed.replace(['D', 'd'], "e").parse::<f64>()
    } else {
        trimmed.parse::<f64>()
    }
}

/// Evaluate a Fortran field by splitting it into mantissa and exponent and
/// recombining as `mantissa * 10^exponent`.
///
/// Kept alongside [`eval_number`] as an independent evaluation of the same
/// grammar; the two must agree on every well-formed field.
#[cfg(test)]
pub(crate) fn eval_number_split(raw: &str) -> Result<f64, ParseFloatError> {
    let trimmed = raw.trim();
    match trimmed.split_once(['D', 'd']) {
        Some((mantissa, exponent)) => {
            let mantissa = mantissa.parse::<f64>()?;
            let exponent = exponent.parse::<f64>()?;
            Ok(mantissa * 10f64.powf(exponent))
        }
        None => trimmed.parse::<f64>(),
    }
}

/// Split a line on whitespace, dropping empty columns.
///
/// DE files pad columns with a variable amount of spaces; this mirrors the
/// tolerant split used everywhere a fixed-layout line is decomposed.
pub(crate) fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_fortran_exponent() {
        assert_eq!(eval_number("+0.143951838384999992D-05").unwrap(), 0.143951838384999992e-5);
        assert_eq!(eval_number("0.216153107683000014D+05").unwrap(), 21615.3107683000014);
        assert_eq!(eval_number("-0.500000000000000000D+00").unwrap(), -0.5);
        assert_eq!(eval_number("0.000000000000000000D+00").unwrap(), 0.0);
    }

    #[test]
    fn test_eval_plain_decimal() {
        assert_eq!(eval_number("  2451544.50").unwrap(), 2451544.5);
        assert_eq!(eval_number("32.").unwrap(), 32.0);
    }

    #[test]
    fn test_eval_rejects_garbage() {
        assert!(eval_number("GROUP").is_err());
        assert!(eval_number("").is_err());
    }

    #[test]
    fn test_both_evaluations_agree() {
        let fields = [
            "+0.143951838384999992D-05",
            "-0.111397522602242079D+08",
            "0.813005690741906200D+02",
            "0.149597870699999988D+09",
            "2451544.50",
        ];
        for field in fields {
            approx::assert_relative_eq!(
                eval_number(field).unwrap(),
                eval_number_split(field).unwrap(),
                max_relative = f64::EPSILON
            );
        }
    }

    #[test]
    fn test_split_fields_filters_padding() {
        let cols: Vec<&str> = split_fields("   2433264.5   2433296.5  0.1D+00 ").collect();
        assert_eq!(cols, vec!["2433264.5", "2433296.5", "0.1D+00"]);
    }
}
