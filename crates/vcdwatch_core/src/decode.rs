//! Boundary helper for turning a [`Value`] into an ordinary integer or real.
//!
//! The core never arithmetically interprets vector values (see
//! `VectorValue::Real` in `value.rs`); a consumer that wants an integer calls
//! [`to_integer`] explicitly. This mirrors the original parser's `v2d`
//! helper, which dispatched on the value's format tag rather than calling
//! into the language's expression evaluator.

use crate::error::VcdError;
use crate::value::{Value, VectorValue};
use vcdwatch_common::Logic;

/// Decodes a [`Value`] into an unsigned integer.
///
/// A scalar decodes to `0` or `1`. A binary vector decodes to its unsigned
/// value. Both fail with [`VcdError::ValueError`] if any bit is `x`/`z` —
/// unlike the Change Engine, which stores such values unchanged, a decode
/// request for an indeterminate value has no well-defined integer answer.
pub fn to_integer(value: &Value) -> Result<u128, VcdError> {
    match value {
        Value::Scalar(Logic::Zero) => Ok(0),
        Value::Scalar(Logic::One) => Ok(1),
        Value::Scalar(Logic::X) | Value::Scalar(Logic::Z) => Err(VcdError::ValueError {
            reason: "scalar value is indeterminate (x/z)".into(),
        }),
        Value::Vector(VectorValue::Binary(bits)) => {
            let mut result: u128 = 0;
            for i in (0..bits.width()).rev() {
                let bit = match bits.get(i) {
                    Logic::Zero => 0u128,
                    Logic::One => 1u128,
                    Logic::X | Logic::Z => {
                        return Err(VcdError::ValueError {
                            reason: format!("vector bit {i} is indeterminate (x/z)"),
                        })
                    }
                };
                result = (result << 1) | bit;
            }
            Ok(result)
        }
        Value::Vector(VectorValue::Real(_)) => Err(VcdError::ValueError {
            reason: "real vector has no integer representation, use to_real".into(),
        }),
    }
}

/// Decodes a [`Value`] into a 64-bit float.
///
/// Only meaningful for `r<digits>` real vectors; fails with
/// [`VcdError::ValueError`] for scalars, binary vectors, and malformed real
/// literals.
pub fn to_real(value: &Value) -> Result<f64, VcdError> {
    match value {
        Value::Vector(VectorValue::Real(digits)) => digits.parse::<f64>().map_err(|_| VcdError::ValueError {
            reason: format!("malformed real literal: {digits:?}"),
        }),
        _ => Err(VcdError::ValueError {
            reason: "value is not a real vector".into(),
        }),
    }
}
