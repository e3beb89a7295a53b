use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::{ast::expressions::BinaryOperator, errors::errors::RuntimeError};

use super::values::RuntimeValue;

/// Applies `operator` to two already evaluated operands.
pub fn apply_binary(
    operator: BinaryOperator,
    left: RuntimeValue,
    right: RuntimeValue,
) -> Result<RuntimeValue, RuntimeError> {
    use RuntimeValue::{Boolean, Decimal, Integer};

    let result = match (operator, &left, &right) {
        (BinaryOperator::And, Boolean(a), Boolean(b)) => Boolean(*a && *b),
        (BinaryOperator::Or, Boolean(a), Boolean(b)) => Boolean(*a || *b),
        (BinaryOperator::Equal, _, _) => Boolean(left == right),
        (BinaryOperator::NotEqual, _, _) => Boolean(left != right),
        (BinaryOperator::Less, _, _) | (BinaryOperator::Greater, _, _) => {
            let wanted = if operator == BinaryOperator::Less {
                Ordering::Less
            } else {
                Ordering::Greater
            };
            match left.compare(&right) {
                Some(ordering) => Boolean(ordering == wanted),
                None => return Err(invalid(operator, &left, &right)),
            }
        }
        (BinaryOperator::Add, RuntimeValue::String(_), _)
        | (BinaryOperator::Add, _, RuntimeValue::String(_)) => {
            RuntimeValue::String(format!("{}{}", left, right))
        }
        (BinaryOperator::Add, Integer(a), Integer(b)) => Integer(a + b),
        (BinaryOperator::Add, Decimal(a), Decimal(b)) => Decimal(a + b),
        (BinaryOperator::Subtract, Integer(a), Integer(b)) => Integer(a - b),
        (BinaryOperator::Subtract, Decimal(a), Decimal(b)) => Decimal(a - b),
        (BinaryOperator::Multiply, Integer(a), Integer(b)) => Integer(a * b),
        (BinaryOperator::Multiply, Decimal(a), Decimal(b)) => Decimal(a * b),
        (BinaryOperator::Divide, Integer(a), Integer(b)) => {
            if b.is_zero() {
                return Err(RuntimeError::DivisionByZero);
            }
            Integer(a / b)
        }
        (BinaryOperator::Divide, Decimal(a), Decimal(b)) => Decimal(divide_decimal(a, b)?),
        (BinaryOperator::Power, Integer(a), Integer(b)) => Integer(power(a, b)?),
        _ => return Err(invalid(operator, &left, &right)),
    };

    Ok(result)
}

fn invalid(operator: BinaryOperator, left: &RuntimeValue, right: &RuntimeValue) -> RuntimeError {
    RuntimeError::InvalidOperands {
        operator: operator.symbol().to_string(),
        left: left.kind_name().to_string(),
        right: right.kind_name().to_string(),
    }
}

/// `dividend / divisor` at the dividend's scale, rounding half to even.
pub fn divide_decimal(dividend: &BigDecimal, divisor: &BigDecimal) -> Result<BigDecimal, RuntimeError> {
    if divisor.is_zero() {
        return Err(RuntimeError::DivisionByZero);
    }

    let (a, scale) = dividend.as_bigint_and_exponent();
    let (b, divisor_scale) = divisor.as_bigint_and_exponent();

    // a * 10^-scale / (b * 10^-divisor_scale), expressed as an integer count
    // of 10^-scale units: a * 10^divisor_scale / b.
    let (numerator, denominator) = if divisor_scale >= 0 {
        (a * ten_to(divisor_scale.unsigned_abs()), b)
    } else {
        (a, b * ten_to(divisor_scale.unsigned_abs()))
    };

    Ok(BigDecimal::new(
        divide_half_even(&numerator, &denominator),
        scale,
    ))
}

fn ten_to(exponent: u64) -> BigInt {
    power_u64(BigInt::from(10), exponent)
}

/// Integer division rounding to the nearest integer, ties to even.
fn divide_half_even(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;

    if remainder.is_zero() {
        return quotient;
    }

    let round_away = match (remainder.abs() * 2u32).cmp(&denominator.abs()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => !(&quotient % 2u32).is_zero(),
    };

    if !round_away {
        quotient
    } else if numerator.is_negative() != denominator.is_negative() {
        quotient - 1
    } else {
        quotient + 1
    }
}

/// `base ^ exponent` by repeated squaring.
pub fn power(base: &BigInt, exponent: &BigInt) -> Result<BigInt, RuntimeError> {
    if exponent.is_negative() {
        return Err(RuntimeError::NegativeExponent {
            exponent: exponent.to_string(),
        });
    }

    let exponent = exponent
        .to_u64()
        .ok_or_else(|| RuntimeError::ExponentTooLarge {
            exponent: exponent.to_string(),
        })?;

    Ok(power_u64(base.clone(), exponent))
}

fn power_u64(mut base: BigInt, mut exponent: u64) -> BigInt {
    let mut result = BigInt::one();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result *= &base;
        }
        exponent >>= 1;
        if exponent > 0 {
            base = &base * &base;
        }
    }
    result
}
