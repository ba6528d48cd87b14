use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero ("half-up" for money) to `dp` decimal places.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

pub fn round_half_up_opt(value: Option<Decimal>, dp: u32) -> Option<Decimal> {
    value.map(|v| round_half_up(v, dp))
}

/// Division that yields zero instead of failing when the divisor is zero.
pub fn div_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
    }
}

/// Division that yields `None` ("undefined") when the divisor is zero.
pub fn div_or_none(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        numerator.checked_div(denominator)
    }
}
