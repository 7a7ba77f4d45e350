use rust_decimal::Decimal;

/// Percentage change from `previous` to `current`.
///
/// A non-positive baseline has no meaningful ratio and yields 0.
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    current
        .checked_sub(previous)
        .and_then(|delta| delta.checked_div(previous))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

pub fn percent_change_count(current: u64, previous: u64) -> Decimal {
    percent_change(Decimal::from(current), Decimal::from(previous))
}
