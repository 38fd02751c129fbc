//! Small descriptive statistics over `Decimal` values.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Median of `values`, `None` when empty. Even counts average the two middle values.
pub fn median(mut values: Vec<Decimal>) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / dec!(2))
    } else {
        Some(values[mid])
    }
}

/// Arithmetic mean of `values`, `None` when empty.
pub fn mean<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let (sum, count) = values
        .into_iter()
        .fold((Decimal::ZERO, 0u64), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / Decimal::from(count))
    }
}
