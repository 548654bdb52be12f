//! Fee adjustments.

use rust_decimal::Decimal;

use crate::exchange::Endpoint;

/// Add the exchange's proportional taker fee: `cost * (1 + taker_fee_rate)`.
///
/// `None` if the result does not fit in a `Decimal`.
pub fn apply_taker_fee(endpoint: &Endpoint, cost: Decimal) -> Option<Decimal> {
    cost.checked_mul(Decimal::ONE.checked_add(endpoint.taker_fee_rate)?)
}

/// Deduct the exchange's transfer fee: `cost - transfer_fee_rate`.
///
/// The transfer fee is a flat quantity, independent of trade size.
pub fn apply_transfer_fee(endpoint: &Endpoint, cost: Decimal) -> Option<Decimal> {
    cost.checked_sub(endpoint.transfer_fee_rate)
}
