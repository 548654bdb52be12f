//! Spread, arbitrage ratio and fee-adjusted profit calculations.

use rust_decimal::Decimal;
use tracing::instrument;

use crate::error::ArbitrageError;
use crate::exchange::Endpoint;
use crate::orderbook::{PriceLevel, Quote, Side};

use super::fees::{apply_taker_fee, apply_transfer_fee};

/// Fee-adjusted outcome of buying on one exchange and selling on another.
#[derive(Debug, Clone, PartialEq)]
pub struct ArbitrageResult {
    /// Tradable size: the smaller of best ask and best bid quantity.
    pub amount: Decimal,
    /// Taker-fee-adjusted cost of the buy leg.
    pub cost: Decimal,
    /// Transfer-fee-adjusted proceeds of the sell leg.
    pub proceeds: Decimal,
    /// `proceeds - cost`, in the quote currency.
    pub profit_currency: Decimal,
    /// `profit_currency / cost * 100`.
    pub profit_percent: Decimal,
}

impl ArbitrageResult {
    /// Whether the round trip makes money after fees.
    pub fn is_profitable(&self) -> bool {
        self.profit_currency > Decimal::ZERO
    }
}

/// Percentage difference between A's and B's best price on one side.
///
/// `(price_a - price_b) / price_a * 100`. A's price is the base, so swapping
/// the exchanges does not simply flip the sign.
pub fn buy_sell_ratio(quote_a: Option<&Quote>, quote_b: Option<&Quote>, side: Side) -> Option<Decimal> {
    let price_a = quote_a?.best(side)?.price;
    let price_b = quote_b?.best(side)?.price;

    percent_of(price_a.checked_sub(price_b)?, price_a)
}

/// Percentage gain from buying at A's best ask and selling at B's best bid.
///
/// `(bid_b - ask_a) / bid_b * 100`, before fees.
pub fn arbitrage_ratio(quote_a: Option<&Quote>, quote_b: Option<&Quote>) -> Option<Decimal> {
    let ask_a = quote_a?.best_ask()?;
    let bid_b = quote_b?.best_bid()?;

    percent_of(bid_b.checked_sub(ask_a)?, bid_b)
}

/// Fee-adjusted profit of buying the top ask on A and selling into the top bid on B.
#[instrument(skip_all, fields(buy = %buy_at.name, sell = %sell_at.name))]
pub fn arbitrage_info(
    buy_at: &Endpoint,
    buy_quote: &Quote,
    sell_at: &Endpoint,
    sell_quote: &Quote,
) -> Result<ArbitrageResult, ArbitrageError> {
    let ask = top_level(buy_at, buy_quote, Side::Asks)?;
    let bid = top_level(sell_at, sell_quote, Side::Bids)?;

    let overflow = || ArbitrageError::Overflow {
        buy: buy_at.name.clone(),
        sell: sell_at.name.clone(),
    };

    let amount = ask.quantity.min(bid.quantity);
    let cost = apply_taker_fee(buy_at, ask.price)
        .and_then(|price| price.checked_mul(amount))
        .ok_or_else(overflow)?;
    let proceeds = apply_transfer_fee(sell_at, bid.price)
        .and_then(|price| price.checked_mul(amount))
        .ok_or_else(overflow)?;

    if cost.is_zero() {
        return Err(ArbitrageError::ZeroCost {
            exchange: buy_at.name.clone(),
        });
    }

    let profit_currency = proceeds.checked_sub(cost).ok_or_else(overflow)?;
    let profit_percent = percent_of(profit_currency, cost).ok_or_else(overflow)?;

    Ok(ArbitrageResult {
        amount,
        cost,
        proceeds,
        profit_currency,
        profit_percent,
    })
}

fn top_level<'a>(endpoint: &Endpoint, quote: &'a Quote, side: Side) -> Result<&'a PriceLevel, ArbitrageError> {
    quote.best(side).ok_or_else(|| ArbitrageError::EmptyBook {
        exchange: endpoint.name.clone(),
        side,
    })
}

/// `delta / base * 100`, or `None` for a zero base or a result out of range.
fn percent_of(delta: Decimal, base: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        return None;
    }
    delta.checked_div(base)?.checked_mul(Decimal::ONE_HUNDRED)
}
