use rust_decimal::Decimal;

use crate::errors::CalculatorError;
use crate::transactions::{TradeLeg, Transaction, TransactionKind};
use crate::utils::decimal_utils::div_or_zero;

/// Running weighted-average cost of one asset.
///
/// Each transaction maps the previous state to a new one; nothing is mutated
/// in place. `average_price` is re-derived from `total_cost / shares` after
/// every acquisition or corporate action and left untouched by disposals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunningCostState {
    /// Shares held. May be fractional or negative (short).
    pub shares: Decimal,
    /// Total cost value of the shares held.
    pub total_cost: Decimal,
    pub average_price: Decimal,
}

fn derive_average(total_cost: Decimal, shares: Decimal) -> Decimal {
    if shares > Decimal::ZERO {
        div_or_zero(total_cost, shares)
    } else {
        Decimal::ZERO
    }
}

impl RunningCostState {
    pub fn apply(&self, transaction: &Transaction) -> Result<Self, CalculatorError> {
        transaction.validate()?;

        let next = match &transaction.kind {
            TransactionKind::Buy { .. } => {
                let leg = required_leg(transaction)?;
                let shares = self.shares + leg.shares.abs();
                let total_cost = self.total_cost + leg.value() + transaction.costs;
                RunningCostState {
                    shares,
                    total_cost,
                    average_price: derive_average(total_cost, shares),
                }
            }
            TransactionKind::Sell { .. } => {
                let leg = required_leg(transaction)?;
                self.dispose(leg.shares.abs())
            }
            TransactionKind::Transfer { shares, close_price } => {
                if shares.is_zero() {
                    *self
                } else if shares.is_sign_negative() {
                    self.dispose(shares.abs())
                } else {
                    let close_price = close_price.unwrap_or(Decimal::ZERO);
                    let total_cost = self.total_cost + *shares * close_price;
                    let shares = self.shares + *shares;
                    RunningCostState {
                        shares,
                        total_cost,
                        average_price: derive_average(total_cost, shares),
                    }
                }
            }
            TransactionKind::BonusShare { factor } => {
                let shares = self.shares + self.shares * *factor;
                RunningCostState {
                    shares,
                    total_cost: self.total_cost,
                    average_price: derive_average(self.total_cost, shares),
                }
            }
            TransactionKind::Split { factor } => {
                let shares = self.shares * *factor;
                RunningCostState {
                    shares,
                    total_cost: self.total_cost,
                    average_price: derive_average(self.total_cost, shares),
                }
            }
            TransactionKind::Inplit { factor } => {
                let shares = div_or_zero(self.shares, *factor);
                RunningCostState {
                    shares,
                    total_cost: self.total_cost,
                    average_price: derive_average(self.total_cost, shares),
                }
            }
            TransactionKind::Dividend { .. } => *self,
        };

        Ok(next)
    }

    /// Removes `quantity` shares at the current average price.
    fn dispose(&self, quantity: Decimal) -> Self {
        let shares = self.shares - quantity;
        RunningCostState {
            shares,
            total_cost: shares * self.average_price,
            average_price: self.average_price,
        }
    }

    /// Cost value still held; zero once the position is closed.
    pub fn cost_basis(&self) -> Decimal {
        if self.shares.is_zero() {
            Decimal::ZERO
        } else {
            self.total_cost
        }
    }
}

fn required_leg(transaction: &Transaction) -> Result<TradeLeg, CalculatorError> {
    transaction.trade_leg()?.ok_or_else(|| {
        CalculatorError::Calculation(format!(
            "Transaction {} has no trade leg",
            transaction.id
        ))
    })
}
