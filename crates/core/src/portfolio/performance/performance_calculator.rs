use chrono::{DateTime, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;

use super::cost_state::RunningCostState;
use super::performance_model::{PerformanceCalculation, PerformanceResult, PerformanceWarning};
use crate::assets::Asset;
use crate::errors::CalculatorError;
use crate::transactions::{Transaction, TransactionKind};
use crate::utils::time_utils::days_between;

/// Request to mark the open position to market after the transaction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveValuation {
    /// Live price per share. `None` marks the position at its average price.
    pub quote: Option<Decimal>,
    /// Valuation instant used for `days_running`.
    pub as_of: DateTime<Utc>,
}

/// What one transaction contributes on top of the new cost state.
struct StepEffect {
    state: RunningCostState,
    input: Decimal,
    gross: Decimal,
    done_profit: Decimal,
    data_warning: Option<String>,
}

/// Output accumulator threaded through the fold.
struct PerformanceAccumulator<'a> {
    asset: &'a Asset,
    state: RunningCostState,
    input_amount: Decimal,
    gross_amount: Decimal,
    costs: Decimal,
    taxes: Decimal,
    done_profit: Decimal,
    start_date: Option<DateTime<Utc>>,
    latest_date: Option<DateTime<Utc>>,
    warnings: Vec<PerformanceWarning>,
}

impl<'a> PerformanceAccumulator<'a> {
    fn new(asset: &'a Asset) -> Self {
        Self {
            asset,
            state: RunningCostState::default(),
            input_amount: Decimal::ZERO,
            gross_amount: Decimal::ZERO,
            costs: Decimal::ZERO,
            taxes: Decimal::ZERO,
            done_profit: Decimal::ZERO,
            start_date: None,
            latest_date: None,
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, transaction: &Transaction, message: String) {
        let warning = PerformanceWarning {
            transaction_id: transaction.id.clone(),
            asset_id: self.asset.id.clone(),
            date: transaction.date,
            message,
        };
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn effect_of(&self, transaction: &Transaction) -> Result<StepEffect, CalculatorError> {
        let asset_class = self.asset.asset_class();
        if asset_class.is_bond() && !transaction.kind.is_bond_kind() {
            return Err(CalculatorError::UnsupportedTransaction {
                transaction_id: transaction.id.clone(),
                kind: transaction.kind.as_str().to_string(),
                asset_class: asset_class.to_string(),
            });
        }

        let previous = self.state;
        let state = previous.apply(transaction)?;
        let mut effect = StepEffect {
            state,
            input: Decimal::ZERO,
            gross: Decimal::ZERO,
            done_profit: Decimal::ZERO,
            data_warning: None,
        };

        match &transaction.kind {
            TransactionKind::Buy { .. } => {
                if let Some(leg) = transaction.trade_leg()? {
                    effect.input = leg.value();
                }
            }
            TransactionKind::Sell { .. } => {
                if let Some(leg) = transaction.trade_leg()? {
                    effect.gross = leg.value();
                    effect.done_profit = leg.shares.abs() * (leg.price - previous.average_price);
                }
            }
            TransactionKind::Transfer {
                shares,
                close_price,
            } => {
                if *shares < Decimal::ZERO {
                    if let Some(close_price) = close_price {
                        effect.done_profit =
                            shares.abs() * (*close_price - previous.average_price);
                    }
                } else if *shares > Decimal::ZERO && close_price.is_none() {
                    effect.data_warning = Some(
                        "Incoming transfer has no close price; shares were added at zero cost"
                            .to_string(),
                    );
                }
            }
            TransactionKind::Dividend { value } => {
                effect.gross = *value;
                effect.done_profit = *value;
            }
            TransactionKind::BonusShare { .. }
            | TransactionKind::Split { .. }
            | TransactionKind::Inplit { .. } => {}
        }

        Ok(effect)
    }

    fn step(mut self, transaction: &Transaction) -> Self {
        let effect = match self.effect_of(transaction) {
            Ok(effect) => effect,
            Err(e) => {
                self.warn(transaction, format!("Skipped: {}", e));
                return self;
            }
        };

        if let Some(message) = effect.data_warning {
            self.warn(transaction, message);
        }

        self.state = effect.state;
        self.input_amount += effect.input;
        self.gross_amount += effect.gross;
        self.done_profit += effect.done_profit;
        self.costs += transaction.costs;
        self.taxes += transaction.taxes;

        if self.start_date.is_none() {
            self.start_date = Some(transaction.date);
        }
        self.latest_date = match self.latest_date {
            Some(latest) if latest >= transaction.date => Some(latest),
            _ => Some(transaction.date),
        };

        self
    }

    fn finish(self, live_valuation: Option<LiveValuation>) -> PerformanceCalculation {
        let asset = self.asset;
        let is_done = asset.is_done;

        if self.start_date.is_none() {
            return PerformanceCalculation {
                result: PerformanceResult::empty(is_done),
                warnings: self.warnings,
            };
        }

        let mut gross_amount = self.gross_amount;
        let mut done_profit = self.done_profit;
        let mut cost_basis = self.state.cost_basis();

        // A redeemed bond carries its terminal gross amount; it supersedes sells
        // and leaves nothing held.
        if let Some(terminal_gross) = asset.details.bond().and_then(|b| b.gross_amount) {
            gross_amount = terminal_gross;
            done_profit = terminal_gross - self.input_amount;
            cost_basis = Decimal::ZERO;
        }

        let mut current_profit = Decimal::ZERO;
        if let Some(live) = live_valuation.filter(|_| !is_done) {
            let quote = live.quote.unwrap_or(self.state.average_price);
            current_profit = self.state.shares * (quote - self.state.average_price);
            gross_amount += current_profit;
        }

        let days_running = match (self.start_date, self.latest_date) {
            (Some(start), Some(latest)) if is_done => days_between(start, latest),
            (_, Some(latest)) => live_valuation
                .map(|live| days_between(latest, live.as_of))
                .unwrap_or(0),
            _ => 0,
        };

        let result = PerformanceResult {
            input_amount: self.input_amount,
            gross_amount,
            net_amount: gross_amount + self.costs + self.taxes,
            costs: self.costs,
            taxes: self.taxes,
            shares: self.state.shares,
            average_price: self.state.average_price,
            cost_basis,
            done_profit,
            current_profit,
            start_date: self.start_date,
            latest_date: self.latest_date,
            is_done,
            days_running,
        };

        PerformanceCalculation {
            result,
            warnings: self.warnings,
        }
    }
}

/// Reduces one asset's transactions into a [`PerformanceResult`].
///
/// Transactions are processed in ascending `(date, id)` order whatever order
/// they arrive in. Malformed records are skipped and reported as warnings;
/// they never fail the calculation.
pub fn calculate_performance(
    asset: &Asset,
    transactions: &[Transaction],
    live_valuation: Option<LiveValuation>,
) -> PerformanceCalculation {
    debug!(
        "Calculating performance for asset {} ({} transactions)",
        asset.id,
        transactions.len()
    );

    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    ordered
        .into_iter()
        .fold(PerformanceAccumulator::new(asset), |acc, transaction| {
            acc.step(transaction)
        })
        .finish(live_valuation)
}
