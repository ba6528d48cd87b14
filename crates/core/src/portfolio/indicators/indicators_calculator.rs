use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::indicators_model::{PortfolioIndicators, WalletSnapshot};
use crate::constants::{
    DAYS_PER_MONTH, DAYS_PER_QUARTER, DAYS_PER_YEAR, DISPLAY_DECIMAL_PRECISION,
    RATIO_DECIMAL_PRECISION,
};
use crate::portfolio::performance::{AssetPerformance, PerformanceResult};
use crate::utils::decimal_utils::{div_or_none, round_half_up, round_half_up_opt};
use crate::utils::time_utils::days_between;
use crate::wallets::WalletMovement;

fn max_opt(current: Option<Decimal>, value: Decimal) -> Option<Decimal> {
    Some(current.map_or(value, |c| c.max(value)))
}

fn min_opt(current: Option<Decimal>, value: Decimal) -> Option<Decimal> {
    Some(current.map_or(value, |c| c.min(value)))
}

/// Orders a wallet's assets for folding: by start date, then id; assets that
/// never traded go last.
pub fn fold_order(performances: &[AssetPerformance]) -> Vec<&AssetPerformance> {
    let mut ordered: Vec<&AssetPerformance> = performances.iter().collect();
    ordered.sort_by(|a, b| {
        (a.result.start_date.is_none(), a.result.start_date, &a.asset_id).cmp(&(
            b.result.start_date.is_none(),
            b.result.start_date,
            &b.asset_id,
        ))
    });
    ordered
}

/// Full-precision running totals. Rounding only happens in `finish`.
#[derive(Debug, Default)]
struct IndicatorsAccumulator {
    movement_count: usize,
    movement_sum: Decimal,
    movement_min: Option<Decimal>,
    movement_max: Option<Decimal>,

    asset_count: usize,
    active_asset_count: usize,
    inactive_asset_count: usize,
    profitable_count: usize,
    loss_count: usize,
    gross_profitable_count: usize,
    gross_loss_count: usize,

    input_amount_sum: Decimal,
    costs_sum: Decimal,
    taxes_sum: Decimal,

    gross_profit_sum: Decimal,
    gross_loss_sum: Decimal,
    gross_profit_max: Option<Decimal>,
    gross_loss_lowest: Option<Decimal>,

    net_profit_sum: Decimal,
    net_loss_sum: Decimal,
    net_profit_max: Option<Decimal>,
    net_loss_lowest: Option<Decimal>,

    history_high: Option<Decimal>,
    history_low: Option<Decimal>,

    start_date: Option<DateTime<Utc>>,
    latest_date: Option<DateTime<Utc>>,
}

impl IndicatorsAccumulator {
    fn fold_movement(mut self, movement: &WalletMovement) -> Self {
        let value = movement.signed_result();
        self.movement_count += 1;
        self.movement_sum += value;
        self.movement_min = min_opt(self.movement_min, value);
        self.movement_max = max_opt(self.movement_max, value);
        self
    }

    fn fold_asset(mut self, result: &PerformanceResult) -> Self {
        self.asset_count += 1;
        if result.is_done {
            self.inactive_asset_count += 1;
        } else {
            self.active_asset_count += 1;
        }

        self.input_amount_sum += result.input_amount;
        self.costs_sum += result.costs;
        self.taxes_sum += result.taxes;

        let gross = result.gross_profit();
        if gross > Decimal::ZERO {
            self.gross_profitable_count += 1;
            self.gross_profit_sum += gross;
            self.gross_profit_max = max_opt(self.gross_profit_max, gross);
        } else if gross < Decimal::ZERO {
            self.gross_loss_count += 1;
            self.gross_loss_sum += gross;
            self.gross_loss_lowest = min_opt(self.gross_loss_lowest, gross);
        }

        let net = result.net_profit();
        if net > Decimal::ZERO {
            self.profitable_count += 1;
            self.net_profit_sum += net;
            self.net_profit_max = max_opt(self.net_profit_max, net);
        } else if net < Decimal::ZERO {
            self.loss_count += 1;
            self.net_loss_sum += net;
            self.net_loss_lowest = min_opt(self.net_loss_lowest, net);
        }

        let balance = self.movement_sum + self.net_profit_sum + self.net_loss_sum;
        self.history_high = max_opt(self.history_high, balance);
        self.history_low = min_opt(self.history_low, balance);

        if let Some(start) = result.start_date {
            self.start_date = Some(self.start_date.map_or(start, |s| s.min(start)));
        }
        if let Some(latest) = result.latest_date {
            self.latest_date = Some(self.latest_date.map_or(latest, |l| l.max(latest)));
        }
        self
    }

    fn finish(self, currency: &str, wallet_ids: Vec<String>) -> PortfolioIndicators {
        let money = |v: Decimal| round_half_up(v, DISPLAY_DECIMAL_PRECISION);
        let money_opt = |v: Option<Decimal>| round_half_up_opt(v, DISPLAY_DECIMAL_PRECISION);
        let ratio_opt = |v: Option<Decimal>| round_half_up_opt(v, RATIO_DECIMAL_PRECISION);

        let net_result = self.net_profit_sum + self.net_loss_sum;
        let avg_net_profit = div_or_none(self.net_profit_sum, Decimal::from(self.profitable_count));
        let avg_net_loss = div_or_none(self.net_loss_sum, Decimal::from(self.loss_count));
        let profitable_percentage = div_or_none(
            Decimal::from(self.profitable_count),
            Decimal::from(self.profitable_count + self.loss_count),
        );
        let breakeven = match (avg_net_profit, avg_net_loss) {
            (Some(profit), Some(loss)) => div_or_none(loss.abs(), profit + loss.abs()),
            _ => None,
        };
        let edge = match (profitable_percentage, breakeven) {
            (Some(percentage), Some(breakeven)) => Some(percentage - breakeven),
            _ => None,
        };

        let duration_days = match (self.start_date, self.latest_date) {
            (Some(start), Some(latest)) => days_between(start, latest),
            _ => 0,
        };
        let days = Decimal::from(duration_days);
        let per_period = |period_days: Decimal| {
            let periods = days / period_days;
            if periods.is_zero() {
                None
            } else {
                div_or_none(net_result, periods)
            }
        };

        PortfolioIndicators {
            currency: currency.to_string(),
            wallet_ids,

            movement_count: self.movement_count,
            movement_sum: money(self.movement_sum),
            movement_min: money_opt(self.movement_min),
            movement_max: money_opt(self.movement_max),

            asset_count: self.asset_count,
            active_asset_count: self.active_asset_count,
            inactive_asset_count: self.inactive_asset_count,
            profitable_count: self.profitable_count,
            loss_count: self.loss_count,
            gross_profitable_count: self.gross_profitable_count,
            gross_loss_count: self.gross_loss_count,

            input_amount_sum: money(self.input_amount_sum),
            costs_sum: money(self.costs_sum),
            taxes_sum: money(self.taxes_sum),

            gross_profit_sum: money(self.gross_profit_sum),
            gross_loss_sum: money(self.gross_loss_sum),
            gross_profit_max: money_opt(self.gross_profit_max),
            gross_loss_lowest: money_opt(self.gross_loss_lowest),

            net_profit_sum: money(self.net_profit_sum),
            net_loss_sum: money(self.net_loss_sum),
            net_profit_max: money_opt(self.net_profit_max),
            net_loss_lowest: money_opt(self.net_loss_lowest),
            net_result: money(net_result),
            balance: money(self.movement_sum + net_result),

            avg_net_profit: money_opt(avg_net_profit),
            avg_net_loss: money_opt(avg_net_loss),
            profitable_percentage: ratio_opt(profitable_percentage),
            breakeven: ratio_opt(breakeven),
            edge: ratio_opt(edge),

            expectancy_by_asset: money_opt(div_or_none(
                net_result,
                Decimal::from(self.asset_count),
            )),
            expectancy_by_day: money_opt(div_or_none(net_result, days)),
            expectancy_by_month: money_opt(per_period(DAYS_PER_MONTH)),
            expectancy_by_quarter: money_opt(per_period(DAYS_PER_QUARTER)),
            expectancy_by_year: money_opt(per_period(DAYS_PER_YEAR)),

            history_high: money_opt(self.history_high),
            history_low: money_opt(self.history_low),

            start_date: self.start_date,
            latest_date: self.latest_date,
            duration_days,
        }
    }
}

/// Folds the wallets' movements and asset results into one indicator set.
///
/// Wallets are folded in the order given; within a wallet, movements come
/// first and assets follow in [`fold_order`]. The order only matters for
/// `history_high` / `history_low`.
pub fn calculate_indicators(snapshots: &[WalletSnapshot], currency: &str) -> PortfolioIndicators {
    let wallet_ids = snapshots.iter().map(|s| s.wallet.id.clone()).collect();

    let accumulator = snapshots
        .iter()
        .fold(IndicatorsAccumulator::default(), |acc, snapshot| {
            debug!(
                "Folding wallet {}: {} movement(s), {} asset(s)",
                snapshot.wallet.id,
                snapshot.movements.len(),
                snapshot.performances.len()
            );
            let acc = snapshot
                .movements
                .iter()
                .fold(acc, |acc, movement| acc.fold_movement(movement));
            fold_order(&snapshot.performances)
                .into_iter()
                .fold(acc, |acc, performance| acc.fold_asset(&performance.result))
        });

    accumulator.finish(currency, wallet_ids)
}
