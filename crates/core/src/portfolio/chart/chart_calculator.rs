use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::chart_model::{ChartCategory, ChartDataPoint, WalletChart};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::portfolio::indicators::WalletSnapshot;
use crate::utils::decimal_utils::round_half_up;
use crate::utils::time_utils::calendar_date;

type DailyDeltas = BTreeMap<NaiveDate, BTreeMap<ChartCategory, Decimal>>;

fn add_delta(deltas: &mut DailyDeltas, date: NaiveDate, category: ChartCategory, value: Decimal) {
    *deltas
        .entry(date)
        .or_default()
        .entry(category)
        .or_insert(Decimal::ZERO) += value;
}

/// Builds one point per calendar date on which the wallet changed.
///
/// Movements count on their own date. An asset's net profit counts on its
/// latest transaction date; assets that never traded are left out.
pub fn build_wallet_chart(snapshot: &WalletSnapshot, currency: &str) -> WalletChart {
    let mut deltas = DailyDeltas::new();

    for movement in &snapshot.movements {
        add_delta(
            &mut deltas,
            calendar_date(movement.date),
            ChartCategory::Movements,
            movement.signed_result(),
        );
    }
    for performance in &snapshot.performances {
        if let Some(latest) = performance.result.latest_date {
            add_delta(
                &mut deltas,
                calendar_date(latest),
                performance.asset_class.into(),
                performance.result.net_profit(),
            );
        }
    }

    let mut running: BTreeMap<ChartCategory, Decimal> = BTreeMap::new();
    let points = deltas
        .into_iter()
        .map(|(date, day)| {
            for (category, value) in day {
                *running.entry(category).or_insert(Decimal::ZERO) += value;
            }
            let total: Decimal = running.values().copied().sum();
            let amounts = ChartCategory::ALL
                .iter()
                .map(|category| {
                    let value = match category {
                        ChartCategory::Total => total,
                        other => running.get(other).copied().unwrap_or(Decimal::ZERO),
                    };
                    (*category, round_half_up(value, DISPLAY_DECIMAL_PRECISION))
                })
                .collect();
            ChartDataPoint { date, amounts }
        })
        .collect();

    WalletChart {
        wallet_id: snapshot.wallet.id.clone(),
        currency: currency.to_string(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::performance::{AssetPerformance, PerformanceResult};
    use crate::portfolio::test_fixtures::{at, movement, wallet};
    use crate::assets::AssetClass;
    use crate::wallets::MovementType;
    use rust_decimal_macros::dec;

    fn performance(id: &str, asset_class: AssetClass, result: PerformanceResult) -> AssetPerformance {
        AssetPerformance {
            asset_id: id.to_string(),
            asset_name: id.to_string(),
            wallet_id: "w1".to_string(),
            asset_class,
            result,
        }
    }

    fn closed(latest: chrono::DateTime<chrono::Utc>, input: Decimal, net: Decimal) -> PerformanceResult {
        PerformanceResult {
            input_amount: input,
            gross_amount: net,
            net_amount: net,
            start_date: Some(latest),
            latest_date: Some(latest),
            is_done: true,
            ..Default::default()
        }
    }

    #[test]
    fn accumulates_per_category_and_total() {
        let snapshot = WalletSnapshot {
            wallet: wallet("w1", "BRL", (2024, 1, 1)),
            movements: vec![
                movement("m1", "w1", MovementType::Deposit, at(2024, 1, 1), dec!(1000)),
                movement("m2", "w1", MovementType::Withdraw, at(2024, 3, 1), dec!(200)),
            ],
            performances: vec![
                performance("e1", AssetClass::Equity, closed(at(2024, 2, 1), dec!(100), dec!(150.555))),
                performance("b1", AssetClass::PrivateBond, closed(at(2024, 3, 1), dec!(500), dec!(480))),
                performance("idle", AssetClass::PublicBond, PerformanceResult::default()),
            ],
        };

        let chart = build_wallet_chart(&snapshot, "BRL");

        assert_eq!(chart.wallet_id, "w1");
        assert_eq!(chart.points.len(), 3);

        let first = &chart.points[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(first.amount(ChartCategory::Movements), dec!(1000));
        assert_eq!(first.amount(ChartCategory::Equity), dec!(0));
        assert_eq!(first.amount(ChartCategory::Total), dec!(1000));

        let second = &chart.points[1];
        assert_eq!(second.amount(ChartCategory::Equity), dec!(50.56));
        assert_eq!(second.amount(ChartCategory::Total), dec!(1050.56));

        let last = &chart.points[2];
        assert_eq!(last.amount(ChartCategory::Movements), dec!(800));
        assert_eq!(last.amount(ChartCategory::PrivateBond), dec!(-20));
        assert_eq!(last.amount(ChartCategory::PublicBond), dec!(0));
        assert_eq!(last.amount(ChartCategory::Total), dec!(830.56));
        assert_eq!(last.amounts.len(), ChartCategory::ALL.len());
    }

    #[test]
    fn empty_wallet_has_no_points() {
        let snapshot = WalletSnapshot {
            wallet: wallet("w1", "USD", (2024, 1, 1)),
            movements: vec![],
            performances: vec![],
        };

        let chart = build_wallet_chart(&snapshot, "USD");

        assert!(chart.points.is_empty());
        assert_eq!(chart.currency, "USD");
    }
}
