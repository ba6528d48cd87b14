use super::*;
use crate::assets::{Asset, AssetDetails, BondDetails, EquityDetails};
use crate::transactions::{Transaction, TransactionKind};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn equity(is_done: bool) -> Asset {
    Asset {
        id: "PETR4".to_string(),
        name: "Petrobras PN".to_string(),
        wallet_id: "w1".to_string(),
        is_done,
        details: AssetDetails::Equity(EquityDetails {
            ticker: Some("PETR4".to_string()),
        }),
        updated_at: None,
    }
}

fn private_bond(is_done: bool, gross_amount: Option<Decimal>) -> Asset {
    Asset {
        id: "CDB-1".to_string(),
        name: "CDB Banco X".to_string(),
        wallet_id: "w1".to_string(),
        is_done,
        details: AssetDetails::PrivateBond(BondDetails {
            gross_amount,
            ..Default::default()
        }),
        updated_at: None,
    }
}

fn tx(id: &str, at: DateTime<Utc>, kind: TransactionKind) -> Transaction {
    Transaction {
        id: id.to_string(),
        asset_id: "PETR4".to_string(),
        date: at,
        kind,
        costs: Decimal::ZERO,
        taxes: Decimal::ZERO,
    }
}

fn buy(id: &str, at: DateTime<Utc>, shares: Decimal, price: Decimal) -> Transaction {
    tx(
        id,
        at,
        TransactionKind::Buy {
            shares: Some(shares),
            price: Some(price),
        },
    )
}

fn sell(id: &str, at: DateTime<Utc>, shares: Decimal, price: Decimal) -> Transaction {
    tx(
        id,
        at,
        TransactionKind::Sell {
            shares: Some(shares),
            price: Some(price),
        },
    )
}

fn assert_net_invariant(result: &PerformanceResult) {
    assert_eq!(
        result.net_amount,
        result.gross_amount + result.costs + result.taxes
    );
}

#[test]
fn test_no_transactions_yields_zero_result() {
    let calculation = calculate_performance(&equity(false), &[], None);
    let result = calculation.result;

    assert_eq!(result.input_amount, Decimal::ZERO);
    assert_eq!(result.gross_amount, Decimal::ZERO);
    assert_eq!(result.net_amount, Decimal::ZERO);
    assert_eq!(result.days_running, 0);
    assert!(result.start_date.is_none());
    assert!(result.latest_date.is_none());
    assert!(calculation.warnings.is_empty());
}

#[test]
fn test_buy_then_sell_round_trip() {
    let mut first = buy("t1", date(2024, 1, 10), dec!(10), dec!(100));
    first.costs = dec!(-5);
    let second = sell("t2", date(2024, 3, 10), dec!(-10), dec!(120));

    let result = calculate_performance(&equity(true), &[first, second], None).result;

    assert_eq!(result.input_amount, dec!(1000));
    assert_eq!(result.gross_amount, dec!(1200));
    assert_eq!(result.net_amount, dec!(1195));
    assert_eq!(result.costs, dec!(-5));
    assert_eq!(result.shares, Decimal::ZERO);
    assert_eq!(result.cost_basis, Decimal::ZERO);
    assert_eq!(result.gross_profit(), dec!(200));
    assert_eq!(result.net_profit(), dec!(195));
    assert_eq!(result.start_date, Some(date(2024, 1, 10)));
    assert_eq!(result.latest_date, Some(date(2024, 3, 10)));
    assert_eq!(result.days_running, 60);
    assert_net_invariant(&result);
}

#[test]
fn test_average_price_of_buys_only() {
    let mut second = buy("t2", date(2024, 2, 1), dec!(30), dec!(20));
    second.costs = dec!(-10);
    let transactions = vec![buy("t1", date(2024, 1, 1), dec!(10), dec!(10)), second];

    let result = calculate_performance(&equity(false), &transactions, None).result;

    // (10·10 + 30·20 - 10) / 40
    assert_eq!(result.average_price, dec!(17.25));
    assert_eq!(result.shares, dec!(40));
    assert_eq!(result.input_amount, dec!(700));
}

#[test]
fn test_sell_leaves_average_price_and_books_realized_profit() {
    let transactions = vec![
        buy("t1", date(2024, 1, 1), dec!(10), dec!(10)),
        sell("t2", date(2024, 1, 5), dec!(-4), dec!(15)),
    ];

    let result = calculate_performance(&equity(false), &transactions, None).result;

    assert_eq!(result.average_price, dec!(10));
    assert_eq!(result.shares, dec!(6));
    assert_eq!(result.cost_basis, dec!(60));
    assert_eq!(result.done_profit, dec!(20));
    assert_eq!(result.gross_amount, dec!(60));
    // 60 proceeds + 60 still held - 100 committed
    assert_eq!(result.net_profit(), dec!(20));
}

#[test]
fn test_transactions_are_sorted_before_the_pass() {
    let transactions = vec![
        sell("t2", date(2024, 2, 1), dec!(-10), dec!(12)),
        buy("t1", date(2024, 1, 1), dec!(10), dec!(10)),
    ];

    let calculation = calculate_performance(&equity(true), &transactions, None);

    assert!(calculation.warnings.is_empty());
    assert_eq!(calculation.result.done_profit, dec!(20));
    assert_eq!(calculation.result.start_date, Some(date(2024, 1, 1)));
    assert_eq!(calculation.result.latest_date, Some(date(2024, 2, 1)));
}

#[test]
fn test_malformed_transaction_is_skipped_with_warning() {
    let transactions = vec![
        buy("t1", date(2024, 1, 1), dec!(10), dec!(10)),
        tx(
            "t2",
            date(2024, 1, 2),
            TransactionKind::Buy {
                shares: Some(dec!(5)),
                price: None,
            },
        ),
        sell("t3", date(2024, 1, 3), dec!(-10), dec!(11)),
    ];

    let calculation = calculate_performance(&equity(true), &transactions, None);

    assert!(calculation.has_warnings());
    assert_eq!(calculation.warnings.len(), 1);
    assert_eq!(calculation.warnings[0].transaction_id, "t2");
    assert!(calculation.warnings[0].message.contains("price"));
    assert_eq!(calculation.result.input_amount, dec!(100));
    assert_eq!(calculation.result.gross_amount, dec!(110));
    assert_eq!(calculation.result.shares, Decimal::ZERO);
}

#[test]
fn test_dividend_adds_to_gross_and_net() {
    let mut dividend = tx(
        "t2",
        date(2024, 6, 1),
        TransactionKind::Dividend { value: dec!(50) },
    );
    dividend.costs = dec!(-1);
    dividend.taxes = dec!(-7.5);
    let transactions = vec![buy("t1", date(2024, 1, 1), dec!(100), dec!(10)), dividend];

    let result = calculate_performance(&equity(false), &transactions, None).result;

    assert_eq!(result.gross_amount, dec!(50));
    assert_eq!(result.net_amount, dec!(41.5));
    assert_eq!(result.done_profit, dec!(50));
    assert_eq!(result.average_price, dec!(10));
    assert_net_invariant(&result);
}

#[test]
fn test_incoming_transfer_without_close_price_warns_but_applies() {
    let transactions = vec![
        buy("t1", date(2024, 1, 1), dec!(10), dec!(10)),
        tx(
            "t2",
            date(2024, 1, 2),
            TransactionKind::Transfer {
                shares: dec!(10),
                close_price: None,
            },
        ),
    ];

    let calculation = calculate_performance(&equity(false), &transactions, None);

    assert_eq!(calculation.warnings.len(), 1);
    assert_eq!(calculation.result.shares, dec!(20));
    assert_eq!(calculation.result.average_price, dec!(5));
}

#[test]
fn test_outgoing_transfer_valued_at_close_price() {
    let transactions = vec![
        buy("t1", date(2024, 1, 1), dec!(10), dec!(10)),
        tx(
            "t2",
            date(2024, 1, 2),
            TransactionKind::Transfer {
                shares: dec!(-4),
                close_price: Some(dec!(12)),
            },
        ),
    ];

    let result = calculate_performance(&equity(false), &transactions, None).result;

    assert_eq!(result.done_profit, dec!(8));
    assert_eq!(result.gross_amount, Decimal::ZERO);
    assert_eq!(result.shares, dec!(6));
}

#[test]
fn test_corporate_actions_do_not_realize_profit() {
    let transactions = vec![
        buy("t1", date(2024, 1, 1), dec!(10), dec!(40)),
        tx("t2", date(2024, 2, 1), TransactionKind::Split { factor: dec!(4) }),
        tx("t3", date(2024, 3, 1), TransactionKind::Inplit { factor: dec!(2) }),
        tx(
            "t4",
            date(2024, 4, 1),
            TransactionKind::BonusShare { factor: dec!(0.25) },
        ),
    ];

    let result = calculate_performance(&equity(false), &transactions, None).result;

    assert_eq!(result.shares, dec!(25));
    assert_eq!(result.average_price, dec!(16));
    assert_eq!(result.done_profit, Decimal::ZERO);
    assert_eq!(result.gross_amount, Decimal::ZERO);
}

#[test]
fn test_live_valuation_placeholder_has_zero_delta() {
    let transactions = vec![buy("t1", date(2024, 1, 1), dec!(10), dec!(10))];
    let as_of = date(2024, 1, 31);

    let result = calculate_performance(
        &equity(false),
        &transactions,
        Some(LiveValuation { quote: None, as_of }),
    )
    .result;

    assert_eq!(result.current_profit, Decimal::ZERO);
    assert_eq!(result.gross_amount, Decimal::ZERO);
    assert_eq!(result.days_running, 30);
}

#[test]
fn test_live_valuation_with_quote_marks_open_position() {
    let transactions = vec![buy("t1", date(2024, 1, 1), dec!(10), dec!(10))];

    let result = calculate_performance(
        &equity(false),
        &transactions,
        Some(LiveValuation {
            quote: Some(dec!(12.5)),
            as_of: date(2024, 1, 2),
        }),
    )
    .result;

    assert_eq!(result.current_profit, dec!(25));
    assert_eq!(result.gross_amount, dec!(25));
    assert_eq!(result.net_amount, dec!(25));
    assert_net_invariant(&result);
}

#[test]
fn test_done_asset_ignores_live_valuation() {
    let transactions = vec![
        buy("t1", date(2024, 1, 1), dec!(10), dec!(10)),
        sell("t2", date(2024, 1, 11), dec!(-10), dec!(10)),
    ];

    let result = calculate_performance(
        &equity(true),
        &transactions,
        Some(LiveValuation {
            quote: Some(dec!(99)),
            as_of: date(2025, 1, 1),
        }),
    )
    .result;

    assert_eq!(result.current_profit, Decimal::ZERO);
    assert_eq!(result.days_running, 10);
}

#[test]
fn test_days_running_is_zero_without_live_valuation_for_open_assets() {
    let transactions = vec![buy("t1", date(2024, 1, 1), dec!(1), dec!(1))];
    let result = calculate_performance(&equity(false), &transactions, None).result;
    assert_eq!(result.days_running, 0);
}

#[test]
fn test_bond_rejects_equity_only_transactions() {
    let transactions = vec![
        buy("t1", date(2024, 1, 1), dec!(1), dec!(1000)),
        tx("t2", date(2024, 2, 1), TransactionKind::Dividend { value: dec!(10) }),
    ];

    let calculation = calculate_performance(&private_bond(false, None), &transactions, None);

    assert_eq!(calculation.warnings.len(), 1);
    assert!(calculation.warnings[0].message.contains("DIVIDEND"));
    assert_eq!(calculation.result.gross_amount, Decimal::ZERO);
    assert_eq!(calculation.result.input_amount, dec!(1000));
}

#[test]
fn test_bond_terminal_gross_amount_supersedes_sells() {
    let mut redemption = sell("t2", date(2025, 1, 1), dec!(-1), dec!(1100));
    redemption.taxes = dec!(-22.5);
    let transactions = vec![buy("t1", date(2024, 1, 1), dec!(1), dec!(1000)), redemption];

    let result =
        calculate_performance(&private_bond(true, Some(dec!(1120))), &transactions, None).result;

    assert_eq!(result.gross_amount, dec!(1120));
    assert_eq!(result.net_amount, dec!(1097.5));
    assert_eq!(result.done_profit, dec!(120));
    assert_eq!(result.cost_basis, Decimal::ZERO);
    assert_eq!(result.net_profit(), dec!(97.5));
    assert_eq!(result.days_running, 366);
}

#[test]
fn test_bond_without_terminal_amount_accumulates_sells() {
    let transactions = vec![
        buy("t1", date(2024, 1, 1), dec!(2), dec!(500)),
        sell("t2", date(2024, 6, 1), dec!(-2), dec!(530)),
    ];

    let result = calculate_performance(&private_bond(true, None), &transactions, None).result;

    assert_eq!(result.gross_amount, dec!(1060));
    assert_eq!(result.net_profit(), dec!(60));
}

#[test]
fn test_same_date_ties_are_ordered_by_id() {
    let at = date(2024, 1, 1);
    let transactions = vec![
        sell("b", at, dec!(-5), dec!(20)),
        buy("a", at, dec!(5), dec!(10)),
    ];

    let calculation = calculate_performance(&equity(true), &transactions, None);

    assert!(calculation.warnings.is_empty());
    assert_eq!(calculation.result.done_profit, dec!(50));
    assert_eq!(calculation.result.latest_date, Some(at));
}
