use super::*;
use crate::errors::{Error, ValidationError};
use crate::portfolio::batch::BatchRunner;
use crate::portfolio::performance::PerformanceService;
use crate::portfolio::test_fixtures::*;
use crate::transactions::Transaction;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn trend_service(bond_done: bool, extra: Vec<Transaction>) -> TrendService {
    let assets = MockAssetRepository::new(vec![
        equity("e1", "w1", true),
        equity("e2", "w1", true),
        private_bond("pb", "w1", bond_done),
    ]);
    let mut transactions = vec![
        buy("t1", "e1", at(2024, 1, 1), dec!(10), dec!(10)),
        sell("t2", "e1", at(2024, 1, 10), dec!(-10), dec!(12)),
        buy("t3", "e2", at(2024, 1, 5), dec!(1), dec!(100)),
        sell("t4", "e2", at(2024, 1, 20), dec!(-1), dec!(130)),
        buy("t5", "pb", at(2024, 2, 1), dec!(1), dec!(1000)),
    ];
    transactions.extend(extra);

    let performance = PerformanceService::new(
        Arc::new(assets),
        Arc::new(MockTransactionRepository::new(transactions)),
        Arc::new(MockQuoteProvider::default()),
        BatchRunner::default(),
    );
    TrendService::new(Arc::new(performance), 3, 2)
}

#[tokio::test]
async fn test_open_private_bonds_are_left_out() {
    let service = trend_service(false, vec![]);

    let trend = service.get_wallet_trend("w1", Some(2), Some(1)).await.unwrap();

    assert_eq!(trend.trend, Trend::Up);
    assert_eq!(trend.observed_dates, 2);
    assert_eq!(trend.depth, 2);
    assert_eq!(trend.smooth_avg, 1);
}

#[tokio::test]
async fn test_done_private_bond_counts() {
    let redemption = sell("t6", "pb", at(2024, 3, 1), dec!(-1), dec!(900));
    let service = trend_service(true, vec![redemption]);

    let trend = service.get_wallet_trend("w1", Some(2), Some(1)).await.unwrap();

    assert_eq!(trend.trend, Trend::Down);
    assert_eq!(trend.observed_dates, 3);
}

#[tokio::test]
async fn test_defaults_need_more_history() {
    let service = trend_service(false, vec![]);

    // depth 3 + smooth 2 - 1 = 4 dates required, only 2 available
    let trend = service.get_wallet_trend("w1", None, None).await.unwrap();

    assert_eq!(trend.trend, Trend::Unknown);
    assert_eq!(trend.depth, 3);
    assert_eq!(trend.smooth_avg, 2);
}

#[tokio::test]
async fn test_invalid_parameters_are_rejected() {
    let service = trend_service(false, vec![]);

    let err = service
        .get_wallet_trend("w1", Some(1), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidParameter { .. })
    ));

    let err = service
        .get_wallet_trend("w1", None, Some(0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidParameter { .. })
    ));
}

#[tokio::test]
async fn test_empty_wallet_is_unknown() {
    let service = trend_service(false, vec![]);

    let trend = service.get_wallet_trend("nobody", Some(2), Some(1)).await.unwrap();

    assert_eq!(trend.trend, Trend::Unknown);
    assert_eq!(trend.observed_dates, 0);
}
