//! Transaction domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transactions_constants::*;
use crate::errors::CalculatorError;

/// Class-specific payload of a transaction.
///
/// Bonds only ever carry `Buy` and `Sell`; equity-like instruments use the
/// full set. Share counts are signed: sells and outgoing transfers are negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Buy {
        #[serde(default)]
        shares: Option<Decimal>,
        #[serde(default)]
        price: Option<Decimal>,
    },
    Sell {
        #[serde(default)]
        shares: Option<Decimal>,
        #[serde(default)]
        price: Option<Decimal>,
    },
    Transfer {
        shares: Decimal,
        #[serde(default, rename = "closePrice")]
        close_price: Option<Decimal>,
    },
    BonusShare {
        factor: Decimal,
    },
    Split {
        factor: Decimal,
    },
    Inplit {
        factor: Decimal,
    },
    Dividend {
        value: Decimal,
    },
}

impl TransactionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Buy { .. } => TRANSACTION_TYPE_BUY,
            TransactionKind::Sell { .. } => TRANSACTION_TYPE_SELL,
            TransactionKind::Transfer { .. } => TRANSACTION_TYPE_TRANSFER,
            TransactionKind::BonusShare { .. } => TRANSACTION_TYPE_BONUS_SHARE,
            TransactionKind::Split { .. } => TRANSACTION_TYPE_SPLIT,
            TransactionKind::Inplit { .. } => TRANSACTION_TYPE_INPLIT,
            TransactionKind::Dividend { .. } => TRANSACTION_TYPE_DIVIDEND,
        }
    }

    /// Kinds a bond record may carry.
    pub const fn is_bond_kind(&self) -> bool {
        matches!(self, TransactionKind::Buy { .. } | TransactionKind::Sell { .. })
    }
}

/// Validated shares/price pair of a buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeLeg {
    pub shares: Decimal,
    pub price: Decimal,
}

impl TradeLeg {
    /// Absolute traded value, `|shares · price|`.
    pub fn value(&self) -> Decimal {
        (self.shares * self.price).abs()
    }
}

/// An immutable, dated event belonging to exactly one asset.
///
/// `costs` and `taxes` are stored as non-positive numbers (fees reduce net).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub asset_id: String,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: TransactionKind,
    #[serde(default)]
    pub costs: Decimal,
    #[serde(default)]
    pub taxes: Decimal,
}

impl Transaction {
    /// Shares and price of a buy/sell, failing when either is absent.
    /// Returns `Ok(None)` for every other kind.
    pub fn trade_leg(&self) -> Result<Option<TradeLeg>, CalculatorError> {
        let (shares, price) = match &self.kind {
            TransactionKind::Buy { shares, price } | TransactionKind::Sell { shares, price } => {
                (shares, price)
            }
            _ => return Ok(None),
        };
        let shares = shares.ok_or_else(|| self.missing("shares"))?;
        let price = price.ok_or_else(|| self.missing("price"))?;
        Ok(Some(TradeLeg { shares, price }))
    }

    /// Checks that every field the kind requires is present and usable.
    pub fn validate(&self) -> Result<(), CalculatorError> {
        match &self.kind {
            TransactionKind::Buy { .. } | TransactionKind::Sell { .. } => {
                self.trade_leg().map(|_| ())
            }
            TransactionKind::BonusShare { factor } => {
                if factor.is_sign_negative() {
                    return Err(self.invalid_factor(*factor));
                }
                Ok(())
            }
            TransactionKind::Split { factor } | TransactionKind::Inplit { factor } => {
                if *factor <= Decimal::ZERO {
                    return Err(self.invalid_factor(*factor));
                }
                Ok(())
            }
            TransactionKind::Transfer { .. } | TransactionKind::Dividend { .. } => Ok(()),
        }
    }

    fn missing(&self, field: &'static str) -> CalculatorError {
        CalculatorError::MissingField {
            transaction_id: self.id.clone(),
            field,
        }
    }

    fn invalid_factor(&self, factor: Decimal) -> CalculatorError {
        CalculatorError::InvalidFactor {
            transaction_id: self.id.clone(),
            factor,
        }
    }
}
