//! Asset domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad asset class. Drives which transaction kinds are meaningful and how
/// the reducer treats the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    PrivateBond,
    PublicBond,
    Equity,
}

impl AssetClass {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AssetClass::PrivateBond => "PRIVATE_BOND",
            AssetClass::PublicBond => "PUBLIC_BOND",
            AssetClass::Equity => "EQUITY",
        }
    }

    pub const fn is_bond(&self) -> bool {
        matches!(self, AssetClass::PrivateBond | AssetClass::PublicBond)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BondType {
    Cdb,
    Lci,
    Lca,
    Cri,
    Cra,
    Debenture,
    Treasury,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestType {
    #[default]
    Prefixed, // fixed rate known at purchase
    Postfixed, // floats with an index
    Hybrid,    // index plus a fixed spread
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexType {
    Cdi,
    Selic,
    Ipca,
    Igpm,
}

/// Static fields of a fixed-income holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BondDetails {
    #[serde(default)]
    pub bond_type: BondType,
    #[serde(default)]
    pub interest_type: InterestType,
    #[serde(default)]
    pub index_type: Option<IndexType>,
    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,
    /// Terminal gross amount recorded when the bond was redeemed. When present
    /// it replaces the amount accumulated from sell transactions.
    #[serde(default)]
    pub gross_amount: Option<Decimal>,
}

/// Static fields of a free-form equity-like instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EquityDetails {
    #[serde(default)]
    pub ticker: Option<String>,
}

/// Class-specific payload of an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetDetails {
    PrivateBond(BondDetails),
    PublicBond(BondDetails),
    Equity(EquityDetails),
}

impl AssetDetails {
    pub fn asset_class(&self) -> AssetClass {
        match self {
            AssetDetails::PrivateBond(_) => AssetClass::PrivateBond,
            AssetDetails::PublicBond(_) => AssetClass::PublicBond,
            AssetDetails::Equity(_) => AssetClass::Equity,
        }
    }

    pub fn bond(&self) -> Option<&BondDetails> {
        match self {
            AssetDetails::PrivateBond(details) | AssetDetails::PublicBond(details) => {
                Some(details)
            }
            AssetDetails::Equity(_) => None,
        }
    }
}

impl Default for AssetDetails {
    fn default() -> Self {
        AssetDetails::Equity(EquityDetails::default())
    }
}

/// Domain model representing an investment holding.
///
/// Owned by exactly one wallet. The engine only ever reads assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub wallet_id: String,
    /// Position fully closed; no live valuation applies.
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub details: AssetDetails,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Asset {
    pub fn asset_class(&self) -> AssetClass {
        self.details.asset_class()
    }
}
