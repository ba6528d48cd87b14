//! Assets module - domain models and repository traits.

mod assets_model;
mod assets_traits;


pub use assets_model::{
    Asset, AssetClass, AssetDetails, BondDetails, BondType, EquityDetails, IndexType,
    InterestType,
};
pub use assets_traits::AssetRepositoryTrait;
