//! Live quote collaborator used for unrealized valuation.

mod quotes_traits;
mod average_cost_provider;

pub use average_cost_provider::AverageCostQuoteProvider;
pub use quotes_traits::LiveQuoteProviderTrait;
