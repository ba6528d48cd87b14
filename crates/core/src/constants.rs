use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for currency amounts in output DTOs
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for ratios (percentages, breakeven, edge) in output DTOs
pub const RATIO_DECIMAL_PRECISION: u32 = 4;

/// Default number of per-asset / per-wallet computations allowed in flight
pub const DEFAULT_BATCH_CONCURRENCY: usize = 5;

/// Default base currency when the caller does not select one
pub const DEFAULT_BASE_CURRENCY: &str = "BRL";

/// Default number of smoothed points compared by the trend estimator
pub const DEFAULT_TREND_DEPTH: usize = 3;

/// Default moving-average window of the trend estimator
pub const DEFAULT_TREND_SMOOTH_AVG: usize = 2;

/// Average Gregorian month length in days
pub const DAYS_PER_MONTH: Decimal = dec!(30.436875);

/// Average Gregorian quarter length in days
pub const DAYS_PER_QUARTER: Decimal = dec!(91.310625);

/// Average Gregorian year length in days
pub const DAYS_PER_YEAR: Decimal = dec!(365.2425);
