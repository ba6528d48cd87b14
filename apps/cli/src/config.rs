use std::path::PathBuf;
use std::str::FromStr;

use anyhow::bail;
use ledgerfolio_core::portfolio::performance::{Pagination, PerformanceSortField, SortOrder};
use ledgerfolio_core::settings::EngineSettings;

const DEFAULT_SNAPSHOT_PATH: &str = "./demos/snapshot.json";

pub struct Config {
    pub snapshot_path: PathBuf,
    pub wallet_ids: Vec<String>,
    pub currency: Option<String>,
    pub settings: EngineSettings,
    pub pagination: Pagination,
}

/// Parses `key`, keeping `default` when the value is absent, unparsable or
/// rejected by `accept`.
fn parse_or<T, F>(lookup: &F, key: &str, default: T, accept: fn(&T) -> bool) -> T
where
    T: FromStr + std::fmt::Debug,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if accept(&value) => value,
        _ => {
            tracing::warn!("Ignoring invalid {}={:?}; using {:?}", key, raw, default);
            default
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let snapshot_path = lookup("LEDGERFOLIO_SNAPSHOT_PATH")
            .unwrap_or_else(|| DEFAULT_SNAPSHOT_PATH.to_string());
        if snapshot_path.trim().is_empty() {
            bail!("LEDGERFOLIO_SNAPSHOT_PATH must not be empty");
        }

        let wallet_ids = lookup("LEDGERFOLIO_WALLET_IDS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let currency = lookup("LEDGERFOLIO_CURRENCY")
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty());

        let defaults = EngineSettings::default();
        let apply_live_valuation = match lookup("LEDGERFOLIO_APPLY_LIVE") {
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                tracing::warn!("Ignoring invalid LEDGERFOLIO_APPLY_LIVE={:?}", raw);
                defaults.apply_live_valuation
            }),
            None => defaults.apply_live_valuation,
        };
        let settings = EngineSettings {
            batch_concurrency: parse_or(
                &lookup,
                "LEDGERFOLIO_BATCH_CONCURRENCY",
                defaults.batch_concurrency,
                |v| *v >= 1,
            ),
            apply_live_valuation,
            trend_depth: parse_or(&lookup, "LEDGERFOLIO_TREND_DEPTH", defaults.trend_depth, |v| {
                *v >= 2
            }),
            trend_smooth_avg: parse_or(
                &lookup,
                "LEDGERFOLIO_TREND_SMOOTH",
                defaults.trend_smooth_avg,
                |v| *v >= 1,
            ),
            ..defaults
        };

        let pagination_defaults = Pagination::default();
        let pagination = Pagination {
            page: parse_or(&lookup, "LEDGERFOLIO_PAGE", pagination_defaults.page, |v| *v >= 1),
            limit: parse_or(&lookup, "LEDGERFOLIO_LIMIT", pagination_defaults.limit, |v| {
                *v >= 1
            }),
            sort_by: parse_or::<PerformanceSortField, _>(
                &lookup,
                "LEDGERFOLIO_SORT_BY",
                pagination_defaults.sort_by,
                |_| true,
            ),
            sort_order: parse_or::<SortOrder, _>(
                &lookup,
                "LEDGERFOLIO_SORT_ORDER",
                pagination_defaults.sort_order,
                |_| true,
            ),
        };

        Ok(Self {
            snapshot_path: PathBuf::from(snapshot_path),
            wallet_ids,
            currency,
            settings,
            pagination,
        })
    }
}
