use serde::{Deserialize, Serialize};

/// Direction of a wallet's recent net-profit trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
    /// Not enough distinct dates to decide.
    #[default]
    Unknown,
}

impl Trend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
            Trend::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTrend {
    pub wallet_id: String,
    pub trend: Trend,
    pub depth: usize,
    pub smooth_avg: usize,
    /// Distinct dates the estimate was drawn from.
    pub observed_dates: usize,
}
