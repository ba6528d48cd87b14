use crate::errors::{Error, Result};
use crate::fx::CurrencyConverterTrait;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// A converter over a fixed rate table.
///
/// Rates are stored per directed pair; inverses are derived on insertion and
/// multi-hop conversions are resolved by breadth-first search over the pairs.
/// Neighbours are visited in currency-code order, so the chosen path is stable.
pub struct StaticRateConverter {
    /// Currency -> currencies it has a direct rate to.
    adj: BTreeMap<String, BTreeSet<String>>,
    /// (from, to) -> units of `to` per unit of `from`.
    rates: HashMap<(String, String), Decimal>,
}

impl StaticRateConverter {
    pub fn new(rates: &[(&str, &str, Decimal)]) -> Self {
        let mut converter = StaticRateConverter {
            adj: BTreeMap::new(),
            rates: HashMap::new(),
        };
        for (from, to, rate) in rates {
            converter.add_rate(from, to, *rate);
        }
        converter
    }

    /// Built-in placeholder table used until a real rate provider is wired in.
    pub fn with_default_rates() -> Self {
        Self::new(&[
            ("USD", "BRL", dec!(5.00)),
            ("EUR", "BRL", dec!(5.40)),
            ("GBP", "BRL", dec!(6.30)),
            ("EUR", "USD", dec!(1.08)),
        ])
    }

    pub fn add_rate(&mut self, from: &str, to: &str, rate: Decimal) {
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        if from == to {
            return;
        }

        self.rates.insert((from.clone(), to.clone()), rate);
        self.adj.entry(from.clone()).or_default().insert(to.clone());

        if !rate.is_zero() {
            self.rates
                .insert((to.clone(), from.clone()), Decimal::ONE / rate);
            self.adj.entry(to).or_default().insert(from);
        }
    }

    /// Units of `to` per unit of `from`, following the shortest path of pairs.
    pub fn get_rate(&self, from_currency: &str, to_currency: &str) -> Result<Decimal> {
        let from = from_currency.to_uppercase();
        let to = to_currency.to_uppercase();
        if from == to {
            return Ok(Decimal::ONE);
        }
        if !self.adj.contains_key(&from) {
            return Err(Error::UnsupportedCurrency(from_currency.to_string()));
        }
        if !self.adj.contains_key(&to) {
            return Err(Error::UnsupportedCurrency(to_currency.to_string()));
        }

        let mut queue: VecDeque<(String, Decimal)> = VecDeque::new();
        let mut visited: BTreeSet<String> = BTreeSet::new();
        queue.push_back((from.clone(), Decimal::ONE));
        visited.insert(from.clone());

        while let Some((current, current_rate)) = queue.pop_front() {
            if current == to {
                return Ok(current_rate);
            }
            if let Some(neighbors) = self.adj.get(&current) {
                for neighbor in neighbors {
                    if visited.contains(neighbor) {
                        continue;
                    }
                    if let Some(rate) = self.rates.get(&(current.clone(), neighbor.clone())) {
                        visited.insert(neighbor.clone());
                        queue.push_back((neighbor.clone(), current_rate * rate));
                    }
                }
            }
        }

        Err(Error::CurrencyConversion(format!(
            "No conversion path found for {} -> {}",
            from_currency, to_currency
        )))
    }
}

impl Default for StaticRateConverter {
    fn default() -> Self {
        Self::with_default_rates()
    }
}

impl CurrencyConverterTrait for StaticRateConverter {
    fn convert(&self, amount: Decimal, from_currency: &str, to_currency: &str) -> Result<Decimal> {
        let rate = self.get_rate(from_currency, to_currency)?;
        debug!(
            "Converting {} {} -> {} at rate {}",
            amount, from_currency, to_currency, rate
        );
        Ok(amount * rate)
    }
}
