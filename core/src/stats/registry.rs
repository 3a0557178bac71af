//! Statistics Registry

use super::{ArcStatCounter, StatCounter};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex};

/// Owns named counters. Names use `/` to separate a category from a title,
/// for example "Scene/Area lights".
///
/// A registry is passed explicitly to whatever constructs the things being
/// counted, so tests can use a local registry.
#[derive(Debug, Default)]
pub struct StatsRegistry {
    counters: Mutex<BTreeMap<String, ArcStatCounter>>,
}

impl StatsRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the counter registered under `name`, creating it if needed.
    ///
    /// * `name` - Statistic name.
    pub fn counter(&self, name: &str) -> ArcStatCounter {
        let mut counters = match self.counters.lock() {
            Ok(counters) => counters,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(
            counters
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(StatCounter::default())),
        )
    }

    /// Returns the value of the counter registered under `name`, or 0.
    ///
    /// * `name` - Statistic name.
    pub fn value(&self, name: &str) -> i64 {
        self.counter(name).value()
    }

    /// Resets all counters to 0.
    pub fn clear(&self) {
        let counters = match self.counters.lock() {
            Ok(counters) => counters,
            Err(poisoned) => poisoned.into_inner(),
        };
        counters.values().for_each(|c| c.reset());
    }

    /// Returns a text report of all non-zero counters grouped by category.
    pub fn report(&self) -> String {
        let counters = match self.counters.lock() {
            Ok(counters) => counters,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut to_print: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (k, v) in counters.iter() {
            let v = v.value();
            if v == 0 {
                continue;
            }
            let (category, title) = get_category_and_title(k);
            to_print
                .entry(category)
                .or_default()
                .push(format!("{title:<42}{v:12}"));
        }

        let mut s = String::from("Statistics:\n");
        for (category, items) in to_print {
            let _ = writeln!(s, "  {category}");
            for item in items {
                let _ = writeln!(s, "    {item}");
            }
        }
        s
    }

    /// Logs the report.
    pub fn log_report(&self) {
        info!("{}", self.report());
    }
}

/// Splits a statistic name at the first `/` and returns category and title.
/// If there is no `/`, then category is the empty string.
///
/// * `s` - The statistic name to split.
fn get_category_and_title(s: &str) -> (String, String) {
    match s.split_once('/') {
        Some((category, title)) => (category.to_string(), title.to_string()),
        None => (String::new(), s.to_string()),
    }
}
