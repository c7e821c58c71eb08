use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::INDUSTRY_KEY;

// ---------------------------------------------------------------------------
// TickerRecord: metric name -> display string for one ticker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TickerRecord(BTreeMap<String, String>);

impl TickerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, metric: impl Into<String>, value: impl Into<String>) {
        self.0.insert(metric.into(), value.into());
    }

    /// Raw display value of a metric (or of `Industry`).
    pub fn get(&self, metric: &str) -> Option<&str> {
        self.0.get(metric).map(String::as_str)
    }

    pub fn industry(&self) -> Option<&str> {
        self.get(INDUSTRY_KEY)
    }

    /// Metric entries in key order, without the `Industry` field.
    pub fn metrics(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(key, _)| key.as_str() != INDUSTRY_KEY)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<'de> Deserialize<'de> for TickerRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::deserialize_cells(deserializer).map(TickerRecord)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TickerRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TickerRecord(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// ComparisonData: one compare snapshot, in request order
// ---------------------------------------------------------------------------

/// Result of a compare request: ticker -> record, `None` for tickers the
/// backend could not resolve.
///
/// Entries keep the order of the payload, which is the order the tickers
/// were requested in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonData {
    entries: Vec<(String, Option<TickerRecord>)>,
}

impl ComparisonData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a ticker. Replacing keeps the original position.
    pub fn insert(&mut self, ticker: impl Into<String>, record: Option<TickerRecord>) {
        let ticker = ticker.into();
        match self.entries.iter_mut().find(|(t, _)| *t == ticker) {
            Some(entry) => entry.1 = record,
            None => self.entries.push((ticker, record)),
        }
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == ticker)
    }

    /// Record of a resolved ticker. `None` for unknown or failed tickers.
    pub fn record(&self, ticker: &str) -> Option<&TickerRecord> {
        self.entries
            .iter()
            .find(|(t, _)| t == ticker)
            .and_then(|(_, record)| record.as_ref())
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&TickerRecord>)> {
        self.entries.iter().map(|(t, r)| (t.as_str(), r.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Option<TickerRecord>)> for ComparisonData {
    fn from_iter<I: IntoIterator<Item = (S, Option<TickerRecord>)>>(iter: I) -> Self {
        let mut data = ComparisonData::new();
        for (ticker, record) in iter {
            data.insert(ticker, record);
        }
        data
    }
}

impl Serialize for ComparisonData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (ticker, record) in &self.entries {
            map.serialize_entry(ticker, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ComparisonData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = ComparisonData;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of ticker to metrics or null")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut data = ComparisonData::new();
                while let Some((ticker, record)) =
                    access.next_entry::<String, Option<TickerRecord>>()?
                {
                    data.insert(ticker, record);
                }
                Ok(data)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}
