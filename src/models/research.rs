use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::parse::{parse_date, parse_value};

// ---------------------------------------------------------------------------
// BrokerResearch: one broker recommendation for a ticker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerResearch {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub organization: String,
    /// Recommendation, e.g. `BUY`, `SELL`, `HOLD`.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub reco: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub target_price: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub recommended_price: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub report_link: String,
    /// As published, e.g. `"16 Oct, 2025"`.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub reco_date: String,
    pub summary: Option<String>,
}

impl BrokerResearch {
    /// Percent move from the price at recommendation to the target price.
    pub fn upside_pct(&self) -> Option<f64> {
        let target = parse_value(Some(self.target_price.as_str()));
        let at_reco = parse_value(Some(self.recommended_price.as_str()));
        if !target.is_finite() || !at_reco.is_finite() || at_reco == 0.0 {
            return None;
        }
        Some((target - at_reco) / at_reco * 100.0)
    }

    pub fn parsed_reco_date(&self) -> Option<NaiveDate> {
        parse_date(&self.reco_date)
    }
}

/// Sort reports newest first; undated reports go last, keeping their order.
pub fn sort_newest_first(reports: &mut [BrokerResearch]) {
    reports.sort_by(|a, b| match (a.parsed_reco_date(), b.parsed_reco_date()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
