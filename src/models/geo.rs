use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NewsItem: one headline from the news feed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub pub_date: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub source: String,
}

// ---------------------------------------------------------------------------
// GeoAnalysis: revenue split by segment/region plus regional news
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoAnalysis {
    /// Segment or region name -> share of revenue in percent.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub revenue_split: BTreeMap<String, f64>,
    /// Region -> headlines.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub news: BTreeMap<String, Vec<NewsItem>>,
}

impl GeoAnalysis {
    /// Revenue split as pie slices, largest share first, ties by name.
    pub fn revenue_slices(&self) -> Vec<(&str, f64)> {
        let mut slices: Vec<(&str, f64)> = self
            .revenue_split
            .iter()
            .map(|(name, pct)| (name.as_str(), *pct))
            .collect();
        slices.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        slices
    }

    pub fn has_revenue_split(&self) -> bool {
        !self.revenue_split.is_empty()
    }

    pub fn news_count(&self) -> usize {
        self.news.values().map(Vec::len).sum()
    }
}
