use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Category: the four kinds of corporate action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dividends,
    Bonus,
    Splits,
    Rights,
}

/// A displayed column: the row key it reads and its header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
}

const fn col(key: &'static str, label: &'static str) -> Column {
    Column { key, label }
}

const DIVIDEND_COLUMNS: &[Column] = &[
    col("company", "Company"),
    col("type", "Type"),
    col("percentage", "%"),
    col("announcementDate", "Announcement"),
    col("recordDate", "Record Date"),
    col("exDate", "Ex-Date"),
];

const BONUS_COLUMNS: &[Column] = &[
    col("company", "Company"),
    col("ratio", "Ratio"),
    col("announcementDate", "Announcement"),
    col("recordDate", "Record Date"),
    col("exDate", "Ex-Date"),
];

const SPLIT_COLUMNS: &[Column] = &[
    col("company", "Company"),
    col("oldFV", "Old FV"),
    col("newFV", "New FV"),
    col("splitDate", "Split Date"),
];

const RIGHTS_COLUMNS: &[Column] = &[
    col("company", "Company"),
    col("ratio", "Ratio"),
    col("premium", "Premium"),
    col("announcementDate", "Announcement"),
    col("recordDate", "Record Date"),
    col("exDate", "Ex-Date"),
];

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Dividends,
        Category::Bonus,
        Category::Splits,
        Category::Rights,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dividends => "dividends",
            Category::Bonus => "bonus",
            Category::Splits => "splits",
            Category::Rights => "rights",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Dividends => "Dividends",
            Category::Bonus => "Bonus",
            Category::Splits => "Splits",
            Category::Rights => "Rights",
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            Category::Dividends => DIVIDEND_COLUMNS,
            Category::Bonus => BONUS_COLUMNS,
            Category::Splits => SPLIT_COLUMNS,
            Category::Rights => RIGHTS_COLUMNS,
        }
    }

    /// Column whose date drives the urgent/upcoming highlight.
    pub fn primary_date_column(&self) -> &'static str {
        match self {
            Category::Splits => "splitDate",
            _ => "exDate",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MarketActionRow: column key -> cell text
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MarketActionRow(BTreeMap<String, String>);

impl MarketActionRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn company(&self) -> &str {
        self.get("company").unwrap_or("")
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }
}

impl<'de> Deserialize<'de> for MarketActionRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::deserialize_cells(deserializer).map(MarketActionRow)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MarketActionRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MarketActionRow(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// MarketActions: market-wide payload, rows per category
// ---------------------------------------------------------------------------

/// Keys other than the four categories (timestamps and the like) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketActions {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub dividends: Vec<MarketActionRow>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub bonus: Vec<MarketActionRow>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub splits: Vec<MarketActionRow>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub rights: Vec<MarketActionRow>,
}

impl MarketActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of a category; empty when the payload had none.
    pub fn rows(&self, category: Category) -> &[MarketActionRow] {
        match category {
            Category::Dividends => &self.dividends,
            Category::Bonus => &self.bonus,
            Category::Splits => &self.splits,
            Category::Rights => &self.rights,
        }
    }

    pub fn set_rows(&mut self, category: Category, rows: Vec<MarketActionRow>) {
        let slot = match category {
            Category::Dividends => &mut self.dividends,
            Category::Bonus => &mut self.bonus,
            Category::Splits => &mut self.splits,
            Category::Rights => &mut self.rights,
        };
        *slot = rows;
    }

    pub fn total_rows(&self) -> usize {
        Category::ALL.iter().map(|c| self.rows(*c).len()).sum()
    }
}

// ---------------------------------------------------------------------------
// CorporateActions: per-ticker history, split into upcoming / previous
// ---------------------------------------------------------------------------

/// Rows keyed by the source table's header text (e.g. `"Ex-Date"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionHistory {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub upcoming: Vec<MarketActionRow>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub previous: Vec<MarketActionRow>,
}

impl ActionHistory {
    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.previous.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorporateActions {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub dividends: ActionHistory,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub bonus: ActionHistory,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub splits: ActionHistory,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub rights: ActionHistory,
}

impl CorporateActions {
    pub fn history(&self, category: Category) -> &ActionHistory {
        match category {
            Category::Dividends => &self.dividends,
            Category::Bonus => &self.bonus,
            Category::Splits => &self.splits,
            Category::Rights => &self.rights,
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.history(*c).is_empty())
    }
}
