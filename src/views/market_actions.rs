//! Market-wide corporate actions table: company search, column sort and
//! date-status highlighting.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Category, MarketActionRow};
use crate::parse::{parse_date, parse_value};

// ---------------------------------------------------------------------------
// SortSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// Initial sort of a category: its primary date, newest first.
    pub fn for_category(category: Category) -> Self {
        Self::new(category.primary_date_column(), SortDirection::Desc)
    }

    /// Header click: the active column flips direction, any other column
    /// becomes active ascending.
    pub fn toggle(&mut self, column: &str) {
        if self.column == column {
            self.direction = self.direction.flipped();
        } else {
            self.column = column.to_string();
            self.direction = SortDirection::Asc;
        }
    }
}

// ---------------------------------------------------------------------------
// Filter + sort
// ---------------------------------------------------------------------------

/// Rows whose company contains `query` (case-insensitive), stably sorted by
/// `sort`.
pub fn filter_and_sort(
    rows: &[MarketActionRow],
    query: &str,
    sort: &SortSpec,
) -> Vec<MarketActionRow> {
    let needle = query.trim().to_lowercase();
    let mut out: Vec<MarketActionRow> = rows
        .iter()
        .filter(|row| needle.is_empty() || row.company().to_lowercase().contains(&needle))
        .cloned()
        .collect();

    out.sort_by(|a, b| {
        let ord = compare_rows(a, b, &sort.column);
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    out
}

/// Ascending comparison of two rows on one column.
///
/// Columns named `*date*` compare as dates with unparsable values first;
/// otherwise numbers compare numerically when both cells are numeric, and
/// everything else compares as case-insensitive text.
pub fn compare_rows(a: &MarketActionRow, b: &MarketActionRow, column: &str) -> Ordering {
    let left = a.get(column);
    let right = b.get(column);

    if column.to_lowercase().contains("date") {
        let left = left.and_then(parse_date);
        let right = right.and_then(parse_date);
        // None orders before Some: invalid dates are the earliest.
        return left.cmp(&right);
    }

    let (x, y) = (parse_value(left), parse_value(right));
    if x.is_finite() && y.is_finite() {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }

    let left = left.unwrap_or("").to_lowercase();
    let right = right.unwrap_or("").to_lowercase();
    left.cmp(&right)
}

// ---------------------------------------------------------------------------
// Date status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStatus {
    /// Falls today or tomorrow.
    Urgent,
    /// Later than tomorrow.
    Upcoming,
}

pub fn status_for_date(date: NaiveDate, today: NaiveDate) -> Option<DateStatus> {
    let tomorrow = today.succ_opt().unwrap_or(NaiveDate::MAX);
    if date < today {
        None
    } else if date <= tomorrow {
        Some(DateStatus::Urgent)
    } else {
        Some(DateStatus::Upcoming)
    }
}

/// Highlight for a row, read from the category's primary date column.
pub fn date_status(
    row: &MarketActionRow,
    category: Category,
    today: NaiveDate,
) -> Option<DateStatus> {
    let date = row.get(category.primary_date_column()).and_then(parse_date)?;
    status_for_date(date, today)
}
