//! Comparison table: one row per metric, one column per included ticker.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::colorize::{color_for, Tone};
use crate::config::ALL_INDUSTRIES;
use crate::models::{ComparisonData, TickerRecord};

/// Text shown for a metric a ticker does not report.
pub const MISSING_CELL: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub text: String,
    pub tone: Option<Tone>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub metric: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView {
    /// Tickers the backend resolved, in payload order.
    pub valid_tickers: Vec<String>,
    /// Tickers the backend returned `null` for.
    pub invalid_tickers: Vec<String>,
    /// Valid tickers passing the industry filter; the table's columns.
    pub tickers: Vec<String>,
    /// Union of included tickers' metrics, sorted.
    pub metrics: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl ComparisonView {
    /// `true` when there is nothing to tabulate ("no data").
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

pub(crate) fn matches_industry(record: &TickerRecord, filter: &str) -> bool {
    filter == ALL_INDUSTRIES || record.industry() == Some(filter)
}

/// Valid tickers passing the industry filter, in payload order.
pub(crate) fn included<'a>(
    data: &'a ComparisonData,
    filter: &str,
) -> Vec<(&'a str, &'a TickerRecord)> {
    data.iter()
        .filter_map(|(ticker, record)| record.map(|r| (ticker, r)))
        .filter(|(_, record)| matches_industry(record, filter))
        .collect()
}

/// Build the comparison table for a snapshot under an industry filter
/// (`"All"` disables filtering).
pub fn build_view(data: &ComparisonData, industry_filter: &str) -> ComparisonView {
    let mut view = ComparisonView::default();
    for (ticker, record) in data.iter() {
        match record {
            Some(_) => view.valid_tickers.push(ticker.to_string()),
            None => view.invalid_tickers.push(ticker.to_string()),
        }
    }

    let columns = included(data, industry_filter);
    if columns.is_empty() {
        return view;
    }

    let metrics: BTreeSet<&str> = columns
        .iter()
        .flat_map(|(_, record)| record.metrics().map(|(metric, _)| metric))
        .collect();

    view.rows = metrics
        .iter()
        .map(|metric| TableRow {
            metric: metric.to_string(),
            cells: columns
                .iter()
                .map(|(_, record)| match record.get(metric) {
                    Some(raw) if !raw.is_empty() => Cell {
                        text: raw.to_string(),
                        tone: color_for(metric, raw),
                    },
                    _ => Cell {
                        text: MISSING_CELL.to_string(),
                        tone: None,
                    },
                })
                .collect(),
        })
        .collect();
    view.metrics = metrics.into_iter().map(str::to_string).collect();
    view.tickers = columns.iter().map(|(t, _)| t.to_string()).collect();
    view
}

/// Distinct industries of the resolved tickers, sorted, for the filter
/// selector (which adds `"All"` itself).
pub fn industries(data: &ComparisonData) -> Vec<String> {
    data.iter()
        .filter_map(|(_, record)| record.and_then(TickerRecord::industry))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
