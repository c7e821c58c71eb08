//! Normalized comparison chart.
//!
//! Every plotted metric is scaled to 0..100 against the largest absolute
//! value any included ticker reports for it, so metrics of very different
//! magnitude share one axis. The unscaled value travels alongside for
//! tooltips and labels.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::CHART_METRIC_LIMIT;
use crate::error::ScreenerError;
use crate::parse::parse_value;

use super::comparison::included;
use crate::models::ComparisonData;

// ---------------------------------------------------------------------------
// ChartType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    #[default]
    Bar,
    HorizontalBar,
    Line,
    Radar,
    PolarArea,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::HorizontalBar => "horizontalBar",
            ChartType::Line => "line",
            ChartType::Radar => "radar",
            ChartType::PolarArea => "polarArea",
        }
    }

    /// Chart type understood by the charting library; horizontal bars are
    /// plain bars on the `y` index axis.
    pub fn library_type(&self) -> &'static str {
        match self {
            ChartType::HorizontalBar => "bar",
            other => other.as_str(),
        }
    }

    pub fn index_axis(&self) -> char {
        match self {
            ChartType::HorizontalBar => 'y',
            _ => 'x',
        }
    }

    /// Radar and polar charts have no cartesian axes.
    pub fn is_radial(&self) -> bool {
        matches!(self, ChartType::Radar | ChartType::PolarArea)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(ChartType::Bar),
            "horizontalBar" => Ok(ChartType::HorizontalBar),
            "line" => Ok(ChartType::Line),
            "radar" => Ok(ChartType::Radar),
            "polarArea" => Ok(ChartType::PolarArea),
            other => Err(ScreenerError::InvalidArgument(format!(
                "Unknown chart type: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Series colors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesColor {
    pub background: &'static str,
    pub border: &'static str,
}

pub const PALETTE: [SeriesColor; 5] = [
    SeriesColor {
        background: "rgba(34, 211, 238, 0.8)",
        border: "rgba(34, 211, 238, 1)",
    },
    SeriesColor {
        background: "rgba(244, 114, 182, 0.8)",
        border: "rgba(244, 114, 182, 1)",
    },
    SeriesColor {
        background: "rgba(163, 230, 53, 0.8)",
        border: "rgba(163, 230, 53, 1)",
    },
    SeriesColor {
        background: "rgba(251, 146, 60, 0.8)",
        border: "rgba(251, 146, 60, 1)",
    },
    SeriesColor {
        background: "rgba(192, 132, 252, 0.8)",
        border: "rgba(192, 132, 252, 1)",
    },
];

// ---------------------------------------------------------------------------
// ChartView
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub ticker: String,
    /// Values scaled to the metric maximum, in percent.
    pub normalized: Vec<f64>,
    /// Parsed values, 0 where the cell was missing, unparsable or infinite.
    pub original: Vec<f64>,
    pub color: SeriesColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    /// Plotted metrics, sorted and capped at [`CHART_METRIC_LIMIT`].
    pub labels: Vec<String>,
    /// Divisor used per label; never 0.
    pub metric_max: Vec<f64>,
    pub series: Vec<ChartSeries>,
}

/// Build the normalized chart, or `None` when no ticker passes the filter.
pub fn build_chart(data: &ComparisonData, industry_filter: &str) -> Option<ChartView> {
    let tickers = included(data, industry_filter);
    if tickers.is_empty() {
        return None;
    }

    let numeric: BTreeSet<&str> = tickers
        .iter()
        .flat_map(|(_, record)| record.metrics())
        .filter(|(_, raw)| parse_value(Some(*raw)).is_finite())
        .map(|(metric, _)| metric)
        .collect();
    let labels: Vec<&str> = numeric.into_iter().take(CHART_METRIC_LIMIT).collect();

    let metric_max: Vec<f64> = labels
        .iter()
        .map(|metric| {
            let max = tickers
                .iter()
                .map(|(_, record)| parse_value(record.get(metric)))
                .filter(|v| v.is_finite())
                .fold(0.0_f64, |acc, v| acc.max(v.abs()));
            if max == 0.0 {
                1.0
            } else {
                max
            }
        })
        .collect();

    let series = tickers
        .iter()
        .enumerate()
        .map(|(i, (ticker, record))| {
            let original: Vec<f64> = labels
                .iter()
                .map(|metric| {
                    let v = parse_value(record.get(metric));
                    if v.is_finite() {
                        v
                    } else {
                        0.0
                    }
                })
                .collect();
            let normalized = original
                .iter()
                .zip(&metric_max)
                .map(|(v, max)| v / max * 100.0)
                .collect();
            ChartSeries {
                ticker: ticker.to_string(),
                normalized,
                original,
                color: PALETTE[i % PALETTE.len()],
            }
        })
        .collect();

    Some(ChartView {
        labels: labels.into_iter().map(str::to_string).collect(),
        metric_max,
        series,
    })
}

// ---------------------------------------------------------------------------
// Label formatting
// ---------------------------------------------------------------------------

/// Compact data label: `1.2M`, `3.4k`, or the plain number.
pub fn format_value_label(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{}", value)
    }
}

/// Metric name shortened for radial chart labels.
pub fn short_metric_label(metric: &str) -> String {
    if metric.chars().count() > 10 {
        let head: String = metric.chars().take(10).collect();
        format!("{}...", head)
    } else {
        metric.to_string()
    }
}
