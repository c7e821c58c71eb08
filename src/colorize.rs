//! Threshold-based coloring of comparison table cells.
//!
//! The rules form an ordered table. A metric is matched case-insensitively by
//! substring against each rule in turn and the first hit decides, so the
//! order of [`RULES`] is part of the behavior.

use serde::{Deserialize, Serialize};

use crate::parse::parse_value;

/// Semantic color of a metric cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Good,
    Bad,
}

/// How a rule's patterns are matched against a lower-cased metric name.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// At least one pattern is a substring.
    Any(&'static [&'static str]),
    /// Every pattern is a substring.
    All(&'static [&'static str]),
}

impl Matcher {
    /// `metric` must already be lower-cased.
    pub fn matches(&self, metric: &str) -> bool {
        match self {
            Matcher::Any(patterns) => patterns.iter().any(|p| metric.contains(p)),
            Matcher::All(patterns) => patterns.iter().all(|p| metric.contains(p)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Below(f64),
    Above(f64),
    Equals(f64),
}

impl Threshold {
    pub fn holds(&self, value: f64) -> bool {
        match *self {
            Threshold::Below(t) => value < t,
            Threshold::Above(t) => value > t,
            Threshold::Equals(t) => value == t,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetricRule {
    pub name: &'static str,
    pub matcher: Matcher,
    pub good: Threshold,
    pub bad: Threshold,
}

impl MetricRule {
    /// Classify an already parsed value. `None` means "in between".
    pub fn tone(&self, value: f64) -> Option<Tone> {
        if self.good.holds(value) {
            Some(Tone::Good)
        } else if self.bad.holds(value) {
            Some(Tone::Bad)
        } else {
            None
        }
    }
}

pub static RULES: &[MetricRule] = &[
    MetricRule {
        name: "price to earnings",
        matcher: Matcher::Any(&["p/e", "price to earning"]),
        good: Threshold::Below(25.0),
        bad: Threshold::Above(50.0),
    },
    MetricRule {
        name: "return on capital employed",
        matcher: Matcher::Any(&["roce", "return on capital"]),
        good: Threshold::Above(20.0),
        bad: Threshold::Below(10.0),
    },
    MetricRule {
        name: "return on equity",
        matcher: Matcher::Any(&["roe", "return on equity"]),
        good: Threshold::Above(15.0),
        bad: Threshold::Below(8.0),
    },
    MetricRule {
        name: "dividend yield",
        matcher: Matcher::Any(&["dividend yield"]),
        good: Threshold::Above(2.0),
        bad: Threshold::Below(0.5),
    },
    MetricRule {
        name: "growth",
        matcher: Matcher::Any(&["sales growth", "profit growth"]),
        good: Threshold::Above(10.0),
        bad: Threshold::Below(0.0),
    },
    MetricRule {
        name: "debt to equity",
        matcher: Matcher::All(&["debt", "equity"]),
        good: Threshold::Below(0.5),
        bad: Threshold::Above(1.0),
    },
    MetricRule {
        name: "price to book",
        matcher: Matcher::Any(&["price to book"]),
        good: Threshold::Below(3.0),
        bad: Threshold::Above(8.0),
    },
    MetricRule {
        name: "pledged percentage",
        matcher: Matcher::Any(&["pledged percentage"]),
        good: Threshold::Equals(0.0),
        bad: Threshold::Above(0.0),
    },
];

/// Return the first rule whose patterns match `metric`.
pub fn rule_for(metric: &str) -> Option<&'static MetricRule> {
    let lower = metric.to_lowercase();
    RULES.iter().find(|rule| rule.matcher.matches(&lower))
}

/// Color a raw cell value for the given metric.
///
/// ```rust
/// use screener_view::colorize::{color_for, Tone};
/// assert_eq!(color_for("P/E Ratio", "20"), Some(Tone::Good));
/// assert_eq!(color_for("P/E Ratio", "60"), Some(Tone::Bad));
/// assert_eq!(color_for("P/E Ratio", "30"), None);
/// ```
pub fn color_for(metric: &str, raw: &str) -> Option<Tone> {
    let value = parse_value(Some(raw));
    if value.is_nan() {
        return None;
    }
    rule_for(metric)?.tone(value)
}
