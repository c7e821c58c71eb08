//! Normalized chart builder tests.

mod common;

use screener_view::models::ComparisonData;
use screener_view::views::chart::{format_value_label, short_metric_label, PALETTE};
use screener_view::views::{build_chart, ChartType};

fn data(rows: &[(&str, &[(&str, &str)])]) -> ComparisonData {
    rows.iter()
        .map(|(ticker, cells)| (*ticker, Some(common::record(cells))))
        .collect()
}

// ---------------------------------------------------------------------------
// build_chart
// ---------------------------------------------------------------------------

#[test]
fn normalizes_against_metric_max() {
    let data = data(&[
        ("A", &[("Score", "10")]),
        ("B", &[("Score", "20")]),
        ("C", &[("Score", "5")]),
    ]);
    let chart = build_chart(&data, "All").unwrap();

    assert_eq!(chart.labels, vec!["Score"]);
    assert_eq!(chart.metric_max, vec![20.0]);
    let normalized: Vec<f64> = chart.series.iter().map(|s| s.normalized[0]).collect();
    assert_eq!(normalized, vec![50.0, 100.0, 25.0]);
    let original: Vec<f64> = chart.series.iter().map(|s| s.original[0]).collect();
    assert_eq!(original, vec![10.0, 20.0, 5.0]);
}

#[test]
fn max_uses_absolute_values() {
    let data = data(&[("A", &[("Growth", "-10")]), ("B", &[("Growth", "5")])]);
    let chart = build_chart(&data, "All").unwrap();
    assert_eq!(chart.metric_max, vec![10.0]);
    assert_eq!(chart.series[0].normalized, vec![-100.0]);
    assert_eq!(chart.series[1].normalized, vec![50.0]);
}

#[test]
fn all_zero_metric_divides_by_one() {
    let data = data(&[("A", &[("Pledged", "0")]), ("B", &[("Pledged", "0%")])]);
    let chart = build_chart(&data, "All").unwrap();
    assert_eq!(chart.metric_max, vec![1.0]);
    assert_eq!(chart.series[1].normalized, vec![0.0]);
}

#[test]
fn unparsable_cells_plot_as_zero() {
    let data = data(&[("A", &[("P/E", "12")]), ("B", &[("P/E", "-")]), ("C", &[])]);
    let chart = build_chart(&data, "All").unwrap();
    assert_eq!(chart.series[1].original, vec![0.0]);
    assert_eq!(chart.series[2].original, vec![0.0]);
    assert_eq!(chart.series[0].normalized, vec![100.0]);
}

#[test]
fn infinite_cells_do_not_skew_the_scale() {
    let data = data(&[
        ("A", &[("X", "Infinity"), ("Y", "1")]),
        ("B", &[("X", "5"), ("Y", "2")]),
    ]);
    let chart = build_chart(&data, "All").unwrap();

    assert_eq!(chart.labels, vec!["X", "Y"]);
    assert_eq!(chart.metric_max, vec![5.0, 2.0]);
    assert_eq!(chart.series[0].original, vec![0.0, 1.0]);
    assert_eq!(chart.series[0].normalized, vec![0.0, 50.0]);
    assert_eq!(chart.series[1].normalized, vec![100.0, 100.0]);
}

#[test]
fn only_numeric_metrics_are_plotted() {
    let chart = build_chart(&common::sample_comparison(), "All").unwrap();
    assert!(!chart.labels.contains(&"Industry".to_string()));
    assert!(chart.labels.contains(&"Market Cap".to_string()));

    let data = data(&[("A", &[("Rating", "N/A"), ("P/E", "12")])]);
    let chart = build_chart(&data, "All").unwrap();
    assert_eq!(chart.labels, vec!["P/E"]);
}

#[test]
fn caps_at_fifteen_sorted_metrics() {
    let names: Vec<String> = (0..20).map(|i| format!("M{:02}", i)).collect();
    let cells: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "1")).collect();
    let data = data(&[("A", &cells)]);

    let chart = build_chart(&data, "All").unwrap();
    assert_eq!(chart.labels.len(), 15);
    assert_eq!(chart.labels.first().map(String::as_str), Some("M00"));
    assert_eq!(chart.labels.last().map(String::as_str), Some("M14"));
    assert_eq!(chart.series[0].normalized.len(), 15);
}

#[test]
fn industry_filter_applies() {
    let chart = build_chart(&common::sample_comparison(), "Banks").unwrap();
    assert_eq!(chart.series.len(), 1);
    assert_eq!(chart.series[0].ticker, "HDFCBANK");
}

#[test]
fn nothing_to_plot_is_none() {
    assert!(build_chart(&common::sample_comparison(), "Pharma").is_none());
    let invalid: ComparisonData = vec![("XYZ", None)].into_iter().collect();
    assert!(build_chart(&invalid, "All").is_none());
}

#[test]
fn series_colors_cycle() {
    const CELLS: &[(&str, &str)] = &[("X", "1")];
    let tickers = ["A", "B", "C", "D", "E", "F"];
    let rows: Vec<(&str, &[(&str, &str)])> = tickers.iter().map(|t| (*t, CELLS)).collect();
    let chart = build_chart(&data(&rows), "All").unwrap();
    assert_eq!(chart.series[5].color, PALETTE[0]);
    assert_ne!(chart.series[1].color, PALETTE[0]);
}

// ---------------------------------------------------------------------------
// ChartType and labels
// ---------------------------------------------------------------------------

#[test]
fn chart_type_round_trips_names() {
    for name in ["bar", "horizontalBar", "line", "radar", "polarArea"] {
        let ty: ChartType = name.parse().unwrap();
        assert_eq!(ty.to_string(), name);
    }
    assert!("pie".parse::<ChartType>().is_err());
}

#[test]
fn horizontal_bar_is_bar_on_y_axis() {
    assert_eq!(ChartType::HorizontalBar.library_type(), "bar");
    assert_eq!(ChartType::HorizontalBar.index_axis(), 'y');
    assert_eq!(ChartType::Line.index_axis(), 'x');
    assert!(ChartType::Radar.is_radial());
    assert!(!ChartType::Bar.is_radial());
    assert_eq!(ChartType::default(), ChartType::Bar);
}

#[test]
fn value_labels_are_compact() {
    assert_eq!(format_value_label(1_500_000.0), "1.5M");
    assert_eq!(format_value_label(3_400.0), "3.4k");
    assert_eq!(format_value_label(-2_000.0), "-2.0k");
    assert_eq!(format_value_label(42.5), "42.5");
}

#[test]
fn long_metric_names_are_shortened() {
    assert_eq!(short_metric_label("Dividend Yield %"), "Dividend Y...");
    assert_eq!(short_metric_label("P/E"), "P/E");
    assert_eq!(short_metric_label("Market Cap"), "Market Cap");
}
