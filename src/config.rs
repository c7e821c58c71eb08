use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const API_PREFIX: &str = "/api/v1/data-fetcher";

/// Tickers preloaded into a fresh session.
pub const DEFAULT_TICKERS: [&str; 2] = ["TCS", "INFY"];

/// Maximum number of metrics plotted on the comparison chart.
pub const CHART_METRIC_LIMIT: usize = 15;

/// Industry filter value that disables filtering.
pub const ALL_INDUSTRIES: &str = "All";

/// Record key carrying a ticker's industry rather than a metric.
pub const INDUSTRY_KEY: &str = "Industry";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Endpoint paths relative to [`API_PREFIX`]. `{ticker}` is substituted by
/// the client.
pub fn endpoints() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("compare", "compare"),
        ("geo_analysis", "geo-analysis/{ticker}"),
        ("corporate_actions", "corporate-actions/{ticker}"),
        ("broker_research", "broker-research/{ticker}"),
        ("market_actions", "market-actions"),
    ])
}
