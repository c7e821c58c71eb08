//! Dashboard view state and the actions that mutate it.
//!
//! All mutable UI state lives in one [`AppState`] owned by the view layer.
//! Actions are plain methods; derived views are recomputed on demand from
//! the current state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{ALL_INDUSTRIES, DEFAULT_TICKERS};
use crate::error::{Result, ScreenerError};
use crate::models::{Category, ComparisonData, MarketActionRow, MarketActions};
use crate::views::chart::{build_chart, ChartType, ChartView};
use crate::views::comparison::{build_view, industries, ComparisonView};
use crate::views::market_actions::{date_status, filter_and_sort, DateStatus, SortSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tab {
    #[default]
    Table,
    Chart,
    GeoAnalysis,
    CorporateActions,
    MarketActions,
    BrokerResearch,
}

impl Tab {
    /// Tabs whose content is loaded per ticker through an entity cache.
    pub fn is_per_ticker(&self) -> bool {
        matches!(
            self,
            Tab::GeoAnalysis | Tab::CorporateActions | Tab::BrokerResearch
        )
    }
}

/// Market-wide actions table state.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketTableState {
    pub actions: Option<MarketActions>,
    pub year: Option<i32>,
    pub category: Category,
    pub query: String,
    pub sort: SortSpec,
}

impl Default for MarketTableState {
    fn default() -> Self {
        Self {
            actions: None,
            year: None,
            category: Category::Dividends,
            query: String::new(),
            sort: SortSpec::for_category(Category::Dividends),
        }
    }
}

/// A market action row with its date highlight, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketRowView {
    pub row: MarketActionRow,
    pub status: Option<DateStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    tickers: Vec<String>,
    snapshot: Option<ComparisonData>,
    industry: String,
    tab: Tab,
    chart_type: ChartType,
    market: MarketTableState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_tickers(DEFAULT_TICKERS)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given tickers (normalized, duplicates dropped).
    pub fn with_tickers<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = Self {
            tickers: Vec::new(),
            snapshot: None,
            industry: ALL_INDUSTRIES.to_string(),
            tab: Tab::Table,
            chart_type: ChartType::Bar,
            market: MarketTableState::default(),
        };
        for ticker in tickers {
            let _ = state.add_ticker(ticker.as_ref());
        }
        state
    }

    // -- Tickers -----------------------------------------------------------

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Add a ticker (trimmed, upper-cased). Returns the stored symbol.
    pub fn add_ticker(&mut self, raw: &str) -> Result<String> {
        let ticker = raw.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(ScreenerError::InvalidArgument("Ticker is empty".into()));
        }
        if self.tickers.contains(&ticker) {
            return Err(ScreenerError::InvalidArgument(format!(
                "Ticker already added: {}",
                ticker
            )));
        }
        self.tickers.push(ticker.clone());
        Ok(ticker)
    }

    /// Remove a ticker; returns whether it was present.
    pub fn remove_ticker(&mut self, ticker: &str) -> bool {
        let before = self.tickers.len();
        self.tickers.retain(|t| t != ticker);
        self.tickers.len() != before
    }

    // -- Comparison snapshot -------------------------------------------------

    pub fn snapshot(&self) -> Option<&ComparisonData> {
        self.snapshot.as_ref()
    }

    /// Replace the snapshot wholesale. The industry filter survives only if
    /// the new snapshot still has that industry.
    pub fn set_snapshot(&mut self, data: ComparisonData) {
        if self.industry != ALL_INDUSTRIES && !industries(&data).contains(&self.industry) {
            info!(industry = %self.industry, "industry filter reset, not in new snapshot");
            self.industry = ALL_INDUSTRIES.to_string();
        }
        self.snapshot = Some(data);
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }

    pub fn set_industry(&mut self, industry: impl Into<String>) {
        self.industry = industry.into();
    }

    /// Filter choices: `"All"` followed by the snapshot's industries.
    pub fn industry_options(&self) -> Vec<String> {
        let mut options = vec![ALL_INDUSTRIES.to_string()];
        if let Some(data) = &self.snapshot {
            options.extend(industries(data));
        }
        options
    }

    /// Table view of the current snapshot, `None` before the first compare.
    pub fn view(&self) -> Option<ComparisonView> {
        self.snapshot
            .as_ref()
            .map(|data| build_view(data, &self.industry))
    }

    /// Chart of the current snapshot, `None` when there is nothing to plot.
    pub fn chart(&self) -> Option<ChartView> {
        self.snapshot
            .as_ref()
            .and_then(|data| build_chart(data, &self.industry))
    }

    // -- Tabs and chart ----------------------------------------------------

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.chart_type = chart_type;
    }

    // -- Market actions ----------------------------------------------------

    pub fn market(&self) -> &MarketTableState {
        &self.market
    }

    pub fn set_market_actions(&mut self, actions: MarketActions, year: Option<i32>) {
        self.market.actions = Some(actions);
        self.market.year = year;
    }

    /// Switch category; the sort resets to the category's date column.
    pub fn set_market_category(&mut self, category: Category) {
        if self.market.category != category {
            self.market.category = category;
            self.market.sort = SortSpec::for_category(category);
        }
    }

    pub fn set_market_query(&mut self, query: impl Into<String>) {
        self.market.query = query.into();
    }

    /// Header click on the market table.
    pub fn toggle_market_sort(&mut self, column: &str) {
        self.market.sort.toggle(column);
    }

    /// Filtered, sorted rows of the active category with date highlights
    /// relative to `today`.
    pub fn market_rows(&self, today: NaiveDate) -> Vec<MarketRowView> {
        let Some(actions) = &self.market.actions else {
            return Vec::new();
        };
        let category = self.market.category;
        filter_and_sort(actions.rows(category), &self.market.query, &self.market.sort)
            .into_iter()
            .map(|row| MarketRowView {
                status: date_status(&row, category, today),
                row,
            })
            .collect()
    }

    // -- Session -------------------------------------------------------------

    /// Logout: drop every ticker, snapshot and filter.
    pub fn reset(&mut self) {
        *self = Self::with_tickers(std::iter::empty::<&str>());
    }
}
