//! View-state core for a stock screener comparison dashboard.
//!
//! Turns the screener backend's payloads into render-ready structures:
//! a colored comparison table and a normalized chart over a ticker set, three
//! per-ticker panels (geographic analysis, corporate actions, broker research)
//! backed by lazily filled result caches, and a searchable, sortable table of
//! market-wide corporate actions. Rendering itself is left to the caller.
//!
//! # Quick start
//!
//! ```no_run
//! use screener_view::{Dashboard, Tab};
//!
//! # async fn run() -> screener_view::Result<()> {
//! let mut dash = Dashboard::builder()
//!     .base_url("http://localhost:8080")
//!     .build()?;
//!
//! dash.state_mut().add_ticker("hdfcbank")?;
//! let table = dash.compare().await?;
//! println!("{} metrics across {:?}", table.metrics.len(), table.tickers);
//!
//! // Per-ticker panels fetch on first activation and are cached afterwards.
//! dash.activate_tab(Tab::GeoAnalysis).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod colorize;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod parse;
pub mod state;
pub mod views;

pub use api::ScreenerClient;
pub use cache::{EntityCache, EntityResult};
pub use colorize::{color_for, Tone};
pub use error::{Result, ScreenerError};
pub use fetcher::{Fetcher, FnFetcher};
pub use parse::{parse_date, parse_value};
pub use state::{AppState, Tab};
pub use views::{build_chart, build_view, date_status, filter_and_sort, SortSpec};

use std::fmt;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tracing::info;

use api::{BrokerResearchFetcher, CorporateActionsFetcher, GeoFetcher, ScreenerClientBuilder};
use models::{BrokerResearch, CorporateActions, GeoAnalysis};
use state::MarketRowView;
use views::{ChartView, ComparisonView};

// ---------------------------------------------------------------------------
// DashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Dashboard`].
///
/// Use [`Dashboard::builder()`] to obtain one.
#[derive(Default)]
pub struct DashboardBuilder {
    client: ScreenerClientBuilder,
    tickers: Option<Vec<String>>,
}

impl DashboardBuilder {
    /// Backend origin. Defaults to [`config::DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.base_url(url);
        self
    }

    /// HTTP request timeout. Defaults to 60 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.timeout(timeout);
        self
    }

    /// Initial ticker set. Defaults to [`config::DEFAULT_TICKERS`].
    pub fn tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers = Some(tickers.into_iter().map(Into::into).collect());
        self
    }

    /// Build the dashboard. No request is made until an action needs data.
    pub fn build(self) -> Result<Dashboard> {
        let client = self.client.build()?;
        let state = match self.tickers {
            Some(tickers) => AppState::with_tickers(tickers),
            None => AppState::default(),
        };
        Ok(Dashboard {
            client,
            state,
            geo: EntityCache::new("geo_analysis"),
            corporate_actions: EntityCache::new("corporate_actions"),
            broker_research: EntityCache::new("broker_research"),
        })
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Controller tying the view state to the backend client and the per-ticker
/// caches.
///
/// Every user action maps to one method; render from [`state()`](Self::state)
/// and the cache getters afterwards.
pub struct Dashboard {
    client: ScreenerClient,
    state: AppState,
    geo: EntityCache<GeoAnalysis>,
    corporate_actions: EntityCache<CorporateActions>,
    broker_research: EntityCache<Vec<BrokerResearch>>,
}

impl Dashboard {
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn client(&self) -> &ScreenerClient {
        &self.client
    }

    // -- Comparison --------------------------------------------------------

    /// Fetch a fresh snapshot for the current tickers and return its table.
    ///
    /// Fails without a request when no ticker is selected. On failure the
    /// previous snapshot is kept.
    pub async fn compare(&mut self) -> Result<ComparisonView> {
        if self.state.tickers().is_empty() {
            return Err(ScreenerError::InvalidArgument(
                "Please add at least one ticker".into(),
            ));
        }
        let data = self.client.compare(self.state.tickers()).await?;
        info!(tickers = data.len(), "comparison snapshot replaced");
        self.state.set_snapshot(data);
        self.state.set_tab(Tab::Table);
        Ok(self.state.view().unwrap_or_default())
    }

    pub fn view(&self) -> Option<ComparisonView> {
        self.state.view()
    }

    pub fn chart(&self) -> Option<ChartView> {
        self.state.chart()
    }

    // -- Tabs --------------------------------------------------------------

    /// Make `tab` active and load whatever it shows.
    ///
    /// Per-ticker tabs ensure every current ticker in their cache (cached
    /// tickers are not refetched). The market tab loads the market-wide
    /// actions once; that load is the only error returned here.
    pub async fn activate_tab(&mut self, tab: Tab) -> Result<()> {
        self.state.set_tab(tab);
        let tickers = self.state.tickers().to_vec();
        match tab {
            Tab::GeoAnalysis => {
                let fetcher = GeoFetcher(self.client.clone());
                self.geo.ensure_all(&tickers, &fetcher).await;
            }
            Tab::CorporateActions => {
                let fetcher = CorporateActionsFetcher(self.client.clone());
                self.corporate_actions.ensure_all(&tickers, &fetcher).await;
            }
            Tab::BrokerResearch => {
                let fetcher = BrokerResearchFetcher(self.client.clone());
                self.broker_research.ensure_all(&tickers, &fetcher).await;
            }
            Tab::MarketActions => {
                if self.state.market().actions.is_none() {
                    self.load_market_actions(None).await?;
                }
            }
            Tab::Table | Tab::Chart => {}
        }
        Ok(())
    }

    // -- Per-ticker panels ---------------------------------------------------

    pub fn geo(&self, ticker: &str) -> Option<EntityResult<GeoAnalysis>> {
        self.geo.get(ticker)
    }

    pub fn corporate_actions(&self, ticker: &str) -> Option<EntityResult<CorporateActions>> {
        self.corporate_actions.get(ticker)
    }

    pub fn broker_research(&self, ticker: &str) -> Option<EntityResult<Vec<BrokerResearch>>> {
        self.broker_research.get(ticker)
    }

    pub fn geo_cache(&self) -> &EntityCache<GeoAnalysis> {
        &self.geo
    }

    pub fn corporate_actions_cache(&self) -> &EntityCache<CorporateActions> {
        &self.corporate_actions
    }

    pub fn broker_research_cache(&self) -> &EntityCache<Vec<BrokerResearch>> {
        &self.broker_research
    }

    pub async fn refresh_geo(&self, ticker: &str) -> EntityResult<GeoAnalysis> {
        let fetcher = GeoFetcher(self.client.clone());
        self.geo.refresh(ticker, &fetcher).await
    }

    pub async fn refresh_corporate_actions(&self, ticker: &str) -> EntityResult<CorporateActions> {
        let fetcher = CorporateActionsFetcher(self.client.clone());
        self.corporate_actions.refresh(ticker, &fetcher).await
    }

    pub async fn refresh_broker_research(&self, ticker: &str) -> EntityResult<Vec<BrokerResearch>> {
        let fetcher = BrokerResearchFetcher(self.client.clone());
        self.broker_research.refresh(ticker, &fetcher).await
    }

    // -- Market actions ------------------------------------------------------

    /// Load market-wide actions for the current period or `year`, replacing
    /// any previously loaded set.
    pub async fn load_market_actions(&mut self, year: Option<i32>) -> Result<()> {
        let actions = self.client.market_actions(year).await?;
        info!(rows = actions.total_rows(), ?year, "market actions loaded");
        self.state.set_market_actions(actions, year);
        Ok(())
    }

    /// Rows of the active market category, highlighted against `today`.
    pub fn market_rows(&self, today: NaiveDate) -> Vec<MarketRowView> {
        self.state.market_rows(today)
    }

    /// [`market_rows`](Self::market_rows) against the local calendar date.
    pub fn market_rows_today(&self) -> Vec<MarketRowView> {
        self.market_rows(Local::now().date_naive())
    }

    // -- Session -------------------------------------------------------------

    /// Clear all view state and cached panel data.
    pub fn logout(&mut self) {
        self.state.reset();
        self.geo.clear();
        self.corporate_actions.clear();
        self.broker_research.clear();
        info!("session state cleared");
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dashboard(base_url={}, tickers=[{}], tab={:?}, \
             cached=[geo={}, actions={}, research={}])",
            self.client.base_url(),
            self.state.tickers().join(", "),
            self.state.tab(),
            self.geo.len(),
            self.corporate_actions.len(),
            self.broker_research.len()
        )
    }
}
