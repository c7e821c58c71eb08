//! Shared fixtures for the screener-view integration tests.
//!
//! Provides sample payloads shaped like the screener backend's responses and
//! `spawn_backend()`, which serves them from an in-process axum server on an
//! ephemeral port and records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use screener_view::models::{ComparisonData, MarketActionRow, TickerRecord};
use serde_json::{json, Value};
use tokio::net::TcpListener;

// ---------------------------------------------------------------------------
// Payload fixtures
// ---------------------------------------------------------------------------

/// Compare payload for `TCS,INFY,HDFCBANK,XYZ`, in that order. `XYZ` is
/// unknown to the backend.
pub const COMPARE_BODY: &str = r#"{
    "TCS": {
        "Industry": "IT - Software",
        "P/E": "28.5",
        "ROCE %": "64.3",
        "Dividend Yield %": "1.9",
        "Market Cap": "₹13,50,000 Cr.",
        "High / Low": "4,592 / 3,056"
    },
    "INFY": {
        "Industry": "IT - Software",
        "P/E": "24.1",
        "ROCE %": "40.2",
        "Dividend Yield %": "2.8",
        "Market Cap": "₹6,20,000 Cr."
    },
    "HDFCBANK": {
        "Industry": "Banks",
        "P/E": "19.8",
        "ROE %": "16.9",
        "Debt to equity": "6.5",
        "Market Cap": "₹12,00,000 Cr.",
        "Pledged percentage": 0,
        "Promoter holding": null
    },
    "XYZ": null
}"#;

pub fn sample_comparison() -> ComparisonData {
    serde_json::from_str(COMPARE_BODY).unwrap()
}

pub fn record(pairs: &[(&str, &str)]) -> TickerRecord {
    pairs.iter().copied().collect()
}

pub fn row(pairs: &[(&str, &str)]) -> MarketActionRow {
    pairs.iter().copied().collect()
}

fn ticker_json(ticker: &str) -> Value {
    match ticker {
        "TCS" => json!({"Industry": "IT - Software", "P/E": "28.5", "ROCE %": "64.3"}),
        "INFY" => json!({"Industry": "IT - Software", "P/E": "24.1", "ROCE %": "40.2"}),
        "HDFCBANK" => json!({"Industry": "Banks", "P/E": "19.8", "ROE %": "16.9"}),
        _ => Value::Null,
    }
}

pub fn geo_json() -> Value {
    json!({
        "revenueSplit": {
            "North America": 50.2,
            "Europe": 29.3,
            "India": 20.5
        },
        "news": {
            "India": [
                {
                    "title": "IT exports rise in Q2",
                    "link": "https://news.example.com/it-exports",
                    "pubDate": "Tue, 10 Jun 2025 08:00:00 GMT",
                    "source": "Example Times"
                }
            ],
            "North America": []
        }
    })
}

pub fn corporate_actions_json() -> Value {
    json!({
        "dividends": {
            "upcoming": [
                {"Type": "Interim", "Dividend": "₹11", "Ex-Date": "16-07-2025"}
            ],
            "previous": [
                {"Type": "Final", "Dividend": "₹30", "Ex-Date": "04-06-2025"},
                {"Type": "Interim", "Dividend": "₹10", "Ex-Date": "17-01-2025"}
            ]
        },
        "splits": {
            "previous": [
                {"Old FV": "10", "New FV": "1", "Split Date": "01-06-2018"}
            ]
        }
    })
}

pub fn broker_research_json() -> Value {
    json!([
        {
            "organization": "Alpha Securities",
            "reco": "BUY",
            "targetPrice": "₹4,200",
            "recommendedPrice": "₹3,500",
            "reportLink": "https://research.example.com/alpha.pdf",
            "recoDate": "16 Oct, 2025",
            "summary": "Deal wins support margin recovery."
        },
        {
            "organization": "Beta Capital",
            "reco": "HOLD",
            "targetPrice": "₹3,600",
            "recommendedPrice": "₹3,450",
            "reportLink": "https://research.example.com/beta.pdf",
            "recoDate": "02 Sep, 2025",
            "summary": null
        }
    ])
}

pub fn market_actions_json() -> Value {
    json!({
        "dividends": [
            {"company": "Tata Consultancy", "type": "Interim", "percentage": "1100", "announcementDate": "01-06-2025", "recordDate": "11-06-2025", "exDate": "11-06-2025"},
            {"company": "Infosys", "type": "Final", "percentage": "440", "announcementDate": "20-05-2025", "recordDate": "30-05-2025", "exDate": "30-05-2025"},
            {"company": "HDFC Bank", "type": "Final", "percentage": "1100", "announcementDate": "-", "recordDate": "-", "exDate": "Not Announced"},
            {"company": "Wipro", "type": "Interim", "percentage": "300", "announcementDate": "05-06-2025", "recordDate": "20-06-2025", "exDate": "20-06-2025"}
        ],
        "bonus": [
            {"company": "Bharat Electronics", "ratio": "2:1", "announcementDate": "01-06-2025", "recordDate": "10-06-2025", "exDate": "10-06-2025"}
        ],
        "splits": [
            {"company": "Nestle India", "oldFV": "10", "newFV": "1", "splitDate": "12-06-2025"}
        ],
        "rights": []
    })
}

// ---------------------------------------------------------------------------
// Fake backend
// ---------------------------------------------------------------------------

/// One request seen by the fake backend.
#[derive(Debug, Clone)]
pub struct Hit {
    /// Path relative to the API prefix, e.g. `geo-analysis/TCS`.
    pub path: String,
    pub query: HashMap<String, String>,
}

impl Hit {
    pub fn refresh(&self) -> bool {
        self.query.get("refresh").map(String::as_str) == Some("true")
    }
}

/// Request log shared with the running server.
#[derive(Clone, Default)]
pub struct FakeBackend {
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl FakeBackend {
    fn record(&self, path: String, query: HashMap<String, String>) {
        self.hits.lock().unwrap().push(Hit { path, query });
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    /// Number of requests made to exactly `path`.
    pub fn count(&self, path: &str) -> usize {
        self.hits().iter().filter(|h| h.path == path).count()
    }

    pub fn last(&self, path: &str) -> Option<Hit> {
        self.hits().into_iter().filter(|h| h.path == path).last()
    }
}

type Params = Query<HashMap<String, String>>;

/// Serve the fixtures on `127.0.0.1:0`. Returns the base URL and the request
/// log.
///
/// Panel endpoints answer ticker `FAIL` with a 500 and ticker `ERR` with an
/// `{"error": ...}` body.
pub async fn spawn_backend() -> (String, FakeBackend) {
    let backend = FakeBackend::default();
    let app = Router::new()
        .route("/api/v1/data-fetcher/compare", get(compare))
        .route("/api/v1/data-fetcher/geo-analysis/{ticker}", get(geo_analysis))
        .route("/api/v1/data-fetcher/corporate-actions/{ticker}", get(corporate_actions))
        .route("/api/v1/data-fetcher/broker-research/{ticker}", get(broker_research))
        .route("/api/v1/data-fetcher/market-actions", get(market_actions))
        .with_state(backend.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), backend)
}

async fn compare(State(backend): State<FakeBackend>, Query(query): Params) -> Response {
    let tickers = query.get("tickers").cloned().unwrap_or_default();
    backend.record("compare".into(), query);

    // Built by hand so the response keeps the requested ticker order.
    let entries: Vec<String> = tickers
        .split(',')
        .filter(|t| !t.is_empty())
        .map(|t| format!("{}: {}", Value::from(t), ticker_json(t)))
        .collect();
    let body = format!("{{{}}}", entries.join(", "));
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn panel(ticker: &str, body: Value) -> Response {
    match ticker {
        "FAIL" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "ERR" => Json(json!({"error": format!("No data for {}", ticker)})).into_response(),
        _ => Json(body).into_response(),
    }
}

async fn geo_analysis(
    State(backend): State<FakeBackend>,
    Path(ticker): Path<String>,
    Query(query): Params,
) -> Response {
    backend.record(format!("geo-analysis/{}", ticker), query);
    panel(&ticker, geo_json())
}

async fn corporate_actions(
    State(backend): State<FakeBackend>,
    Path(ticker): Path<String>,
    Query(query): Params,
) -> Response {
    backend.record(format!("corporate-actions/{}", ticker), query);
    panel(&ticker, corporate_actions_json())
}

async fn broker_research(
    State(backend): State<FakeBackend>,
    Path(ticker): Path<String>,
    Query(query): Params,
) -> Response {
    backend.record(format!("broker-research/{}", ticker), query);
    panel(&ticker, broker_research_json())
}

async fn market_actions(State(backend): State<FakeBackend>, Query(query): Params) -> Response {
    backend.record("market-actions".into(), query);
    Json(market_actions_json()).into_response()
}
