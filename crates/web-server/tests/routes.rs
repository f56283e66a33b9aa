//! Router tests against an in-memory report source.
//!
//! These exercise routing, parameter normalization, rendering and error pages
//! without a database.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use core_types::{DayWindow, ExploreMode, ExploreQuery};
use database::{
    AverageRow, DbError, ExploreRows, PriceRow, ReportSource, ReturnRow, SummaryRow,
    VolatilityRow, VolumeRow, WindowStatsRow,
};
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

// ─── Test Helpers ────────────────────────────────────────────────────────────

/// Canned rows plus a record of every explore query that reached the source.
#[derive(Clone, Default)]
struct FakeSource {
    tickers: Vec<String>,
    average: Vec<AverageRow>,
    prices: Vec<PriceRow>,
    stats: Vec<WindowStatsRow>,
    failing: bool,
    explored: Arc<Mutex<Vec<ExploreQuery>>>,
}

impl FakeSource {
    fn check(&self) -> Result<(), DbError> {
        if self.failing {
            Err(DbError::QueryFailed(sqlx::Error::Protocol(
                "store <unreachable>".to_string(),
            )))
        } else {
            Ok(())
        }
    }

    fn explored(&self) -> Vec<ExploreQuery> {
        self.explored.lock().unwrap().clone()
    }
}

impl ReportSource for FakeSource {
    async fn tickers(&self) -> Result<Vec<String>, DbError> {
        self.check()?;
        Ok(self.tickers.clone())
    }

    async fn summary(&self) -> Result<Vec<SummaryRow>, DbError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn returns(&self) -> Result<Vec<ReturnRow>, DbError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn volatility(&self) -> Result<Vec<VolatilityRow>, DbError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn volume(&self) -> Result<Vec<VolumeRow>, DbError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn average(&self) -> Result<Vec<AverageRow>, DbError> {
        self.check()?;
        Ok(self.average.clone())
    }

    async fn explore(&self, query: &ExploreQuery) -> Result<ExploreRows, DbError> {
        self.check()?;
        self.explored.lock().unwrap().push(query.clone());
        let rows = match query.mode {
            ExploreMode::Prices => ExploreRows::Prices(
                self.prices
                    .iter()
                    .filter(|row| row.ticker == query.ticker)
                    .take(usize::from(query.days.get()))
                    .cloned()
                    .collect(),
            ),
            ExploreMode::Stats => ExploreRows::Stats(
                self.stats
                    .iter()
                    .filter(|row| row.ticker == query.ticker)
                    .cloned()
                    .collect(),
            ),
        };
        Ok(rows)
    }
}

fn price(ticker: &str, day: u32, close: i64) -> PriceRow {
    PriceRow {
        ticker: ticker.to_string(),
        trade_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        open_price: close.into(),
        high_price: close.into(),
        low_price: close.into(),
        close_price: close.into(),
        volume: 1_250_000,
    }
}

fn sample_source() -> FakeSource {
    FakeSource {
        tickers: vec!["AAA".to_string(), "BBB".to_string()],
        average: vec![AverageRow {
            ticker: "XYZ".to_string(),
            company_name: "Xyz Corp".to_string(),
            avg_close_price: dec!(11.00),
        }],
        prices: vec![price("AAA", 4, 101), price("AAA", 3, 100), price("BBB", 4, 55)],
        stats: vec![WindowStatsRow {
            ticker: "AAA".to_string(),
            trading_days: 2,
            from_date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            min_close: dec!(100),
            max_close: dec!(101),
            avg_close: dec!(100.5000),
            avg_volume: dec!(1250000.0000),
        }],
        ..FakeSource::default()
    }
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Fixed reports
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn average_renders_the_single_ticker() {
    let app = web_server::build_router(sample_source());
    let (status, body) = get(app, "/average").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("<tr>").count(), 2, "header row plus one data row");
    assert!(body.contains(r#"<td class="">XYZ</td>"#));
    assert!(body.contains(r#"<td class="right">11.00</td>"#));
    assert!(body.contains(r#"<a class="active" href="/average">Average</a>"#));
}

#[tokio::test]
async fn empty_report_says_no_results() {
    let app = web_server::build_router(sample_source());
    let (status, body) = get(app, "/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Dataset Summary"));
    assert!(body.contains("No results."));
}

#[tokio::test]
async fn store_failure_renders_error_page() {
    let source = FakeSource {
        failing: true,
        ..sample_source()
    };

    for path in ["/summary", "/returns", "/volatility", "/volume", "/average", "/explore"] {
        let (status, body) = get(web_server::build_router(source.clone()), path).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert!(body.contains("<h1>Error</h1>"), "{path}");
        assert!(body.contains("Query failed"), "{path}");
        assert!(body.contains("store &lt;unreachable&gt;"), "{path}");
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Explore
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn explore_defaults_to_first_ticker() {
    let source = sample_source();
    let (status, body) = get(web_server::build_router(source.clone()), "/explore").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        source.explored(),
        vec![ExploreQuery::new("AAA", DayWindow::default(), ExploreMode::Prices)]
    );
    assert!(body.contains("AAA · last 30 trading days · prices"));
    assert!(body.contains("2024-03-04"));
    assert!(body.contains("1,250,000"));
    assert!(!body.contains(">55<"));
}

#[tokio::test]
async fn explore_normalizes_bad_parameters() {
    let source = sample_source();
    let (status, _) = get(
        web_server::build_router(source.clone()),
        "/explore?ticker=BBB&days=9999&mode=bogus",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(
        web_server::build_router(source.clone()),
        "/explore?ticker=AAA&days=abc&mode=stats",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        source.explored(),
        vec![
            ExploreQuery::new("BBB", DayWindow::clamp(365), ExploreMode::Prices),
            ExploreQuery::new("AAA", DayWindow::clamp(30), ExploreMode::Stats),
        ]
    );
}

#[tokio::test]
async fn explore_passes_unknown_ticker_through() {
    let source = sample_source();
    let (status, body) = get(web_server::build_router(source.clone()), "/explore?ticker=ZZZ&days=-10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        source.explored(),
        vec![ExploreQuery::new("ZZZ", DayWindow::clamp(5), ExploreMode::Prices)]
    );
    assert!(body.contains("No results."));
}

#[tokio::test]
async fn explore_stats_renders_the_window_summary() {
    let source = sample_source();
    let (status, body) = get(
        web_server::build_router(source.clone()),
        "/explore?ticker=AAA&days=2&mode=stats",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        source.explored(),
        vec![ExploreQuery::new("AAA", DayWindow::clamp(2), ExploreMode::Stats)]
    );
    assert!(body.contains("AAA · last 5 trading days · stats"));
    assert!(body.contains(r#"aria-label="Window statistics""#));
    for label in ["Days", "From", "To", "Min Close", "Max Close", "Avg Close", "Avg Volume"] {
        assert!(body.contains(&format!(">{label}</th>")), "{label}");
    }
    assert!(body.contains(r#"<td class="right">100.5000</td>"#));
    assert!(body.contains(r#"<td class="right">1,250,000.0000</td>"#));
    assert!(body.contains(r#"<td class="">2024-03-03</td>"#));
    assert!(!body.contains(">Open</th>"), "price columns must not appear in stats mode");
}

#[tokio::test]
async fn explore_keeps_good_keys_beside_a_repeated_one() {
    let source = sample_source();
    let (status, _) = get(
        web_server::build_router(source.clone()),
        "/explore?ticker=BBB&ticker=AAA&days=10",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        source.explored(),
        vec![ExploreQuery::new("BBB", DayWindow::clamp(10), ExploreMode::Prices)]
    );
}

#[tokio::test]
async fn explore_nul_ticker_is_no_results() {
    let source = sample_source();
    let (status, body) = get(web_server::build_router(source.clone()), "/explore?ticker=%00").await;

    assert_eq!(status, StatusCode::OK);
    assert!(source.explored().is_empty(), "a NUL ticker must not reach the store");
    assert!(body.contains("No results."));
    assert!(!body.contains("<h1>Error</h1>"));
}

#[tokio::test]
async fn explore_without_tickers_skips_the_query() {
    let source = FakeSource::default();
    let (status, body) = get(web_server::build_router(source.clone()), "/explore").await;

    assert_eq!(status, StatusCode::OK);
    assert!(source.explored().is_empty());
    assert!(body.contains("No results."));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Misc routes
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn home_lists_the_questions() {
    let (status, body) = get(web_server::build_router(sample_source()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Motivation / Questions"));
    assert!(body.contains(r#"<a class="active" href="/">Home</a>"#));
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = get(web_server::build_router(sample_source()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (status, body) = get(web_server::build_router(sample_source()), "/sharpe").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<code>/sharpe</code>"));
}
