use crate::{AppState, error::AppError, pages::{self, ReportPage}, render};
use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, Uri},
    response::Html,
};
use core_types::ExploreQuery;
use database::ReportSource;
use std::sync::Arc;

/// Raw explore parameters exactly as they arrive. Validation happens in
/// `ExploreQuery::resolve`, never here.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExploreParams {
    pub ticker: Option<String>,
    pub days: Option<String>,
    pub mode: Option<String>,
}

impl ExploreParams {
    /// Picks the known keys out of decoded query pairs. The first value of a
    /// repeated key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "ticker" => &mut params.ticker,
                "days" => &mut params.days,
                "mode" => &mut params.mode,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// # GET /
pub async fn home() -> Html<String> {
    Html(render::home_page())
}

/// # GET /health
pub async fn health() -> &'static str {
    "OK"
}

async fn fixed_report<S: ReportSource>(
    state: &AppState<S>,
    page: &'static ReportPage,
) -> Result<Html<String>, AppError> {
    let rows = state.source.fetch(page.kind).await?;
    Ok(Html(render::report_page(page, &rows)))
}

/// # GET /summary
pub async fn summary<S: ReportSource>(State(state): State<Arc<AppState<S>>>) -> Result<Html<String>, AppError> {
    fixed_report(&state, &pages::SUMMARY).await
}

/// # GET /returns
pub async fn returns<S: ReportSource>(State(state): State<Arc<AppState<S>>>) -> Result<Html<String>, AppError> {
    fixed_report(&state, &pages::RETURNS).await
}

/// # GET /volatility
pub async fn volatility<S: ReportSource>(State(state): State<Arc<AppState<S>>>) -> Result<Html<String>, AppError> {
    fixed_report(&state, &pages::VOLATILITY).await
}

/// # GET /volume
pub async fn volume<S: ReportSource>(State(state): State<Arc<AppState<S>>>) -> Result<Html<String>, AppError> {
    fixed_report(&state, &pages::VOLUME).await
}

/// # GET /average
pub async fn average<S: ReportSource>(State(state): State<Arc<AppState<S>>>) -> Result<Html<String>, AppError> {
    fixed_report(&state, &pages::AVERAGE).await
}

/// # GET /explore?ticker=&days=&mode=
/// Malformed parameters are normalized, never rejected. Each key is read on its
/// own, so a repeated key does not discard the others; a query string that
/// cannot be decoded at all falls back to the defaults.
pub async fn explore<S: ReportSource>(
    State(state): State<Arc<AppState<S>>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let params = match pairs {
        Ok(Query(pairs)) => ExploreParams::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(%rejection, "Unreadable explore parameters, using defaults.");
            ExploreParams::default()
        }
    };

    let tickers = state.source.tickers().await?;
    let query = ExploreQuery::resolve(
        params.ticker.as_deref(),
        params.days.as_deref(),
        params.mode.as_deref(),
        &tickers,
    );

    let rows = match &query {
        Some(query) if query.can_match() => state.source.explore(query).await?.into_report_rows(),
        _ => Vec::new(),
    };
    Ok(Html(render::explore_page(&tickers, query.as_ref(), &rows)))
}

/// Fallback for any route not listed above.
pub async fn not_found(uri: Uri) -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(render::not_found_page(uri.path())))
}
