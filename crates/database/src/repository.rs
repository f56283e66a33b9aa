use crate::DbError;
use crate::models::{
    AverageRow, ExploreRows, PriceRow, ReturnRow, SummaryRow, VolatilityRow, VolumeRow,
    WindowStatsRow,
};
use core_types::{DayWindow, ExploreMode, ExploreQuery};
use sqlx::postgres::PgPool;

const TICKERS_SQL: &str = "SELECT ticker FROM Company ORDER BY ticker";

const SUMMARY_SQL: &str = r#"
    SELECT c.ticker,
           COUNT(*) AS row_count,
           MIN(d.trade_date) AS min_date,
           MAX(d.trade_date) AS max_date
    FROM DailyPrice d
    JOIN Company c ON c.company_id = d.company_id
    GROUP BY c.ticker
    ORDER BY c.ticker
"#;

// Tickers with a single row or a zero first close have no defined return and
// are left out rather than surfacing NULL or a division error.
const RETURNS_SQL: &str = r#"
    WITH bounds AS (
        SELECT company_id,
               MIN(trade_date) AS min_date,
               MAX(trade_date) AS max_date,
               COUNT(*) AS row_count
        FROM DailyPrice
        GROUP BY company_id
    ),
    first_last AS (
        SELECT b.company_id,
               f.close_price AS first_close,
               l.close_price AS last_close
        FROM bounds b
        JOIN DailyPrice f ON f.company_id = b.company_id AND f.trade_date = b.min_date
        JOIN DailyPrice l ON l.company_id = b.company_id AND l.trade_date = b.max_date
        WHERE b.row_count >= 2
    )
    SELECT c.ticker,
           ROUND(fl.first_close, 4) AS first_close,
           ROUND(fl.last_close, 4) AS last_close,
           ROUND((fl.last_close / fl.first_close - 1) * 100, 2) AS pct_return
    FROM first_last fl
    JOIN Company c ON c.company_id = fl.company_id
    WHERE fl.first_close <> 0
    ORDER BY pct_return DESC, c.ticker
"#;

// A return after a zero close is undefined. A sample standard deviation needs
// at least two returns, so tickers with fewer are excluded.
const VOLATILITY_SQL: &str = r#"
    WITH daily AS (
        SELECT company_id,
               close_price
                   / NULLIF(LAG(close_price) OVER (PARTITION BY company_id ORDER BY trade_date), 0)
                   - 1 AS daily_return
        FROM DailyPrice
    )
    SELECT c.ticker,
           ROUND(STDDEV_SAMP(r.daily_return) * 100, 4) AS daily_volatility_pct
    FROM daily r
    JOIN Company c ON c.company_id = r.company_id
    WHERE r.daily_return IS NOT NULL
    GROUP BY c.ticker
    HAVING COUNT(r.daily_return) >= 2
    ORDER BY daily_volatility_pct DESC, c.ticker
"#;

const VOLUME_SQL: &str = r#"
    SELECT c.ticker,
           ROUND(AVG(d.volume), 0) AS avg_volume,
           MAX(d.volume) AS max_volume
    FROM DailyPrice d
    JOIN Company c ON c.company_id = d.company_id
    GROUP BY c.ticker
    ORDER BY avg_volume DESC, c.ticker
"#;

const AVERAGE_SQL: &str = r#"
    SELECT c.ticker,
           c.company_name,
           ROUND(AVG(d.close_price), 2) AS avg_close_price
    FROM DailyPrice d
    JOIN Company c ON c.company_id = d.company_id
    GROUP BY c.company_id, c.ticker, c.company_name
    ORDER BY avg_close_price DESC, c.ticker
"#;

/// Builds the explore statement for a mode and window.
///
/// The ticker is always `$1`. The row limit is written into the text because
/// it is a `DayWindow`, which can only hold a clamped integer.
fn explore_sql(mode: ExploreMode, days: DayWindow) -> String {
    let window = format!(
        r#"
        SELECT c.ticker, d.trade_date, d.open_price, d.high_price, d.low_price,
               d.close_price, d.volume
        FROM DailyPrice d
        JOIN Company c ON c.company_id = d.company_id
        WHERE c.ticker = $1
        ORDER BY d.trade_date DESC
        LIMIT {days}
        "#
    );

    match mode {
        ExploreMode::Prices => window,
        ExploreMode::Stats => format!(
            r#"
            WITH window_rows AS ({window})
            SELECT w.ticker,
                   COUNT(*) AS trading_days,
                   MIN(w.trade_date) AS from_date,
                   MAX(w.trade_date) AS to_date,
                   MIN(w.close_price) AS min_close,
                   MAX(w.close_price) AS max_close,
                   ROUND(AVG(w.close_price), 4) AS avg_close,
                   ROUND(AVG(w.volume), 0) AS avg_volume
            FROM window_rows w
            GROUP BY w.ticker
            "#
        ),
    }
}

/// The `ReportRepository` runs the fixed catalog of read-only report queries.
///
/// Every method is a single round trip with no transaction. Store failures come
/// back as [`DbError::QueryFailed`] and are not retried.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    /// Creates a new `ReportRepository` over a shared connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Closes the underlying pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed.");
    }

    /// All known tickers, ascending.
    pub async fn tickers(&self) -> Result<Vec<String>, DbError> {
        let tickers: Vec<String> = sqlx::query_scalar(TICKERS_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(tickers)
    }

    /// Per-ticker row count and trade-date range.
    pub async fn summary(&self) -> Result<Vec<SummaryRow>, DbError> {
        let rows = sqlx::query_as::<_, SummaryRow>(SUMMARY_SQL)
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(report = "summary", rows = rows.len(), "Report fetched.");
        Ok(rows)
    }

    /// Per-ticker percentage change from the first to the last close,
    /// highest first.
    pub async fn returns(&self) -> Result<Vec<ReturnRow>, DbError> {
        let rows = sqlx::query_as::<_, ReturnRow>(RETURNS_SQL)
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(report = "returns", rows = rows.len(), "Report fetched.");
        Ok(rows)
    }

    /// Per-ticker daily volatility, most volatile first.
    pub async fn volatility(&self) -> Result<Vec<VolatilityRow>, DbError> {
        let rows = sqlx::query_as::<_, VolatilityRow>(VOLATILITY_SQL)
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(report = "volatility", rows = rows.len(), "Report fetched.");
        Ok(rows)
    }

    /// Per-ticker average and maximum daily volume.
    pub async fn volume(&self) -> Result<Vec<VolumeRow>, DbError> {
        let rows = sqlx::query_as::<_, VolumeRow>(VOLUME_SQL)
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(report = "volume", rows = rows.len(), "Report fetched.");
        Ok(rows)
    }

    /// Per-ticker average close price.
    pub async fn average(&self) -> Result<Vec<AverageRow>, DbError> {
        let rows = sqlx::query_as::<_, AverageRow>(AVERAGE_SQL)
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(report = "average", rows = rows.len(), "Report fetched.");
        Ok(rows)
    }

    /// The most recent `query.days` trading days of one ticker, either raw or
    /// aggregated. An unknown ticker yields no rows.
    pub async fn explore(&self, query: &ExploreQuery) -> Result<ExploreRows, DbError> {
        if !query.can_match() {
            tracing::debug!(report = "explore", ticker = ?query.ticker, "Ticker cannot match, skipping query.");
            return Ok(ExploreRows::empty(query.mode));
        }

        let sql = explore_sql(query.mode, query.days);
        let rows = match query.mode {
            ExploreMode::Prices => ExploreRows::Prices(
                sqlx::query_as::<_, PriceRow>(&sql)
                    .bind(&query.ticker)
                    .fetch_all(&self.pool)
                    .await?,
            ),
            ExploreMode::Stats => ExploreRows::Stats(
                sqlx::query_as::<_, WindowStatsRow>(&sql)
                    .bind(&query.ticker)
                    .fetch_all(&self.pool)
                    .await?,
            ),
        };
        tracing::debug!(
            report = "explore",
            ticker = %query.ticker,
            days = query.days.get(),
            mode = %query.mode,
            rows = rows.len(),
            "Report fetched."
        );
        Ok(rows)
    }
}
