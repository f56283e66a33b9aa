use chrono::NaiveDate;
use core_types::{ExploreMode, ReportRow};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Row count and trade-date range for one ticker.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SummaryRow {
    pub ticker: String,
    pub row_count: i64,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

/// First-to-last close return for one ticker, in percent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReturnRow {
    pub ticker: String,
    pub first_close: Decimal,
    pub last_close: Decimal,
    pub pct_return: Decimal,
}

/// Sample standard deviation of day-over-day returns, in percent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VolatilityRow {
    pub ticker: String,
    pub daily_volatility_pct: Decimal,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VolumeRow {
    pub ticker: String,
    pub avg_volume: Decimal,
    pub max_volume: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AverageRow {
    pub ticker: String,
    pub company_name: String,
    pub avg_close_price: Decimal,
}

/// One raw daily price record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PriceRow {
    pub ticker: String,
    pub trade_date: NaiveDate,
    pub open_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub close_price: Decimal,
    pub volume: i64,
}

/// Aggregates over the most recent N trading days of one ticker.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WindowStatsRow {
    pub ticker: String,
    pub trading_days: i64,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub min_close: Decimal,
    pub max_close: Decimal,
    pub avg_close: Decimal,
    pub avg_volume: Decimal,
}

/// The result of an explore query; the shape depends on the requested mode.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExploreRows {
    Prices(Vec<PriceRow>),
    Stats(Vec<WindowStatsRow>),
}

impl ExploreRows {
    /// No rows, in the shape `mode` asks for.
    pub fn empty(mode: ExploreMode) -> Self {
        match mode {
            ExploreMode::Prices => ExploreRows::Prices(Vec::new()),
            ExploreMode::Stats => ExploreRows::Stats(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ExploreRows::Prices(rows) => rows.len(),
            ExploreRows::Stats(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_report_rows(self) -> Vec<ReportRow> {
        match self {
            ExploreRows::Prices(rows) => rows.into_iter().map(ReportRow::from).collect(),
            ExploreRows::Stats(rows) => rows.into_iter().map(ReportRow::from).collect(),
        }
    }
}

// --- Conversions into generic report rows ---
// Column names and order match the select lists in the repository.

impl From<SummaryRow> for ReportRow {
    fn from(row: SummaryRow) -> Self {
        ReportRow::new()
            .with("ticker", row.ticker)
            .with("row_count", row.row_count)
            .with("min_date", row.min_date)
            .with("max_date", row.max_date)
    }
}

impl From<ReturnRow> for ReportRow {
    fn from(row: ReturnRow) -> Self {
        ReportRow::new()
            .with("ticker", row.ticker)
            .with("first_close", row.first_close)
            .with("last_close", row.last_close)
            .with("pct_return", row.pct_return)
    }
}

impl From<VolatilityRow> for ReportRow {
    fn from(row: VolatilityRow) -> Self {
        ReportRow::new()
            .with("ticker", row.ticker)
            .with("daily_volatility_pct", row.daily_volatility_pct)
    }
}

impl From<VolumeRow> for ReportRow {
    fn from(row: VolumeRow) -> Self {
        ReportRow::new()
            .with("ticker", row.ticker)
            .with("avg_volume", row.avg_volume)
            .with("max_volume", row.max_volume)
    }
}

impl From<AverageRow> for ReportRow {
    fn from(row: AverageRow) -> Self {
        ReportRow::new()
            .with("ticker", row.ticker)
            .with("company_name", row.company_name)
            .with("avg_close_price", row.avg_close_price)
    }
}

impl From<PriceRow> for ReportRow {
    fn from(row: PriceRow) -> Self {
        ReportRow::new()
            .with("ticker", row.ticker)
            .with("trade_date", row.trade_date)
            .with("open_price", row.open_price)
            .with("high_price", row.high_price)
            .with("low_price", row.low_price)
            .with("close_price", row.close_price)
            .with("volume", row.volume)
    }
}

impl From<WindowStatsRow> for ReportRow {
    fn from(row: WindowStatsRow) -> Self {
        ReportRow::new()
            .with("ticker", row.ticker)
            .with("trading_days", row.trading_days)
            .with("from_date", row.from_date)
            .with("to_date", row.to_date)
            .with("min_close", row.min_close)
            .with("max_close", row.max_close)
            .with("avg_close", row.avg_close)
            .with("avg_volume", row.avg_volume)
    }
}
