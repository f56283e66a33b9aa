//! Static presentation metadata for each page: titles, descriptions and the
//! human labels of every column a report can return.

use core_types::ReportKind;

/// One table column: the SQL column name, its header label and whether it
/// holds numbers (right-aligned).
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub label: &'static str,
    pub numeric: bool,
}

const fn text(name: &'static str, label: &'static str) -> Column {
    Column { name, label, numeric: false }
}

const fn number(name: &'static str, label: &'static str) -> Column {
    Column { name, label, numeric: true }
}

#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub aria_label: &'static str,
    pub columns: &'static [Column],
}

#[derive(Debug, Clone, Copy)]
pub struct ReportPage {
    pub kind: ReportKind,
    pub title: &'static str,
    pub heading: &'static str,
    pub description: &'static str,
    pub table: TableSpec,
}

/// Navigation entries in display order: (path, label).
pub const NAV: [(&str, &str); 7] = [
    ("/", "Home"),
    ("/summary", "Summary"),
    ("/returns", "Returns"),
    ("/volatility", "Volatility"),
    ("/volume", "Volume"),
    ("/average", "Average"),
    ("/explore", "Explore"),
];

pub static SUMMARY: ReportPage = ReportPage {
    kind: ReportKind::Summary,
    title: "Summary",
    heading: "Dataset Summary",
    description: "Counts and date range per ticker.",
    table: TableSpec {
        aria_label: "Dataset summary",
        columns: &[
            text("ticker", "Ticker"),
            number("row_count", "Rows"),
            text("min_date", "From"),
            text("max_date", "To"),
        ],
    },
};

pub static RETURNS: ReportPage = ReportPage {
    kind: ReportKind::Returns,
    title: "Returns",
    heading: "Overall Returns",
    description: "Return from first close to last close in the dataset window.",
    table: TableSpec {
        aria_label: "Overall returns",
        columns: &[
            text("ticker", "Ticker"),
            number("first_close", "First Close"),
            number("last_close", "Last Close"),
            number("pct_return", "Return (%)"),
        ],
    },
};

pub static VOLATILITY: ReportPage = ReportPage {
    kind: ReportKind::Volatility,
    title: "Volatility",
    heading: "Volatility",
    description: "Standard deviation of daily returns (higher = more volatile).",
    table: TableSpec {
        aria_label: "Daily volatility",
        columns: &[
            text("ticker", "Ticker"),
            number("daily_volatility_pct", "Daily Volatility (%)"),
        ],
    },
};

pub static VOLUME: ReportPage = ReportPage {
    kind: ReportKind::Volume,
    title: "Volume",
    heading: "Trading Volume",
    description: "Average and maximum daily volume per ticker.",
    table: TableSpec {
        aria_label: "Trading volume",
        columns: &[
            text("ticker", "Ticker"),
            number("avg_volume", "Avg Volume"),
            number("max_volume", "Max Volume"),
        ],
    },
};

pub static AVERAGE: ReportPage = ReportPage {
    kind: ReportKind::Average,
    title: "Average Close",
    heading: "Average Closing Price",
    description: "Compares average close price across tickers over the dataset window.",
    table: TableSpec {
        aria_label: "Average closing price",
        columns: &[
            text("ticker", "Ticker"),
            text("company_name", "Company"),
            number("avg_close_price", "Avg Close (USD)"),
        ],
    },
};

pub const EXPLORE_PRICES: TableSpec = TableSpec {
    aria_label: "Daily prices",
    columns: &[
        text("trade_date", "Date"),
        number("open_price", "Open"),
        number("high_price", "High"),
        number("low_price", "Low"),
        number("close_price", "Close"),
        number("volume", "Volume"),
    ],
};

pub const EXPLORE_STATS: TableSpec = TableSpec {
    aria_label: "Window statistics",
    columns: &[
        text("ticker", "Ticker"),
        number("trading_days", "Days"),
        text("from_date", "From"),
        text("to_date", "To"),
        number("min_close", "Min Close"),
        number("max_close", "Max Close"),
        number("avg_close", "Avg Close"),
        number("avg_volume", "Avg Volume"),
    ],
};
