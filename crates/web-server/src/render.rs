//! Server-side HTML rendering: the shared layout, report tables and the
//! individual pages. Every interpolated value goes through [`escape_html`].

use crate::pages::{self, ReportPage, TableSpec};
use core_types::{DayWindow, ExploreMode, ExploreQuery, ReportRow};
use std::fmt::Write;

const BRAND: &str = "CM3010 • Stock Dashboard";
const DATABASE_NAME: &str = "cm3010_stock";

const STYLE: &str = r#"
    :root{--bg:#fff;--text:#111827;--muted:#6b7280;--line:#e5e7eb;--card:#f9fafb;--accent:#2563eb}
    body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Arial,sans-serif;background:var(--bg);color:var(--text);max-width:980px;margin:24px auto;padding:0 14px;line-height:1.45}
    header{display:flex;align-items:center;justify-content:space-between;gap:12px;margin-bottom:10px}
    .brand{font-weight:800;font-size:18px}
    nav{display:flex;flex-wrap:wrap;gap:10px}
    nav a{color:var(--text);text-decoration:none;padding:8px 10px;border:1px solid var(--line);border-radius:10px;background:#fff}
    nav a.active{border-color:var(--accent);color:var(--accent);background:#eff6ff}
    hr{border:none;border-top:1px solid var(--line);margin:14px 0 18px}
    h1{font-size:34px;margin:8px 0 10px}
    h2{font-size:18px;margin:0 0 10px}
    .muted{color:var(--muted)}
    .card{border:1px solid var(--line);background:var(--card);border-radius:14px;padding:14px;margin:14px 0}
    .meta{display:flex;flex-wrap:wrap;gap:10px}
    .pill{font-size:12px;color:var(--muted);border:1px solid var(--line);background:#fff;border-radius:999px;padding:6px 10px}
    table{border-collapse:collapse;width:100%;margin:12px 0;background:#fff;border:1px solid var(--line)}
    th,td{border-bottom:1px solid var(--line);padding:10px;text-align:left;vertical-align:top}
    th{background:#f3f4f6;font-size:13px;color:#374151}
    .right{text-align:right}
    form.explore{display:flex;flex-wrap:wrap;gap:12px;align-items:end}
    form.explore label{display:flex;flex-direction:column;font-size:13px;gap:4px}
    .footer{margin-top:20px;font-size:12px;color:var(--muted)}
    code,pre{background:#f3f4f6;padding:2px 6px;border-radius:6px}
"#;

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wraps page content in the shared document: header, navigation with the
/// current path marked active, and the footer.
pub fn layout(title: &str, content: &str, current_path: &str) -> String {
    let mut nav = String::new();
    for (href, label) in pages::NAV {
        let class = if href == current_path { "active" } else { "" };
        let _ = write!(nav, r#"<a class="{class}" href="{href}">{label}</a>"#);
    }

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
  <header>
    <div class="brand">{BRAND}</div>
    <nav aria-label="Primary">{nav}</nav>
  </header>
  <hr>
  {content}
  <div class="footer">
    <div class="meta">
      <span class="pill">Database: <code>{DATABASE_NAME}</code></span>
      <span class="pill">Rust + axum + PostgreSQL</span>
    </div>
  </div>
</body>
</html>"#,
        title = escape_html(title),
    )
}

/// Renders rows as a table with the page's column labels, or a muted "No results."
/// paragraph when there are none.
pub fn table(rows: &[ReportRow], shape: &TableSpec) -> String {
    if rows.is_empty() {
        return "<p class='muted'>No results.</p>".to_string();
    }

    let align = |numeric: bool| if numeric { "right" } else { "" };

    let mut html = format!(
        r#"<table role="table" aria-label="{}"><thead><tr>"#,
        escape_html(shape.aria_label)
    );
    for column in shape.columns {
        let _ = write!(
            html,
            r#"<th scope="col" class="{}">{}</th>"#,
            align(column.numeric),
            escape_html(column.label)
        );
    }
    html.push_str("</tr></thead><tbody>");

    for row in rows {
        html.push_str("<tr>");
        for column in shape.columns {
            let value = row.get(column.name).map(ToString::to_string).unwrap_or_default();
            let _ = write!(
                html,
                r#"<td class="{}">{}</td>"#,
                align(column.numeric),
                escape_html(&value)
            );
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

pub fn home_page() -> String {
    let content = r#"
  <h1>CM3010 Stage 4 Web App</h1>
  <p class="muted">Presents stock price and volume analysis computed by SQL queries over the price history of every tracked ticker.</p>
  <div class="card">
    <h2>Motivation / Questions</h2>
    <ul>
      <li>How many records per company and what date range is covered?</li>
      <li>Which stock has the highest overall return over the dataset window?</li>
      <li>Which stock shows the highest day-to-day volatility?</li>
      <li>Which stock has the highest average trading volume?</li>
      <li>How do average closing prices compare across companies?</li>
    </ul>
    <p class="muted">Use the navigation bar to view the SQL query outputs, or <a href="/explore">explore</a> a single ticker.</p>
  </div>"#;
    layout("CM3010 Stage 4", content, "/")
}

pub fn report_page(page: &ReportPage, rows: &[ReportRow]) -> String {
    let content = format!(
        r#"
  <h1>{heading}</h1>
  <div class="card">
    <p class="muted">{description}</p>
    {table}
  </div>"#,
        heading = escape_html(page.heading),
        description = escape_html(page.description),
        table = table(rows, &page.table),
    );
    layout(page.title, &content, page.kind.path())
}

/// The Explore page: the parameter form, a caption of what is shown, and the
/// result table. `query` is `None` when there is no ticker to explore.
pub fn explore_page(tickers: &[String], query: Option<&ExploreQuery>, rows: &[ReportRow]) -> String {
    let current_ticker = query.map(|q| q.ticker.as_str());
    let days = query.map(|q| q.days).unwrap_or_default();
    let mode = query.map(|q| q.mode).unwrap_or_default();

    let mut ticker_options = String::new();
    if let Some(current) = current_ticker.filter(|t| !tickers.iter().any(|known| known == t)) {
        let current = escape_html(current);
        let _ = write!(ticker_options, r#"<option value="{current}" selected>{current}</option>"#);
    }
    for ticker in tickers {
        let selected = if Some(ticker.as_str()) == current_ticker { " selected" } else { "" };
        let ticker = escape_html(ticker);
        let _ = write!(ticker_options, r#"<option value="{ticker}"{selected}>{ticker}</option>"#);
    }

    let mut mode_options = String::new();
    for (value, label) in [(ExploreMode::Prices, "Daily prices"), (ExploreMode::Stats, "Window stats")] {
        let selected = if value == mode { " selected" } else { "" };
        let _ = write!(mode_options, r#"<option value="{value}"{selected}>{label}</option>"#);
    }

    let (caption, table_html) = match query {
        Some(query) => {
            let columns = match query.mode {
                ExploreMode::Prices => &pages::EXPLORE_PRICES,
                ExploreMode::Stats => &pages::EXPLORE_STATS,
            };
            (
                format!(
                    "<h2>{} · last {} trading days · {}</h2>",
                    escape_html(&query.ticker),
                    query.days,
                    query.mode
                ),
                table(rows, columns),
            )
        }
        None => (String::new(), table(&[], &pages::EXPLORE_PRICES)),
    };

    let content = format!(
        r#"
  <h1>Explore</h1>
  <p class="muted">Pick a ticker and a window of {min}–{max} trading days.</p>
  <form class="card explore" method="get" action="/explore">
    <label>Ticker <select name="ticker">{ticker_options}</select></label>
    <label>Days <input type="number" name="days" min="{min}" max="{max}" value="{days}"></label>
    <label>Mode <select name="mode">{mode_options}</select></label>
    <button type="submit">Show</button>
  </form>
  <div class="card">
    {caption}
    {table_html}
  </div>"#,
        min = DayWindow::MIN,
        max = DayWindow::MAX,
    );
    layout("Explore", &content, "/explore")
}

/// The page shown with a 500 status. `message` is escaped here.
pub fn error_page(message: &str) -> String {
    let content = format!("<h1>Error</h1><pre>{}</pre>", escape_html(message));
    layout("Error", &content, "")
}

pub fn not_found_page(path: &str) -> String {
    let content = format!(
        r#"<h1>Not Found</h1><p class="muted">Nothing lives at <code>{}</code>.</p>"#,
        escape_html(path)
    );
    layout("Not Found", &content, "")
}
