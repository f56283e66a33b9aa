use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{Cell as TableCell, CellAlignment, Table};
use configuration::{ServerArgs, Settings};
use core_types::{ExploreQuery, ReportKind, ReportRow};
use database::{ReportRepository, ReportSource};

/// The main entry point for the stock dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_settings().context("Failed to load settings")?;
    // Held until exit so buffered file logs are flushed.
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            settings.apply_server_args(&args);
            web_server::run_server(&settings).await
        }
        Commands::Report(args) => handle_report(args, &settings).await,
        Commands::Tickers => handle_tickers(&settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A server-rendered reporting dashboard over daily stock prices.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTML dashboard.
    Serve(ServerArgs),
    /// Run a single report and print it to the terminal.
    Report(ReportArgs),
    /// List the known tickers.
    Tickers,
}

#[derive(Parser)]
struct ReportArgs {
    /// Which report to run: summary, returns, volatility, volume, average or explore.
    report: ReportKind,

    /// Ticker to explore (defaults to the first known ticker).
    #[arg(long)]
    ticker: Option<String>,

    /// Trading days to explore; clamped to 5..=365.
    #[arg(long)]
    days: Option<String>,

    /// Explore mode: prices or stats.
    #[arg(long)]
    mode: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_report(args: ReportArgs, settings: &Settings) -> anyhow::Result<()> {
    let repository = ReportRepository::new(database::connect(&settings.database).await?);
    let result = fetch_report(&repository, &args).await;
    repository.close().await;
    let rows = result?;

    match args.format {
        OutputFormat::Table => println!("{}", render_table(&rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}

/// Runs the requested report. Explore flags go through the same validation as
/// the web form.
async fn fetch_report(
    repository: &ReportRepository,
    args: &ReportArgs,
) -> anyhow::Result<Vec<ReportRow>> {
    if args.report != ReportKind::Explore {
        return Ok(repository.fetch(args.report).await?);
    }

    let tickers = repository.tickers().await?;
    let Some(query) = ExploreQuery::resolve(
        args.ticker.as_deref(),
        args.days.as_deref(),
        args.mode.as_deref(),
        &tickers,
    ) else {
        return Ok(Vec::new());
    };
    tracing::info!(ticker = %query.ticker, days = query.days.get(), mode = %query.mode, "Exploring.");
    Ok(repository.explore(&query).await?.into_report_rows())
}

async fn handle_tickers(settings: &Settings) -> anyhow::Result<()> {
    let repository = ReportRepository::new(database::connect(&settings.database).await?);
    let result = repository.tickers().await;
    repository.close().await;

    for ticker in result? {
        println!("{ticker}");
    }
    Ok(())
}

/// Lays rows out as a terminal table, numbers right-aligned.
fn render_table(rows: &[ReportRow]) -> String {
    let Some(first) = rows.first() else {
        return "No results.".to_string();
    };

    let mut table = Table::new();
    table.set_header(first.columns());
    for row in rows {
        table.add_row(row.cells().map(|(_, cell)| {
            let aligned = TableCell::new(cell);
            if cell.is_numeric() {
                aligned.set_alignment(CellAlignment::Right)
            } else {
                aligned
            }
        }));
    }
    table.to_string()
}
