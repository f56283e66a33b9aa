use crate::error::DbError;
use crate::models::{AverageRow, ExploreRows, ReturnRow, SummaryRow, VolatilityRow, VolumeRow};
use crate::repository::ReportRepository;
use core_types::{ExploreQuery, ReportKind, ReportRow};
use std::future::Future;

/// Anything that can answer the dashboard's report queries.
///
/// [`ReportRepository`] is the production implementation. The web layer is
/// generic over this trait so its routes can run against an in-memory source.
pub trait ReportSource: Clone + Send + Sync + 'static {
    fn tickers(&self) -> impl Future<Output = Result<Vec<String>, DbError>> + Send;

    fn summary(&self) -> impl Future<Output = Result<Vec<SummaryRow>, DbError>> + Send;

    fn returns(&self) -> impl Future<Output = Result<Vec<ReturnRow>, DbError>> + Send;

    fn volatility(&self) -> impl Future<Output = Result<Vec<VolatilityRow>, DbError>> + Send;

    fn volume(&self) -> impl Future<Output = Result<Vec<VolumeRow>, DbError>> + Send;

    fn average(&self) -> impl Future<Output = Result<Vec<AverageRow>, DbError>> + Send;

    fn explore(
        &self,
        query: &ExploreQuery,
    ) -> impl Future<Output = Result<ExploreRows, DbError>> + Send;

    /// Runs a report by kind and returns generic rows.
    ///
    /// `Explore` uses the default parameters: the first known ticker, the
    /// default window, prices mode.
    fn fetch(&self, kind: ReportKind) -> impl Future<Output = Result<Vec<ReportRow>, DbError>> + Send {
        async move {
            let rows = match kind {
                ReportKind::Summary => into_rows(self.summary().await?),
                ReportKind::Returns => into_rows(self.returns().await?),
                ReportKind::Volatility => into_rows(self.volatility().await?),
                ReportKind::Volume => into_rows(self.volume().await?),
                ReportKind::Average => into_rows(self.average().await?),
                ReportKind::Explore => {
                    let tickers = self.tickers().await?;
                    match ExploreQuery::resolve(None, None, None, &tickers) {
                        Some(query) => self.explore(&query).await?.into_report_rows(),
                        None => Vec::new(),
                    }
                }
            };
            Ok(rows)
        }
    }
}

fn into_rows<T: Into<ReportRow>>(rows: Vec<T>) -> Vec<ReportRow> {
    rows.into_iter().map(Into::into).collect()
}

impl ReportSource for ReportRepository {
    async fn tickers(&self) -> Result<Vec<String>, DbError> {
        ReportRepository::tickers(self).await
    }

    async fn summary(&self) -> Result<Vec<SummaryRow>, DbError> {
        ReportRepository::summary(self).await
    }

    async fn returns(&self) -> Result<Vec<ReturnRow>, DbError> {
        ReportRepository::returns(self).await
    }

    async fn volatility(&self) -> Result<Vec<VolatilityRow>, DbError> {
        ReportRepository::volatility(self).await
    }

    async fn volume(&self) -> Result<Vec<VolumeRow>, DbError> {
        ReportRepository::volume(self).await
    }

    async fn average(&self) -> Result<Vec<AverageRow>, DbError> {
        ReportRepository::average(self).await
    }

    async fn explore(&self, query: &ExploreQuery) -> Result<ExploreRows, DbError> {
        ReportRepository::explore(self, query).await
    }
}
