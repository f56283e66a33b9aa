//! # Dashboard Database Crate
//!
//! This crate is the query layer of the dashboard: a fixed catalog of read-only
//! analytical queries against the `Company` / `DailyPrice` tables.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. Callers get typed rows or generic
//!   [`core_types::ReportRow`]s and never see a query string.
//! - **Bounded inputs only:** The explore query accepts a validated
//!   [`core_types::ExploreQuery`]. The ticker is always bound as a parameter and
//!   the row limit can only come from a [`core_types::DayWindow`].
//! - **Explicit store handle:** The pool is created by [`connect`], passed into
//!   [`ReportRepository`] and closed by its owner at shutdown. There is no global
//!   connection state.
//!
//! ## Public API
//!
//! - `connect`: Builds the connection pool from `DatabaseSettings`.
//! - `ReportRepository`: Holds the pool and runs the report queries.
//! - `ReportSource`: The trait the web layer is written against.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod models;
pub mod repository;
pub mod source;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_options};
pub use error::DbError;
pub use models::{
    AverageRow, ExploreRows, PriceRow, ReturnRow, SummaryRow, VolatilityRow, VolumeRow,
    WindowStatsRow,
};
pub use repository::ReportRepository;
pub use source::ReportSource;
