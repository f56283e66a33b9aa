//! # Dashboard Core Types
//!
//! The shared vocabulary of the dashboard: which reports exist, what a
//! rendered row looks like, and the validated request parameters that are
//! allowed to reach the query layer.
//!
//! This crate is pure logic with no knowledge of the store or HTTP. Anything
//! user-controlled passes through [`params`] before it gets anywhere near SQL.

pub mod enums;
pub mod error;
pub mod params;
pub mod report;

// Re-export the core types to provide a clean public API.
pub use enums::{ExploreMode, ReportKind};
pub use error::CoreError;
pub use params::{DayWindow, ExploreQuery, resolve_ticker};
pub use report::{Cell, ReportRow};
