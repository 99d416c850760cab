//! Campaign Tracker core: the campaign data model, the shared error surface,
//! and the two pure computations served over HTTP.
//!
//! - [`calculate_progress`]: percent complete, batch counters, next-batch
//!   countdown and estimated completion for one campaign.
//! - [`generate_chart_data`]: cumulative-message checkpoints, one per hour.
//!
//! Both functions take the current time as an argument and never read the
//! clock, so results are deterministic for a given `(campaign, now)`.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Bad inputs
//! (non-positive rates, timestamps in the future) degrade the result and are
//! logged instead of aborting the request.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod chart;
pub mod error;
pub mod model;
pub mod progress;
mod schedule;

pub use chart::generate_chart_data;
/// Shared result type.
pub use error::{ClientCode, Result, TrackerError};
pub use model::{Campaign, ChartData, ChartPoint, ProgressData, DEFAULT_PROCESSING_RATE_PER_HOUR};
pub use progress::calculate_progress;
