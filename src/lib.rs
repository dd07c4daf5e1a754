//! Channelwatch - live/offline status for a roster of Twitch channels.
//!
//! For each tracked channel the stream and channel resources are fetched
//! concurrently and merged into one [`AggregatedEntity`]. A whole roster
//! is aggregated with [`run_batch`], which keeps a separate outcome per
//! channel, and narrowed for display with [`filter`].

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod report;

pub use analysis::{filter, run_batch, AggregatedBatch, EntityOutcome};
pub use error::{AggregationError, Cancelled, FetchError};
pub use fetcher::{HttpFetcher, ResourceKind, ResourceSource};
pub use models::{AggregatedEntity, FilterMode, Liveness, StreamState};
