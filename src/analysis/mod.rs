//! Aggregation pipeline.
//!
//! Channel aggregation, the concurrent batch runner, and view filtering.

pub mod aggregator;
pub mod batch;
pub mod filter;

pub use aggregator::{aggregate, interpret_channel, interpret_stream};
pub use batch::{run_batch, AggregatedBatch, EntityOutcome};
pub use filter::filter;
