//! Batch runner.
//!
//! Aggregates every channel of a roster at once and keeps the outcome of
//! each one, so a single bad channel never blanks the rest of the view.

use crate::analysis::aggregator::aggregate;
use crate::error::{AggregationError, Cancelled};
use crate::fetcher::ResourceSource;
use crate::models::{AggregatedEntity, FailedChannel, RosterSummary};
use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Result of aggregating one channel.
pub type EntityOutcome = Result<AggregatedEntity, AggregationError>;

/// Per-channel outcomes in roster order.
#[derive(Debug, Clone)]
pub struct AggregatedBatch {
    outcomes: Vec<EntityOutcome>,
}

impl AggregatedBatch {
    pub fn new(outcomes: Vec<EntityOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[EntityOutcome] {
        &self.outcomes
    }

    /// Successfully aggregated channels, in roster order.
    pub fn entities(&self) -> Vec<AggregatedEntity> {
        self.outcomes
            .iter()
            .filter_map(|o| o.as_ref().ok())
            .cloned()
            .collect()
    }

    pub fn failures(&self) -> Vec<&AggregationError> {
        self.outcomes
            .iter()
            .filter_map(|o| o.as_ref().err())
            .collect()
    }

    /// Identifiers that failed, for the error banner.
    pub fn failed_ids(&self) -> Vec<&str> {
        self.failures().into_iter().map(|e| e.id.as_str()).collect()
    }

    pub fn failed_channels(&self) -> Vec<FailedChannel> {
        self.failures()
            .into_iter()
            .map(|e| FailedChannel {
                id: e.id.clone(),
                reason: e.cause.to_string(),
            })
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.is_err())
    }

    pub fn summary(&self) -> RosterSummary {
        RosterSummary::from_entities(&self.entities(), self.failures().len())
    }

    /// All-or-nothing view: the first failure in roster order wins.
    pub fn into_strict(self) -> Result<Vec<AggregatedEntity>, AggregationError> {
        self.outcomes.into_iter().collect()
    }
}

/// Aggregate every id concurrently.
///
/// All channels are started at once; the batch completes when the slowest
/// one settles. Cancelling `cancel` drops every in-flight fetch.
pub async fn run_batch<S>(
    source: &S,
    ids: &[String],
    cancel: &CancellationToken,
) -> Result<AggregatedBatch, Cancelled>
where
    S: ResourceSource + ?Sized,
{
    info!("Aggregating {} channels", ids.len());

    let fan_out = join_all(ids.iter().map(|id| async move {
        let outcome = aggregate(source, id).await;
        if let Err(ref e) = outcome {
            warn!("{}", e);
        }
        outcome
    }));

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("Batch cancelled before all channels settled");
            Err(Cancelled)
        }
        outcomes = fan_out => Ok(AggregatedBatch::new(outcomes)),
    }
}
