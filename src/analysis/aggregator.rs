//! Per-channel aggregation.
//!
//! Interprets the raw stream and channel resources and merges them into
//! one [`AggregatedEntity`].

use crate::error::{AggregationError, FetchError};
use crate::fetcher::{ResourceKind, ResourceSource};
use crate::models::{
    AggregatedEntity, ChannelRecord, StreamRecord, StreamState, PLACEHOLDER_LOGO,
};
use serde_json::Value;
use tracing::debug;

/// Classify a stream resource body.
///
/// `stream: null` is a channel that is simply not broadcasting; a body
/// without a `stream` field belongs to a closed or unknown account.
pub fn interpret_stream(body: &Value) -> StreamState {
    match body.get("stream") {
        None => StreamState::AccountClosed,
        Some(Value::Null) => StreamState::TemporarilyOffline,
        Some(stream) => StreamState::Live {
            game: stream
                .get("game")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        },
    }
}

/// A string field, treating missing, non-string, and empty values alike.
fn text_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Normalize a channel resource body, filling in defaults.
///
/// Only a body that is not a JSON object is rejected; the proxy's
/// not-found body (with a numeric `status`) still yields a record.
pub fn interpret_channel(id: &str, body: &Value) -> Result<ChannelRecord, FetchError> {
    if !body.is_object() {
        return Err(FetchError::resource("channel body is not a JSON object"));
    }

    Ok(ChannelRecord {
        logo_url: text_field(body, "logo")
            .unwrap_or(PLACEHOLDER_LOGO)
            .to_string(),
        display_name: text_field(body, "display_name").unwrap_or(id).to_string(),
        profile_url: text_field(body, "url").unwrap_or_default().to_string(),
        status_text: text_field(body, "status").unwrap_or_default().to_string(),
    })
}

/// Fetch both resources for `id` concurrently and merge them.
///
/// Either fetch failing fails the whole entity.
pub async fn aggregate<S>(source: &S, id: &str) -> Result<AggregatedEntity, AggregationError>
where
    S: ResourceSource + ?Sized,
{
    let wrap = |cause: FetchError| AggregationError {
        id: id.to_string(),
        cause,
    };

    let (stream_body, channel_body) = tokio::try_join!(
        source.fetch_resource(ResourceKind::Stream, id),
        source.fetch_resource(ResourceKind::Channel, id),
    )
    .map_err(wrap)?;

    let state = interpret_stream(&stream_body);
    let channel = interpret_channel(id, &channel_body).map_err(wrap)?;
    debug!("{} is {:?}", id, state);

    Ok(AggregatedEntity::merge(
        id,
        StreamRecord::from(&state),
        channel,
    ))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted in-memory resource source shared by the analysis tests.

    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    pub struct ScriptedSource {
        responses: HashMap<(ResourceKind, String), (Duration, Result<Value, FetchError>)>,
        pub calls: AtomicUsize,
    }

    impl ScriptedSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, kind: ResourceKind, id: &str, body: Value) -> Self {
            self.responses
                .insert((kind, id.to_string()), (Duration::ZERO, Ok(body)));
            self
        }

        pub fn respond_after(
            mut self,
            kind: ResourceKind,
            id: &str,
            delay: Duration,
            body: Value,
        ) -> Self {
            self.responses.insert((kind, id.to_string()), (delay, Ok(body)));
            self
        }

        pub fn fail(mut self, kind: ResourceKind, id: &str, err: FetchError) -> Self {
            self.responses
                .insert((kind, id.to_string()), (Duration::ZERO, Err(err)));
            self
        }

        /// Register a channel with both resources.
        pub fn channel(self, id: &str, stream: Value, channel: Value) -> Self {
            self.respond(ResourceKind::Stream, id, stream)
                .respond(ResourceKind::Channel, id, channel)
        }
    }

    #[async_trait]
    impl ResourceSource for ScriptedSource {
        async fn fetch_resource(&self, kind: ResourceKind, id: &str) -> Result<Value, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay, result) = match self.responses.get(&(kind, id.to_string())) {
                Some(scripted) => scripted.clone(),
                None => (Duration::ZERO, Err(FetchError::HttpStatus { status: 404 })),
            };

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }
}
