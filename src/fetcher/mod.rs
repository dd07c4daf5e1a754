//! Resource fetching.
//!
//! A [`ResourceSource`] returns the raw JSON body of one resource for one
//! channel. The HTTP implementation lives in [`http`]; tests substitute an
//! in-memory source.

pub mod http;

use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

pub use http::HttpFetcher;

/// The two resources published per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Stream,
    Channel,
}

impl ResourceKind {
    /// Path segment used by the upstream API.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ResourceKind::Stream => "streams",
            ResourceKind::Channel => "channels",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Anything that can produce the raw JSON for a channel resource.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    async fn fetch_resource(&self, kind: ResourceKind, id: &str) -> Result<Value, FetchError>;
}

/// Build `{base}/{kind}/{id}`. Identifiers are assumed path-safe.
pub fn resource_url(base: &str, kind: ResourceKind, id: &str) -> String {
    format!("{}/{}/{}", base.trim_end_matches('/'), kind.path_segment(), id)
}
