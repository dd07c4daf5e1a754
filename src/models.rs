//! Data models for the channel roster.
//!
//! This module contains the records produced while aggregating a channel:
//! the interpreted stream state, the normalized channel metadata, and the
//! merged entity that the view layer renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logo shown for channels that do not publish one.
pub const PLACEHOLDER_LOGO: &str = "https://dummyimage.com/50x50/ecf0e7/5c5457.jpg&text=0x3F";

/// Binary online/offline classification of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Liveness {
    Online,
    Offline,
}

impl fmt::Display for Liveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Liveness::Online => write!(f, "online"),
            Liveness::Offline => write!(f, "offline"),
        }
    }
}

/// What the stream resource says about a channel.
///
/// A `null` stream and a missing stream field mean different things
/// upstream, so both are kept distinct here even though they share a
/// liveness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamState {
    /// Broadcasting; carries the game being played.
    Live { game: String },
    /// `stream: null`
    TemporarilyOffline,
    /// No `stream` field at all.
    AccountClosed,
}

impl StreamState {
    pub fn liveness(&self) -> Liveness {
        match self {
            StreamState::Live { .. } => Liveness::Online,
            StreamState::TemporarilyOffline | StreamState::AccountClosed => Liveness::Offline,
        }
    }

    /// Activity line shown next to the channel name.
    pub fn activity(&self) -> &str {
        match self {
            StreamState::Live { game } => game,
            StreamState::TemporarilyOffline => "Offline",
            StreamState::AccountClosed => "Account Closed",
        }
    }
}

/// Normalized stream resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRecord {
    pub activity: String,
    pub liveness: Liveness,
}

impl From<&StreamState> for StreamRecord {
    fn from(state: &StreamState) -> Self {
        Self {
            activity: state.activity().to_string(),
            liveness: state.liveness(),
        }
    }
}

/// Normalized channel resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub logo_url: String,
    pub display_name: String,
    pub profile_url: String,
    /// Channel status line; empty when the channel has none.
    pub status_text: String,
}

/// One channel after both resources have been merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedEntity {
    /// Identifier the entity was requested with.
    pub id: String,
    pub logo_url: String,
    pub display_name: String,
    pub profile_url: String,
    pub activity: String,
    pub liveness: Liveness,
    /// Always empty unless the channel is online.
    pub status_text: String,
}

impl AggregatedEntity {
    /// Merge a stream record with a channel record.
    pub fn merge(id: &str, stream: StreamRecord, channel: ChannelRecord) -> Self {
        let status_text = match stream.liveness {
            Liveness::Online => channel.status_text,
            Liveness::Offline => String::new(),
        };

        Self {
            id: id.to_string(),
            logo_url: channel.logo_url,
            display_name: channel.display_name,
            profile_url: channel.profile_url,
            activity: stream.activity,
            liveness: stream.liveness,
            status_text,
        }
    }

    pub fn is_online(&self) -> bool {
        self.liveness == Liveness::Online
    }

    /// Activity plus the status line, as shown in a channel row.
    pub fn headline(&self) -> String {
        if self.status_text.is_empty() {
            self.activity.clone()
        } else {
            format!("{}: {}", self.activity, self.status_text)
        }
    }
}

/// Which channels a view shows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every channel (default)
    #[default]
    All,
    /// Only channels that are live
    Online,
    /// Only channels that are offline or closed
    Offline,
}

impl FilterMode {
    /// Whether an entity is visible under this mode.
    pub fn admits(&self, entity: &AggregatedEntity) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Online => entity.liveness == Liveness::Online,
            FilterMode::Offline => entity.liveness == Liveness::Offline,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::All => write!(f, "all"),
            FilterMode::Online => write!(f, "online"),
            FilterMode::Offline => write!(f, "offline"),
        }
    }
}

/// A channel that could not be aggregated, as shown in the error banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedChannel {
    pub id: String,
    pub reason: String,
}

/// Counts over a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSummary {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub failed: usize,
}

impl RosterSummary {
    /// Summarize the aggregated entities plus the number of failures.
    pub fn from_entities(entities: &[AggregatedEntity], failed: usize) -> Self {
        let online = entities.iter().filter(|e| e.is_online()).count();

        Self {
            total: entities.len() + failed,
            online,
            offline: entities.len() - online,
            failed,
        }
    }
}

/// Metadata printed at the top of a rendered view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewMetadata {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub filter: FilterMode,
    pub duration_seconds: f64,
}

/// The rendered roster: visible channels plus failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelView {
    pub metadata: ViewMetadata,
    pub summary: RosterSummary,
    pub channels: Vec<AggregatedEntity>,
    pub failures: Vec<FailedChannel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(status: &str) -> ChannelRecord {
        ChannelRecord {
            logo_url: PLACEHOLDER_LOGO.to_string(),
            display_name: "Tester".to_string(),
            profile_url: "https://www.twitch.tv/tester".to_string(),
            status_text: status.to_string(),
        }
    }

    #[test]
    fn test_stream_state_classification() {
        let live = StreamState::Live {
            game: "StarCraft II".to_string(),
        };
        assert_eq!(live.liveness(), Liveness::Online);
        assert_eq!(live.activity(), "StarCraft II");

        assert_eq!(StreamState::TemporarilyOffline.liveness(), Liveness::Offline);
        assert_eq!(StreamState::TemporarilyOffline.activity(), "Offline");

        assert_eq!(StreamState::AccountClosed.liveness(), Liveness::Offline);
        assert_eq!(StreamState::AccountClosed.activity(), "Account Closed");
    }

    #[test]
    fn test_merge_keeps_status_when_online() {
        let stream = StreamRecord::from(&StreamState::Live {
            game: "Chess".to_string(),
        });
        let entity = AggregatedEntity::merge("tester", stream, channel("Ranked game"));

        assert!(entity.is_online());
        assert_eq!(entity.status_text, "Ranked game");
        assert_eq!(entity.headline(), "Chess: Ranked game");
    }

    #[test]
    fn test_merge_suppresses_status_when_offline() {
        for state in [StreamState::TemporarilyOffline, StreamState::AccountClosed] {
            let entity =
                AggregatedEntity::merge("tester", StreamRecord::from(&state), channel("stale"));
            assert_eq!(entity.liveness, Liveness::Offline);
            assert_eq!(entity.status_text, "");
            assert_eq!(entity.headline(), state.activity());
        }
    }

    #[test]
    fn test_filter_mode_admits() {
        let online = AggregatedEntity::merge(
            "a",
            StreamRecord::from(&StreamState::Live {
                game: "Chess".to_string(),
            }),
            channel(""),
        );
        let offline = AggregatedEntity::merge(
            "b",
            StreamRecord::from(&StreamState::AccountClosed),
            channel(""),
        );

        assert!(FilterMode::All.admits(&online) && FilterMode::All.admits(&offline));
        assert!(FilterMode::Online.admits(&online));
        assert!(!FilterMode::Online.admits(&offline));
        assert!(FilterMode::Offline.admits(&offline));
        assert!(!FilterMode::Offline.admits(&online));
    }

    #[test]
    fn test_roster_summary() {
        let entities = vec![
            AggregatedEntity::merge(
                "a",
                StreamRecord::from(&StreamState::Live {
                    game: "Chess".to_string(),
                }),
                channel(""),
            ),
            AggregatedEntity::merge(
                "b",
                StreamRecord::from(&StreamState::TemporarilyOffline),
                channel(""),
            ),
        ];

        let summary = RosterSummary::from_entities(&entities, 1);
        assert_eq!(
            summary,
            RosterSummary {
                total: 3,
                online: 1,
                offline: 1,
                failed: 1,
            }
        );
    }

    #[test]
    fn test_liveness_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Liveness::Online).unwrap(),
            "\"online\""
        );
        assert_eq!(FilterMode::Offline.to_string(), "offline");
    }
}
