//! Visibility filtering over an aggregated roster.

use crate::models::{AggregatedEntity, FilterMode};

/// Keep the entities visible under `mode`, preserving order.
pub fn filter(set: &[AggregatedEntity], mode: FilterMode) -> Vec<AggregatedEntity> {
    set.iter().filter(|e| mode.admits(e)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChannelRecord, Liveness, StreamRecord, StreamState, PLACEHOLDER_LOGO};

    fn entity(id: &str, state: StreamState) -> AggregatedEntity {
        AggregatedEntity::merge(
            id,
            StreamRecord::from(&state),
            ChannelRecord {
                logo_url: PLACEHOLDER_LOGO.to_string(),
                display_name: id.to_string(),
                profile_url: format!("https://www.twitch.tv/{}", id),
                status_text: "status".to_string(),
            },
        )
    }

    fn live(game: &str) -> StreamState {
        StreamState::Live {
            game: game.to_string(),
        }
    }

    fn roster() -> Vec<AggregatedEntity> {
        vec![
            entity("ESL_SC2", live("StarCraft II")),
            entity("storbeck", StreamState::TemporarilyOffline),
            entity("brunofin", StreamState::AccountClosed),
            entity("freecodecamp", live("Programming")),
        ]
    }

    #[test]
    fn test_filter_all_is_identity() {
        let set = roster();
        assert_eq!(filter(&set, FilterMode::All), set);
    }

    #[test]
    fn test_filter_online_preserves_order() {
        let ids: Vec<_> = filter(&roster(), FilterMode::Online)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["ESL_SC2", "freecodecamp"]);
    }

    #[test]
    fn test_filter_offline_includes_closed_accounts() {
        let offline = filter(&roster(), FilterMode::Offline);
        assert_eq!(offline.len(), 2);
        assert!(offline.iter().all(|e| e.liveness == Liveness::Offline));
        assert!(offline.iter().all(|e| e.status_text.is_empty()));
        assert_eq!(offline[1].activity, "Account Closed");
    }

    #[test]
    fn test_online_and_offline_partition_the_set() {
        let set = roster();
        let online = filter(&set, FilterMode::Online);
        let offline = filter(&set, FilterMode::Offline);

        assert!(filter(&online, FilterMode::Offline).is_empty());
        assert!(filter(&offline, FilterMode::Online).is_empty());
        assert_eq!(online.len() + offline.len(), set.len());
    }

    #[test]
    fn test_filter_empty_set() {
        assert!(filter(&[], FilterMode::Online).is_empty());
    }
}
