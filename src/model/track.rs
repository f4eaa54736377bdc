//! Everything related to tracks.

use super::id::{Id, TrackId};
use crate::util::duration_millis;
use serde::Deserialize;
use std::time::Duration;

/// One entry in a playlist's track listing.
///
/// The entry wraps the actual track, which may be absent: Spotify returns `null` for tracks that
/// are no longer available. A local file in the playlist has a track but no ID.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaylistItem {
    track: Option<PlaylistTrack>,
}

/// The track wrapped by a [PlaylistItem].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaylistTrack {
    id: Option<Id<'static, TrackId>>,
    name: String,
}

/// A track in an album's track listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlbumTrack {
    id: Id<'static, TrackId>,
    name: String,
    track_number: u32,
    #[serde(rename = "duration_ms", with = "duration_millis")]
    duration: Duration,
}

/// A playlist track that is known to have an ID, paired with its title.
///
/// The title travels with the ID from the moment the playlist items are filtered, so shaped
/// records can never pair a title with some other track's features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedTrack<'a> {
    pub name: &'a str,
    pub id: Id<'a, TrackId>,
}

impl PlaylistItem {
    pub fn track(&self) -> Option<&PlaylistTrack> {
        self.track.as_ref()
    }
}

impl PlaylistTrack {
    pub fn id(&self) -> Option<&Id<'static, TrackId>> {
        self.id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl AlbumTrack {
    pub fn id(&self) -> &Id<'static, TrackId> {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn track_number(&self) -> u32 {
        self.track_number
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Filters a playlist's items down to the tracks that can be submitted to the audio features
/// endpoint: items that wrap a track, and whose track has an ID. Order is preserved.
pub fn identified_tracks(items: &[PlaylistItem]) -> Vec<IdentifiedTrack<'_>> {
    items
        .iter()
        .filter_map(|item| item.track())
        .filter_map(|track| {
            track.id().map(|id| IdentifiedTrack {
                name: track.name(),
                id: id.as_borrowed(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<PlaylistItem> {
        serde_json::from_str(
            r#"[
                {"track": {"id": "2pDPOMX0kWA7kcPBcDCQBu", "name": "sunflower"}},
                {"track": null},
                {"track": {"id": null, "name": "local file"}},
                {"track": {"id": "0871AdnvzzSGr5XdTJaDHC", "name": "pale machine"}}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn absent_tracks_and_ids_are_filtered_out() {
        let items = items();
        let identified = identified_tracks(&items);

        let ids: Vec<&str> = identified.iter().map(|track| track.id.as_str()).collect();
        assert_eq!(ids, vec!["2pDPOMX0kWA7kcPBcDCQBu", "0871AdnvzzSGr5XdTJaDHC"]);
    }

    #[test]
    fn titles_travel_with_their_ids() {
        let items = items();
        let identified = identified_tracks(&items);

        assert_eq!(identified[0].name, "sunflower");
        assert_eq!(identified[1].name, "pale machine");
    }

    #[test]
    fn album_track_from_json() {
        let track: AlbumTrack = serde_json::from_str(
            r#"{
                "id": "2pDPOMX0kWA7kcPBcDCQBu",
                "name": "Playing God",
                "track_number": 5,
                "duration_ms": 202013
            }"#,
        )
        .unwrap();

        assert_eq!(track.name(), "Playing God");
        assert_eq!(track.track_number(), 5);
        assert_eq!(track.duration(), Duration::from_millis(202013));
    }
}
