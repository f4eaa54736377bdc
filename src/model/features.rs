//! Per-track audio feature attributes.

use super::id::{Id, TrackId};
use crate::util::duration_millis;
use serde::Deserialize;
use std::time::Duration;

/// The audio feature attributes Spotify associates with a single track.
///
/// The batch endpoint returns these in the submitted ID order, with `null` in place of any track
/// that hasn't been analyzed; see
/// [audio_features](crate::client::SpotifyClientWithSecret::audio_features).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioFeatures {
    id: Id<'static, TrackId>,

    pub acousticness: f64,
    pub danceability: f64,
    #[serde(rename = "duration_ms", with = "duration_millis")]
    pub duration: Duration,
    pub energy: f64,
    pub valence: f64,
    pub tempo: f64,
    pub speechiness: f64,
    /// Modality of the track: 1 for major, 0 for minor.
    pub mode: u32,
    /// Overall loudness in decibels, typically between -60 and 0.
    pub loudness: f64,
    pub liveness: f64,
    /// The key the track is in, in pitch class notation. -1 when no key was detected.
    pub key: i32,
    pub instrumentalness: f64,
    /// Estimated time signature, from 3 to 7 over 4.
    pub time_signature: u32,
}

impl AudioFeatures {
    /// The ID of the track these features describe, as carried in the API response itself.
    pub fn track_id(&self) -> &Id<'static, TrackId> {
        &self.id
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_features_from_json() {
        let features: AudioFeatures = serde_json::from_str(
            r#"{
                "danceability": 0.735,
                "energy": 0.578,
                "key": 5,
                "loudness": -11.84,
                "mode": 0,
                "speechiness": 0.0461,
                "acousticness": 0.514,
                "instrumentalness": 0.0902,
                "liveness": 0.159,
                "valence": 0.636,
                "tempo": 98.002,
                "type": "audio_features",
                "id": "2pDPOMX0kWA7kcPBcDCQBu",
                "uri": "spotify:track:2pDPOMX0kWA7kcPBcDCQBu",
                "track_href": "https://api.spotify.com/v1/tracks/2pDPOMX0kWA7kcPBcDCQBu",
                "analysis_url": "https://api.spotify.com/v1/audio-analysis/2pDPOMX0kWA7kcPBcDCQBu",
                "duration_ms": 255349,
                "time_signature": 4
            }"#,
        )
        .unwrap();

        assert_eq!(features.track_id().as_str(), "2pDPOMX0kWA7kcPBcDCQBu");
        assert_eq!(features.danceability, 0.735);
        assert_eq!(features.mode, 0);
        assert_eq!(features.key, 5);
        assert_eq!(features.duration, Duration::from_millis(255349));
        assert_eq!(features.time_signature, 4);
    }
}
