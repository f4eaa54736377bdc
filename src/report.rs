//! Shaping fetched audio features into output records.

use crate::{
    error::{Error, Result},
    model::{features::AudioFeatures, track::IdentifiedTrack},
    util::duration_millis,
};
use serde::Serialize;
use std::{fmt, time::Duration};

/// One output record: a track title plus its audio feature attributes under their display labels.
///
/// The attribute values are copied from the fetched [AudioFeatures] as-is; only the keys change.
/// Serialized field order is fixed by declaration order: `songTitle` first, then the labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackFeatureRecord {
    #[serde(rename = "songTitle")]
    song_title: String,
    #[serde(flatten)]
    features: RecordFeatures,
}

/// The feature half of a record: either the full attribute set, or an explicit marker for tracks
/// Spotify has no analysis for. A record is never populated with partial data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum RecordFeatures {
    Available(ShapedFeatures),
    Unavailable {
        #[serde(rename = "featuresUnavailable")]
        features_unavailable: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct ShapedFeatures {
    #[serde(rename = "Acousticness")]
    acousticness: f64,
    #[serde(rename = "Danceability")]
    danceability: f64,
    #[serde(rename = "Duration", with = "duration_millis")]
    duration: Duration,
    #[serde(rename = "Energy")]
    energy: f64,
    #[serde(rename = "Valence")]
    valence: f64,
    #[serde(rename = "Tempo")]
    tempo: f64,
    #[serde(rename = "Speechiness")]
    speechiness: f64,
    #[serde(rename = "Mode")]
    mode: u32,
    #[serde(rename = "Loudness")]
    loudness: f64,
    #[serde(rename = "Liveness")]
    liveness: f64,
    #[serde(rename = "Key")]
    key: i32,
    #[serde(rename = "Instrumentalness")]
    instrumentalness: f64,
    #[serde(rename = "Time Signature")]
    time_signature: u32,
}

impl TrackFeatureRecord {
    /// Shapes a track title and its fetched features into a record.
    ///
    /// A `None` feature entry produces a record explicitly marked unavailable.
    pub fn new<S>(song_title: S, features: Option<AudioFeatures>) -> Self
    where
        S: Into<String>,
    {
        let features = match features {
            Some(features) => RecordFeatures::Available(ShapedFeatures {
                acousticness: features.acousticness,
                danceability: features.danceability,
                duration: features.duration,
                energy: features.energy,
                valence: features.valence,
                tempo: features.tempo,
                speechiness: features.speechiness,
                mode: features.mode,
                loudness: features.loudness,
                liveness: features.liveness,
                key: features.key,
                instrumentalness: features.instrumentalness,
                time_signature: features.time_signature,
            }),

            None => RecordFeatures::Unavailable {
                features_unavailable: true,
            },
        };

        Self {
            song_title: song_title.into(),
            features,
        }
    }

    pub fn song_title(&self) -> &str {
        &self.song_title
    }

    /// Whether this record carries feature values, as opposed to the unavailable marker.
    pub fn features_available(&self) -> bool {
        matches!(self.features, RecordFeatures::Available(_))
    }
}

impl fmt::Display for TrackFeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Audio features for '{}':", self.song_title)?;

        match &self.features {
            RecordFeatures::Available(features) => {
                writeln!(f, "Acousticness: {}", features.acousticness)?;
                writeln!(f, "Danceability: {}", features.danceability)?;
                writeln!(f, "Duration: {} ms", features.duration.as_millis())?;
                writeln!(f, "Energy: {}", features.energy)?;
                writeln!(f, "Valence: {}", features.valence)?;
                writeln!(f, "Tempo: {}", features.tempo)?;
                writeln!(f, "Speechiness: {}", features.speechiness)?;
                writeln!(f, "Mode: {}", features.mode)?;
                writeln!(f, "Loudness: {}", features.loudness)?;
                writeln!(f, "Liveness: {}", features.liveness)?;
                writeln!(f, "Key: {}", features.key)?;
                writeln!(f, "Instrumentalness: {}", features.instrumentalness)?;
                write!(f, "Time Signature: {}", features.time_signature)
            }

            RecordFeatures::Unavailable { .. } => write!(f, "(unavailable)"),
        }
    }
}

/// Pairs each identified track with its feature entry by position and shapes the pairs into
/// records.
///
/// The API is expected, but not documented, to return feature entries in the submitted ID order.
/// The pairing is therefore verified: the list lengths must match, and every present entry must
/// carry the same track ID it is being paired with. A violation fails the whole pairing with no
/// partial record list.
pub fn pair_tracks_with_features(
    tracks: &[IdentifiedTrack<'_>],
    features: Vec<Option<AudioFeatures>>,
) -> Result<Vec<TrackFeatureRecord>> {
    if tracks.len() != features.len() {
        return Err(Error::FeatureCountMismatch {
            submitted: tracks.len(),
            received: features.len(),
        });
    }

    tracks
        .iter()
        .zip(features)
        .map(|(track, features)| {
            if let Some(features) = &features {
                if features.track_id().as_str() != track.id.as_str() {
                    return Err(Error::MispairedAudioFeatures {
                        submitted: track.id.as_str().to_owned(),
                        received: features.track_id().as_str().to_owned(),
                    });
                }
            }

            Ok(TrackFeatureRecord::new(track.name.to_owned(), features))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{features::test_support::features_for, id::Id};

    const TRACK_A: &str = "2pDPOMX0kWA7kcPBcDCQBu";
    const TRACK_B: &str = "0871AdnvzzSGr5XdTJaDHC";

    fn identified(name: &'static str, id: &'static str) -> IdentifiedTrack<'static> {
        IdentifiedTrack {
            name,
            id: Id::from_bare(id).unwrap(),
        }
    }

    #[test]
    fn attributes_map_to_display_labels() {
        let record = TrackFeatureRecord::new("sunflower", Some(features_for(TRACK_A)));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["songTitle"], "sunflower");
        assert_eq!(value["Acousticness"], 0.5);
        assert_eq!(value["Tempo"], 120.0);
        assert_eq!(value["Mode"], 1);
        assert_eq!(value["Duration"], 202013);
        assert_eq!(value["Time Signature"], 4);
    }

    #[test]
    fn null_feature_entry_shapes_to_unavailable_marker() {
        let tracks = [identified("sunflower", TRACK_A), identified("pale machine", TRACK_B)];
        let features = vec![Some(features_for(TRACK_A)), None];

        let records = pair_tracks_with_features(&tracks, features).unwrap();

        assert!(records[0].features_available());
        assert!(!records[1].features_available());

        let value = serde_json::to_value(&records[1]).unwrap();
        assert_eq!(value["songTitle"], "pale machine");
        assert_eq!(value["featuresUnavailable"], true);
        assert!(value.get("Acousticness").is_none());
    }

    #[test]
    fn mismatched_list_lengths_fail_the_pairing() {
        let tracks = [identified("sunflower", TRACK_A), identified("pale machine", TRACK_B)];
        let features = vec![Some(features_for(TRACK_A))];

        let result = pair_tracks_with_features(&tracks, features);

        assert!(matches!(
            result,
            Err(Error::FeatureCountMismatch {
                submitted: 2,
                received: 1
            })
        ));
    }

    #[test]
    fn reordered_feature_entries_fail_the_pairing() {
        let tracks = [identified("sunflower", TRACK_A), identified("pale machine", TRACK_B)];
        let features = vec![Some(features_for(TRACK_B)), Some(features_for(TRACK_A))];

        let result = pair_tracks_with_features(&tracks, features);

        assert!(matches!(result, Err(Error::MispairedAudioFeatures { .. })));
    }

    #[test]
    fn display_renders_the_labelled_block() {
        let record = TrackFeatureRecord::new("sunflower", Some(features_for(TRACK_A)));
        let rendered = record.to_string();

        assert!(rendered.starts_with("Audio features for 'sunflower':"));
        assert!(rendered.contains("Tempo: 120"));
        assert!(rendered.contains("Duration: 202013 ms"));
        assert!(rendered.contains("Time Signature: 4"));
    }

    #[test]
    fn display_marks_unavailable_features() {
        let record = TrackFeatureRecord::new("pale machine", None);
        assert!(record.to_string().contains("(unavailable)"));
    }
}
