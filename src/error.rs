use crate::model::{error::AuthenticationErrorKind, ItemType};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Client credentials not in environment: {0} is missing or empty")]
    MissingCredentials(&'static str),

    #[error("Authentication failed: {0:?}: {1}")]
    Authentication(AuthenticationErrorKind, String),

    #[error("The track doesn't exist: {0}")]
    NonexistentTrack(String),

    #[error("Submitted {submitted} track IDs to the audio features endpoint but the response contained {received} entries")]
    FeatureCountMismatch { submitted: usize, received: usize },

    #[error("Audio features for track {received} returned in the position of track {submitted}")]
    MispairedAudioFeatures { submitted: String, received: String },

    #[error("Unhandled API error {0}: {1}")]
    UnhandledSpotifyError(u16, String),

    #[error(transparent)]
    InvalidId(#[from] IdError),

    #[error(transparent)]
    InvalidSelection(#[from] SelectionError),

    #[error(transparent)]
    HttpError(#[from] reqwest::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// An error in a Spotify ID string.
#[derive(Debug, Error)]
pub enum IdError {
    /// The string doesn't look like a Spotify URL, URI or bare ID.
    #[error("Malformed ID string: {0}")]
    MalformedString(String),

    /// The ID segment of the string is not a valid Spotify ID.
    #[error("Invalid ID: {0}")]
    InvalidId(String),

    /// The string is a well-formed Spotify URL or URI, but for a different kind of item than
    /// expected.
    #[error("Wrong item type in ID string: {0}")]
    WrongItemType(ItemType),
}

/// An error in a numeric selection read from the user.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Selection is not a number: {0:?}")]
    NotANumber(String),

    #[error("Selection {selection} is out of range 1..={count}")]
    OutOfRange { selection: u64, count: usize },
}
