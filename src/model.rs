pub mod album;
pub mod artist;
pub mod error;
pub mod features;
pub mod id;
pub(crate) mod page;
pub mod track;

use std::fmt;

/// The kinds of Spotify catalog items this crate deals with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Album,
    Artist,
    Playlist,
    Track,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Album => write!(f, "album"),
            ItemType::Artist => write!(f, "artist"),
            ItemType::Playlist => write!(f, "playlist"),
            ItemType::Track => write!(f, "track"),
        }
    }
}

impl std::str::FromStr for ItemType {
    type Err = crate::error::IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "album" => Ok(ItemType::Album),
            "artist" => Ok(ItemType::Artist),
            "playlist" => Ok(ItemType::Playlist),
            "track" => Ok(ItemType::Track),

            other => Err(crate::error::IdError::MalformedString(other.to_string())),
        }
    }
}
