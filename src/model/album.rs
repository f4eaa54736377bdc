use super::id::{AlbumId, Id};
use serde::Deserialize;

/// An album as returned by the artist albums endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Album {
    id: Id<'static, AlbumId>,
    name: String,
    release_date: Option<String>,
    total_tracks: u32,
}

impl Album {
    pub fn id(&self) -> &Id<'static, AlbumId> {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The album's release date. Depending on the release date precision this may be just a year
    /// or a year and a month.
    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }

    pub fn total_tracks(&self) -> u32 {
        self.total_tracks
    }
}
