use super::id::{ArtistId, Id};
use serde::Deserialize;

/// An artist as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artist {
    id: Id<'static, ArtistId>,
    name: String,
    #[serde(default)]
    genres: Vec<String>,
}

impl Artist {
    pub fn id(&self) -> &Id<'static, ArtistId> {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }
}
