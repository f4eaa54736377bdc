//! Contains objects that represent Spotify IDs.
//!
//! There are three forms of ID string this module can handle:
//! - URIs: `spotify:track:2pDPOMX0kWA7kcPBcDCQBu`
//! - URLs: `https://open.spotify.com/track/2pDPOMX0kWA7kcPBcDCQBu`. The URL may contain any query
//!   parameters.
//! - Bare IDs: `2pDPOMX0kWA7kcPBcDCQBu`
//!
//! The core [Id] is a transparent type-safe wrapper for a single Spotify ID. It is generic over
//! the kind of ID it contains using the type structs that implement the [ItemTypeId]-trait, such
//! as [TrackId] or [PlaylistId]. Attempting to parse an URL or URI of the wrong kind will fail:
//!
//! ```
//! # use vibescope::model::id::{Id, PlaylistId, TrackId};
//! let playlist =
//!     Id::<PlaylistId>::from_url("https://open.spotify.com/playlist/239iOV14rR7rToh6Onkgi8")
//!         .unwrap();
//! assert_eq!(playlist.as_str(), "239iOV14rR7rToh6Onkgi8");
//!
//! // the URL is for a playlist, but we're attempting to parse a track ID
//! assert!(Id::<TrackId>::from_url("https://open.spotify.com/playlist/239iOV14rR7rToh6Onkgi8")
//!     .is_err());
//! ```
//!
//! [Id] internally stores the originally given string in a [Cow], so it will borrow the input
//! string where possible and only allocate when an owned ID is explicitly asked for with
//! [`as_owned`](Id::as_owned).

use std::{borrow::Cow, fmt, marker::PhantomData};

use serde::{de, Deserialize};

use super::ItemType;
use crate::error::IdError;

const ID_LENGTH: usize = 22; // I hope Spotify never changes this length
const URL_PREFIX: &str = "https://open.spotify.com/";
const URI_PREFIX: &str = "spotify:";

mod private {
    pub trait Sealed {}
}

/// Used to signify a type that describes a kind of Spotify ID.
pub trait ItemTypeId: private::Sealed {
    /// The Spotify catalog item type this type corresponds to.
    const ITEM_TYPE: ItemType;
}

/// Common type that contains a single Spotify ID of a certain kind. The generic type parameter `T`
/// is used to signify which kind of ID it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id<'a, T>
where
    T: ItemTypeId,
{
    value: Cow<'a, str>,
    kind: IdKind,
    phantom: PhantomData<T>,
}

/// Specifies a kind of ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdKind {
    /// The ID is a Spotify URI. The field is the index of the ID in the original string.
    Uri(usize),
    /// The ID is a Spotify URL. The field is the index of the ID in the original string.
    Url(usize),
    /// The ID is a bare Spotify ID.
    Bare,
}

/// Signifies a track ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackId;

/// Signifies an artist ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistId;

/// Signifies an album ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumId;

/// Signifies a playlist ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistId;

impl private::Sealed for TrackId {}
impl private::Sealed for ArtistId {}
impl private::Sealed for AlbumId {}
impl private::Sealed for PlaylistId {}

impl ItemTypeId for TrackId {
    const ITEM_TYPE: ItemType = ItemType::Track;
}

impl ItemTypeId for ArtistId {
    const ITEM_TYPE: ItemType = ItemType::Artist;
}

impl ItemTypeId for AlbumId {
    const ITEM_TYPE: ItemType = ItemType::Album;
}

impl ItemTypeId for PlaylistId {
    const ITEM_TYPE: ItemType = ItemType::Playlist;
}

impl<'a, T> Id<'a, T>
where
    T: ItemTypeId,
{
    /// When calling this function, be absolutely sure the value matches the ID kind.
    fn new(value: Cow<'a, str>, kind: IdKind) -> Self {
        Self {
            value,
            kind,
            phantom: PhantomData,
        }
    }

    /// Parses a bare Spotify ID.
    pub fn from_bare<C>(bare: C) -> Result<Self, IdError>
    where
        C: Into<Cow<'a, str>>,
    {
        let bare: Cow<'a, str> = bare.into();

        if verify_valid_id(&bare) {
            Ok(Self::new(bare, IdKind::Bare))
        } else {
            Err(IdError::InvalidId(bare.to_string()))
        }
    }

    /// Parses a Spotify URI string (`spotify:<type>:<id>`).
    pub fn from_uri<C>(uri: C) -> Result<Self, IdError>
    where
        C: Into<Cow<'a, str>>,
    {
        let uri: Cow<'a, str> = uri.into();
        let (item_type, id_index) = parse_item_type_and_id_from_uri(&uri)?;

        if item_type == T::ITEM_TYPE {
            Ok(Self::new(uri, IdKind::Uri(id_index)))
        } else {
            Err(IdError::WrongItemType(item_type))
        }
    }

    /// Parses a Spotify URL (`https://open.spotify.com/<type>/<id>`). Any query parameters in the
    /// URL are ignored.
    pub fn from_url<C>(url: C) -> Result<Self, IdError>
    where
        C: Into<Cow<'a, str>>,
    {
        let url: Cow<'a, str> = url.into();
        let (item_type, id_index) = parse_item_type_and_id_from_url(&url)?;

        if item_type == T::ITEM_TYPE {
            Ok(Self::new(url, IdKind::Url(id_index)))
        } else {
            Err(IdError::WrongItemType(item_type))
        }
    }

    /// Parses any of the three supported ID forms: an URL, an URI or a bare ID.
    pub fn from_input<C>(input: C) -> Result<Self, IdError>
    where
        C: Into<Cow<'a, str>>,
    {
        let input: Cow<'a, str> = input.into();

        if input.starts_with(URI_PREFIX) {
            Self::from_uri(input)
        } else if input.starts_with(URL_PREFIX) {
            Self::from_url(input)
        } else {
            Self::from_bare(input)
        }
    }

    /// Returns this ID as a bare Spotify ID.
    pub fn as_str(&self) -> &str {
        match self.kind {
            IdKind::Uri(index) => &self.value[index..],
            IdKind::Url(index) => &self.value[index..index + ID_LENGTH],
            IdKind::Bare => &self.value,
        }
    }

    /// Returns a new Id that clones the value from this Id and owns it.
    pub fn as_owned(&self) -> Id<'static, T> {
        Id::new(Cow::Owned(self.value.clone().into_owned()), self.kind)
    }

    /// Returns a new Id that borrows from this Id.
    ///
    /// This function is primarily used to avoid double references; a value of type `&Id<'_, T>`
    /// can be tedious to work with.
    pub fn as_borrowed<'b>(&'b self) -> Id<'b, T> {
        Id::new(Cow::Borrowed(self.value.as_ref()), self.kind)
    }
}

impl<T> fmt::Display for Id<'_, T>
where
    T: ItemTypeId,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// IDs in API responses are always in the bare form
impl<'de, T> Deserialize<'de> for Id<'static, T>
where
    T: ItemTypeId,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Id::from_bare(value).map_err(de::Error::custom)
    }
}

fn parse_item_type_and_id_from_uri(uri: &str) -> Result<(ItemType, usize), IdError> {
    // a whole URI looks like: spotify:track:2pDPOMX0kWA7kcPBcDCQBu
    if let Some((item_type_str, id)) = uri
        .strip_prefix(URI_PREFIX)
        .and_then(|prefix_removed| prefix_removed.split_once(':'))
    {
        let item_type: ItemType = item_type_str.parse()?;

        if verify_valid_id(id) {
            // the ID is always at the end of the string
            Ok((item_type, uri.len() - ID_LENGTH))
        } else {
            Err(IdError::InvalidId(id.to_owned()))
        }
    } else {
        Err(IdError::MalformedString(uri.to_string()))
    }
}

fn parse_item_type_and_id_from_url(url: &str) -> Result<(ItemType, usize), IdError> {
    // a whole URL could look like: https://open.spotify.com/track/3mXLyNsVeLelMakgpGUp1f?si=AAAA
    if let Some((item_type_str, id)) = url
        // remove the leading domain
        .strip_prefix(URL_PREFIX)
        // split by / to get "track" and "3mXLyNsVeLelMakgpGUp1f?si=AAAA"
        .and_then(|prefix_removed| prefix_removed.split_once('/'))
        // remove the possible query from the path to get just the ID
        .map(|(item_type_str, id_with_possible_query)| {
            let id = id_with_possible_query
                .split_once('?')
                .map_or(id_with_possible_query, |(id, _)| id);
            (item_type_str, id)
        })
    {
        let item_type: ItemType = item_type_str.parse()?;

        if verify_valid_id(id) {
            // the position of the ID in the string is the domain + the item type + /
            Ok((item_type, URL_PREFIX.len() + item_type_str.len() + 1))
        } else {
            Err(IdError::InvalidId(id.to_owned()))
        }
    } else {
        Err(IdError::MalformedString(url.to_string()))
    }
}

fn verify_valid_id(id: &str) -> bool {
    // Spotify IDs are base-62 strings and they look like 3mXLyNsVeLelMakgpGUp1f
    if id.len() != ID_LENGTH {
        return false;
    }

    for c in id.chars() {
        if !c.is_ascii_alphabetic() && !c.is_ascii_digit() {
            return false;
        }
    }

    true
}
