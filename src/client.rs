//! The Spotify client and the endpoints it exposes.
//!
//! Only the client credentials flow is supported: the access token is minted when the client is
//! built and used as-is until the process exits. There is no token refreshing and no reaction to
//! rate limiting; every non-success response surfaces as a typed [Error].

use crate::{
    error::{Error, Result},
    model::{
        album::Album,
        artist::Artist,
        error::AuthenticationErrorResponse,
        features::AudioFeatures,
        id::{AlbumId, ArtistId, Id, PlaylistId, TrackId},
        page::{self, PageFetcher, PageObject},
        track::{AlbumTrack, PlaylistItem},
    },
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use const_format::concatcp;
use log::{debug, error, warn};
use reqwest::{header, Client as AsyncClient, Method, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};

const API_BASE_URL: &str = "https://api.spotify.com/v1/";

const API_SEARCH_ENDPOINT: &str = concatcp!(API_BASE_URL, "search");
const API_AUDIO_FEATURES_ENDPOINT: &str = concatcp!(API_BASE_URL, "audio-features");

const ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com/";
const ACCOUNTS_API_TOKEN_ENDPOINT: &str = concatcp!(ACCOUNTS_BASE_URL, "api/token");

// playlist listings are requested with the largest page size the API allows
const PLAYLIST_TRACKS_PAGE_LIMIT: &str = "100";
const ARTIST_ALBUMS_LIMIT: &str = "50";

/// Builder for a [SpotifyClientWithSecret].
#[derive(Debug, Clone)]
pub struct SpotifyClientBuilder {
    client_id: String,
}

/// Intermediate builder state that has both halves of the application credentials and can perform
/// the client credentials flow.
#[derive(Clone)]
pub struct ClientSecretSpotifyClientBuilder {
    client_id: String,
    client_secret: String,
}

/// A Spotify client that has authenticated with the client credentials flow.
///
/// The access token it carries was minted when the client was built and is never refreshed.
#[derive(Clone)]
pub struct SpotifyClientWithSecret {
    http_client: AsyncClient,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ClientTokenResponse {
    access_token: String,

    // these fields aren't needed beyond logging the token grant
    token_type: String,
    expires_in: u32,
}

#[derive(Debug, Deserialize)]
struct AudioFeaturesResponse {
    audio_features: Vec<Option<AudioFeatures>>,
}

// the search endpoint nests each result kind under its own page; only artists are ever requested
#[derive(Debug, Deserialize)]
struct ArtistSearchResults {
    artists: Option<PageObject<Artist>>,
}

impl SpotifyClientBuilder {
    pub fn new<S>(client_id: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            client_id: client_id.into(),
        }
    }

    pub fn client_secret<S>(self, client_secret: S) -> ClientSecretSpotifyClientBuilder
    where
        S: Into<String>,
    {
        ClientSecretSpotifyClientBuilder {
            client_id: self.client_id,
            client_secret: client_secret.into(),
        }
    }
}

impl ClientSecretSpotifyClientBuilder {
    fn get_async_http_client(&self) -> AsyncClient {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&build_authorization_header(
                &self.client_id,
                &self.client_secret,
            ))
            // this can only fail if the header value contains non-ASCII characters, which cannot
            // happen since the given header value is in base64
            .expect("failed to insert authorization header into header map"),
        );

        AsyncClient::builder()
            .default_headers(default_headers)
            .build()
            // this can only fail due to a system error; there is no way to handle it gracefully
            .expect("failed to build HTTP client")
    }

    /// Performs the client credentials flow: the client ID and secret are exchanged for an access
    /// token, and the returned client uses that token for every request.
    pub async fn build(self) -> Result<SpotifyClientWithSecret> {
        debug!("Requesting access token for client credentials flow");
        let token_request_form = &[("grant_type", "client_credentials")];

        let http_client = self.get_async_http_client();
        let response = http_client
            .post(ACCOUNTS_API_TOKEN_ENDPOINT)
            .form(token_request_form)
            .send()
            .await?;

        let response = extract_authentication_error(response).await?;
        let token_response: ClientTokenResponse = response.json().await?;
        debug!(
            "Got {} token response for client credentials flow, expires in {} seconds",
            token_response.token_type, token_response.expires_in
        );

        Ok(SpotifyClientWithSecret {
            http_client,
            access_token: token_response.access_token,
        })
    }
}

impl SpotifyClientWithSecret {
    /// Returns every item in the playlist's track listing, in listing order.
    ///
    /// The listing is paginated; every page is fetched by following the page's `next` reference
    /// until the listing is exhausted. An error at any page fails the whole call with no partial
    /// listing. An empty playlist yields an empty list.
    pub async fn playlist_items(&self, playlist: Id<'_, PlaylistId>) -> Result<Vec<PlaylistItem>> {
        let endpoint = format!("{}playlists/{}/tracks", API_BASE_URL, playlist.as_str());
        let url = Url::parse_with_params(&endpoint, [("limit", PLAYLIST_TRACKS_PAGE_LIMIT)])
            .expect("failed to build playlist tracks URL");

        debug!("Fetching playlist tracks: {url}");
        page::collect_all_items(url, &mut JsonPageFetcher { client: self }).await
    }

    /// Fetches audio features for multiple tracks in one call.
    ///
    /// The response contains one entry per submitted ID, expected in submission order. An entry is
    /// `None` when Spotify has no analysis for that track; see
    /// [pair_tracks_with_features](crate::report::pair_tracks_with_features) for turning the
    /// entries into output records safely.
    pub async fn audio_features<'a, I>(&self, tracks: I) -> Result<Vec<Option<AudioFeatures>>>
    where
        I: IntoIterator<Item = Id<'a, TrackId>>,
    {
        let ids = tracks
            .into_iter()
            .map(|id| id.as_str().to_owned())
            .collect::<Vec<_>>()
            .join(",");

        let url = Url::parse_with_params(API_AUDIO_FEATURES_ENDPOINT, [("ids", ids.as_str())])
            .expect("failed to build audio features URL");

        debug!("Fetching audio features: {url}");
        let response: AudioFeaturesResponse = self.get_json(url).await?;
        Ok(response.audio_features)
    }

    /// Fetches audio features for a single track.
    pub async fn audio_features_for_track(&self, track: Id<'_, TrackId>) -> Result<AudioFeatures> {
        let endpoint = format!("{}/{}", API_AUDIO_FEATURES_ENDPOINT, track.as_str());
        let url = Url::parse(&endpoint).expect("failed to build audio features URL");

        debug!("Fetching audio features: {url}");
        let response = self.build_http_request(Method::GET, url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!("Got 404 Not Found to audio features call");
            return Err(Error::NonexistentTrack(track.as_str().to_owned()));
        }

        let response = error_for_spotify_status(response).await?;
        Ok(response.json().await?)
    }

    /// Searches for artists matching the keyword query. Returns the first page of results, which
    /// may be empty if nothing matched.
    pub async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>> {
        let limit = limit.to_string();
        let url = Url::parse_with_params(
            API_SEARCH_ENDPOINT,
            [("q", query), ("type", "artist"), ("limit", limit.as_str())],
        )
        .expect("failed to build search URL");

        debug!("Searching for artists: {url}");
        let results: ArtistSearchResults = self.get_json(url).await?;
        Ok(results.artists.map(PageObject::take_items).unwrap_or_default())
    }

    /// Returns the artist's albums, up to the first 50. Singles, compilations and appearances are
    /// not included.
    pub async fn artist_albums(&self, artist: Id<'_, ArtistId>) -> Result<Vec<Album>> {
        let endpoint = format!("{}artists/{}/albums", API_BASE_URL, artist.as_str());
        let url = Url::parse_with_params(
            &endpoint,
            [("include_groups", "album"), ("limit", ARTIST_ALBUMS_LIMIT)],
        )
        .expect("failed to build artist albums URL");

        debug!("Fetching artist albums: {url}");
        let page: PageObject<Album> = self.get_json(url).await?;
        Ok(page.take_items())
    }

    /// Returns the first page of the album's track listing.
    pub async fn album_tracks(&self, album: Id<'_, AlbumId>) -> Result<Vec<AlbumTrack>> {
        let endpoint = format!("{}albums/{}/tracks", API_BASE_URL, album.as_str());
        let url = Url::parse(&endpoint).expect("failed to build album tracks URL");

        debug!("Fetching album tracks: {url}");
        let page: PageObject<AlbumTrack> = self.get_json(url).await?;
        Ok(page.take_items())
    }

    fn build_http_request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, url)
            .bearer_auth(&self.access_token)
    }

    async fn get_json<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.build_http_request(Method::GET, url).send().await?;
        let response = error_for_spotify_status(response).await?;
        Ok(response.json().await?)
    }
}

struct JsonPageFetcher<'a> {
    client: &'a SpotifyClientWithSecret,
}

#[async_trait]
impl<T> PageFetcher<T> for JsonPageFetcher<'_>
where
    T: DeserializeOwned + Send,
{
    async fn fetch_page(&mut self, url: Url) -> Result<PageObject<T>> {
        self.client.get_json(url).await
    }
}

fn build_authorization_header(client_id: &str, client_secret: &str) -> String {
    let auth = format!("{client_id}:{client_secret}");
    format!("Basic {}", BASE64.encode(auth))
}

/// Takes a response for an authentication request and if its status is 400, parses its body as an
/// authentication error. On success returns the given response without modifying it.
async fn extract_authentication_error(response: reqwest::Response) -> Result<reqwest::Response> {
    if let StatusCode::BAD_REQUEST = response.status() {
        let error_response: AuthenticationErrorResponse = response.json().await?;
        Err(error_response.into_error())
    } else {
        error_for_spotify_status(response).await
    }
}

/// Turns a non-success response into a typed error carrying the status and the response body.
async fn error_for_spotify_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_default();
        error!("Got {status} response from Spotify: {message}");
        Err(Error::UnhandledSpotifyError(status.as_u16(), message))
    }
}
