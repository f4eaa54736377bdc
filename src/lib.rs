//! A minimal client for the Spotify Web API that covers everything the `playlist-features` and
//! `album-explorer` binaries need: the client credentials authorization flow, playlist track
//! listings, artist/album/track lookups and per-track audio features.
//!
//! The entrypoint is [SpotifyClientBuilder](client::SpotifyClientBuilder), which performs the
//! client credentials flow and hands back a
//! [SpotifyClientWithSecret](client::SpotifyClientWithSecret) with an access token already minted:
//!
//! ```no_run
//! # async fn example() -> vibescope::Result<()> {
//! use vibescope::{client::SpotifyClientBuilder, config::Credentials};
//!
//! let credentials = Credentials::from_env()?;
//! let client = SpotifyClientBuilder::new(credentials.client_id)
//!     .client_secret(credentials.client_secret)
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! The token is requested once when the client is built and used as-is for the lifetime of the
//! process. There is no token refreshing, no response caching and no retrying; every fallible
//! operation returns a typed [Error] for the caller to act on.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod selection;
pub(crate) mod util;

pub use crate::error::{Error, Result};
