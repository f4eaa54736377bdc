//! Client credentials sourced from the environment.

use crate::error::{Error, Result};
use std::{env, fmt};

const CLIENT_ID_VAR: &str = "CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";

/// A Spotify application's client ID and secret.
///
/// The credentials are read once at startup and consumed by
/// [SpotifyClientBuilder](crate::client::SpotifyClientBuilder) to mint an access token. The secret
/// never appears in log output; the [Debug](fmt::Debug) representation redacts it.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    /// Reads the credentials from the `CLIENT_ID` and `CLIENT_SECRET` environment variables.
    ///
    /// A missing or empty variable is an error; proceeding with empty credentials would only
    /// surface later as an opaque authentication failure.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: non_empty_var(CLIENT_ID_VAR)?,
            client_secret: non_empty_var(CLIENT_SECRET_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

fn non_empty_var(var: &'static str) -> Result<String> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingCredentials(var)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // environment variables are process-wide, so the missing/empty/present cases run in one test
    // to avoid racing between test threads
    #[test]
    fn credentials_from_env() {
        env::remove_var(CLIENT_ID_VAR);
        env::remove_var(CLIENT_SECRET_VAR);
        assert!(matches!(
            Credentials::from_env(),
            Err(Error::MissingCredentials(CLIENT_ID_VAR))
        ));

        env::set_var(CLIENT_ID_VAR, "some-client-id");
        env::set_var(CLIENT_SECRET_VAR, "");
        assert!(matches!(
            Credentials::from_env(),
            Err(Error::MissingCredentials(CLIENT_SECRET_VAR))
        ));

        env::set_var(CLIENT_SECRET_VAR, "some-client-secret");
        let credentials = Credentials::from_env().unwrap();
        assert_eq!(credentials.client_id, "some-client-id");
        assert_eq!(credentials.client_secret, "some-client-secret");
    }

    #[test]
    fn debug_redacts_the_secret() {
        let credentials = Credentials {
            client_id: "some-client-id".to_owned(),
            client_secret: "some-client-secret".to_owned(),
        };

        let debug = format!("{:?}", credentials);
        assert!(debug.contains("some-client-id"));
        assert!(!debug.contains("some-client-secret"));
    }
}
