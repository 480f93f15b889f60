use crate::{Error, Result};

use std::str::FromStr;
use url::Url;

/// Header carrying the application token when the connection string does not
/// name one.
pub const DEFAULT_AUTH_HEADER: &str = "Token";

/// A parsed connection string.
///
/// The format is
/// `scheme://host[:port]/[subpath/]<keyspace>?applicationToken=<token>&authHeaderName=<name>`.
/// The last path segment is always the keyspace; the segments before it form
/// the API path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUrl {
    /// `scheme://host[:port]`, without a trailing slash
    pub base: String,

    /// Segments between the host and the keyspace, joined by `/`. May be
    /// empty.
    pub api_path: String,

    pub keyspace: String,

    pub application_token: Option<String>,

    pub auth_header_name: Option<String>,
}

impl ConnectionUrl {
    pub fn parse(s: &str) -> Result<ConnectionUrl> {
        let url = Url::parse(s).map_err(|err| Error::invalid_connection_url(err.to_string()))?;

        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(Error::invalid_connection_url(format!(
                "`{s}` has no host"
            )));
        }

        let mut segments = url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let Some(keyspace) = segments.pop() else {
            return Err(Error::invalid_connection_url(
                "missing keyspace; the last path segment names the keyspace",
            ));
        };

        let mut application_token = None;
        let mut auth_header_name = None;

        for (key, value) in url.query_pairs() {
            match &*key {
                "applicationToken" => {
                    if application_token.replace(value.into_owned()).is_some() {
                        return Err(Error::invalid_connection_url(
                            "multiple application tokens",
                        ));
                    }
                }
                "authHeaderName" => {
                    if auth_header_name.replace(value.into_owned()).is_some() {
                        return Err(Error::invalid_connection_url(
                            "multiple authHeaderName parameters",
                        ));
                    }
                }
                other => {
                    tracing::trace!(parameter = other, "ignoring connection string parameter");
                }
            }
        }

        let mut base = url.clone();
        base.set_path("");
        base.set_query(None);
        base.set_fragment(None);

        Ok(ConnectionUrl {
            base: base.as_str().trim_end_matches('/').to_string(),
            api_path: segments.join("/"),
            keyspace,
            application_token,
            auth_header_name,
        })
    }

    /// The header name the token is sent in.
    pub fn auth_header_name(&self) -> &str {
        self.auth_header_name
            .as_deref()
            .unwrap_or(DEFAULT_AUTH_HEADER)
    }

    /// URL of the API root, used for keyspace administration.
    pub fn api_url(&self) -> String {
        if self.api_path.is_empty() {
            self.base.clone()
        } else {
            format!("{}/{}", self.base, self.api_path)
        }
    }

    /// URL of `keyspace`, or of a collection or table within it.
    pub fn keyspace_url(&self, keyspace: &str, collection: Option<&str>) -> String {
        match collection {
            Some(collection) => format!("{}/{keyspace}/{collection}", self.api_url()),
            None => format!("{}/{keyspace}", self.api_url()),
        }
    }
}

impl FromStr for ConnectionUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ConnectionUrl::parse(s)
    }
}
